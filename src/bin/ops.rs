use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::time::Duration;

use founder_match::config::get_configuration;
use founder_match::ops::{run_health_check, run_smoke_test, CheckReport};
use founder_match::startup::get_connection_db_pool;
use founder_match::telemetry::{get_subscriber, init_subscriber};

#[derive(Parser, Debug)]
#[command(
    name = "ops",
    about = "Verify a deployed instance of the lead-capture API",
    version
)]
struct Cli {
    /// Base URL of the running API, defaults to `application.base_url` from configuration
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check database connectivity and that the public routes answer
    HealthCheck,
    /// Submit and re-submit test records end-to-end, then delete them
    SmokeTest,
    /// Run the health check followed by the smoke test
    PostDeploy,
}

#[tokio::main]
async fn main() -> ExitCode {
    let subscriber = get_subscriber(String::from("ops"), String::from("warn"), std::io::stderr);
    if let Err(err) = init_subscriber(subscriber) {
        eprintln!("Failed to initialise logging: {}", err);
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();
    let config = match get_configuration() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Failed to build HTTP client: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let base_url = cli.base_url.unwrap_or_else(|| config.get_app_base_url());
    let db_pool = get_connection_db_pool(&config.database);

    let report = match cli.command {
        Command::HealthCheck => run_health_check(&db_pool, &client, &base_url).await,
        Command::SmokeTest => run_smoke_test(&db_pool, &client, &base_url).await,
        Command::PostDeploy => {
            let mut report = CheckReport::new();
            report.merge(run_health_check(&db_pool, &client, &base_url).await);
            report.merge(run_smoke_test(&db_pool, &client, &base_url).await);
            report
        }
    };

    for check in report.checks() {
        println!("{}", check);
    }

    if report.all_passed() {
        println!("All checks passed against {}", base_url);
        ExitCode::SUCCESS
    } else {
        println!("Some checks failed against {}", base_url);
        ExitCode::FAILURE
    }
}
