use reqwest::Client;
use sqlx::PgPool;

use super::{CheckReport, CheckResult};

const ROUTES: [&str; 2] = ["/health_check", "/cohort/stats"];

#[tracing::instrument(name = "Checking database connectivity", skip(db_pool))]
pub async fn check_database(db_pool: &PgPool) -> CheckResult {
    match sqlx::query("SELECT 1").execute(db_pool).await {
        Ok(_) => CheckResult::pass("database", "connected"),
        Err(err) => CheckResult::fail("database", err.to_string()),
    }
}

#[tracing::instrument(name = "Checking route reachability", skip(client))]
pub async fn check_route(client: &Client, base_url: &str, path: &str) -> CheckResult {
    let name = format!("GET {}", path);

    match client.get(format!("{}{}", base_url, path)).send().await {
        Ok(response) if response.status().is_success() => {
            CheckResult::pass(&name, format!("status {}", response.status().as_u16()))
        }
        Ok(response) => CheckResult::fail(&name, format!("status {}", response.status().as_u16())),
        Err(err) => CheckResult::fail(&name, err.to_string()),
    }
}

pub async fn run_health_check(db_pool: &PgPool, client: &Client, base_url: &str) -> CheckReport {
    let mut report = CheckReport::new();

    report.push(check_database(db_pool).await);
    for path in ROUTES {
        report.push(check_route(client, base_url, path).await);
    }

    report
}
