use actix_web::dev::Server;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{web, App, HttpServer, ResponseError};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use crate::blob_storage::BlobStorageClient;
use crate::config::{DatabaseSettings, Settings};
use crate::domain::validation::FieldError;
use crate::email_client::EmailClient;
use crate::routes::{
    handle_career_application, handle_cohort_stats, handle_cv_upload, handle_founder_application,
    handle_investor_application, handle_newsletter_subscription, health_check, CohortTarget,
};
use crate::store::{ApplicationStore, PgApplicationStore};
use crate::submissions::{SubmissionContext, SubmissionError};

// Pitch decks travel base64-encoded inside the JSON body
const MAX_JSON_BYTES: usize = 15 * 1024 * 1024;
const INVALID_JSON: &str = "Invalid JSON body";

pub struct Application {
    pub port: u16,
    pub server: Server,
}

#[derive(thiserror::Error, Debug)]
pub enum StartupError {
    #[error("Invalid email setting: {0}")]
    InvalidEmailSetting(String),
    #[error("Failed to build an HTTP client.")]
    HttpClient(#[from] reqwest::Error),
    #[error("Failed to start the server.")]
    Io(#[from] std::io::Error),
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, StartupError> {
        let db_pool = get_connection_db_pool(&config.database);
        let store = Arc::new(PgApplicationStore::new(db_pool));

        Self::build_with_store(config, store).await
    }

    /// Builds the server around any store, so the persistence layer can be swapped.
    pub async fn build_with_store(
        config: Settings,
        store: Arc<dyn ApplicationStore>,
    ) -> Result<Self, StartupError> {
        let sender_email = config
            .get_email_client_sender()
            .map_err(StartupError::InvalidEmailSetting)?;
        let admin_email = config
            .get_email_client_admin()
            .map_err(StartupError::InvalidEmailSetting)?;
        let email_client = EmailClient::new(
            config.get_email_client_base_url(),
            sender_email,
            config.get_email_client_api(),
            Some(config.get_email_client_timeout()),
        )?;
        let blob_storage = BlobStorageClient::new(
            config.get_blob_storage_base_url(),
            config.get_blob_storage_api(),
            Some(config.get_blob_storage_timeout()),
        )?;
        let ctx = SubmissionContext::new(
            store,
            Arc::new(email_client),
            Arc::new(blob_storage),
            admin_email,
        );

        let listener = TcpListener::bind(config.get_address())?;
        let port = listener.local_addr()?.port();
        let server = run(listener, ctx, CohortTarget(config.get_cohort_target()))?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stop(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    ctx: SubmissionContext,
    cohort_target: CohortTarget,
) -> Result<Server, std::io::Error> {
    let ctx = web::Data::new(ctx);
    let cohort_target = web::Data::new(cohort_target);

    let server = HttpServer::new(move || {
        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .app_data(json_config())
            .route("/health_check", web::get().to(health_check))
            .route(
                "/applications/founders",
                web::post().to(handle_founder_application),
            )
            .route(
                "/applications/investors",
                web::post().to(handle_investor_application),
            )
            .route(
                "/applications/careers",
                web::post().to(handle_career_application),
            )
            .route("/uploads/cv", web::post().to(handle_cv_upload))
            .route(
                "/newsletter/subscriptions",
                web::post().to(handle_newsletter_subscription),
            )
            .route("/cohort/stats", web::get().to(handle_cohort_stats))
            .app_data(ctx.clone())
            .app_data(cohort_target.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// Malformed JSON gets the same result object as a failed validation.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_JSON_BYTES)
        .error_handler(|err, _req| {
            tracing::warn!("Rejecting request body: {}", err);
            let error = match &err {
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    SubmissionError::TooLarge
                }
                _ => SubmissionError::Validation(
                    FieldError {
                        path: Vec::new(),
                        message: String::from(INVALID_JSON),
                    }
                    .into(),
                ),
            };
            let response = error.error_response();

            InternalError::from_response(err, response).into()
        })
}

pub fn get_connection_db_pool(config: &DatabaseSettings) -> Pool<Postgres> {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(config.get_db_options())
}
