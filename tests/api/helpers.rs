use async_trait::async_trait;
use chrono::Utc;
use reqwest::Response;
use secrecy::Secret;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use sqlx::{migrate, Connection, Executor, PgConnection, PgPool};
use std::fmt::Debug;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;
use wiremock::MockServer;

use founder_match::{
    config::{get_configuration, DatabaseSettings},
    domain::{
        career_application::{CareerApplication, NewCareerApplication},
        founder_application::{FounderApplication, NewFounderApplication},
        investor_application::{InvestorApplication, NewInvestorApplication},
        newsletter_subscription::{NewNewsletterSubscription, NewsletterSubscription},
    },
    startup::{get_connection_db_pool, Application},
    store::{ApplicationStore, StoreError},
    submissions::SubmissionOutcome,
};

/// Ways the in-memory store can be told to fail its writes and counts.
#[derive(Debug, Clone, Copy)]
pub enum Failure {
    ConnectionRefused,
    Timeout,
    ConstraintViolation,
}

impl Failure {
    fn into_error(self) -> StoreError {
        let err = match self {
            Failure::ConnectionRefused => sqlx::Error::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused by 10.0.0.5:5432",
            )),
            Failure::Timeout => sqlx::Error::PoolTimedOut,
            Failure::ConstraintViolation => sqlx::Error::Protocol(String::from(
                "new row violates check constraint \"founder_applications_sector_check\"",
            )),
        };

        StoreError::Database(err)
    }
}

/// Store with the same uniqueness rules as the Postgres schema.
#[derive(Default)]
pub struct InMemoryStore {
    pub founders: Mutex<Vec<FounderApplication>>,
    pub investors: Mutex<Vec<InvestorApplication>>,
    pub careers: Mutex<Vec<CareerApplication>>,
    pub subscriptions: Mutex<Vec<NewsletterSubscription>>,
    failure: Mutex<Option<Failure>>,
    // Makes every existence check miss, as when two requests race
    blind_lookups: AtomicBool,
}

impl InMemoryStore {
    pub fn fail_with(&self, failure: Failure) {
        *self.failure.lock().unwrap() = Some(failure);
    }

    pub fn blind_lookups(&self) {
        self.blind_lookups.store(true, Ordering::SeqCst);
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match *self.failure.lock().unwrap() {
            Some(failure) => Err(failure.into_error()),
            None => Ok(()),
        }
    }

    fn lookup<T: Clone>(&self, records: &Mutex<Vec<T>>, matches: impl Fn(&T) -> bool) -> Option<T> {
        if self.blind_lookups.load(Ordering::SeqCst) {
            return None;
        }

        records.lock().unwrap().iter().find(|r| matches(r)).cloned()
    }
}

#[async_trait]
impl ApplicationStore for InMemoryStore {
    async fn find_founder_application(
        &self,
        work_email: &str,
    ) -> Result<Option<FounderApplication>, StoreError> {
        Ok(self.lookup(&self.founders, |f| f.work_email == work_email))
    }

    async fn create_founder_application(
        &self,
        application: &NewFounderApplication,
        pitch_deck_url: Option<&str>,
    ) -> Result<FounderApplication, StoreError> {
        self.check_failure()?;
        let mut founders = self.founders.lock().unwrap();

        if founders
            .iter()
            .any(|f| f.work_email == application.work_email.as_ref())
        {
            return Err(StoreError::UniqueViolation);
        }

        let now = Utc::now();
        let founder = FounderApplication {
            id: Uuid::new_v4(),
            full_name: application.full_name.as_ref().to_string(),
            work_email: application.work_email.as_ref().to_string(),
            company_name: application.company_name.as_ref().to_string(),
            website: application.website.as_ref().to_string(),
            sector: application.sector.as_ref().to_vec(),
            other_founder_sector: application.other_founder_sector.clone(),
            funding_stage: application.funding_stage.as_ref().to_string(),
            location: application.location.as_ref().to_string(),
            short_pitch: application.short_pitch.as_ref().to_string(),
            pitch_deck_url: pitch_deck_url.map(String::from),
            created_at: now,
            updated_at: now,
        };
        founders.push(founder.clone());

        Ok(founder)
    }

    async fn find_investor_application(
        &self,
        work_email: &str,
    ) -> Result<Option<InvestorApplication>, StoreError> {
        Ok(self.lookup(&self.investors, |i| i.work_email == work_email))
    }

    async fn create_investor_application(
        &self,
        application: &NewInvestorApplication,
    ) -> Result<InvestorApplication, StoreError> {
        self.check_failure()?;
        let mut investors = self.investors.lock().unwrap();

        if investors
            .iter()
            .any(|i| i.work_email == application.work_email.as_ref())
        {
            return Err(StoreError::UniqueViolation);
        }

        let now = Utc::now();
        let investor = InvestorApplication {
            id: Uuid::new_v4(),
            full_name: application.full_name.as_ref().to_string(),
            work_email: application.work_email.as_ref().to_string(),
            company_name: application.company_name.as_ref().to_string(),
            title: application.title.as_ref().to_string(),
            investment_focus: application.investment_focus.as_ref().to_vec(),
            ticket_size: application.ticket_size.as_ref().to_string(),
            target_geography: application.target_geography.as_ref().to_vec(),
            referral_source: application.referral_source.as_ref().to_string(),
            other_source: application.other_source.clone(),
            created_at: now,
            updated_at: now,
        };
        investors.push(investor.clone());

        Ok(investor)
    }

    async fn find_career_application(
        &self,
        email: &str,
        position: &str,
    ) -> Result<Option<CareerApplication>, StoreError> {
        Ok(self.lookup(&self.careers, |c| c.email == email && c.position == position))
    }

    async fn create_career_application(
        &self,
        application: &NewCareerApplication,
    ) -> Result<CareerApplication, StoreError> {
        self.check_failure()?;
        let mut careers = self.careers.lock().unwrap();

        if careers.iter().any(|c| {
            c.email == application.email.as_ref() && c.position == application.position.as_ref()
        }) {
            return Err(StoreError::UniqueViolation);
        }

        let candidate = CareerApplication {
            id: Uuid::new_v4(),
            first_name: application.first_name.as_ref().to_string(),
            last_name: application.last_name.as_ref().to_string(),
            email: application.email.as_ref().to_string(),
            phone: application.phone.clone(),
            motivation: application.motivation.clone(),
            portfolio_url: application.portfolio_url.clone(),
            cv_url: application
                .cv_url
                .as_ref()
                .map(|url| AsRef::<str>::as_ref(url).to_string()),
            position: application.position.as_ref().to_string(),
            created_at: Utc::now(),
        };
        careers.push(candidate.clone());

        Ok(candidate)
    }

    async fn find_newsletter_subscription(
        &self,
        email: &str,
    ) -> Result<Option<NewsletterSubscription>, StoreError> {
        Ok(self.lookup(&self.subscriptions, |s| s.email == email))
    }

    async fn create_newsletter_subscription(
        &self,
        subscription: &NewNewsletterSubscription,
    ) -> Result<NewsletterSubscription, StoreError> {
        self.check_failure()?;
        let mut subscriptions = self.subscriptions.lock().unwrap();

        if subscriptions
            .iter()
            .any(|s| s.email == subscription.email.as_ref())
        {
            return Err(StoreError::UniqueViolation);
        }

        let subscriber = NewsletterSubscription {
            id: Uuid::new_v4(),
            email: subscription.email.as_ref().to_string(),
            name: subscription.name.clone(),
            source: subscription.source.clone(),
            created_at: Utc::now(),
        };
        subscriptions.push(subscriber.clone());

        Ok(subscriber)
    }

    async fn count_founder_applications(&self) -> Result<i64, StoreError> {
        self.check_failure()?;
        Ok(self.founders.lock().unwrap().len() as i64)
    }

    async fn count_investor_applications(&self) -> Result<i64, StoreError> {
        self.check_failure()?;
        Ok(self.investors.lock().unwrap().len() as i64)
    }
}

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
    pub email_server: MockServer,
    pub blob_server: MockServer,
    pub admin_email: String,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        let mut config = get_configuration().expect("Missing configuration file.");
        let email_server = MockServer::start().await;
        let blob_server = MockServer::start().await;
        let store = Arc::new(InMemoryStore::default());

        // We are using port 0 as way to define a different port per each test. Port 0 is a special case that operating systems
        // take into account: when port is 0, the OS will search for the first available port
        config.set_app_port(0);
        config.set_email_client_base_url(email_server.uri());
        config.set_email_client_api(Some(Secret::new(String::from("sendgrid-test-key"))));
        config.set_blob_storage_base_url(blob_server.uri());

        let application = Application::build_with_store(config.clone(), store.clone())
            .await
            .expect("Failed to build application.");

        let address = format!("http://127.0.0.1:{}", application.get_port());

        tokio::spawn(application.run_until_stop());

        TestApp {
            address,
            store,
            email_server,
            blob_server,
            admin_email: config.email_client.admin_email.clone(),
        }
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        post_json(&self.address, path, body).await
    }

    pub async fn post_founder_application(&self, body: &Value) -> Response {
        self.post_json("/applications/founders", body).await
    }

    pub async fn post_investor_application(&self, body: &Value) -> Response {
        self.post_json("/applications/investors", body).await
    }

    pub async fn post_career_application(&self, body: &Value) -> Response {
        self.post_json("/applications/careers", body).await
    }

    pub async fn post_newsletter_subscription(&self, body: &Value) -> Response {
        self.post_json("/newsletter/subscriptions", body).await
    }

    pub async fn upload_cv(&self, file_name: &str, content_type: &str, bytes: Vec<u8>) -> Response {
        reqwest::Client::new()
            .post(format!("{}/uploads/cv", self.address))
            .query(&[("fileName", file_name)])
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_cohort_stats(&self) -> Response {
        reqwest::Client::new()
            .get(format!("{}/cohort/stats", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Emails leave on a background task, so poll until `expected` arrived.
    pub async fn wait_for_emails(&self, expected: usize) -> Vec<wiremock::Request> {
        for _ in 0..100 {
            let requests = self.email_server.received_requests().await.unwrap();
            if requests.len() >= expected {
                return requests;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        self.email_server.received_requests().await.unwrap()
    }
}

/// An app running on the Postgres store against a freshly migrated database.
pub struct PgTestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub email_server: MockServer,
    pub blob_server: MockServer,
}

impl PgTestApp {
    /// `None` when no Postgres server is reachable with the development settings.
    pub async fn spawn_app() -> Option<PgTestApp> {
        let mut config = get_configuration().expect("Missing configuration file.");
        let email_server = MockServer::start().await;
        let blob_server = MockServer::start().await;

        config.set_app_port(0);
        config.set_email_client_base_url(email_server.uri());
        config.set_blob_storage_base_url(blob_server.uri());

        let db_pool = configure_db(&mut config.database).await?;

        let application = Application::build(config)
            .await
            .expect("Failed to build application.");
        let address = format!("http://127.0.0.1:{}", application.get_port());

        tokio::spawn(application.run_until_stop());

        Some(PgTestApp {
            address,
            db_pool,
            email_server,
            blob_server,
        })
    }
}

/// Creates a uniquely named database and runs the migrations on it.
pub async fn configure_db(db_config: &mut DatabaseSettings) -> Option<PgPool> {
    let db_test_name = format!("db_{}", Uuid::new_v4().to_string().replace('-', "_"));

    let mut connection = match PgConnection::connect_with(&db_config.get_server_options()).await {
        Ok(connection) => connection,
        Err(err) => {
            eprintln!("Skipping Postgres test, the server is not reachable: {}", err);
            return None;
        }
    };

    connection
        .execute(&*format!(r#"CREATE DATABASE "{}";"#, db_test_name))
        .await
        .expect("Failed to create database.");

    connection
        .close()
        .await
        .expect("Failed to close connection.");

    db_config.set_name(db_test_name);

    let db_pool = get_connection_db_pool(db_config);

    migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run migrations.");

    Some(db_pool)
}

/// Runs a JSON body through its form type into the validated value.
pub fn validated<Body, New>(body: Value) -> New
where
    Body: DeserializeOwned,
    New: TryFrom<Body>,
    New::Error: Debug,
{
    let body: Body = serde_json::from_value(body).expect("Body does not deserialize.");

    New::try_from(body).expect("Body does not validate.")
}

pub async fn post_json(address: &str, path: &str, body: &Value) -> Response {
    reqwest::Client::new()
        .post(format!("{}{}", address, path))
        .json(body)
        .send()
        .await
        .expect("Failed to execute request.")
}

pub async fn outcome<T: DeserializeOwned>(response: Response) -> SubmissionOutcome<T> {
    response
        .json()
        .await
        .expect("Response is not a submission outcome.")
}

/// Paths of every field reported in a validation failure.
pub fn failed_fields(outcome: &SubmissionOutcome<Value>) -> Vec<String> {
    outcome
        .details
        .as_ref()
        .map(|details| details.iter().map(|d| d.path.join(".")).collect())
        .unwrap_or_default()
}

pub fn founder_body(email: &str) -> Value {
    json!({
        "fullName": "Ada Lovelace",
        "workEmail": email,
        "companyName": "Analytical Engines",
        "website": "https://analytical.io",
        "sector": ["Deep Tech", "AI"],
        "otherFounderSector": "",
        "fundingStage": "Seed",
        "location": "London",
        "shortPitch": "We build general purpose computing machines."
    })
}

pub fn investor_body(email: &str) -> Value {
    json!({
        "fullName": "Grace Hopper",
        "workEmail": email,
        "companyName": "Cobol Ventures",
        "title": "General Partner",
        "investmentFocus": ["Developer Tools"],
        "ticketSize": "$250k-$1M",
        "targetGeography": ["Europe"],
        "referralSource": "LinkedIn"
    })
}

pub fn career_body(email: &str, position: &str) -> Value {
    json!({
        "firstName": "Linus",
        "lastName": "Torvalds",
        "email": email,
        "phone": "+358 40 000 0000",
        "motivation": "I enjoy building reliable infrastructure.",
        "portfolioUrl": "https://github.com/torvalds",
        "cvUrl": "https://blob.example.com/cvs/linus.pdf",
        "position": position
    })
}
