mod postgres;

pub use postgres::PgApplicationStore;

use async_trait::async_trait;

use crate::domain::career_application::{CareerApplication, NewCareerApplication};
use crate::domain::founder_application::{FounderApplication, NewFounderApplication};
use crate::domain::investor_application::{InvestorApplication, NewInvestorApplication};
use crate::domain::newsletter_subscription::{NewNewsletterSubscription, NewsletterSubscription};

/// Persistence for every form the site collects.
///
/// Implementations must enforce uniqueness of each natural key and report a
/// collision as [`StoreError::UniqueViolation`], so that two racing
/// submissions cannot both be stored.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn find_founder_application(
        &self,
        work_email: &str,
    ) -> Result<Option<FounderApplication>, StoreError>;

    async fn create_founder_application(
        &self,
        application: &NewFounderApplication,
        pitch_deck_url: Option<&str>,
    ) -> Result<FounderApplication, StoreError>;

    async fn find_investor_application(
        &self,
        work_email: &str,
    ) -> Result<Option<InvestorApplication>, StoreError>;

    async fn create_investor_application(
        &self,
        application: &NewInvestorApplication,
    ) -> Result<InvestorApplication, StoreError>;

    async fn find_career_application(
        &self,
        email: &str,
        position: &str,
    ) -> Result<Option<CareerApplication>, StoreError>;

    async fn create_career_application(
        &self,
        application: &NewCareerApplication,
    ) -> Result<CareerApplication, StoreError>;

    async fn find_newsletter_subscription(
        &self,
        email: &str,
    ) -> Result<Option<NewsletterSubscription>, StoreError>;

    async fn create_newsletter_subscription(
        &self,
        subscription: &NewNewsletterSubscription,
    ) -> Result<NewsletterSubscription, StoreError>;

    async fn count_founder_applications(&self) -> Result<i64, StoreError>;

    async fn count_investor_applications(&self) -> Result<i64, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("A record with the same natural key already exists.")]
    UniqueViolation,
    #[error("Failed to execute query.")]
    Database(#[source] sqlx::Error),
}

// Postgres reports unique index violations with SQLSTATE 23505
const UNIQUE_VIOLATION_CODE: &str = "23505";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err)
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION_CODE) =>
            {
                StoreError::UniqueViolation
            }
            _ => StoreError::Database(err),
        }
    }
}
