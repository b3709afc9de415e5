use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use super::{ApplicationStore, StoreError};
use crate::domain::career_application::{CareerApplication, NewCareerApplication};
use crate::domain::founder_application::{FounderApplication, NewFounderApplication};
use crate::domain::investor_application::{InvestorApplication, NewInvestorApplication};
use crate::domain::newsletter_subscription::{NewNewsletterSubscription, NewsletterSubscription};

const FOUNDER_COLUMNS: &str = "id, full_name, work_email, company_name, website, sector, \
     other_founder_sector, funding_stage, location, short_pitch, pitch_deck_url, created_at, \
     updated_at";
const INVESTOR_COLUMNS: &str = "id, full_name, work_email, company_name, title, \
     investment_focus, ticket_size, target_geography, referral_source, other_source, created_at, \
     updated_at";
const CAREER_COLUMNS: &str = "id, first_name, last_name, email, phone, motivation, \
     portfolio_url, cv_url, position, created_at";
const SUBSCRIPTION_COLUMNS: &str = "id, email, name, source, created_at";

/// Store backed by the Postgres schema in `migrations/`.
#[derive(Clone)]
pub struct PgApplicationStore {
    db_pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

fn founder_from_row(row: PgRow) -> FounderApplication {
    FounderApplication {
        id: row.get("id"),
        full_name: row.get("full_name"),
        work_email: row.get("work_email"),
        company_name: row.get("company_name"),
        website: row.get("website"),
        sector: row.get("sector"),
        other_founder_sector: row.get("other_founder_sector"),
        funding_stage: row.get("funding_stage"),
        location: row.get("location"),
        short_pitch: row.get("short_pitch"),
        pitch_deck_url: row.get("pitch_deck_url"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn investor_from_row(row: PgRow) -> InvestorApplication {
    InvestorApplication {
        id: row.get("id"),
        full_name: row.get("full_name"),
        work_email: row.get("work_email"),
        company_name: row.get("company_name"),
        title: row.get("title"),
        investment_focus: row.get("investment_focus"),
        ticket_size: row.get("ticket_size"),
        target_geography: row.get("target_geography"),
        referral_source: row.get("referral_source"),
        other_source: row.get("other_source"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn career_from_row(row: PgRow) -> CareerApplication {
    CareerApplication {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        phone: row.get("phone"),
        motivation: row.get("motivation"),
        portfolio_url: row.get("portfolio_url"),
        cv_url: row.get("cv_url"),
        position: row.get("position"),
        created_at: row.get("created_at"),
    }
}

fn subscription_from_row(row: PgRow) -> NewsletterSubscription {
    NewsletterSubscription {
        id: row.get("id"),
        email: row.get("email"),
        name: row.get("name"),
        source: row.get("source"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    #[tracing::instrument(name = "Find a founder application by work email", skip(self))]
    async fn find_founder_application(
        &self,
        work_email: &str,
    ) -> Result<Option<FounderApplication>, StoreError> {
        let application = sqlx::query(&format!(
            "SELECT {} FROM founder_applications WHERE work_email = $1",
            FOUNDER_COLUMNS
        ))
        .bind(work_email)
        .map(founder_from_row)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(application)
    }

    #[tracing::instrument(
        name = "Insert a new founder application into the database",
        skip(self, application)
    )]
    async fn create_founder_application(
        &self,
        application: &NewFounderApplication,
        pitch_deck_url: Option<&str>,
    ) -> Result<FounderApplication, StoreError> {
        let now = Utc::now();

        let created = sqlx::query(&format!(
            r#"
            INSERT INTO founder_applications ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            RETURNING {}
            "#,
            FOUNDER_COLUMNS, FOUNDER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(application.full_name.as_ref())
        .bind(application.work_email.as_ref())
        .bind(application.company_name.as_ref())
        .bind(application.website.as_ref())
        .bind(application.sector.as_ref())
        .bind(application.other_founder_sector.as_deref())
        .bind(application.funding_stage.as_ref())
        .bind(application.location.as_ref())
        .bind(application.short_pitch.as_ref())
        .bind(pitch_deck_url)
        .bind(now)
        .map(founder_from_row)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            err
        })?;

        Ok(created)
    }

    #[tracing::instrument(name = "Find an investor application by work email", skip(self))]
    async fn find_investor_application(
        &self,
        work_email: &str,
    ) -> Result<Option<InvestorApplication>, StoreError> {
        let application = sqlx::query(&format!(
            "SELECT {} FROM investor_applications WHERE work_email = $1",
            INVESTOR_COLUMNS
        ))
        .bind(work_email)
        .map(investor_from_row)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(application)
    }

    #[tracing::instrument(
        name = "Insert a new investor application into the database",
        skip(self, application)
    )]
    async fn create_investor_application(
        &self,
        application: &NewInvestorApplication,
    ) -> Result<InvestorApplication, StoreError> {
        let now = Utc::now();

        let created = sqlx::query(&format!(
            r#"
            INSERT INTO investor_applications ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            RETURNING {}
            "#,
            INVESTOR_COLUMNS, INVESTOR_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(application.full_name.as_ref())
        .bind(application.work_email.as_ref())
        .bind(application.company_name.as_ref())
        .bind(application.title.as_ref())
        .bind(application.investment_focus.as_ref())
        .bind(application.ticket_size.as_ref())
        .bind(application.target_geography.as_ref())
        .bind(application.referral_source.as_ref())
        .bind(application.other_source.as_deref())
        .bind(now)
        .map(investor_from_row)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            err
        })?;

        Ok(created)
    }

    #[tracing::instrument(name = "Find a career application by email and position", skip(self))]
    async fn find_career_application(
        &self,
        email: &str,
        position: &str,
    ) -> Result<Option<CareerApplication>, StoreError> {
        let application = sqlx::query(&format!(
            "SELECT {} FROM career_applications WHERE email = $1 AND position = $2",
            CAREER_COLUMNS
        ))
        .bind(email)
        .bind(position)
        .map(career_from_row)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(application)
    }

    #[tracing::instrument(
        name = "Insert a new career application into the database",
        skip(self, application)
    )]
    async fn create_career_application(
        &self,
        application: &NewCareerApplication,
    ) -> Result<CareerApplication, StoreError> {
        let created = sqlx::query(&format!(
            r#"
            INSERT INTO career_applications ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            CAREER_COLUMNS, CAREER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(application.first_name.as_ref())
        .bind(application.last_name.as_ref())
        .bind(application.email.as_ref())
        .bind(application.phone.as_deref())
        .bind(application.motivation.as_deref())
        .bind(application.portfolio_url.as_deref())
        .bind(application.cv_url.as_ref().map(AsRef::<str>::as_ref))
        .bind(application.position.as_ref())
        .bind(Utc::now())
        .map(career_from_row)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            err
        })?;

        Ok(created)
    }

    #[tracing::instrument(name = "Find a newsletter subscription by email", skip(self))]
    async fn find_newsletter_subscription(
        &self,
        email: &str,
    ) -> Result<Option<NewsletterSubscription>, StoreError> {
        let subscription = sqlx::query(&format!(
            "SELECT {} FROM newsletter_subscriptions WHERE email = $1",
            SUBSCRIPTION_COLUMNS
        ))
        .bind(email)
        .map(subscription_from_row)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(subscription)
    }

    #[tracing::instrument(
        name = "Insert a new newsletter subscription into the database",
        skip(self, subscription)
    )]
    async fn create_newsletter_subscription(
        &self,
        subscription: &NewNewsletterSubscription,
    ) -> Result<NewsletterSubscription, StoreError> {
        let created = sqlx::query(&format!(
            r#"
            INSERT INTO newsletter_subscriptions ({})
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            SUBSCRIPTION_COLUMNS, SUBSCRIPTION_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(subscription.email.as_ref())
        .bind(subscription.name.as_deref())
        .bind(&subscription.source)
        .bind(Utc::now())
        .map(subscription_from_row)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            err
        })?;

        Ok(created)
    }

    #[tracing::instrument(name = "Count founder applications", skip(self))]
    async fn count_founder_applications(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM founder_applications")
            .fetch_one(&self.db_pool)
            .await?;

        Ok(count)
    }

    #[tracing::instrument(name = "Count investor applications", skip(self))]
    async fn count_investor_applications(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM investor_applications")
            .fetch_one(&self.db_pool)
            .await?;

        Ok(count)
    }
}
