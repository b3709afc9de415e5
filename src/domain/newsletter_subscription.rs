use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::applicant_email::ApplicantEmail;
use crate::domain::form_field::FormField;
use crate::domain::validation::ValidationErrors;

pub const DEFAULT_SOURCE: &str = "website";

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsletterSubscriptionBody {
    pub email: FormField<String>,
    pub name: FormField<String>,
    pub source: FormField<String>,
}

#[derive(Debug)]
pub struct NewNewsletterSubscription {
    pub email: ApplicantEmail,
    pub name: Option<String>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscription {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<NewsletterSubscriptionBody> for NewNewsletterSubscription {
    type Error = ValidationErrors;

    fn try_from(body: NewsletterSubscriptionBody) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::new();

        let email = errors.parse_field("email", body.email, ApplicantEmail::parse);
        let name = errors.optional_field("name", body.name);
        let source = errors.optional_field("source", body.source);

        match email {
            Some(email) if errors.is_empty() => Ok(NewNewsletterSubscription {
                email,
                name,
                source: source.unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            }),
            _ => Err(errors),
        }
    }
}
