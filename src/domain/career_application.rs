use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::validate_url;

use crate::domain::applicant_email::ApplicantEmail;
use crate::domain::form_field::FormField;
use crate::domain::person_name::PersonName;
use crate::domain::required_text::RequiredText;
use crate::domain::validation::ValidationErrors;
use crate::domain::website_url::WebsiteUrl;

/// Position used by the open application form, where motivation is mandatory.
pub const GENERAL_POSITION: &str = "general";

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CareerApplicationBody {
    pub first_name: FormField<String>,
    pub last_name: FormField<String>,
    pub email: FormField<String>,
    pub phone: FormField<String>,
    pub motivation: FormField<String>,
    pub portfolio_url: FormField<String>,
    pub cv_url: FormField<String>,
    pub position: FormField<String>,
}

#[derive(Debug)]
pub struct NewCareerApplication {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: ApplicantEmail,
    pub phone: Option<String>,
    pub motivation: Option<String>,
    pub portfolio_url: Option<String>,
    pub cv_url: Option<WebsiteUrl>,
    pub position: RequiredText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerApplication {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub motivation: Option<String>,
    pub portfolio_url: Option<String>,
    pub cv_url: Option<String>,
    pub position: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CareerApplicationBody> for NewCareerApplication {
    type Error = ValidationErrors;

    fn try_from(body: CareerApplicationBody) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::new();

        let first_name = errors.parse_field("firstName", body.first_name, |name| {
            PersonName::parse(name, "First name")
        });
        let last_name = errors.parse_field("lastName", body.last_name, |name| {
            PersonName::parse(name, "Last name")
        });
        let email = errors.parse_field("email", body.email, ApplicantEmail::parse);
        let phone = errors.optional_field("phone", body.phone);

        let is_general = matches!(
            &body.position,
            FormField::Value(position) if position.trim() == GENERAL_POSITION
        );
        let motivation = errors.optional_field("motivation", body.motivation);
        if motivation.is_none() && is_general {
            errors.push("motivation", "Motivation is required");
        }

        // Portfolio links are advisory: a malformed one is kept as typed.
        let portfolio_url = errors.optional_field("portfolioUrl", body.portfolio_url);
        if let Some(url) = portfolio_url.as_deref() {
            if !validate_url(url) {
                tracing::warn!("Portfolio URL {:?} is not a valid URL, keeping it", url);
            }
        }

        let cv_url = match errors.optional_field("cvUrl", body.cv_url) {
            Some(url) => errors.check("cvUrl", WebsiteUrl::parse(url)).map(Some),
            None => Some(None),
        };
        let position = errors.parse_field("position", body.position, |position| {
            RequiredText::parse(position, "Position")
        });

        match (first_name, last_name, email, cv_url, position) {
            (Some(first_name), Some(last_name), Some(email), Some(cv_url), Some(position))
                if errors.is_empty() =>
            {
                Ok(NewCareerApplication {
                    first_name,
                    last_name,
                    email,
                    phone,
                    motivation,
                    portfolio_url,
                    cv_url,
                    position,
                })
            }
            _ => Err(errors),
        }
    }
}
