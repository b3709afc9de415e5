use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::applicant_email::ApplicantEmail;
use crate::domain::form_field::FormField;
use crate::domain::person_name::PersonName;
use crate::domain::required_text::RequiredText;
use crate::domain::selection::Selection;
use crate::domain::validation::ValidationErrors;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct InvestorApplicationBody {
    pub full_name: FormField<String>,
    pub work_email: FormField<String>,
    pub company_name: FormField<String>,
    pub title: FormField<String>,
    pub investment_focus: FormField<Vec<String>>,
    pub ticket_size: FormField<String>,
    pub target_geography: FormField<Vec<String>>,
    pub referral_source: FormField<String>,
    pub other_source: FormField<String>,
}

#[derive(Debug)]
pub struct NewInvestorApplication {
    pub full_name: PersonName,
    pub work_email: ApplicantEmail,
    pub company_name: RequiredText,
    pub title: RequiredText,
    pub investment_focus: Selection,
    pub ticket_size: RequiredText,
    pub target_geography: Selection,
    pub referral_source: RequiredText,
    pub other_source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorApplication {
    pub id: Uuid,
    pub full_name: String,
    pub work_email: String,
    pub company_name: String,
    pub title: String,
    pub investment_focus: Vec<String>,
    pub ticket_size: String,
    pub target_geography: Vec<String>,
    pub referral_source: String,
    pub other_source: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<InvestorApplicationBody> for NewInvestorApplication {
    type Error = ValidationErrors;

    fn try_from(body: InvestorApplicationBody) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::new();

        let full_name = errors.parse_field("fullName", body.full_name, |name| {
            PersonName::parse(name, "Full name")
        });
        let work_email = errors.parse_field("workEmail", body.work_email, ApplicantEmail::parse);
        let company_name = errors.parse_field("companyName", body.company_name, |name| {
            RequiredText::parse(name, "Company name")
        });
        let title = errors.parse_field("title", body.title, |title| {
            RequiredText::parse(title, "Title")
        });
        let investment_focus = errors.parse_field("investmentFocus", body.investment_focus, |focus| {
            Selection::parse(focus, "investment focus")
        });
        let ticket_size = errors.parse_field("ticketSize", body.ticket_size, |size| {
            RequiredText::parse(size, "Ticket size")
        });
        let target_geography =
            errors.parse_field("targetGeography", body.target_geography, |geography| {
                Selection::parse(geography, "target geography")
            });
        let referral_source = errors.parse_field("referralSource", body.referral_source, |source| {
            RequiredText::parse(source, "Referral source")
        });
        let other_source = errors.optional_field("otherSource", body.other_source);

        match (
            full_name,
            work_email,
            company_name,
            title,
            investment_focus,
            ticket_size,
            target_geography,
            referral_source,
        ) {
            (
                Some(full_name),
                Some(work_email),
                Some(company_name),
                Some(title),
                Some(investment_focus),
                Some(ticket_size),
                Some(target_geography),
                Some(referral_source),
            ) if errors.is_empty() => Ok(NewInvestorApplication {
                full_name,
                work_email,
                company_name,
                title,
                investment_focus,
                ticket_size,
                target_geography,
                referral_source,
                other_source,
            }),
            _ => Err(errors),
        }
    }
}
