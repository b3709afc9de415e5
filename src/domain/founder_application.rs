use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::applicant_email::ApplicantEmail;
use crate::domain::form_field::FormField;
use crate::domain::person_name::PersonName;
use crate::domain::required_text::RequiredText;
use crate::domain::selection::Selection;
use crate::domain::short_pitch::ShortPitch;
use crate::domain::validation::ValidationErrors;
use crate::domain::website_url::WebsiteUrl;

/// Raw founder form. Missing or mistyped keys are reported per field.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FounderApplicationBody {
    pub full_name: FormField<String>,
    pub work_email: FormField<String>,
    pub company_name: FormField<String>,
    pub website: FormField<String>,
    pub sector: FormField<Vec<String>>,
    pub other_founder_sector: FormField<String>,
    pub funding_stage: FormField<String>,
    pub location: FormField<String>,
    pub short_pitch: FormField<String>,
    pub pitch_deck: FormField<AttachmentBody>,
}

/// File sent inline with a JSON form, `data` being standard base64.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct AttachmentBody {
    pub file_name: String,
    pub content_type: String,
    pub data: String,
}

#[derive(Debug)]
pub struct NewFounderApplication {
    pub full_name: PersonName,
    pub work_email: ApplicantEmail,
    pub company_name: RequiredText,
    pub website: WebsiteUrl,
    pub sector: Selection,
    pub other_founder_sector: Option<String>,
    pub funding_stage: RequiredText,
    pub location: RequiredText,
    pub short_pitch: ShortPitch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FounderApplication {
    pub id: Uuid,
    pub full_name: String,
    pub work_email: String,
    pub company_name: String,
    pub website: String,
    pub sector: Vec<String>,
    pub other_founder_sector: Option<String>,
    pub funding_stage: String,
    pub location: String,
    pub short_pitch: String,
    pub pitch_deck_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<FounderApplicationBody> for NewFounderApplication {
    type Error = ValidationErrors;

    fn try_from(body: FounderApplicationBody) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::new();

        let full_name = errors.parse_field("fullName", body.full_name, |name| {
            PersonName::parse(name, "Full name")
        });
        let work_email = errors.parse_field("workEmail", body.work_email, ApplicantEmail::parse);
        let company_name = errors.parse_field("companyName", body.company_name, |name| {
            RequiredText::parse(name, "Company name")
        });
        let website = errors.parse_field("website", body.website, WebsiteUrl::parse);
        let sector = errors.parse_field("sector", body.sector, |sector| {
            Selection::parse(sector, "sector")
        });
        let other_founder_sector =
            errors.optional_field("otherFounderSector", body.other_founder_sector);
        let funding_stage = errors.parse_field("fundingStage", body.funding_stage, |stage| {
            RequiredText::parse(stage, "Funding stage")
        });
        let location = errors.parse_field("location", body.location, |location| {
            RequiredText::parse(location, "Location")
        });
        let short_pitch = errors.parse_field("shortPitch", body.short_pitch, ShortPitch::parse);

        match (
            full_name,
            work_email,
            company_name,
            website,
            sector,
            funding_stage,
            location,
            short_pitch,
        ) {
            (
                Some(full_name),
                Some(work_email),
                Some(company_name),
                Some(website),
                Some(sector),
                Some(funding_stage),
                Some(location),
                Some(short_pitch),
            ) if errors.is_empty() => Ok(NewFounderApplication {
                full_name,
                work_email,
                company_name,
                website,
                sector,
                other_founder_sector,
                funding_stage,
                location,
                short_pitch,
            }),
            _ => Err(errors),
        }
    }
}
