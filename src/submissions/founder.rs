use super::notifications::{escape_html, summary_table, OutgoingEmail};
use super::{lookup_failed, SubmissionContext, SubmissionError};
use crate::blob_storage::UploadedFile;
use crate::domain::form_field::FormField;
use crate::domain::founder_application::{
    AttachmentBody, FounderApplication, FounderApplicationBody, NewFounderApplication,
};

pub const FOUNDER_DUPLICATE: &str = "Founder application already exists";
const PITCH_DECK_FOLDER: &str = "pitch-decks";

#[tracing::instrument(
    name = "Submitting a founder application",
    skip(ctx, body),
    fields(
        work_email = %body.work_email,
        company_name = %body.company_name
    )
)]
pub async fn submit_founder_application(
    ctx: &SubmissionContext,
    mut body: FounderApplicationBody,
) -> Result<FounderApplication, SubmissionError> {
    let pitch_deck = std::mem::take(&mut body.pitch_deck);
    let application: NewFounderApplication = body.try_into()?;

    let existing = ctx
        .store
        .find_founder_application(application.work_email.as_ref())
        .await
        .map_err(lookup_failed)?;
    if existing.is_some() {
        return Err(SubmissionError::Duplicate(FOUNDER_DUPLICATE));
    }

    let pitch_deck_url = match pitch_deck {
        FormField::Value(attachment) => upload_pitch_deck(ctx, attachment).await,
        FormField::Invalid => {
            tracing::warn!("Discarding a pitch deck that is not a file object");
            None
        }
        FormField::Missing => None,
    };

    let founder = ctx
        .store
        .create_founder_application(&application, pitch_deck_url.as_deref())
        .await
        .map_err(|err| SubmissionError::from_store(err, FOUNDER_DUPLICATE))?;

    ctx.notify(founder_emails(ctx, &application, &founder));

    Ok(founder)
}

/// A pitch deck that cannot be stored does not block the application.
async fn upload_pitch_deck(ctx: &SubmissionContext, attachment: AttachmentBody) -> Option<String> {
    let file = match UploadedFile::try_from(attachment) {
        Ok(file) => file,
        Err(err) => {
            tracing::warn!("Discarding pitch deck: {:?}", err);
            return None;
        }
    };

    match ctx.blob_storage.upload(PITCH_DECK_FOLDER, &file).await {
        Ok(url) => Some(url),
        Err(err) => {
            tracing::warn!("Failed to upload pitch deck, continuing without it: {:?}", err);
            None
        }
    }
}

fn founder_emails(
    ctx: &SubmissionContext,
    application: &NewFounderApplication,
    founder: &FounderApplication,
) -> Vec<OutgoingEmail> {
    let confirmation = format!(
        r#"
            <div>
                <h1>Thanks for applying, {}!</h1>
                <p>We received the application for <strong>{}</strong>. Our team reviews every
                founder personally and will get back to you within two weeks.</p>
            </div>
        "#,
        escape_html(&founder.full_name),
        escape_html(&founder.company_name)
    );

    let summary = summary_table(&[
        ("Name", founder.full_name.clone()),
        ("Email", founder.work_email.clone()),
        ("Company", founder.company_name.clone()),
        ("Website", founder.website.clone()),
        ("Sector", founder.sector.join(", ")),
        (
            "Other sector",
            founder.other_founder_sector.clone().unwrap_or_default(),
        ),
        ("Stage", founder.funding_stage.clone()),
        ("Location", founder.location.clone()),
        ("Pitch", founder.short_pitch.clone()),
        (
            "Pitch deck",
            founder.pitch_deck_url.clone().unwrap_or_default(),
        ),
    ]);

    vec![
        OutgoingEmail {
            recipient: application.work_email.clone(),
            subject: String::from("We received your founder application"),
            html_body: confirmation,
            reply_to: None,
        },
        OutgoingEmail {
            recipient: ctx.admin_email.clone(),
            subject: format!("New founder application: {}", founder.company_name),
            html_body: format!("<div><h1>New founder application</h1>{}</div>", summary),
            reply_to: Some(application.work_email.clone()),
        },
    ]
}
