use super::notifications::{escape_html, summary_table, OutgoingEmail};
use super::{lookup_failed, SubmissionContext, SubmissionError};
use crate::blob_storage::UploadedFile;
use crate::domain::career_application::{
    CareerApplication, CareerApplicationBody, NewCareerApplication,
};
use crate::domain::validation::ValidationErrors;

pub const CAREER_DUPLICATE: &str = "Career application already exists";
pub const CV_CONTENT_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];
pub const MAX_CV_BYTES: usize = 10 * 1024 * 1024;
const CV_FOLDER: &str = "cvs";

/// Stores a CV ahead of the career form. Unlike pitch decks, a failed upload
/// is reported so the applicant can retry before submitting.
#[tracing::instrument(
    name = "Uploading a CV",
    skip(ctx, file),
    fields(file_name = %file.file_name, content_type = %file.content_type)
)]
pub async fn upload_cv(
    ctx: &SubmissionContext,
    file: UploadedFile,
) -> Result<String, SubmissionError> {
    if file.bytes.is_empty() {
        let mut errors = ValidationErrors::new();
        errors.push("file", "File is required");
        return Err(errors.into());
    }

    if file.bytes.len() > MAX_CV_BYTES {
        return Err(SubmissionError::TooLarge);
    }

    if !CV_CONTENT_TYPES.contains(&mime_essence(&file.content_type).as_str()) {
        return Err(SubmissionError::UnsupportedFileType(file.content_type));
    }

    ctx.blob_storage
        .upload(CV_FOLDER, &file)
        .await
        .map_err(|err| {
            tracing::error!("Failed to upload CV: {:?}", err);
            SubmissionError::Upload(err)
        })
}

/// `application/PDF; charset=binary` -> `application/pdf`
fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[tracing::instrument(
    name = "Submitting a career application",
    skip(ctx, body),
    fields(email = %body.email, position = %body.position)
)]
pub async fn submit_career_application(
    ctx: &SubmissionContext,
    body: CareerApplicationBody,
) -> Result<CareerApplication, SubmissionError> {
    let application: NewCareerApplication = body.try_into()?;

    let existing = ctx
        .store
        .find_career_application(application.email.as_ref(), application.position.as_ref())
        .await
        .map_err(lookup_failed)?;
    if existing.is_some() {
        return Err(SubmissionError::Duplicate(CAREER_DUPLICATE));
    }

    let candidate = ctx
        .store
        .create_career_application(&application)
        .await
        .map_err(|err| SubmissionError::from_store(err, CAREER_DUPLICATE))?;

    ctx.notify(career_emails(ctx, &application, &candidate));

    Ok(candidate)
}

fn career_emails(
    ctx: &SubmissionContext,
    application: &NewCareerApplication,
    candidate: &CareerApplication,
) -> Vec<OutgoingEmail> {
    let confirmation = format!(
        r#"
            <div>
                <h1>Thanks for applying, {}!</h1>
                <p>Your application for <strong>{}</strong> is with our team. We will be in
                touch about next steps.</p>
            </div>
        "#,
        escape_html(&candidate.first_name),
        escape_html(&candidate.position)
    );

    let summary = summary_table(&[
        (
            "Name",
            format!("{} {}", candidate.first_name, candidate.last_name),
        ),
        ("Email", candidate.email.clone()),
        ("Phone", candidate.phone.clone().unwrap_or_default()),
        ("Position", candidate.position.clone()),
        ("Motivation", candidate.motivation.clone().unwrap_or_default()),
        ("Portfolio", candidate.portfolio_url.clone().unwrap_or_default()),
        ("CV", candidate.cv_url.clone().unwrap_or_default()),
    ]);

    vec![
        OutgoingEmail {
            recipient: application.email.clone(),
            subject: String::from("We received your application"),
            html_body: confirmation,
            reply_to: None,
        },
        OutgoingEmail {
            recipient: ctx.admin_email.clone(),
            subject: format!("New career application: {}", candidate.position),
            html_body: format!("<div><h1>New career application</h1>{}</div>", summary),
            reply_to: Some(application.email.clone()),
        },
    ]
}
