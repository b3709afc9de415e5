use super::notifications::{escape_html, summary_table, OutgoingEmail};
use super::{lookup_failed, SubmissionContext, SubmissionError};
use crate::domain::investor_application::{
    InvestorApplication, InvestorApplicationBody, NewInvestorApplication,
};

pub const INVESTOR_DUPLICATE: &str = "Investor application already exists";

#[tracing::instrument(
    name = "Submitting an investor application",
    skip(ctx, body),
    fields(
        work_email = %body.work_email,
        company_name = %body.company_name
    )
)]
pub async fn submit_investor_application(
    ctx: &SubmissionContext,
    body: InvestorApplicationBody,
) -> Result<InvestorApplication, SubmissionError> {
    let application: NewInvestorApplication = body.try_into()?;

    let existing = ctx
        .store
        .find_investor_application(application.work_email.as_ref())
        .await
        .map_err(lookup_failed)?;
    if existing.is_some() {
        return Err(SubmissionError::Duplicate(INVESTOR_DUPLICATE));
    }

    let investor = ctx
        .store
        .create_investor_application(&application)
        .await
        .map_err(|err| SubmissionError::from_store(err, INVESTOR_DUPLICATE))?;

    ctx.notify(investor_emails(ctx, &application, &investor));

    Ok(investor)
}

fn investor_emails(
    ctx: &SubmissionContext,
    application: &NewInvestorApplication,
    investor: &InvestorApplication,
) -> Vec<OutgoingEmail> {
    let confirmation = format!(
        r#"
            <div>
                <h1>Welcome aboard, {}!</h1>
                <p>Thanks for your interest in meeting our founders. We will reach out with
                the next cohort that matches your focus.</p>
            </div>
        "#,
        escape_html(&investor.full_name)
    );

    let summary = summary_table(&[
        ("Name", investor.full_name.clone()),
        ("Email", investor.work_email.clone()),
        ("Firm", investor.company_name.clone()),
        ("Title", investor.title.clone()),
        ("Focus", investor.investment_focus.join(", ")),
        ("Ticket size", investor.ticket_size.clone()),
        ("Geography", investor.target_geography.join(", ")),
        ("Heard from", investor.referral_source.clone()),
        (
            "Other source",
            investor.other_source.clone().unwrap_or_default(),
        ),
    ]);

    vec![
        OutgoingEmail {
            recipient: application.work_email.clone(),
            subject: String::from("We received your investor application"),
            html_body: confirmation,
            reply_to: None,
        },
        OutgoingEmail {
            recipient: ctx.admin_email.clone(),
            subject: format!("New investor application: {}", investor.company_name),
            html_body: format!("<div><h1>New investor application</h1>{}</div>", summary),
            reply_to: Some(application.work_email.clone()),
        },
    ]
}
