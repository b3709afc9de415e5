use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::domain::applicant_email::ApplicantEmail;
use crate::email_client::EmailClient;

#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub recipient: ApplicantEmail,
    pub subject: String,
    pub html_body: String,
    pub reply_to: Option<ApplicantEmail>,
}

/// Sends `emails` on a background task. Failures are logged by the client and never
/// reach the submission that triggered them.
pub fn dispatch(email_client: Arc<EmailClient>, emails: Vec<OutgoingEmail>) -> JoinHandle<()> {
    tokio::spawn(async move {
        for email in emails {
            let delivery = email_client
                .send(
                    &email.recipient,
                    &email.subject,
                    &email.html_body,
                    email.reply_to.as_ref(),
                )
                .await;

            if !delivery.success {
                tracing::warn!(
                    subject = %email.subject,
                    "Notification email was not delivered: {}",
                    delivery.error.unwrap_or_default()
                );
            }
        }
    })
}

/// Escapes text typed into a form before it is placed in an HTML email.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }

    escaped
}

/// Renders `(label, value)` rows as the table used by admin notifications.
pub fn summary_table(rows: &[(&str, String)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(label, value)| {
            format!(
                "<tr><td><strong>{}</strong></td><td>{}</td></tr>",
                label,
                escape_html(value)
            )
        })
        .collect();

    format!("<table>{}</table>", rows)
}
