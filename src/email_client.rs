use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time;

use crate::domain::applicant_email::ApplicantEmail;

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(10);

pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: ApplicantEmail,
    api_key: Option<Secret<String>>,
}

#[derive(serde::Serialize)]
pub struct SendEmailBody {
    personalizations: Vec<SengridPersonalization>,
    from: SengridEmail,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<SengridEmail>,
    subject: String,
    content: Vec<SengridContent>,
}

#[derive(serde::Serialize)]
struct SengridEmail {
    email: String,
}

#[derive(serde::Serialize)]
struct SengridPersonalization {
    to: Vec<SengridEmail>,
}

#[derive(serde::Serialize)]
struct SengridContent {
    #[serde(rename = "type")]
    content_type: String,
    value: String,
}

/// Result of a delivery attempt. Sending never fails the caller.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EmailDelivery {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum EmailError {
    #[error("Email provider not configured")]
    NotConfigured,
    #[error("Failed to deliver email.")]
    Request(#[from] reqwest::Error),
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: ApplicantEmail,
        api_key: Option<Secret<String>>,
        timeout: Option<time::Duration>,
    ) -> Result<EmailClient, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()?;

        Ok(EmailClient {
            http_client,
            base_url,
            sender,
            api_key,
        })
    }

    /// Sends an email and reports the outcome instead of raising it.
    #[tracing::instrument(
        name = "Send an email",
        skip(self, recipient, html_content, reply_to),
        fields(recipient = %recipient.as_ref())
    )]
    pub async fn send(
        &self,
        recipient: &ApplicantEmail,
        subject: &str,
        html_content: &str,
        reply_to: Option<&ApplicantEmail>,
    ) -> EmailDelivery {
        match self
            .send_email(recipient, subject, html_content, reply_to)
            .await
        {
            Ok(()) => EmailDelivery {
                success: true,
                error: None,
            },
            Err(err) => {
                tracing::error!(
                    "Failed to send an email to {}: {:?}",
                    recipient.as_ref(),
                    err
                );
                EmailDelivery {
                    success: false,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    pub async fn send_email(
        &self,
        recipient: &ApplicantEmail,
        subject: &str,
        html_content: &str,
        reply_to: Option<&ApplicantEmail>,
    ) -> Result<(), EmailError> {
        let api_key = self.api_key.as_ref().ok_or(EmailError::NotConfigured)?;
        let url = format!("{}/mail/send", self.base_url);
        let body = SendEmailBody {
            from: SengridEmail {
                email: String::from(self.sender.as_ref()),
            },
            reply_to: reply_to.map(|email| SengridEmail {
                email: String::from(email.as_ref()),
            }),
            personalizations: vec![SengridPersonalization {
                to: vec![SengridEmail {
                    email: String::from(recipient.as_ref()),
                }],
            }],
            subject: String::from(subject),
            content: vec![SengridContent {
                content_type: String::from("text/html"),
                value: String::from(html_content),
            }],
        };

        self.http_client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await?
            .error_for_status()?; // return an error when server response status code is 4xx or 5xx

        Ok(())
    }
}
