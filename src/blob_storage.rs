use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time;
use uuid::Uuid;

use crate::domain::founder_application::AttachmentBody;

const REQUEST_TIMEOUT: time::Duration = time::Duration::from_secs(30);

/// Uploads files to the blob store and hands back their public URL.
pub struct BlobStorageClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

/// A file received from a form, already decoded.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(serde::Deserialize)]
struct UploadResponse {
    url: String,
}

#[derive(thiserror::Error, Debug)]
pub enum UploadError {
    #[error("Attachment is not valid base64.")]
    InvalidEncoding(#[from] base64::DecodeError),
    #[error("Failed to upload file.")]
    Request(#[from] reqwest::Error),
}

impl TryFrom<AttachmentBody> for UploadedFile {
    type Error = UploadError;

    fn try_from(body: AttachmentBody) -> Result<Self, Self::Error> {
        let bytes = STANDARD.decode(body.data.as_bytes())?;

        Ok(UploadedFile {
            file_name: body.file_name,
            content_type: body.content_type,
            bytes,
        })
    }
}

impl BlobStorageClient {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        timeout: Option<time::Duration>,
    ) -> Result<BlobStorageClient, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(timeout.unwrap_or(REQUEST_TIMEOUT))
            .build()?;

        Ok(BlobStorageClient {
            http_client,
            base_url,
            api_key,
        })
    }

    /// Stores `file` under `folder` with a unique key, returning its URL.
    #[tracing::instrument(
        name = "Upload a file to blob storage",
        skip(self, file),
        fields(
            file_name = %file.file_name,
            content_type = %file.content_type,
            size = file.bytes.len()
        )
    )]
    pub async fn upload(&self, folder: &str, file: &UploadedFile) -> Result<String, UploadError> {
        let url = format!(
            "{}/{}/{}-{}",
            self.base_url,
            folder,
            Uuid::new_v4(),
            sanitize_file_name(&file.file_name)
        );

        let response: UploadResponse = self
            .http_client
            .put(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", file.content_type.as_str())
            .body(file.bytes.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.url)
    }
}

fn sanitize_file_name(file_name: &str) -> String {
    let sanitized: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();

    if sanitized.trim_matches(|c| c == '-' || c == '.').is_empty() {
        return String::from("file");
    }

    sanitized
}
