use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

use crate::blob_storage::UploadError;
use crate::domain::validation::{FieldError, ValidationErrors};
use crate::store::StoreError;

/// The `{success, data?, error?, details?, message?}` object every form endpoint answers with.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionOutcome<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> SubmissionOutcome<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl SubmissionOutcome<()> {
    pub fn failure(error: &SubmissionError) -> Self {
        let details = match error {
            SubmissionError::Validation(errors) => Some(errors.details().to_vec()),
            _ => None,
        };

        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
            details,
            message: None,
        }
    }
}

/// Everything that can stop a submission. The `Display` text is what the caller sees,
/// so internal causes stay in `source` and in the logs.
#[derive(thiserror::Error)]
pub enum SubmissionError {
    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),
    #[error("{0}")]
    Duplicate(&'static str),
    #[error("Failed to upload file")]
    Upload(#[source] UploadError),
    #[error("Unsupported file type")]
    UnsupportedFileType(String),
    #[error("File is too large")]
    TooLarge,
    #[error("Failed to submit application")]
    Persistence(#[source] StoreError),
}

impl SubmissionError {
    /// Maps a store failure, turning a natural key collision into `duplicate`.
    pub fn from_store(err: StoreError, duplicate: &'static str) -> Self {
        match err {
            StoreError::UniqueViolation => SubmissionError::Duplicate(duplicate),
            err => {
                tracing::error!("Failed to persist submission: {:?}", err);
                SubmissionError::Persistence(err)
            }
        }
    }
}

impl std::fmt::Debug for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;

        let mut current = std::error::Error::source(self);
        while let Some(cause) = current {
            write!(f, "\n\tCaused by: {}", cause)?;
            current = cause.source();
        }

        Ok(())
    }
}

impl ResponseError for SubmissionError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubmissionError::Validation(_) => StatusCode::BAD_REQUEST,
            SubmissionError::Duplicate(_) => StatusCode::CONFLICT,
            SubmissionError::Upload(_) => StatusCode::BAD_GATEWAY,
            SubmissionError::UnsupportedFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            SubmissionError::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            SubmissionError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(SubmissionOutcome::failure(self))
    }
}
