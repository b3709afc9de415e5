use actix_web::{http::header::CONTENT_TYPE, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::blob_storage::UploadedFile;
use crate::submissions::{
    upload_cv, SubmissionContext, SubmissionError, SubmissionOutcome, MAX_CV_BYTES,
};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UploadParameters {
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

fn default_file_name() -> String {
    String::from("cv")
}

#[derive(Serialize, Deserialize, Debug)]
pub struct StoredFile {
    pub url: String,
}

/// Receives the raw bytes of a CV; the content type comes from the request header.
pub async fn handle_cv_upload(
    request: HttpRequest,
    parameters: web::Query<UploadParameters>,
    payload: web::Payload,
    ctx: web::Data<SubmissionContext>,
) -> Result<HttpResponse, actix_web::Error> {
    let bytes = match payload.to_bytes_limited(MAX_CV_BYTES).await {
        Ok(bytes) => bytes?,
        Err(_) => {
            tracing::warn!("Rejecting a CV over {} bytes", MAX_CV_BYTES);
            return Err(SubmissionError::TooLarge.into());
        }
    };
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let file = UploadedFile {
        file_name: parameters.into_inner().file_name,
        content_type,
        bytes: bytes.to_vec(),
    };
    let url = upload_cv(&ctx, file).await?;

    Ok(HttpResponse::Created().json(SubmissionOutcome::success(StoredFile { url })))
}
