use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use serde_json::json;

use crate::cohort::get_cohort_stats;
use crate::store::StoreError;
use crate::submissions::{SubmissionContext, SubmissionOutcome};

/// Number of applications a cohort is sized for.
#[derive(Debug, Clone, Copy)]
pub struct CohortTarget(pub i64);

#[tracing::instrument(name = "Cohort stats handler", skip(ctx, target))]
pub async fn handle_cohort_stats(
    ctx: web::Data<SubmissionContext>,
    target: web::Data<CohortTarget>,
) -> Result<HttpResponse, CohortStatsError> {
    let stats = get_cohort_stats(&*ctx.store, target.0)
        .await
        .map_err(|err| {
            tracing::error!("Failed to count applications: {:?}", err);
            CohortStatsError(err)
        })?;

    Ok(HttpResponse::Ok().json(SubmissionOutcome::success(stats)))
}

#[derive(thiserror::Error, Debug)]
#[error("Failed to load cohort stats")]
pub struct CohortStatsError(#[source] StoreError);

impl ResponseError for CohortStatsError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(json!({ "success": false, "error": self.to_string() }))
    }
}
