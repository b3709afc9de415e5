use actix_web::{web, HttpResponse};

use crate::domain::career_application::CareerApplicationBody;
use crate::domain::founder_application::FounderApplicationBody;
use crate::domain::investor_application::InvestorApplicationBody;
use crate::submissions::{
    submit_career_application, submit_founder_application, submit_investor_application,
    SubmissionContext, SubmissionError, SubmissionOutcome,
};

pub async fn handle_founder_application(
    body: web::Json<FounderApplicationBody>,
    ctx: web::Data<SubmissionContext>,
) -> Result<HttpResponse, SubmissionError> {
    let founder = submit_founder_application(&ctx, body.into_inner()).await?;

    Ok(HttpResponse::Created().json(SubmissionOutcome::success(founder)))
}

pub async fn handle_investor_application(
    body: web::Json<InvestorApplicationBody>,
    ctx: web::Data<SubmissionContext>,
) -> Result<HttpResponse, SubmissionError> {
    let investor = submit_investor_application(&ctx, body.into_inner()).await?;

    Ok(HttpResponse::Created().json(SubmissionOutcome::success(investor)))
}

pub async fn handle_career_application(
    body: web::Json<CareerApplicationBody>,
    ctx: web::Data<SubmissionContext>,
) -> Result<HttpResponse, SubmissionError> {
    let candidate = submit_career_application(&ctx, body.into_inner()).await?;

    Ok(HttpResponse::Created().json(SubmissionOutcome::success(candidate)))
}
