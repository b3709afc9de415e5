use actix_web::{web, HttpResponse};

use crate::domain::newsletter_subscription::NewsletterSubscriptionBody;
use crate::submissions::{
    subscribe_to_newsletter, SubmissionContext, SubmissionError, SubmissionOutcome,
    NEWSLETTER_WELCOME,
};

pub async fn handle_newsletter_subscription(
    body: web::Json<NewsletterSubscriptionBody>,
    ctx: web::Data<SubmissionContext>,
) -> Result<HttpResponse, SubmissionError> {
    let subscriber = subscribe_to_newsletter(&ctx, body.into_inner()).await?;

    Ok(HttpResponse::Created()
        .json(SubmissionOutcome::success(subscriber).with_message(NEWSLETTER_WELCOME)))
}
