use super::notifications::OutgoingEmail;
use super::{lookup_failed, SubmissionContext, SubmissionError};
use crate::domain::newsletter_subscription::{
    NewNewsletterSubscription, NewsletterSubscription, NewsletterSubscriptionBody,
};

pub const NEWSLETTER_DUPLICATE: &str = "Email already subscribed";
pub const NEWSLETTER_WELCOME: &str = "Thanks for subscribing!";

#[tracing::instrument(
    name = "Subscribing to the newsletter",
    skip(ctx, body),
    fields(email = %body.email)
)]
pub async fn subscribe_to_newsletter(
    ctx: &SubmissionContext,
    body: NewsletterSubscriptionBody,
) -> Result<NewsletterSubscription, SubmissionError> {
    let subscription: NewNewsletterSubscription = body.try_into()?;

    let existing = ctx
        .store
        .find_newsletter_subscription(subscription.email.as_ref())
        .await
        .map_err(lookup_failed)?;
    if existing.is_some() {
        return Err(SubmissionError::Duplicate(NEWSLETTER_DUPLICATE));
    }

    let subscriber = ctx
        .store
        .create_newsletter_subscription(&subscription)
        .await
        .map_err(|err| SubmissionError::from_store(err, NEWSLETTER_DUPLICATE))?;

    ctx.notify(vec![OutgoingEmail {
        recipient: subscription.email.clone(),
        subject: String::from("Welcome to the founder-investor digest"),
        html_body: String::from(
            r#"
            <div>
                <h1>You're in!</h1>
                <p>Expect our digest of new cohorts, founder stories and investor insights.</p>
            </div>
            "#,
        ),
        reply_to: None,
    }]);

    Ok(subscriber)
}
