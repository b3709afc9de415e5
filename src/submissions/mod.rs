//! Turns raw form bodies into stored records.
//!
//! Every flow runs the same sequence: validate, reject a natural key that is
//! already stored, optionally resolve an uploaded file, persist, then send the
//! applicant and admin emails in the background. The duplicate pre-check is
//! not atomic with the insert; the store's unique indexes catch the race and
//! it is reported as the same duplicate error.

mod career;
mod founder;
mod investor;
mod newsletter;
pub mod notifications;
mod outcome;

use std::sync::Arc;

use crate::blob_storage::BlobStorageClient;
use crate::domain::applicant_email::ApplicantEmail;
use crate::email_client::EmailClient;
use crate::store::ApplicationStore;

pub use career::{
    submit_career_application, upload_cv, CAREER_DUPLICATE, CV_CONTENT_TYPES, MAX_CV_BYTES,
};
pub use founder::{submit_founder_application, FOUNDER_DUPLICATE};
pub use investor::{submit_investor_application, INVESTOR_DUPLICATE};
pub use newsletter::{subscribe_to_newsletter, NEWSLETTER_DUPLICATE, NEWSLETTER_WELCOME};
pub use outcome::{SubmissionError, SubmissionOutcome};

/// Collaborators shared by every submission, built once at startup.
pub struct SubmissionContext {
    pub store: Arc<dyn ApplicationStore>,
    pub email_client: Arc<EmailClient>,
    pub blob_storage: Arc<BlobStorageClient>,
    pub admin_email: ApplicantEmail,
}

impl SubmissionContext {
    pub fn new(
        store: Arc<dyn ApplicationStore>,
        email_client: Arc<EmailClient>,
        blob_storage: Arc<BlobStorageClient>,
        admin_email: ApplicantEmail,
    ) -> Self {
        Self {
            store,
            email_client,
            blob_storage,
            admin_email,
        }
    }

    fn notify(&self, emails: Vec<notifications::OutgoingEmail>) {
        notifications::dispatch(self.email_client.clone(), emails);
    }
}

fn lookup_failed(err: crate::store::StoreError) -> SubmissionError {
    tracing::error!("Failed to check for an existing record: {:?}", err);
    SubmissionError::Persistence(err)
}
