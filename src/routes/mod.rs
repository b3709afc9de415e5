mod applications;
mod cohort;
mod health_check;
mod newsletter;
mod uploads;

pub use applications::{
    handle_career_application, handle_founder_application, handle_investor_application,
};
pub use cohort::{handle_cohort_stats, CohortStatsError, CohortTarget};
pub use health_check::health_check;
pub use newsletter::handle_newsletter_subscription;
pub use uploads::{handle_cv_upload, StoredFile, UploadParameters};
