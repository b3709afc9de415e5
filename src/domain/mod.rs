pub mod applicant_email;
pub mod career_application;
pub mod form_field;
pub mod founder_application;
pub mod investor_application;
pub mod newsletter_subscription;
pub mod person_name;
pub mod required_text;
pub mod selection;
pub mod short_pitch;
pub mod validation;
pub mod website_url;
