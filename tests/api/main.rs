mod career_applications;
mod cohort_stats;
mod health_check;
mod helpers;
mod investor_applications;
