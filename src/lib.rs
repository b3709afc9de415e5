pub mod blob_storage;
pub mod cohort;
pub mod config;
pub mod domain;
pub mod email_client;
pub mod ops;
pub mod routes;
pub mod startup;
pub mod store;
pub mod submissions;
pub mod telemetry;
