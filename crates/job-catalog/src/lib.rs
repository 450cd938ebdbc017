//! Careers job catalog: listing filters, admin posting management, and candidate applications.

pub mod applications;
pub mod catalog;
pub mod config;
pub mod error;
pub mod ingest;
pub mod telemetry;
