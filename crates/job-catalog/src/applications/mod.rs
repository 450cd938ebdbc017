//! Candidate applications submitted against published job postings.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationStatus, ApplicationSubmission, JobApplication,
    SubmissionValidationError,
};
pub use repository::ApplicationRepository;
pub use router::application_router;
pub use service::{ApplicationServiceError, JobApplicationService};
