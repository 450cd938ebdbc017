use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::catalog::{JobId, JobRepository, RepositoryError};

use super::domain::{
    ApplicationId, ApplicationStatus, ApplicationSubmission, JobApplication,
    SubmissionValidationError,
};
use super::repository::ApplicationRepository;

/// Service accepting candidate applications for postings held in the job repository.
pub struct JobApplicationService<J, A> {
    postings: Arc<J>,
    applications: Arc<A>,
}

impl<J, A> JobApplicationService<J, A>
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    pub fn new(postings: Arc<J>, applications: Arc<A>) -> Self {
        Self {
            postings,
            applications,
        }
    }

    /// Submit an application, rejecting a second one from the same email for the same job.
    pub fn submit(
        &self,
        job_id: &JobId,
        submission: ApplicationSubmission,
    ) -> Result<JobApplication, ApplicationServiceError> {
        let submission = submission.normalized()?;
        let posting = self
            .postings
            .fetch(job_id)?
            .ok_or(RepositoryError::NotFound)?;

        if self
            .applications
            .find_by_email(job_id, &submission.email)?
            .is_some()
        {
            return Err(ApplicationServiceError::AlreadyApplied);
        }

        let application = JobApplication {
            id: ApplicationId(uuid::Uuid::new_v4().to_string()),
            job_id: posting.id,
            job_title: posting.title,
            full_name: submission.full_name,
            email: submission.email,
            phone: submission.phone,
            experience: submission.experience,
            current_company: submission.current_company,
            notice_period: submission.notice_period,
            resume_url: submission.resume_url,
            save_for_later: submission.save_for_later,
            status: ApplicationStatus::Pending,
            applied_at: Utc::now(),
        };

        // Concurrent submissions can both pass the lookup above; the insert decides.
        let stored = self
            .applications
            .insert(application)
            .map_err(|error| match error {
                RepositoryError::Conflict => ApplicationServiceError::AlreadyApplied,
                other => ApplicationServiceError::Repository(other),
            })?;
        info!(application_id = %stored.id, job_id = %stored.job_id, "application received");
        Ok(stored)
    }

    /// Applications for a posting, most recent first.
    pub fn list_for_job(
        &self,
        job_id: &JobId,
    ) -> Result<Vec<JobApplication>, ApplicationServiceError> {
        let mut applications = self.applications.list_for_job(job_id)?;
        applications.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
        Ok(applications)
    }

    pub fn set_status(
        &self,
        application_id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<JobApplication, ApplicationServiceError> {
        let mut application = self
            .applications
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        application.status = status;
        self.applications.update(application.clone())?;
        info!(%application_id, status = status.label(), "application status changed");
        Ok(application)
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Validation(#[from] SubmissionValidationError),
    #[error("you have already applied for this position")]
    AlreadyApplied,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
