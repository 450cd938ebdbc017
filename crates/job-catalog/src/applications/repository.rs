use crate::catalog::{JobId, RepositoryError};

use super::domain::{ApplicationId, JobApplication};

/// Storage abstraction over each posting's application sub-collection.
pub trait ApplicationRepository: Send + Sync {
    /// Store a new application. Fails with `Conflict` when the posting already holds an
    /// application from the same email; the check and the write happen atomically.
    fn insert(&self, application: JobApplication) -> Result<JobApplication, RepositoryError>;
    fn update(&self, application: JobApplication) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<JobApplication>, RepositoryError>;
    fn find_by_email(
        &self,
        job_id: &JobId,
        email: &str,
    ) -> Result<Option<JobApplication>, RepositoryError>;
    fn list_for_job(&self, job_id: &JobId) -> Result<Vec<JobApplication>, RepositoryError>;
}
