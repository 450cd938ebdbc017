use std::collections::HashMap;
use std::sync::{Arc, Barrier, Mutex};

use chrono::{TimeZone, Utc};

use crate::applications::domain::{ApplicationId, ApplicationSubmission, JobApplication};
use crate::applications::repository::ApplicationRepository;
use crate::applications::{application_router, JobApplicationService};
use crate::catalog::{InterviewType, JobId, JobPosting, JobRepository, RepositoryError};

pub(super) fn open_posting() -> JobPosting {
    JobPosting {
        id: JobId("job-rust".to_string()),
        title: "Rust Engineer".to_string(),
        location: "Remote".to_string(),
        department: "Engineering".to_string(),
        skills: vec!["Rust".to_string(), "Tokio".to_string()],
        salary: 140_000.0,
        experience: 4.0,
        date_posted: Utc
            .with_ymd_and_hms(2024, 4, 2, 10, 0, 0)
            .single()
            .expect("valid timestamp"),
        interview_type: InterviewType::Online,
        is_active: true,
        is_actively_hiring: true,
        description: "<p>Systems work.</p>".to_string(),
    }
}

pub(super) fn submission() -> ApplicationSubmission {
    ApplicationSubmission {
        full_name: " Asha Rao ".to_string(),
        email: " Asha.Rao@Example.com".to_string(),
        phone: "+91 98450 00000".to_string(),
        experience: "4 years".to_string(),
        current_company: "Acme".to_string(),
        notice_period: "30 days".to_string(),
        resume_url: "https://storage.example.com/resumes/Rust%20Engineer/asha.pdf".to_string(),
        save_for_later: false,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryPostings {
    records: Arc<Mutex<HashMap<JobId, JobPosting>>>,
}

impl MemoryPostings {
    pub(super) fn with(postings: Vec<JobPosting>) -> Self {
        let repository = Self::default();
        for posting in postings {
            repository.insert(posting).expect("insert posting");
        }
        repository
    }
}

impl JobRepository for MemoryPostings {
    fn insert(&self, posting: JobPosting) -> Result<JobPosting, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(posting.id.clone(), posting.clone());
        Ok(posting)
    }

    fn update(&self, posting: JobPosting) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(posting.id.clone(), posting);
        Ok(())
    }

    fn delete(&self, id: &JobId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryApplications {
    pub(super) records: Arc<Mutex<HashMap<ApplicationId, JobApplication>>>,
}

impl ApplicationRepository for MemoryApplications {
    fn insert(&self, application: JobApplication) -> Result<JobApplication, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let duplicate = guard.values().any(|existing| {
            existing.job_id == application.job_id && existing.email == application.email
        });
        if duplicate || guard.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn update(&self, application: JobApplication) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if !guard.contains_key(&application.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(application.id.clone(), application);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<JobApplication>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_by_email(
        &self,
        job_id: &JobId,
        email: &str,
    ) -> Result<Option<JobApplication>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .find(|application| &application.job_id == job_id && application.email == email)
            .cloned())
    }

    fn list_for_job(&self, job_id: &JobId) -> Result<Vec<JobApplication>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| &application.job_id == job_id)
            .cloned()
            .collect())
    }
}

/// Application store whose email lookup holds every caller until `parties` of them have
/// looked up, so concurrent submissions all pass the duplicate check before any insert.
pub(super) struct LockstepApplications {
    pub(super) inner: MemoryApplications,
    barrier: Barrier,
}

impl LockstepApplications {
    pub(super) fn new(parties: usize) -> Self {
        Self {
            inner: MemoryApplications::default(),
            barrier: Barrier::new(parties),
        }
    }
}

impl ApplicationRepository for LockstepApplications {
    fn insert(&self, application: JobApplication) -> Result<JobApplication, RepositoryError> {
        self.inner.insert(application)
    }

    fn update(&self, application: JobApplication) -> Result<(), RepositoryError> {
        self.inner.update(application)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<JobApplication>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn find_by_email(
        &self,
        job_id: &JobId,
        email: &str,
    ) -> Result<Option<JobApplication>, RepositoryError> {
        let found = self.inner.find_by_email(job_id, email)?;
        self.barrier.wait();
        Ok(found)
    }

    fn list_for_job(&self, job_id: &JobId) -> Result<Vec<JobApplication>, RepositoryError> {
        self.inner.list_for_job(job_id)
    }
}

pub(super) fn build_service() -> (
    JobApplicationService<MemoryPostings, MemoryApplications>,
    Arc<MemoryApplications>,
) {
    let postings = Arc::new(MemoryPostings::with(vec![open_posting()]));
    let applications = Arc::new(MemoryApplications::default());
    let service = JobApplicationService::new(postings, applications.clone());
    (service, applications)
}

pub(super) fn application_router_with_service(
    service: JobApplicationService<MemoryPostings, MemoryApplications>,
) -> axum::Router {
    application_router(Arc::new(service))
}
