use job_catalog::applications::{ApplicationId, ApplicationRepository, JobApplication};
use job_catalog::catalog::{
    InterviewType, JobId, JobPosting, JobRepository, RepositoryError, SortOption,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Postings kept in insertion order so equal sort keys keep their stored order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryJobRepository {
    postings: Arc<Mutex<Vec<JobPosting>>>,
}

impl JobRepository for InMemoryJobRepository {
    fn insert(&self, posting: JobPosting) -> Result<JobPosting, RepositoryError> {
        let mut guard = self.postings.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == posting.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(posting.clone());
        Ok(posting)
    }

    fn update(&self, posting: JobPosting) -> Result<(), RepositoryError> {
        let mut guard = self.postings.lock().expect("repository mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == posting.id) {
            Some(slot) => {
                *slot = posting;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, id: &JobId) -> Result<(), RepositoryError> {
        let mut guard = self.postings.lock().expect("repository mutex poisoned");
        let before = guard.len();
        guard.retain(|posting| &posting.id != id);
        if guard.len() == before {
            Err(RepositoryError::NotFound)
        } else {
            Ok(())
        }
    }

    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = self.postings.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|posting| &posting.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        let guard = self.postings.lock().expect("repository mutex poisoned");
        Ok(guard.clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<Vec<JobApplication>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, application: JobApplication) -> Result<JobApplication, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let duplicate = guard.iter().any(|existing| {
            existing.id == application.id
                || (existing.job_id == application.job_id && existing.email == application.email)
        });
        if duplicate {
            return Err(RepositoryError::Conflict);
        }
        guard.push(application.clone());
        Ok(application)
    }

    fn update(&self, application: JobApplication) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == application.id) {
            Some(slot) => {
                *slot = application;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<JobApplication>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn find_by_email(
        &self,
        job_id: &JobId,
        email: &str,
    ) -> Result<Option<JobApplication>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .find(|record| &record.job_id == job_id && record.email == email)
            .cloned())
    }

    fn list_for_job(&self, job_id: &JobId) -> Result<Vec<JobApplication>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| &record.job_id == job_id)
            .cloned()
            .collect())
    }
}

pub(crate) fn parse_interview_type(raw: &str) -> Result<InterviewType, String> {
    raw.parse::<InterviewType>().map_err(|err| err.to_string())
}

pub(crate) fn parse_sort(raw: &str) -> Result<SortOption, String> {
    raw.parse::<SortOption>().map_err(|err| err.to_string())
}
