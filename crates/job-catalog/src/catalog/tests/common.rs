use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::catalog::domain::{InterviewType, JobId, JobPosting, PostingDraft};
use crate::catalog::repository::{JobRepository, RepositoryError};
use crate::catalog::{catalog_router, JobCatalogService};

pub(super) fn posted_on(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn posting(id: &str, title: &str) -> JobPosting {
    JobPosting {
        id: JobId(id.to_string()),
        title: title.to_string(),
        location: "Bengaluru".to_string(),
        department: "Engineering".to_string(),
        skills: vec!["Rust".to_string()],
        salary: 100_000.0,
        experience: 3.0,
        date_posted: posted_on(2024, 1, 1),
        interview_type: InterviewType::Online,
        is_active: true,
        is_actively_hiring: false,
        description: "<p>Build things.</p>".to_string(),
    }
}

/// Mixed catalog covering every filter dimension.
pub(super) fn catalog() -> Vec<JobPosting> {
    let mut backend = posting("job-1", "Backend Engineer");
    backend.skills = vec!["Go".to_string(), "SQL".to_string()];
    backend.salary = 150_000.0;
    backend.experience = 5.0;
    backend.date_posted = posted_on(2024, 3, 1);
    backend.is_actively_hiring = true;

    let mut designer = posting("job-2", "Product Designer");
    designer.department = "Design".to_string();
    designer.location = "Remote".to_string();
    designer.skills = vec!["Figma".to_string(), "User Research".to_string()];
    designer.salary = 90_000.0;
    designer.experience = 2.0;
    designer.date_posted = posted_on(2024, 2, 1);
    designer.interview_type = InterviewType::Hybrid;

    let mut platform = posting("job-3", "Platform Engineer");
    platform.skills = vec!["Go".to_string(), "Kubernetes".to_string()];
    platform.salary = 150_000.0;
    platform.experience = 7.0;
    platform.date_posted = posted_on(2024, 1, 15);
    platform.is_active = false;

    let mut marketer = posting("job-4", "growth marketer");
    marketer.department = "Marketing".to_string();
    marketer.location = "bengaluru".to_string();
    marketer.skills = vec!["SEO".to_string(), "PostgreSQL".to_string()];
    marketer.salary = 70_000.0;
    marketer.experience = 1.5;
    marketer.date_posted = posted_on(2024, 3, 1);
    marketer.interview_type = InterviewType::Offline;
    marketer.is_actively_hiring = true;

    vec![backend, designer, platform, marketer]
}

pub(super) fn ids(postings: &[&JobPosting]) -> Vec<String> {
    postings.iter().map(|posting| posting.id.0.clone()).collect()
}

pub(super) fn draft() -> PostingDraft {
    PostingDraft {
        title: "  Data Engineer ".to_string(),
        location: "Pune".to_string(),
        department: "Engineering".to_string(),
        skills: vec!["Python".to_string(), " SQL".to_string(), "Python".to_string()],
        salary: 120_000.0,
        experience: 4.0,
        interview_type: InterviewType::Hybrid,
        is_active: true,
        is_actively_hiring: true,
        description: "<p>Pipelines.</p>".to_string(),
    }
}

pub(super) fn build_service() -> (JobCatalogService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = JobCatalogService::new(repository.clone());
    (service, repository)
}

pub(super) fn seeded_service() -> (JobCatalogService<MemoryRepository>, Arc<MemoryRepository>) {
    let (service, repository) = build_service();
    service.seed(catalog()).expect("seed catalog");
    (service, repository)
}

pub(super) fn catalog_router_with_service(
    service: JobCatalogService<MemoryRepository>,
) -> axum::Router {
    catalog_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<Vec<JobPosting>>>,
}

impl JobRepository for MemoryRepository {
    fn insert(&self, posting: JobPosting) -> Result<JobPosting, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == posting.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(posting.clone());
        Ok(posting)
    }

    fn update(&self, posting: JobPosting) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == posting.id) {
            Some(slot) => {
                *slot = posting;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, id: &JobId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let before = guard.len();
        guard.retain(|existing| &existing.id != id);
        if guard.len() == before {
            Err(RepositoryError::NotFound)
        } else {
            Ok(())
        }
    }

    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|existing| &existing.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.clone())
    }
}

impl MemoryRepository {
    pub(super) fn by_id(&self) -> HashMap<JobId, JobPosting> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .iter()
            .map(|posting| (posting.id.clone(), posting.clone()))
            .collect()
    }
}

pub(super) struct UnavailableRepository;

impl JobRepository for UnavailableRepository {
    fn insert(&self, _posting: JobPosting) -> Result<JobPosting, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _posting: JobPosting) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &JobId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
