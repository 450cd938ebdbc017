use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{
    normalize_skills, validate_posting, JobId, JobPosting, PostingDraft, PostingUpdate,
    PostingValidationError,
};
use super::filter::{self, FilterConfig};
use super::repository::{JobRepository, RepositoryError};
use super::stats::CatalogStats;

/// Service backing the careers listing and the admin posting screens.
pub struct JobCatalogService<R> {
    repository: Arc<R>,
}

impl<R> JobCatalogService<R>
where
    R: JobRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Visible postings for a filter configuration, in display order.
    pub fn search(&self, config: &FilterConfig) -> Result<Vec<JobPosting>, CatalogServiceError> {
        let postings = self.repository.list()?;
        let visible: Vec<JobPosting> = filter::apply(&postings, config)
            .into_iter()
            .cloned()
            .collect();
        debug!(
            total = postings.len(),
            visible = visible.len(),
            sort = %config.sort,
            "applied posting filters"
        );
        Ok(visible)
    }

    /// Every posting, newest first, for the admin table.
    pub fn list(&self) -> Result<Vec<JobPosting>, CatalogServiceError> {
        self.search(&FilterConfig::default())
    }

    pub fn get(&self, id: &JobId) -> Result<JobPosting, CatalogServiceError> {
        let posting = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(posting)
    }

    /// Validate an admin draft and store it with a fresh id and posting date.
    pub fn create(&self, draft: PostingDraft) -> Result<JobPosting, CatalogServiceError> {
        let posting = JobPosting {
            id: JobId::generate(),
            title: draft.title.trim().to_string(),
            location: draft.location.trim().to_string(),
            department: draft.department.trim().to_string(),
            skills: normalize_skills(&draft.skills),
            salary: draft.salary,
            experience: draft.experience,
            date_posted: Utc::now(),
            interview_type: draft.interview_type,
            is_active: draft.is_active,
            is_actively_hiring: draft.is_actively_hiring,
            description: draft.description,
        };
        validate_posting(&posting)?;

        let stored = self.repository.insert(posting)?;
        info!(job_id = %stored.id, title = %stored.title, "job posting created");
        Ok(stored)
    }

    /// Merge a partial edit into the stored posting. The id and posting date never change.
    pub fn update(
        &self,
        id: &JobId,
        update: PostingUpdate,
    ) -> Result<JobPosting, CatalogServiceError> {
        let mut posting = self.get(id)?;
        update.apply_to(&mut posting);
        posting.title = posting.title.trim().to_string();
        posting.location = posting.location.trim().to_string();
        posting.department = posting.department.trim().to_string();
        posting.skills = normalize_skills(&posting.skills);
        validate_posting(&posting)?;

        self.repository.update(posting.clone())?;
        info!(job_id = %posting.id, "job posting updated");
        Ok(posting)
    }

    pub fn delete(&self, id: &JobId) -> Result<(), CatalogServiceError> {
        self.repository.delete(id)?;
        info!(job_id = %id, "job posting deleted");
        Ok(())
    }

    /// Bulk insert postings materialized by the importer.
    pub fn seed(&self, postings: Vec<JobPosting>) -> Result<usize, CatalogServiceError> {
        let mut inserted = 0;
        for posting in postings {
            self.repository.insert(posting)?;
            inserted += 1;
        }
        info!(inserted, "job catalog seeded");
        Ok(inserted)
    }

    pub fn stats(&self) -> Result<CatalogStats, CatalogServiceError> {
        let postings = self.repository.list()?;
        Ok(CatalogStats::from_postings(&postings))
    }

    /// Distinct skills across the catalog, offered as options by the posting form.
    pub fn known_skills(&self) -> Result<Vec<String>, CatalogServiceError> {
        let postings = self.repository.list()?;
        let mut skills: BTreeMap<String, String> = BTreeMap::new();
        for skill in postings.iter().flat_map(|posting| posting.skills.iter()) {
            skills
                .entry(skill.to_lowercase())
                .or_insert_with(|| skill.clone());
        }
        Ok(skills.into_values().collect())
    }
}

/// Error raised by the catalog service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogServiceError {
    #[error(transparent)]
    Validation(#[from] PostingValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
