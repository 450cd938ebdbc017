//! Job posting catalog: the careers listing filter pipeline, admin CRUD, and dashboard stats.

pub mod domain;
pub mod filter;
pub mod repository;
pub mod router;
pub mod service;
pub mod stats;

#[cfg(test)]
mod tests;

pub use domain::{
    normalize_skills, InterviewType, JobId, JobPosting, PostingDraft, PostingUpdate,
    PostingValidationError, UnknownInterviewType,
};
pub use filter::{
    apply, FilterConfig, FilterPreset, InvalidSortOption, SortDirection, SortField, SortOption,
};
pub use repository::{JobRepository, RepositoryError};
pub use router::{catalog_router, JobListingQuery, JobListingResponse};
pub use service::{CatalogServiceError, JobCatalogService};
pub use stats::{CatalogStats, DepartmentCount, SkillCount};
