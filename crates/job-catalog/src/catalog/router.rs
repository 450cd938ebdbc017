use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::domain::{
    InterviewType, JobId, JobPosting, PostingDraft, PostingUpdate, UnknownInterviewType,
};
use super::filter::{FilterConfig, InvalidSortOption, SortOption};
use super::repository::{JobRepository, RepositoryError};
use super::service::{CatalogServiceError, JobCatalogService};

/// Query string accepted by the listing endpoint. Blank values leave a dimension unconstrained.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobListingQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    /// Comma separated list of required skills.
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub interview_type: Option<String>,
    #[serde(default)]
    pub is_active: Option<String>,
    #[serde(default)]
    pub is_actively_hiring: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListingQueryError {
    #[error(transparent)]
    Sort(#[from] InvalidSortOption),
    #[error(transparent)]
    InterviewType(#[from] UnknownInterviewType),
    #[error("{name} must be 'true' or 'false', got '{value}'")]
    Flag { name: &'static str, value: String },
}

impl JobListingQuery {
    pub fn into_filter(self) -> Result<FilterConfig, ListingQueryError> {
        let skills: Vec<String> = self
            .skills
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|skill| !skill.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let interview_type = blank_to_none(self.interview_type)
            .map(|raw| raw.parse::<InterviewType>())
            .transpose()?;
        let sort = blank_to_none(self.sort)
            .map(|raw| raw.parse::<SortOption>())
            .transpose()?
            .unwrap_or_default();

        Ok(FilterConfig::default()
            .with_search(self.search.unwrap_or_default().trim().to_string())
            .with_location(blank_to_none(self.location))
            .with_department(blank_to_none(self.department))
            .with_skills(skills)
            .with_interview_type(interview_type)
            .with_active(parse_flag("is_active", self.is_active)?)
            .with_actively_hiring(parse_flag("is_actively_hiring", self.is_actively_hiring)?)
            .with_sort(sort))
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn parse_flag(
    name: &'static str,
    value: Option<String>,
) -> Result<Option<bool>, ListingQueryError> {
    match blank_to_none(value) {
        None => Ok(None),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(ListingQueryError::Flag { name, value: raw }),
        },
    }
}

#[derive(Debug, Serialize)]
pub struct JobListingResponse {
    pub jobs: Vec<JobPosting>,
    pub total: usize,
    pub active_filters: usize,
}

/// Router builder exposing the listing and admin posting endpoints.
pub fn catalog_router<R>(service: Arc<JobCatalogService<R>>) -> Router
where
    R: JobRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route("/api/v1/jobs/stats", get(stats_handler::<R>))
        .route("/api/v1/skills", get(skills_handler::<R>))
        .route(
            "/api/v1/jobs/:job_id",
            get(get_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<JobCatalogService<R>>>,
    Query(query): Query<JobListingQuery>,
) -> Response
where
    R: JobRepository + 'static,
{
    let config = match query.into_filter() {
        Ok(config) => config,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.search(&config) {
        Ok(jobs) => {
            let body = JobListingResponse {
                total: jobs.len(),
                active_filters: config.active_filter_count(),
                jobs,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<JobCatalogService<R>>>,
    axum::Json(draft): axum::Json<PostingDraft>,
) -> Response
where
    R: JobRepository + 'static,
{
    match service.create(draft) {
        Ok(posting) => (StatusCode::CREATED, axum::Json(posting)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<JobCatalogService<R>>>,
    Path(job_id): Path<String>,
) -> Response
where
    R: JobRepository + 'static,
{
    match service.get(&JobId(job_id)) {
        Ok(posting) => (StatusCode::OK, axum::Json(posting)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<JobCatalogService<R>>>,
    Path(job_id): Path<String>,
    axum::Json(update): axum::Json<PostingUpdate>,
) -> Response
where
    R: JobRepository + 'static,
{
    match service.update(&JobId(job_id), update) {
        Ok(posting) => (StatusCode::OK, axum::Json(posting)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<JobCatalogService<R>>>,
    Path(job_id): Path<String>,
) -> Response
where
    R: JobRepository + 'static,
{
    match service.delete(&JobId(job_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn stats_handler<R>(State(service): State<Arc<JobCatalogService<R>>>) -> Response
where
    R: JobRepository + 'static,
{
    match service.stats() {
        Ok(stats) => (StatusCode::OK, axum::Json(stats)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn skills_handler<R>(State(service): State<Arc<JobCatalogService<R>>>) -> Response
where
    R: JobRepository + 'static,
{
    match service.known_skills() {
        Ok(skills) => (StatusCode::OK, axum::Json(json!({ "skills": skills }))).into_response(),
        Err(error) => service_error_response(error),
    }
}

fn service_error_response(error: CatalogServiceError) -> Response {
    let status = match &error {
        CatalogServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CatalogServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        CatalogServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        CatalogServiceError::Repository(RepositoryError::Unavailable(reason)) => {
            warn!(%reason, "posting repository unavailable");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
