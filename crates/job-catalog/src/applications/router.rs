use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::catalog::{JobId, JobRepository, RepositoryError};

use super::domain::{ApplicationId, ApplicationStatus, ApplicationSubmission};
use super::repository::ApplicationRepository;
use super::service::{ApplicationServiceError, JobApplicationService};

#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: ApplicationStatus,
}

/// Router builder exposing application intake and review endpoints.
pub fn application_router<J, A>(service: Arc<JobApplicationService<J, A>>) -> Router
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs/:job_id/applications",
            get(list_handler::<J, A>).post(submit_handler::<J, A>),
        )
        .route(
            "/api/v1/applications/:application_id/status",
            put(status_handler::<J, A>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<J, A>(
    State(service): State<Arc<JobApplicationService<J, A>>>,
    Path(job_id): Path<String>,
    axum::Json(submission): axum::Json<ApplicationSubmission>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.submit(&JobId(job_id), submission) {
        Ok(application) => (StatusCode::CREATED, axum::Json(application)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn list_handler<J, A>(
    State(service): State<Arc<JobApplicationService<J, A>>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.list_for_job(&JobId(job_id)) {
        Ok(applications) => (StatusCode::OK, axum::Json(applications)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn status_handler<J, A>(
    State(service): State<Arc<JobApplicationService<J, A>>>,
    Path(application_id): Path<String>,
    axum::Json(change): axum::Json<StatusChange>,
) -> Response
where
    J: JobRepository + 'static,
    A: ApplicationRepository + 'static,
{
    match service.set_status(&ApplicationId(application_id), change.status) {
        Ok(application) => (StatusCode::OK, axum::Json(application)).into_response(),
        Err(error) => service_error_response(error),
    }
}

fn service_error_response(error: ApplicationServiceError) -> Response {
    let status = match &error {
        ApplicationServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ApplicationServiceError::AlreadyApplied => StatusCode::CONFLICT,
        ApplicationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ApplicationServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ApplicationServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
