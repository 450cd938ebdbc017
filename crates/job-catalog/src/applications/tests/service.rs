use std::sync::Arc;
use std::thread;

use super::common::*;
use crate::applications::domain::{ApplicationId, ApplicationStatus, SubmissionValidationError};
use crate::applications::service::{ApplicationServiceError, JobApplicationService};
use crate::catalog::{JobId, RepositoryError};

#[test]
fn submit_stores_pending_application_with_job_title() {
    let (service, applications) = build_service();
    let job_id = JobId("job-rust".to_string());

    let application = service
        .submit(&job_id, submission())
        .expect("submission accepted");

    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.job_title, "Rust Engineer");
    assert_eq!(application.full_name, "Asha Rao");
    assert_eq!(application.email, "asha.rao@example.com");
    assert!(applications
        .records
        .lock()
        .expect("mutex")
        .contains_key(&application.id));
}

#[test]
fn second_application_with_same_email_is_rejected() {
    let (service, applications) = build_service();
    let job_id = JobId("job-rust".to_string());
    service.submit(&job_id, submission()).expect("first accepted");

    let mut repeat = submission();
    repeat.email = "ASHA.RAO@example.com ".to_string();
    match service.submit(&job_id, repeat) {
        Err(ApplicationServiceError::AlreadyApplied) => {}
        other => panic!("expected duplicate rejection, got {other:?}"),
    }
    assert_eq!(applications.records.lock().expect("mutex").len(), 1);
}

#[test]
fn concurrent_submissions_from_one_email_store_a_single_application() {
    let postings = Arc::new(MemoryPostings::with(vec![open_posting()]));
    let applications = Arc::new(LockstepApplications::new(2));
    let service = JobApplicationService::new(postings, applications.clone());
    let job_id = JobId("job-rust".to_string());

    let outcomes: Vec<_> = thread::scope(|scope| {
        let submitters: Vec<_> = (0..2)
            .map(|_| scope.spawn(|| service.submit(&job_id, submission())))
            .collect();
        submitters
            .into_iter()
            .map(|submitter| submitter.join().expect("submitter thread"))
            .collect()
    });

    let accepted = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    assert_eq!(accepted, 1);
    assert!(outcomes
        .iter()
        .any(|outcome| matches!(outcome, Err(ApplicationServiceError::AlreadyApplied))));
    assert_eq!(applications.inner.records.lock().expect("mutex").len(), 1);
}

#[test]
fn submit_requires_existing_posting() {
    let (service, _) = build_service();
    match service.submit(&JobId("job-missing".to_string()), submission()) {
        Err(ApplicationServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected missing posting, got {other:?}"),
    }
}

#[test]
fn submit_validates_contact_fields() {
    let (service, _) = build_service();
    let job_id = JobId("job-rust".to_string());

    let mut bad_email = submission();
    bad_email.email = "asha.example.com".to_string();
    match service.submit(&job_id, bad_email) {
        Err(ApplicationServiceError::Validation(SubmissionValidationError::InvalidEmail)) => {}
        other => panic!("expected invalid email, got {other:?}"),
    }

    let mut no_resume = submission();
    no_resume.resume_url = " ".to_string();
    match service.submit(&job_id, no_resume) {
        Err(ApplicationServiceError::Validation(SubmissionValidationError::MissingResume)) => {}
        other => panic!("expected missing resume, got {other:?}"),
    }
}

#[test]
fn set_status_updates_stored_application() {
    let (service, _) = build_service();
    let job_id = JobId("job-rust".to_string());
    let application = service.submit(&job_id, submission()).expect("accepted");

    let updated = service
        .set_status(&application.id, ApplicationStatus::Shortlisted)
        .expect("status change");
    assert_eq!(updated.status, ApplicationStatus::Shortlisted);

    let listed = service.list_for_job(&job_id).expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, ApplicationStatus::Shortlisted);
}

#[test]
fn set_status_reports_unknown_application() {
    let (service, _) = build_service();
    let result = service.set_status(
        &ApplicationId("app-missing".to_string()),
        ApplicationStatus::Rejected,
    );
    assert!(matches!(
        result,
        Err(ApplicationServiceError::Repository(RepositoryError::NotFound))
    ));
}
