use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::JobId;

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Shortlisted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Reviewed => "Reviewed",
            Self::Shortlisted => "Shortlisted",
            Self::Rejected => "Rejected",
        }
    }
}

/// Candidate provided form data. The resume itself lives in object storage; only its URL is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub current_company: String,
    #[serde(default)]
    pub notice_period: String,
    pub resume_url: String,
    #[serde(default)]
    pub save_for_later: bool,
}

/// Stored application record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub job_title: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub experience: String,
    pub current_company: String,
    pub notice_period: String,
    pub resume_url: String,
    pub save_for_later: bool,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionValidationError {
    #[error("full name is required")]
    MissingName,
    #[error("a valid email address is required")]
    InvalidEmail,
    #[error("phone number is required")]
    MissingPhone,
    #[error("a resume upload is required")]
    MissingResume,
}

impl ApplicationSubmission {
    /// Trim every field and lowercase the email so duplicate checks compare like with like.
    pub fn normalized(self) -> Result<Self, SubmissionValidationError> {
        let submission = Self {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone: self.phone.trim().to_string(),
            experience: self.experience.trim().to_string(),
            current_company: self.current_company.trim().to_string(),
            notice_period: self.notice_period.trim().to_string(),
            resume_url: self.resume_url.trim().to_string(),
            save_for_later: self.save_for_later,
        };

        if submission.full_name.is_empty() {
            return Err(SubmissionValidationError::MissingName);
        }
        let well_formed = submission
            .email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !well_formed {
            return Err(SubmissionValidationError::InvalidEmail);
        }
        if submission.phone.is_empty() {
            return Err(SubmissionValidationError::MissingPhone);
        }
        if submission.resume_url.is_empty() {
            return Err(SubmissionValidationError::MissingResume);
        }

        Ok(submission)
    }
}
