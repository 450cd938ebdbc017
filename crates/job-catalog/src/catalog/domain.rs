use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InterviewType {
    #[default]
    Online,
    Offline,
    Hybrid,
}

impl InterviewType {
    pub const fn ordered() -> [Self; 3] {
        [Self::Online, Self::Offline, Self::Hybrid]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
            Self::Hybrid => "Hybrid",
        }
    }
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when text does not name one of the interview formats.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown interview type '{0}' (expected Online, Offline, or Hybrid)")]
pub struct UnknownInterviewType(pub String);

impl FromStr for InterviewType {
    type Err = UnknownInterviewType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownInterviewType(trimmed.to_string()))
    }
}

/// A single job listing as materialized from the posting store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    pub location: String,
    pub department: String,
    pub skills: Vec<String>,
    pub salary: f64,
    pub experience: f64,
    pub date_posted: DateTime<Utc>,
    pub interview_type: InterviewType,
    pub is_active: bool,
    pub is_actively_hiring: bool,
    pub description: String,
}

impl JobPosting {
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|candidate| candidate == skill)
    }
}

/// Admin form payload for a new posting. The id and posting date are assigned on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingDraft {
    pub title: String,
    pub location: String,
    pub department: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub salary: f64,
    pub experience: f64,
    #[serde(default)]
    pub interview_type: InterviewType,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_actively_hiring: bool,
    #[serde(default)]
    pub description: String,
}

/// Partial edit of an existing posting; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostingUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub experience: Option<f64>,
    #[serde(default)]
    pub interview_type: Option<InterviewType>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_actively_hiring: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PostingUpdate {
    pub(crate) fn apply_to(self, posting: &mut JobPosting) {
        if let Some(title) = self.title {
            posting.title = title;
        }
        if let Some(location) = self.location {
            posting.location = location;
        }
        if let Some(department) = self.department {
            posting.department = department;
        }
        if let Some(skills) = self.skills {
            posting.skills = skills;
        }
        if let Some(salary) = self.salary {
            posting.salary = salary;
        }
        if let Some(experience) = self.experience {
            posting.experience = experience;
        }
        if let Some(interview_type) = self.interview_type {
            posting.interview_type = interview_type;
        }
        if let Some(is_active) = self.is_active {
            posting.is_active = is_active;
        }
        if let Some(is_actively_hiring) = self.is_actively_hiring {
            posting.is_actively_hiring = is_actively_hiring;
        }
        if let Some(description) = self.description {
            posting.description = description;
        }
    }
}

/// Reasons a posting is rejected before it reaches the store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PostingValidationError {
    #[error("title is required")]
    MissingTitle,
    #[error("location is required")]
    MissingLocation,
    #[error("department is required")]
    MissingDepartment,
    #[error("at least one skill is required")]
    MissingSkills,
    #[error("salary must be a non-negative number, got {0}")]
    InvalidSalary(f64),
    #[error("experience must be a non-negative number of years, got {0}")]
    InvalidExperience(f64),
}

/// Trim tags, drop blanks, and keep the first occurrence of exact duplicates.
pub fn normalize_skills<I, S>(skills: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for skill in skills {
        let trimmed = skill.as_ref().trim();
        if trimmed.is_empty() || normalized.iter().any(|existing| existing == trimmed) {
            continue;
        }
        normalized.push(trimmed.to_string());
    }
    normalized
}

pub(crate) fn validate_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Checks the admin form rules against a fully materialized posting.
pub fn validate_posting(posting: &JobPosting) -> Result<(), PostingValidationError> {
    if posting.title.trim().is_empty() {
        return Err(PostingValidationError::MissingTitle);
    }
    if posting.location.trim().is_empty() {
        return Err(PostingValidationError::MissingLocation);
    }
    if posting.department.trim().is_empty() {
        return Err(PostingValidationError::MissingDepartment);
    }
    if posting.skills.is_empty() {
        return Err(PostingValidationError::MissingSkills);
    }
    if !validate_amount(posting.salary) {
        return Err(PostingValidationError::InvalidSalary(posting.salary));
    }
    if !validate_amount(posting.experience) {
        return Err(PostingValidationError::InvalidExperience(posting.experience));
    }
    Ok(())
}
