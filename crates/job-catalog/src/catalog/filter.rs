//! Filtering and ordering of job postings for the careers listing.
//!
//! `apply` is pure: it reads the postings and a [`FilterConfig`] and returns references to the
//! visible postings in display order. Text matching rules:
//!
//! * `search` is a case-insensitive substring match against the title and every skill.
//! * `location`, `department`, and required skills compare with exact, case-sensitive equality.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::domain::{InterviewType, JobPosting};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    DatePosted,
    Title,
    Salary,
    Experience,
}

impl SortField {
    pub const fn ordered() -> [Self; 4] {
        [Self::DatePosted, Self::Title, Self::Salary, Self::Experience]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::DatePosted => "date_posted",
            Self::Title => "title",
            Self::Salary => "salary",
            Self::Experience => "experience",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DatePosted => "Date posted",
            Self::Title => "Title",
            Self::Salary => "Salary",
            Self::Experience => "Experience",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Sort key plus direction. Renders as `"<field>-<direction>"`, e.g. `salary-desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortOption {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOption {
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn compare(&self, a: &JobPosting, b: &JobPosting) -> Ordering {
        let ordering = match self.field {
            SortField::DatePosted => a
                .date_posted
                .timestamp_millis()
                .cmp(&b.date_posted.timestamp_millis()),
            SortField::Title => compare_titles(&a.title, &b.title),
            SortField::Salary => a.salary.total_cmp(&b.salary),
            SortField::Experience => a.experience.total_cmp(&b.experience),
        };
        self.direction.orient(ordering)
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.field.key(), self.direction.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid sort '{0}': expected <date_posted|title|salary|experience>-<asc|desc>")]
pub struct InvalidSortOption(pub String);

impl FromStr for SortOption {
    type Err = InvalidSortOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidSortOption(value.to_string());
        let (field, direction) = value.trim().rsplit_once('-').ok_or_else(invalid)?;

        let field = SortField::ordered()
            .into_iter()
            .find(|candidate| candidate.key() == field || field == camel_key(*candidate))
            .ok_or_else(invalid)?;
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(invalid()),
        };

        Ok(Self { field, direction })
    }
}

// Posting exports use camelCase field names ("datePosted-desc").
fn camel_key(field: SortField) -> &'static str {
    match field {
        SortField::DatePosted => "datePosted",
        other => other.key(),
    }
}

/// Collation-style title ordering: base letters first (accents and case ignored), then
/// unaccented before accented, then lowercase before uppercase.
fn compare_titles(a: &str, b: &str) -> Ordering {
    let base = |title: &str| -> Vec<char> {
        title
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect()
    };
    let accented =
        |title: &str| -> Vec<char> { title.nfd().flat_map(char::to_lowercase).collect() };

    base(a)
        .cmp(&base(b))
        .then_with(|| accented(a).cmp(&accented(b)))
        .then_with(|| b.cmp(a))
}

/// Starting point a [`FilterConfig`] was created from. Dimensions still at the preset's value
/// are not reported as active filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPreset {
    #[default]
    Unconstrained,
    CareersPage,
}

impl FilterPreset {
    fn default_active(self) -> Option<bool> {
        match self {
            Self::Unconstrained => None,
            Self::CareersPage => Some(true),
        }
    }
}

/// User-selected constraints plus sort order, applied atomically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    #[serde(default)]
    pub interview_type: Option<InterviewType>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_actively_hiring: Option<bool>,
    #[serde(default)]
    pub sort: SortOption,
    #[serde(default)]
    pub preset: FilterPreset,
}

impl FilterConfig {
    /// Defaults for the public careers page: only active postings, newest first.
    pub fn careers_page() -> Self {
        let preset = FilterPreset::CareersPage;
        Self {
            is_active: preset.default_active(),
            preset,
            ..Self::default()
        }
    }

    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self
        }
    }

    pub fn with_location(self, location: Option<String>) -> Self {
        Self { location, ..self }
    }

    pub fn with_department(self, department: Option<String>) -> Self {
        Self { department, ..self }
    }

    pub fn with_skills<I, S>(self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skills: skills.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    /// Toggle a single required skill on or off, as the filter panel checkboxes do.
    pub fn toggle_skill(mut self, skill: &str) -> Self {
        if !self.skills.remove(skill) {
            self.skills.insert(skill.to_string());
        }
        self
    }

    pub fn with_interview_type(self, interview_type: Option<InterviewType>) -> Self {
        Self {
            interview_type,
            ..self
        }
    }

    pub fn with_active(self, is_active: Option<bool>) -> Self {
        Self { is_active, ..self }
    }

    pub fn with_actively_hiring(self, is_actively_hiring: Option<bool>) -> Self {
        Self {
            is_actively_hiring,
            ..self
        }
    }

    pub fn with_sort(self, sort: SortOption) -> Self {
        Self { sort, ..self }
    }

    /// Number of constrained filter dimensions, shown as a badge next to the filter panel.
    ///
    /// Free-text search and required skills are not counted. The activity flag counts only
    /// when it differs from the preset's value, and the sort only when its field differs from
    /// the default.
    pub fn active_filter_count(&self) -> usize {
        [
            non_empty(self.department.as_deref()).is_some(),
            non_empty(self.location.as_deref()).is_some(),
            self.interview_type.is_some(),
            self.is_active != self.preset.default_active(),
            self.is_actively_hiring.is_some(),
            self.sort.field != SortField::default(),
        ]
        .into_iter()
        .filter(|constrained| *constrained)
        .count()
    }

    pub fn matches(&self, posting: &JobPosting) -> bool {
        self.matches_search(posting)
            && non_empty(self.location.as_deref())
                .map_or(true, |location| posting.location == location)
            && non_empty(self.department.as_deref())
                .map_or(true, |department| posting.department == department)
            && self.skills.iter().all(|skill| posting.has_skill(skill))
            && self
                .interview_type
                .map_or(true, |kind| posting.interview_type == kind)
            && self
                .is_active
                .map_or(true, |expected| posting.is_active == expected)
            && self
                .is_actively_hiring
                .map_or(true, |expected| posting.is_actively_hiring == expected)
    }

    fn matches_search(&self, posting: &JobPosting) -> bool {
        let needle = self.search.to_lowercase();
        if needle.is_empty() {
            return true;
        }

        posting.title.to_lowercase().contains(&needle)
            || posting
                .skills
                .iter()
                .any(|skill| skill.to_lowercase().contains(&needle))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

/// Select the postings matching `config` and order them by its sort option.
///
/// The sort is stable, so postings that compare equal keep their input order in either
/// direction.
pub fn apply<'a>(jobs: &'a [JobPosting], config: &FilterConfig) -> Vec<&'a JobPosting> {
    let mut visible: Vec<&JobPosting> = jobs.iter().filter(|job| config.matches(job)).collect();
    visible.sort_by(|a, b| config.sort.compare(a, b));
    visible
}
