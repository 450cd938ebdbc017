//! Ingestion of exported posting documents into [`JobPosting`] values.
//!
//! Shape differences in the stored documents (label/value pairs versus bare strings, several
//! timestamp encodings, numeric text) are resolved here so the catalog only sees clean postings.

mod normalizer;
mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::catalog::JobPosting;

use parser::RawPosting;

#[derive(Debug)]
pub enum PostingImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    Invalid { record: usize, reason: String },
    DuplicateId(String),
}

impl std::fmt::Display for PostingImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostingImportError::Io(err) => write!(f, "failed to read posting export: {}", err),
            PostingImportError::Csv(err) => write!(f, "invalid posting CSV data: {}", err),
            PostingImportError::Json(err) => write!(f, "invalid posting JSON data: {}", err),
            PostingImportError::Invalid { record, reason } => {
                write!(f, "posting #{} rejected: {}", record, reason)
            }
            PostingImportError::DuplicateId(id) => {
                write!(f, "posting id '{}' appears more than once", id)
            }
        }
    }
}

impl std::error::Error for PostingImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PostingImportError::Io(err) => Some(err),
            PostingImportError::Csv(err) => Some(err),
            PostingImportError::Json(err) => Some(err),
            PostingImportError::Invalid { .. } | PostingImportError::DuplicateId(_) => None,
        }
    }
}

impl From<std::io::Error> for PostingImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for PostingImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for PostingImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

pub struct PostingImporter;

impl PostingImporter {
    /// Read a posting export; `.csv` files are parsed as CSV, anything else as a JSON array.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<JobPosting>, PostingImportError> {
        let path = path.as_ref();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        let file = std::fs::File::open(path)?;

        if is_csv {
            Self::from_csv_reader(file)
        } else {
            Self::from_json_reader(file)
        }
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<JobPosting>, PostingImportError> {
        normalize_all(parser::parse_json(reader)?)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<JobPosting>, PostingImportError> {
        normalize_all(parser::parse_csv(reader)?)
    }
}

fn normalize_all(records: Vec<RawPosting>) -> Result<Vec<JobPosting>, PostingImportError> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut postings = Vec::with_capacity(records.len());

    for (index, raw) in records.into_iter().enumerate() {
        let posting = normalizer::normalize_posting(raw).map_err(|reason| {
            PostingImportError::Invalid {
                record: index + 1,
                reason,
            }
        })?;
        if !seen.insert(posting.id.0.clone()) {
            return Err(PostingImportError::DuplicateId(posting.id.0));
        }
        postings.push(posting);
    }

    Ok(postings)
}
