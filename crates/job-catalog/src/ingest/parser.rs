use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Scalar that older documents store as a bare string and form submissions as `{label, value}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum LabeledValue {
    Bare(String),
    Labeled { value: String },
}

impl LabeledValue {
    pub(crate) fn into_value(self) -> String {
        match self {
            LabeledValue::Bare(value) | LabeledValue::Labeled { value } => value,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawNumber {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawTimestamp {
    Millis(i64),
    Text(String),
    Document {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
}

impl RawTimestamp {
    pub(crate) fn resolve(&self) -> Option<DateTime<Utc>> {
        match self {
            RawTimestamp::Millis(millis) => Utc.timestamp_millis_opt(*millis).single(),
            RawTimestamp::Text(text) => parse_datetime(text),
            RawTimestamp::Document {
                seconds,
                nanoseconds,
            } => Utc.timestamp_opt(*seconds, *nanoseconds).single(),
        }
    }
}

/// Posting document as exported from the hosted store, before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawPosting {
    #[serde(default)]
    pub(crate) id: Option<String>,
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) location: Option<String>,
    #[serde(default)]
    pub(crate) department: Option<LabeledValue>,
    #[serde(default)]
    pub(crate) skills: Option<Vec<LabeledValue>>,
    #[serde(default)]
    pub(crate) salary: Option<RawNumber>,
    #[serde(default)]
    pub(crate) experience: Option<RawNumber>,
    #[serde(default)]
    pub(crate) date_posted: Option<RawTimestamp>,
    #[serde(default)]
    pub(crate) interview_type: Option<LabeledValue>,
    #[serde(default)]
    pub(crate) is_active: Option<bool>,
    #[serde(default)]
    pub(crate) is_actively_hiring: Option<bool>,
    #[serde(default)]
    pub(crate) description: Option<String>,
}

pub(crate) fn parse_json<R: Read>(reader: R) -> Result<Vec<RawPosting>, serde_json::Error> {
    serde_json::from_reader(reader)
}

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<RawPosting>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<CsvPostingRow>() {
        records.push(record?.into_raw());
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct CsvPostingRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    title: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    department: Option<String>,
    #[serde(default)]
    skills: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    salary: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    experience: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    date_posted: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    interview_type: Option<String>,
    #[serde(default)]
    is_active: Option<bool>,
    #[serde(default)]
    is_actively_hiring: Option<bool>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
}

impl CsvPostingRow {
    fn into_raw(self) -> RawPosting {
        let skills = self
            .skills
            .split(';')
            .map(|skill| LabeledValue::Bare(skill.to_string()))
            .collect();

        RawPosting {
            id: self.id,
            title: self.title,
            location: self.location,
            department: self.department.map(LabeledValue::Bare),
            skills: Some(skills),
            salary: self.salary.map(RawNumber::Text),
            experience: self.experience.map(RawNumber::Text),
            date_posted: self.date_posted.map(RawTimestamp::Text),
            interview_type: self.interview_type.map(LabeledValue::Bare),
            is_active: self.is_active,
            is_actively_hiring: self.is_actively_hiring,
            description: self.description,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    None
}
