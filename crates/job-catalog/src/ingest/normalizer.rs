use crate::catalog::domain::validate_amount;
use crate::catalog::{normalize_skills, InterviewType, JobId, JobPosting};

use super::parser::{LabeledValue, RawNumber, RawPosting};

/// Turn a raw document into a posting, or explain which field made it unusable.
pub(crate) fn normalize_posting(raw: RawPosting) -> Result<JobPosting, String> {
    let id = non_blank(raw.id).ok_or("missing id")?;
    let title = non_blank(raw.title).ok_or("missing title")?;
    let date_posted = raw
        .date_posted
        .ok_or("missing datePosted")?
        .resolve()
        .ok_or("datePosted is not a recognizable timestamp")?;

    let interview_type = match non_blank(raw.interview_type.map(LabeledValue::into_value)) {
        Some(value) => value
            .parse::<InterviewType>()
            .map_err(|err| err.to_string())?,
        None => InterviewType::default(),
    };

    let skills = normalize_skills(
        raw.skills
            .unwrap_or_default()
            .into_iter()
            .map(LabeledValue::into_value),
    );

    Ok(JobPosting {
        id: JobId(id),
        title,
        location: non_blank(raw.location).unwrap_or_default(),
        department: non_blank(raw.department.map(LabeledValue::into_value)).unwrap_or_default(),
        skills,
        salary: amount("salary", raw.salary)?,
        experience: amount("experience", raw.experience)?,
        date_posted,
        interview_type,
        is_active: raw.is_active.unwrap_or(false),
        is_actively_hiring: raw.is_actively_hiring.unwrap_or(false),
        description: raw.description.unwrap_or_default(),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

// Missing amounts default to zero, matching what the admin form stores for blank inputs.
fn amount(field: &str, value: Option<RawNumber>) -> Result<f64, String> {
    let number = match value {
        None => return Ok(0.0),
        Some(RawNumber::Number(number)) => number,
        Some(RawNumber::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            trimmed
                .replace(',', "")
                .parse::<f64>()
                .map_err(|_| format!("{field} '{trimmed}' is not a number"))?
        }
    };

    if validate_amount(number) {
        Ok(number)
    } else {
        Err(format!("{field} must be a non-negative number, got {number}"))
    }
}
