use std::collections::HashMap;

use serde::Serialize;

use super::domain::JobPosting;

const TOP_SKILL_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentCount {
    pub name: String,
    pub count: usize,
}

/// Dashboard overview of the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_jobs: usize,
    pub active_jobs: usize,
    pub inactive_jobs: usize,
    pub actively_hiring: usize,
    pub total_skills: usize,
    pub top_skills: Vec<SkillCount>,
    pub departments: Vec<DepartmentCount>,
}

impl CatalogStats {
    pub fn from_postings(postings: &[JobPosting]) -> Self {
        let total_jobs = postings.len();
        let active_jobs = postings.iter().filter(|job| job.is_active).count();
        let actively_hiring = postings.iter().filter(|job| job.is_actively_hiring).count();

        let mut skill_usage: HashMap<&str, usize> = HashMap::new();
        let mut department_usage: HashMap<&str, usize> = HashMap::new();
        for posting in postings {
            for skill in &posting.skills {
                *skill_usage.entry(skill.as_str()).or_default() += 1;
            }
            *department_usage
                .entry(posting.department.as_str())
                .or_default() += 1;
        }

        let total_skills = skill_usage.len();
        let mut top_skills: Vec<SkillCount> = ranked(skill_usage)
            .into_iter()
            .map(|(name, count)| SkillCount { name, count })
            .collect();
        top_skills.truncate(TOP_SKILL_LIMIT);

        let departments = ranked(department_usage)
            .into_iter()
            .map(|(name, count)| DepartmentCount { name, count })
            .collect();

        Self {
            total_jobs,
            active_jobs,
            inactive_jobs: total_jobs - active_jobs,
            actively_hiring,
            total_skills,
            top_skills,
            departments,
        }
    }
}

fn ranked(usage: HashMap<&str, usize>) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = usage
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}
