use clap::Args;
use job_catalog::catalog::{
    apply, CatalogStats, FilterConfig, InterviewType, JobPosting, SortOption,
};
use job_catalog::error::AppError;
use job_catalog::ingest::PostingImporter;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct JobsListArgs {
    /// Posting export to read (.csv for CSV, anything else is parsed as JSON)
    #[arg(long)]
    pub(crate) source: PathBuf,
    /// Case-insensitive text matched against titles and skills
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Exact location to keep
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Exact department to keep
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// Required skill; repeat for several
    #[arg(long = "skill")]
    pub(crate) skills: Vec<String>,
    /// Online, Offline, or Hybrid
    #[arg(long, value_parser = crate::infra::parse_interview_type)]
    pub(crate) interview_type: Option<InterviewType>,
    /// Keep only active (true) or inactive (false) postings
    #[arg(long)]
    pub(crate) active: Option<bool>,
    /// Keep only postings that are (true) or are not (false) actively hiring
    #[arg(long)]
    pub(crate) hiring: Option<bool>,
    /// Sort key such as title-asc or salary-desc (defaults to date_posted-desc)
    #[arg(long, value_parser = crate::infra::parse_sort)]
    pub(crate) sort: Option<SortOption>,
    /// Start from the public careers page defaults (active postings only)
    #[arg(long)]
    pub(crate) careers: bool,
}

#[derive(Args, Debug)]
pub(crate) struct JobsStatsArgs {
    /// Posting export to read
    #[arg(long)]
    pub(crate) source: PathBuf,
}

impl JobsListArgs {
    pub(crate) fn filter_config(&self) -> FilterConfig {
        let base = if self.careers {
            FilterConfig::careers_page()
        } else {
            FilterConfig::default()
        };

        let mut config = base
            .with_search(self.search.clone().unwrap_or_default())
            .with_location(self.location.clone())
            .with_department(self.department.clone())
            .with_skills(self.skills.iter().map(|skill| skill.trim()))
            .with_interview_type(self.interview_type)
            .with_actively_hiring(self.hiring)
            .with_sort(self.sort.unwrap_or_default());
        if self.active.is_some() {
            config = config.with_active(self.active);
        }
        config
    }
}

pub(crate) fn run_jobs_list(args: JobsListArgs) -> Result<(), AppError> {
    let postings = PostingImporter::from_path(&args.source)?;
    let config = args.filter_config();
    let visible = apply(&postings, &config);

    println!(
        "Showing {} of {} postings ({} active filters, sorted by {})",
        visible.len(),
        postings.len(),
        config.active_filter_count(),
        config.sort
    );
    for posting in visible {
        println!("{}", render_posting(posting));
    }
    Ok(())
}

pub(crate) fn run_jobs_stats(args: JobsStatsArgs) -> Result<(), AppError> {
    let postings = PostingImporter::from_path(&args.source)?;
    let stats = CatalogStats::from_postings(&postings);
    for line in render_stats(&stats) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn render_posting(posting: &JobPosting) -> String {
    let mut flags = Vec::new();
    if !posting.is_active {
        flags.push("inactive");
    }
    if posting.is_actively_hiring {
        flags.push("actively hiring");
    }
    let suffix = if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    };

    format!(
        "- {} | {} | {} | {} | {:.0} salary | {} yrs | posted {} | skills: {}{}",
        posting.title,
        posting.department,
        posting.location,
        posting.interview_type,
        posting.salary,
        posting.experience,
        posting.date_posted.format("%Y-%m-%d"),
        posting.skills.join(", "),
        suffix
    )
}

pub(crate) fn render_stats(stats: &CatalogStats) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Postings: {} total | {} active | {} inactive | {} actively hiring",
            stats.total_jobs, stats.active_jobs, stats.inactive_jobs, stats.actively_hiring
        ),
        format!("Distinct skills: {}", stats.total_skills),
    ];
    if !stats.top_skills.is_empty() {
        lines.push("Top skills:".to_string());
        lines.extend(
            stats
                .top_skills
                .iter()
                .map(|skill| format!("  - {}: {}", skill.name, skill.count)),
        );
    }
    if !stats.departments.is_empty() {
        lines.push("Departments:".to_string());
        lines.extend(
            stats
                .departments
                .iter()
                .map(|department| format!("  - {}: {}", department.name, department.count)),
        );
    }
    lines
}
