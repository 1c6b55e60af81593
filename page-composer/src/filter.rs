//! Search and facet filtering over a company's jobs.

use serde::{Deserialize, Serialize};
use shared_types::Job;

/// Facet value meaning "do not filter on this field".
pub const ALL: &str = "All";

fn all() -> String {
    ALL.to_string()
}

/// Job board criteria, as sent in the careers page query string
/// (`?q=&location=&type=`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobQuery {
    /// Case-insensitive substring of the job title
    #[serde(default, rename = "q")]
    pub search: String,
    #[serde(default = "all")]
    pub location: String,
    #[serde(default = "all", rename = "type")]
    pub employment_type: String,
}

impl Default for JobQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            location: all(),
            employment_type: all(),
        }
    }
}

impl JobQuery {
    pub fn matches(&self, job: &Job) -> bool {
        let matches_search = job
            .title
            .to_lowercase()
            .contains(&self.search.to_lowercase());
        let matches_location = self.location == ALL || job.location == self.location;
        let matches_type =
            self.employment_type == ALL || job.employment_type.as_str() == self.employment_type;

        matches_search && matches_location && matches_type
    }

    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty() && self.location == ALL && self.employment_type == ALL
    }
}

/// Jobs matching every criterion, in their original order.
pub fn filter_jobs(jobs: &[Job], query: &JobQuery) -> Vec<Job> {
    jobs.iter().filter(|job| query.matches(job)).cloned().collect()
}

/// `"All"` followed by each distinct location in first-seen order.
pub fn location_options(jobs: &[Job]) -> Vec<String> {
    facet_options(jobs.iter().map(|job| job.location.as_str()))
}

/// `"All"` followed by each distinct employment type in first-seen order.
pub fn employment_type_options(jobs: &[Job]) -> Vec<String> {
    facet_options(jobs.iter().map(|job| job.employment_type.as_str()))
}

fn facet_options<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut options = vec![all()];
    let mut seen = std::collections::HashSet::new();
    for value in values {
        if seen.insert(value) {
            options.push(value.to_string());
        }
    }
    options
}
