use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::slug::slugify;
use crate::validation::{require_non_empty, validate_http_url, validate_slug, ValidationError};

pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Whole days between `created_at_ms` and `now_ms`, rounded down.
pub fn posted_days_ago(created_at_ms: i64, now_ms: i64) -> i64 {
    (now_ms - created_at_ms).div_euclid(MILLIS_PER_DAY)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Job {
    pub id: String,
    pub company_id: String,
    pub title: String,
    /// Unique within the owning company
    pub slug: String,
    pub location: String,
    pub work_policy: WorkPolicy,
    pub department: String,
    pub employment_type: EmploymentType,
    pub experience_level: ExperienceLevel,
    pub job_type: JobType,
    pub salary_range: Option<String>,
    /// Sanitized rich-text HTML
    pub description: String,
    pub application_url: Option<String>,
    /// Epoch milliseconds
    pub created_at: i64,
    /// Derived from `created_at` whenever the job is read
    pub posted_days_ago: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum WorkPolicy {
    Remote,
    Hybrid,
    #[serde(rename = "On-site")]
    OnSite,
}

impl WorkPolicy {
    pub fn as_str(&self) -> &str {
        match self {
            WorkPolicy::Remote => "Remote",
            WorkPolicy::Hybrid => "Hybrid",
            WorkPolicy::OnSite => "On-site",
        }
    }
}

impl std::str::FromStr for WorkPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Remote" => Ok(WorkPolicy::Remote),
            "Hybrid" => Ok(WorkPolicy::Hybrid),
            "On-site" => Ok(WorkPolicy::OnSite),
            other => Err(ValidationError::new("workPolicy", format!("unknown work policy '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum EmploymentType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Internship,
}

impl EmploymentType {
    pub fn as_str(&self) -> &str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Contract => "Contract",
            EmploymentType::Internship => "Internship",
        }
    }
}

impl std::str::FromStr for EmploymentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Full-time" => Ok(EmploymentType::FullTime),
            "Part-time" => Ok(EmploymentType::PartTime),
            "Contract" => Ok(EmploymentType::Contract),
            "Internship" => Ok(EmploymentType::Internship),
            other => Err(ValidationError::new(
                "employmentType",
                format!("unknown employment type '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ExperienceLevel {
    Junior,
    #[serde(rename = "Mid-level")]
    MidLevel,
    Senior,
    Lead,
    Executive,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &str {
        match self {
            ExperienceLevel::Junior => "Junior",
            ExperienceLevel::MidLevel => "Mid-level",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::Lead => "Lead",
            ExperienceLevel::Executive => "Executive",
        }
    }
}

impl std::str::FromStr for ExperienceLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Junior" => Ok(ExperienceLevel::Junior),
            "Mid-level" => Ok(ExperienceLevel::MidLevel),
            "Senior" => Ok(ExperienceLevel::Senior),
            "Lead" => Ok(ExperienceLevel::Lead),
            "Executive" => Ok(ExperienceLevel::Executive),
            other => Err(ValidationError::new(
                "experienceLevel",
                format!("unknown experience level '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum JobType {
    Permanent,
    Temporary,
}

impl JobType {
    pub fn as_str(&self) -> &str {
        match self {
            JobType::Permanent => "Permanent",
            JobType::Temporary => "Temporary",
        }
    }
}

impl std::str::FromStr for JobType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Permanent" => Ok(JobType::Permanent),
            "Temporary" => Ok(JobType::Temporary),
            other => Err(ValidationError::new("jobType", format!("unknown job type '{other}'"))),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.as_str())
                }
            }
        )*
    };
}

display_as_str!(WorkPolicy, EmploymentType, ExperienceLevel, JobType);

/// Job form submitted from the editor. Missing fields fall back to the
/// editor's defaults.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateJobRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub location: Option<String>,
    pub work_policy: Option<WorkPolicy>,
    pub department: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub experience_level: Option<ExperienceLevel>,
    pub job_type: Option<JobType>,
    pub salary_range: Option<String>,
    pub description: Option<String>,
    pub application_url: Option<String>,
}

/// A fully resolved job ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub company_id: String,
    pub title: String,
    pub slug: String,
    pub location: String,
    pub work_policy: WorkPolicy,
    pub department: String,
    pub employment_type: EmploymentType,
    pub experience_level: ExperienceLevel,
    pub job_type: JobType,
    pub salary_range: Option<String>,
    pub description: String,
    pub application_url: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CreateJobRequest {
    /// Applies defaults and derives the slug from the title when none is given.
    pub fn into_new_job(self, company_id: &str, now_ms: i64) -> Result<NewJob, ValidationError> {
        let title = non_blank(self.title).unwrap_or_else(|| "Untitled Job".to_string());
        let slug = match non_blank(self.slug) {
            Some(slug) => slug,
            None => {
                let derived = slugify(&title);
                if derived.is_empty() {
                    format!("job-{now_ms}")
                } else {
                    derived
                }
            }
        };
        validate_slug("slug", &slug)?;
        let application_url = non_blank(self.application_url);
        if let Some(url) = &application_url {
            validate_http_url("applicationUrl", url)?;
        }

        Ok(NewJob {
            company_id: company_id.to_string(),
            title,
            slug,
            location: non_blank(self.location).unwrap_or_else(|| "Remote".to_string()),
            work_policy: self.work_policy.unwrap_or(WorkPolicy::Remote),
            department: non_blank(self.department).unwrap_or_else(|| "Engineering".to_string()),
            employment_type: self.employment_type.unwrap_or(EmploymentType::FullTime),
            experience_level: self.experience_level.unwrap_or(ExperienceLevel::MidLevel),
            job_type: self.job_type.unwrap_or(JobType::Permanent),
            salary_range: non_blank(self.salary_range),
            description: self.description.unwrap_or_default(),
            application_url,
        })
    }
}

/// Partial job update. Absent fields are left untouched; an empty
/// `salaryRange` or `applicationUrl` clears the stored value.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub location: Option<String>,
    pub work_policy: Option<WorkPolicy>,
    pub department: Option<String>,
    pub employment_type: Option<EmploymentType>,
    pub experience_level: Option<ExperienceLevel>,
    pub job_type: Option<JobType>,
    pub salary_range: Option<String>,
    pub description: Option<String>,
    pub application_url: Option<String>,
}

impl UpdateJobRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("title", &self.title),
            ("location", &self.location),
            ("department", &self.department),
        ] {
            if let Some(value) = value {
                require_non_empty(field, value)?;
            }
        }
        if let Some(slug) = &self.slug {
            validate_slug("slug", slug)?;
        }
        if let Some(url) = self.application_url.as_deref().filter(|u| !u.trim().is_empty()) {
            validate_http_url("applicationUrl", url)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct JobsResponse {
    pub jobs: Vec<Job>,
}
