use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod admin;
pub mod company;
pub mod job;
pub mod section;
pub mod slug;
pub mod validation;

pub use admin::{
    AdminCompanySummary, AdminProfile, AuthSessionResponse, AuthUser, CreateAdminCompanyRequest,
    EditorRedirect, SignInRequest, SignUpRequest, SignUpResponse,
};
pub use company::{
    BrandConfig, CompaniesResponse, Company, EditorDataResponse,
    FontFamily, UpdateCompanyRequest,
};
pub use job::{
    posted_days_ago, CreateJobRequest, EmploymentType, ExperienceLevel, Job, JobType,
    JobsResponse, NewJob, UpdateJobRequest, WorkPolicy, MILLIS_PER_DAY,
};
pub use section::{
    AddSectionRequest, MoveDirection, MoveSectionRequest, PageSection, SectionKind,
    UpdateSectionRequest,
};
pub use slug::{is_valid_slug, slugify};
pub use validation::ValidationError;

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}
