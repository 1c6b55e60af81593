//! Entity access for handlers and the CLI.
//!
//! Reads never fail because of the store: when it is missing, erroring, or
//! asked about an id that is not a UUID, the sample dataset answers instead.
//! Writes go straight to the store and report a `GatewayError`.

pub mod fallback;

use std::sync::Arc;

use page_composer::{clean_html, sanitize};
use shared_types::{
    AdminProfile, BrandConfig, Company, Job, NewJob, PageSection, SectionKind,
    UpdateCompanyRequest, UpdateJobRequest,
};

use crate::database::{admin_users, companies, is_pool_error, is_unique_violation, jobs};
use crate::database::{AsyncDbConnection, Database};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Store error: {0}")]
    Store(String),
}

impl GatewayError {
    fn from_store(err: anyhow::Error, conflict: &str) -> Self {
        if is_unique_violation(&err) {
            GatewayError::Conflict(conflict.to_string())
        } else if is_pool_error(&err) {
            GatewayError::Unavailable(err.to_string())
        } else {
            GatewayError::Store(err.to_string())
        }
    }
}

/// Outcome of the `clean-descriptions` maintenance command.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanReport {
    pub cleaned: usize,
    pub skipped: usize,
}

/// True when `id` has the shape of a stored key.
pub fn is_store_id(id: &str) -> bool {
    uuid::Uuid::parse_str(id).is_ok()
}

/// Sections a new company starts with.
pub fn default_sections() -> Vec<PageSection> {
    let section = |kind, order, title: &str, content: Option<&str>| PageSection {
        id: uuid::Uuid::new_v4().to_string(),
        kind,
        title: Some(title.to_string()),
        content: content.map(str::to_string),
        background_image_url: None,
        order,
        is_visible: true,
    };

    vec![
        section(
            SectionKind::Hero,
            0,
            "Join our team",
            Some("Help us build what comes next."),
        ),
        section(
            SectionKind::About,
            1,
            "About Us",
            Some("Add your content here..."),
        ),
        section(SectionKind::Jobs, 2, "Open Positions", None),
    ]
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn warn_unknown_sections(company: &Company) {
    let unknown = company
        .page_sections
        .iter()
        .filter(|s| s.kind == SectionKind::Unknown)
        .count();
    if unknown > 0 {
        tracing::warn!(
            "Company {} has {} section(s) of unknown type; they will not render",
            company.slug,
            unknown
        );
    }
}

#[derive(Clone)]
pub struct Gateway {
    database: Option<Arc<Database>>,
}

impl Gateway {
    pub fn new(database: Arc<Database>) -> Self {
        Self {
            database: Some(database),
        }
    }

    /// Gateway with no store: reads come from the sample dataset, writes fail.
    pub fn fallback_only() -> Self {
        Self { database: None }
    }

    pub fn has_store(&self) -> bool {
        self.database.is_some()
    }

    fn connection(&self) -> Option<AsyncDbConnection> {
        self.database.as_ref().map(|db| db.async_connection.clone())
    }

    fn write_connection(&self) -> Result<AsyncDbConnection, GatewayError> {
        self.connection()
            .ok_or_else(|| GatewayError::Unavailable("no database configured".to_string()))
    }

    pub async fn ping(&self) -> Result<(), GatewayError> {
        match &self.database {
            Some(db) => db
                .ping()
                .await
                .map_err(|e| GatewayError::Unavailable(e.to_string())),
            None => Err(GatewayError::Unavailable("no database configured".to_string())),
        }
    }

    // Companies

    pub async fn get_company(&self, id: &str) -> Option<Company> {
        let conn = match self.connection() {
            Some(conn) if is_store_id(id) => conn,
            Some(_) => {
                tracing::warn!("Company id {:?} is not a UUID, using sample data", id);
                return fallback::company(id);
            }
            None => return fallback::company(id),
        };

        match companies::get_company(conn, id).await {
            Ok(Some(company)) => {
                warn_unknown_sections(&company);
                Some(company)
            }
            Ok(None) => fallback::company(id),
            Err(e) => {
                tracing::warn!("Failed to load company {}: {}, using sample data", id, e);
                fallback::company(id)
            }
        }
    }

    pub async fn get_company_by_slug(&self, slug: &str) -> Option<Company> {
        let Some(conn) = self.connection() else {
            return fallback::company_by_slug(slug);
        };

        match companies::get_company_by_slug(conn, slug).await {
            Ok(Some(company)) => {
                warn_unknown_sections(&company);
                Some(company)
            }
            Ok(None) => {
                let company = fallback::company_by_slug(slug);
                if company.is_some() {
                    tracing::warn!("Company {} not in store, using sample data", slug);
                }
                company
            }
            Err(e) => {
                tracing::warn!("Failed to load company {}: {}, using sample data", slug, e);
                fallback::company_by_slug(slug)
            }
        }
    }

    pub async fn list_companies(&self) -> Vec<Company> {
        let Some(conn) = self.connection() else {
            return fallback::companies();
        };

        match companies::list_companies(conn).await {
            Ok(companies) => companies,
            Err(e) => {
                tracing::warn!("Failed to list companies: {}, using sample data", e);
                fallback::companies()
            }
        }
    }

    /// Inserts a company with the default brand and starter sections.
    pub async fn create_company(&self, name: &str, slug: &str) -> Result<Company, GatewayError> {
        let conn = self.write_connection()?;
        let company = companies::insert_company(
            conn,
            name,
            slug,
            &BrandConfig::default(),
            &default_sections(),
        )
        .await
        .map_err(|e| GatewayError::from_store(e, &format!("Slug '{}' is already taken", slug)))?;

        tracing::info!("Created company {} ({})", company.slug, company.id);
        Ok(company)
    }

    pub async fn update_company(
        &self,
        id: &str,
        patch: &UpdateCompanyRequest,
    ) -> Result<Company, GatewayError> {
        let conn = self.write_connection()?;
        if !is_store_id(id) {
            return Err(GatewayError::NotFound(format!("Company {}", id)));
        }

        let conflict = match &patch.slug {
            Some(slug) => format!("Slug '{}' is already taken", slug.trim()),
            None => "Company conflicts with an existing one".to_string(),
        };

        companies::update_company(conn, id, patch)
            .await
            .map_err(|e| GatewayError::from_store(e, &conflict))?
            .ok_or_else(|| GatewayError::NotFound(format!("Company {}", id)))
    }

    // Jobs

    /// Jobs of a company, newest first.
    pub async fn list_jobs(&self, company_id: &str) -> Vec<Job> {
        let conn = match self.connection() {
            Some(conn) if is_store_id(company_id) => conn,
            Some(_) => {
                tracing::warn!("Company id {:?} is not a UUID, using sample jobs", company_id);
                return fallback::jobs_for_company(company_id, now_ms());
            }
            None => return fallback::jobs_for_company(company_id, now_ms()),
        };

        match jobs::list_jobs(conn, company_id).await {
            Ok(jobs) => jobs,
            Err(e) => {
                tracing::warn!("Failed to list jobs for {}: {}, using sample jobs", company_id, e);
                fallback::jobs_for_company(company_id, now_ms())
            }
        }
    }

    pub async fn get_job(&self, id: &str) -> Option<Job> {
        let conn = match self.connection() {
            Some(conn) if is_store_id(id) => conn,
            _ => return fallback::job(id, now_ms()),
        };

        match jobs::get_job(conn, id).await {
            Ok(Some(job)) => Some(job),
            Ok(None) => fallback::job(id, now_ms()),
            Err(e) => {
                tracing::warn!("Failed to load job {}: {}, using sample data", id, e);
                fallback::job(id, now_ms())
            }
        }
    }

    pub async fn get_job_by_slug(&self, company_id: &str, slug: &str) -> Option<Job> {
        let conn = match self.connection() {
            Some(conn) if is_store_id(company_id) => conn,
            _ => return fallback::job_by_slug(company_id, slug, now_ms()),
        };

        match jobs::get_job_by_slug(conn, company_id, slug).await {
            Ok(Some(job)) => Some(job),
            Ok(None) => fallback::job_by_slug(company_id, slug, now_ms()),
            Err(e) => {
                tracing::warn!("Failed to load job {}: {}, using sample data", slug, e);
                fallback::job_by_slug(company_id, slug, now_ms())
            }
        }
    }

    /// Stores a job; the description is sanitized first.
    pub async fn create_job(&self, mut job: NewJob) -> Result<Job, GatewayError> {
        let conn = self.write_connection()?;
        if !is_store_id(&job.company_id) {
            return Err(GatewayError::NotFound(format!("Company {}", job.company_id)));
        }
        job.description = sanitize(&job.description);

        let created = jobs::insert_job(conn, &job).await.map_err(|e| {
            GatewayError::from_store(e, &format!("A job with slug '{}' already exists", job.slug))
        })?;

        tracing::info!("Created job {} for company {}", created.slug, created.company_id);
        Ok(created)
    }

    pub async fn update_job(
        &self,
        id: &str,
        mut patch: UpdateJobRequest,
    ) -> Result<Job, GatewayError> {
        let conn = self.write_connection()?;
        if !is_store_id(id) {
            return Err(GatewayError::NotFound(format!("Job {}", id)));
        }
        if let Some(description) = patch.description.as_deref() {
            patch.description = Some(sanitize(description));
        }

        let conflict = match &patch.slug {
            Some(slug) => format!("A job with slug '{}' already exists", slug.trim()),
            None => "Job conflicts with an existing one".to_string(),
        };

        jobs::update_job(conn, id, &patch)
            .await
            .map_err(|e| GatewayError::from_store(e, &conflict))?
            .ok_or_else(|| GatewayError::NotFound(format!("Job {}", id)))
    }

    pub async fn delete_job(&self, id: &str) -> Result<(), GatewayError> {
        let conn = self.write_connection()?;
        if !is_store_id(id) {
            return Err(GatewayError::NotFound(format!("Job {}", id)));
        }

        let deleted = jobs::delete_job(conn, id)
            .await
            .map_err(|e| GatewayError::from_store(e, "Job could not be deleted"))?;
        if !deleted {
            return Err(GatewayError::NotFound(format!("Job {}", id)));
        }

        tracing::info!("Deleted job {}", id);
        Ok(())
    }

    /// Strips editor offset attributes from every stored description.
    pub async fn clean_descriptions(&self) -> Result<CleanReport, GatewayError> {
        let conn = self.write_connection()?;
        let descriptions = jobs::list_descriptions(conn.clone())
            .await
            .map_err(|e| GatewayError::from_store(e, "descriptions"))?;

        let mut report = CleanReport::default();
        for (id, description) in descriptions {
            let cleaned = clean_html(&description);
            if cleaned == description {
                report.skipped += 1;
                continue;
            }

            let patch = UpdateJobRequest {
                description: Some(cleaned),
                ..UpdateJobRequest::default()
            };
            jobs::update_job(conn.clone(), &id, &patch)
                .await
                .map_err(|e| GatewayError::from_store(e, "descriptions"))?;
            tracing::info!("Cleaned description of job {}", id);
            report.cleaned += 1;
        }

        Ok(report)
    }

    // Admin users

    pub async fn get_admin_profile(&self, user_id: &str) -> Result<Option<AdminProfile>, GatewayError> {
        let conn = self.write_connection()?;
        admin_users::get_admin_profile(conn, user_id)
            .await
            .map_err(|e| GatewayError::from_store(e, "admin profile"))
    }

    pub async fn upsert_admin_profile(
        &self,
        user_id: &str,
        email: &str,
        full_name: &str,
        company_id: Option<&str>,
    ) -> Result<(), GatewayError> {
        let conn = self.write_connection()?;
        admin_users::upsert_admin_profile(conn, user_id, email, full_name, company_id)
            .await
            .map_err(|e| GatewayError::from_store(e, "admin profile"))
    }

    pub async fn link_admin_to_company(
        &self,
        user_id: &str,
        company_id: &str,
    ) -> Result<(), GatewayError> {
        let conn = self.write_connection()?;
        let linked = admin_users::link_admin_to_company(conn, user_id, company_id)
            .await
            .map_err(|e| GatewayError::from_store(e, "admin profile"))?;
        if !linked {
            return Err(GatewayError::NotFound(format!("Admin profile {}", user_id)));
        }
        Ok(())
    }
}

impl From<Database> for Gateway {
    fn from(database: Database) -> Self {
        Gateway::new(Arc::new(database))
    }
}
