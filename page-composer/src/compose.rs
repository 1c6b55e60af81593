//! Render model of a careers page.
//!
//! `compose_page` is pure: it takes the loaded company and jobs and produces a
//! serializable page that the HTML renderer and the JSON API both consume.

use chrono::Datelike;
use serde::Serialize;
use shared_types::{Company, Job, PageSection, SectionKind};

use crate::excerpt::{excerpt, DEFAULT_EXCERPT_LENGTH};
use crate::filter::{employment_type_options, filter_jobs, location_options, JobQuery};
use crate::sections::visible_in_order;
use crate::theme::{font_stack, hero_theme, HeroTheme};
use crate::video::{resolve_video, VideoSource};

pub const DEFAULT_JOBS_TITLE: &str = "Open Positions";

#[derive(Debug, Clone)]
pub struct ComposeOptions {
    pub excerpt_length: usize,
    pub copyright_year: i32,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
            copyright_year: chrono::Utc::now().year(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageHeader {
    pub company_name: String,
    pub company_slug: String,
    pub logo_url: Option<String>,
    pub font_stack: String,
    pub primary_color: String,
    pub secondary_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedPage {
    pub header: PageHeader,
    pub sections: Vec<RenderedSection>,
    pub copyright_year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum RenderedSection {
    #[serde(rename_all = "camelCase")]
    Hero {
        id: String,
        title: String,
        subtitle: String,
        theme: HeroTheme,
    },
    #[serde(rename_all = "camelCase")]
    About {
        id: String,
        title: String,
        content: String,
    },
    /// `video` is `None` when the content could not be resolved; a
    /// placeholder is shown instead.
    #[serde(rename_all = "camelCase")]
    Video {
        id: String,
        title: String,
        video: Option<VideoSource>,
    },
    #[serde(rename_all = "camelCase")]
    Jobs {
        id: String,
        title: String,
        board: JobBoard,
    },
}

impl RenderedSection {
    pub fn id(&self) -> &str {
        match self {
            RenderedSection::Hero { id, .. }
            | RenderedSection::About { id, .. }
            | RenderedSection::Video { id, .. }
            | RenderedSection::Jobs { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobBoard {
    pub query: JobQuery,
    /// Facet options come from every job, not just the filtered ones.
    pub location_options: Vec<String>,
    pub employment_type_options: Vec<String>,
    pub jobs: Vec<JobCard>,
    pub total_jobs: usize,
}

impl JobBoard {
    pub fn new(company_slug: &str, jobs: &[Job], query: &JobQuery, excerpt_length: usize) -> Self {
        let cards = filter_jobs(jobs, query)
            .iter()
            .map(|job| JobCard::new(company_slug, job, excerpt_length))
            .collect();

        Self {
            query: query.clone(),
            location_options: location_options(jobs),
            employment_type_options: employment_type_options(jobs),
            jobs: cards,
            total_jobs: jobs.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCard {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub department: String,
    pub location: String,
    pub work_policy: String,
    pub employment_type: String,
    pub experience_level: String,
    pub salary_range: Option<String>,
    pub excerpt: String,
    pub posted_days_ago: i64,
    pub detail_path: String,
}

impl JobCard {
    pub fn new(company_slug: &str, job: &Job, excerpt_length: usize) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            slug: job.slug.clone(),
            department: job.department.clone(),
            location: job.location.clone(),
            work_policy: job.work_policy.to_string(),
            employment_type: job.employment_type.to_string(),
            experience_level: job.experience_level.to_string(),
            salary_range: job.salary_range.clone(),
            excerpt: excerpt(&job.description, excerpt_length),
            posted_days_ago: job.posted_days_ago,
            detail_path: job_path(company_slug, &job.slug),
        }
    }
}

pub fn careers_path(company_slug: &str) -> String {
    format!("/{}/careers", company_slug)
}

pub fn job_path(company_slug: &str, job_slug: &str) -> String {
    format!("/{}/jobs/{}", company_slug, job_slug)
}

pub fn page_header(company: &Company) -> PageHeader {
    let brand = &company.brand_config;
    PageHeader {
        company_name: company.name.clone(),
        company_slug: company.slug.clone(),
        logo_url: Some(brand.logo_url.clone()).filter(|url| !url.trim().is_empty()),
        font_stack: font_stack(brand.font_family).to_string(),
        primary_color: brand.primary_color.clone(),
        secondary_color: brand.secondary_color.clone(),
    }
}

/// Visible sections in ascending order, each turned into its render model.
pub fn compose_page(
    company: &Company,
    jobs: &[Job],
    query: &JobQuery,
    options: &ComposeOptions,
) -> ComposedPage {
    let sections = visible_in_order(&company.page_sections)
        .into_iter()
        .filter_map(|section| render_section(section, company, jobs, query, options))
        .collect();

    ComposedPage {
        header: page_header(company),
        sections,
        copyright_year: options.copyright_year,
    }
}

fn render_section(
    section: &PageSection,
    company: &Company,
    jobs: &[Job],
    query: &JobQuery,
    options: &ComposeOptions,
) -> Option<RenderedSection> {
    let id = section.id.clone();
    let title = section.title.clone().unwrap_or_default();
    let content = section.content.clone().unwrap_or_default();

    let rendered = match section.kind {
        SectionKind::Hero => RenderedSection::Hero {
            id,
            title,
            subtitle: content,
            theme: hero_theme(section.background_image_url.as_deref(), &company.brand_config),
        },
        SectionKind::About => RenderedSection::About { id, title, content },
        SectionKind::Video => RenderedSection::Video {
            id,
            title,
            video: resolve_video(&content),
        },
        SectionKind::Jobs => RenderedSection::Jobs {
            id,
            title: section
                .title
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_JOBS_TITLE.to_string()),
            board: JobBoard::new(&company.slug, jobs, query, options.excerpt_length),
        },
        SectionKind::Unknown => return None,
    };

    Some(rendered)
}
