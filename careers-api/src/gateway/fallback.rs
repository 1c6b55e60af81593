//! Sample dataset served when the store is unavailable or asked about an id
//! it could not hold.

use shared_types::{
    posted_days_ago, BrandConfig, Company, EmploymentType, ExperienceLevel, FontFamily, Job,
    JobType, PageSection, SectionKind, WorkPolicy, MILLIS_PER_DAY,
};

fn section(
    id: &str,
    kind: SectionKind,
    order: i32,
    title: &str,
    content: Option<&str>,
    background_image_url: Option<&str>,
) -> PageSection {
    PageSection {
        id: id.to_string(),
        kind,
        title: Some(title.to_string()),
        content: content.map(str::to_string),
        background_image_url: background_image_url.map(str::to_string),
        order,
        is_visible: true,
    }
}

pub fn companies() -> Vec<Company> {
    vec![
        Company {
            id: "c1".to_string(),
            slug: "acme-corp".to_string(),
            name: "Acme Corp".to_string(),
            brand_config: BrandConfig {
                primary_color: "#0f172a".to_string(),
                secondary_color: "#3b82f6".to_string(),
                font_family: FontFamily::Inter,
                logo_url: "https://placehold.co/150x50/0f172a/ffffff?text=Acme+Corp".to_string(),
            },
            page_sections: vec![
                section(
                    "s1",
                    SectionKind::Hero,
                    0,
                    "Join the Future",
                    Some("We are building the next generation of widgets."),
                    Some("https://images.unsplash.com/photo-1497366216548-37526070297c?auto=format&fit=crop&q=80&w=2301&ixlib=rb-4.0.3"),
                ),
                section(
                    "s2",
                    SectionKind::About,
                    1,
                    "About Us",
                    Some("Acme Corp is the leading provider of widgets worldwide."),
                    None,
                ),
                section("s3", SectionKind::Jobs, 2, "Open Positions", None, None),
            ],
        },
        Company {
            id: "c2".to_string(),
            slug: "tech-nova".to_string(),
            name: "Tech Nova".to_string(),
            brand_config: BrandConfig {
                primary_color: "#7c3aed".to_string(),
                secondary_color: "#10b981".to_string(),
                font_family: FontFamily::Roboto,
                logo_url: "https://placehold.co/150x50/7c3aed/ffffff?text=Tech+Nova".to_string(),
            },
            page_sections: vec![
                section(
                    "s1",
                    SectionKind::Hero,
                    0,
                    "Innovate with Us",
                    Some("Pushing the boundaries of technology."),
                    Some("https://images.unsplash.com/photo-1519389950473-47ba0277781c?auto=format&fit=crop&q=80&w=2340&ixlib=rb-4.0.3"),
                ),
                section(
                    "s2",
                    SectionKind::Video,
                    1,
                    "Life at Tech Nova",
                    Some("https://www.youtube.com/embed/dQw4w9WgXcQ"),
                    None,
                ),
                section("s3", SectionKind::Jobs, 2, "Careers", None, None),
            ],
        },
    ]
}

struct SampleJob {
    id: &'static str,
    title: &'static str,
    location: &'static str,
    work_policy: WorkPolicy,
    department: &'static str,
    employment_type: EmploymentType,
    experience_level: ExperienceLevel,
    job_type: JobType,
    salary_range: &'static str,
    slug: &'static str,
    days_ago: i64,
    description: &'static str,
}

const SAMPLE_JOBS: &[SampleJob] = &[
    SampleJob {
        id: "j1",
        title: "Full Stack Engineer",
        location: "Berlin, Germany",
        work_policy: WorkPolicy::Remote,
        department: "Product",
        employment_type: EmploymentType::FullTime,
        experience_level: ExperienceLevel::Senior,
        job_type: JobType::Temporary,
        salary_range: "AED 8K–12K / month",
        slug: "full-stack-engineer-berlin",
        days_ago: 40,
        description: "Build amazing UIs with React and robust backends.",
    },
    SampleJob {
        id: "j2",
        title: "Business Analyst",
        location: "Riyadh, Saudi Arabia",
        work_policy: WorkPolicy::Hybrid,
        department: "Customer Success",
        employment_type: EmploymentType::PartTime,
        experience_level: ExperienceLevel::MidLevel,
        job_type: JobType::Permanent,
        salary_range: "USD 4K–6K / month",
        slug: "business-analyst-riyadh",
        days_ago: 5,
        description: "Analyze business needs and solutions.",
    },
    SampleJob {
        id: "j3",
        title: "Software Engineer",
        location: "Berlin, Germany",
        work_policy: WorkPolicy::Remote,
        department: "Sales",
        employment_type: EmploymentType::Contract,
        experience_level: ExperienceLevel::Senior,
        job_type: JobType::Permanent,
        salary_range: "SAR 10K–18K / month",
        slug: "software-engineer-berlin",
        days_ago: 32,
        description: "Drive sales through engineering.",
    },
    SampleJob {
        id: "j4",
        title: "Marketing Manager",
        location: "Boston, United States",
        work_policy: WorkPolicy::Hybrid,
        department: "Engineering",
        employment_type: EmploymentType::PartTime,
        experience_level: ExperienceLevel::MidLevel,
        job_type: JobType::Temporary,
        salary_range: "AED 8K–12K / month",
        slug: "marketing-manager-boston",
        days_ago: 22,
        description: "Lead our marketing efforts.",
    },
];

/// Every sample job, all owned by Acme Corp, newest first.
pub fn jobs(now_ms: i64) -> Vec<Job> {
    let mut jobs: Vec<Job> = SAMPLE_JOBS
        .iter()
        .map(|sample| {
            let created_at = now_ms - sample.days_ago * MILLIS_PER_DAY;
            Job {
                id: sample.id.to_string(),
                company_id: "c1".to_string(),
                title: sample.title.to_string(),
                slug: sample.slug.to_string(),
                location: sample.location.to_string(),
                work_policy: sample.work_policy,
                department: sample.department.to_string(),
                employment_type: sample.employment_type,
                experience_level: sample.experience_level,
                job_type: sample.job_type,
                salary_range: Some(sample.salary_range.to_string()),
                description: format!("<p>{}</p>", sample.description),
                application_url: None,
                created_at,
                posted_days_ago: posted_days_ago(created_at, now_ms),
            }
        })
        .collect();
    jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    jobs
}

pub fn company(id: &str) -> Option<Company> {
    companies().into_iter().find(|c| c.id == id)
}

pub fn company_by_slug(slug: &str) -> Option<Company> {
    companies().into_iter().find(|c| c.slug == slug)
}

pub fn jobs_for_company(company_id: &str, now_ms: i64) -> Vec<Job> {
    jobs(now_ms)
        .into_iter()
        .filter(|j| j.company_id == company_id)
        .collect()
}

pub fn job(id: &str, now_ms: i64) -> Option<Job> {
    jobs(now_ms).into_iter().find(|j| j.id == id)
}

pub fn job_by_slug(company_id: &str, slug: &str, now_ms: i64) -> Option<Job> {
    jobs(now_ms)
        .into_iter()
        .find(|j| j.company_id == company_id && j.slug == slug)
}
