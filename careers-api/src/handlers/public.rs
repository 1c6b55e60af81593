use actix_web::{http::header::ContentType, web, HttpResponse, Result};
use page_composer::render::{render_careers_page, render_job_detail, render_not_found};
use page_composer::{compose_page, employment_type_options, filter_jobs, location_options, JobQuery};
use serde::Serialize;
use shared_types::{CompaniesResponse, Job};

use super::PageSettings;
use crate::error::ApiError;
use crate::gateway::Gateway;

pub async fn health(gateway: web::Data<Gateway>) -> HttpResponse {
    if !gateway.has_store() {
        return HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "fallback"
        }));
    }

    match gateway.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "database": "connected"
        })),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "database": "disconnected"
            }))
        }
    }
}

fn html(status: actix_web::http::StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body)
}

/// `GET /{slug}/careers`
pub async fn careers_page(
    gateway: web::Data<Gateway>,
    settings: web::Data<PageSettings>,
    path: web::Path<String>,
    query: web::Query<JobQuery>,
) -> HttpResponse {
    let slug = path.into_inner();
    let Some(company) = gateway.get_company_by_slug(&slug).await else {
        return html(
            actix_web::http::StatusCode::NOT_FOUND,
            render_not_found(&format!("No careers page exists for '{}'.", slug)),
        );
    };

    let jobs = gateway.list_jobs(&company.id).await;
    let page = compose_page(&company, &jobs, &query, &settings.compose_options());
    html(actix_web::http::StatusCode::OK, render_careers_page(&page))
}

/// `GET /{slug}/jobs/{job_slug}`
pub async fn job_detail_page(
    gateway: web::Data<Gateway>,
    settings: web::Data<PageSettings>,
    path: web::Path<(String, String)>,
) -> HttpResponse {
    let (slug, job_slug) = path.into_inner();

    let Some(company) = gateway.get_company_by_slug(&slug).await else {
        return html(
            actix_web::http::StatusCode::NOT_FOUND,
            render_not_found(&format!("No careers page exists for '{}'.", slug)),
        );
    };
    let Some(job) = gateway.get_job_by_slug(&company.id, &job_slug).await else {
        return html(
            actix_web::http::StatusCode::NOT_FOUND,
            render_not_found("This job posting does not exist or has been removed."),
        );
    };

    let year = settings.compose_options().copyright_year;
    html(actix_web::http::StatusCode::OK, render_job_detail(&company, &job, year))
}

/// `GET /api/careers`: every company with a careers page.
pub async fn list_careers_pages(gateway: web::Data<Gateway>) -> HttpResponse {
    let companies = gateway.list_companies().await;
    HttpResponse::Ok().json(CompaniesResponse { companies })
}

/// `GET /api/careers/{slug}`
pub async fn careers_page_json(
    gateway: web::Data<Gateway>,
    settings: web::Data<PageSettings>,
    path: web::Path<String>,
    query: web::Query<JobQuery>,
) -> Result<HttpResponse, ApiError> {
    let slug = path.into_inner();
    let company = gateway
        .get_company_by_slug(&slug)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Company '{}' not found", slug)))?;

    let jobs = gateway.list_jobs(&company.id).await;
    let page = compose_page(&company, &jobs, &query, &settings.compose_options());
    Ok(HttpResponse::Ok().json(page))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareersJobsResponse {
    pub jobs: Vec<Job>,
    pub location_options: Vec<String>,
    pub employment_type_options: Vec<String>,
    pub total_jobs: usize,
}

/// `GET /api/careers/{slug}/jobs`
pub async fn careers_jobs(
    gateway: web::Data<Gateway>,
    path: web::Path<String>,
    query: web::Query<JobQuery>,
) -> Result<HttpResponse, ApiError> {
    let slug = path.into_inner();
    let company = gateway
        .get_company_by_slug(&slug)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Company '{}' not found", slug)))?;

    let jobs = gateway.list_jobs(&company.id).await;
    Ok(HttpResponse::Ok().json(CareersJobsResponse {
        jobs: filter_jobs(&jobs, &query),
        location_options: location_options(&jobs),
        employment_type_options: employment_type_options(&jobs),
        total_jobs: jobs.len(),
    }))
}

/// `GET /api/careers/{slug}/jobs/{job_slug}`
pub async fn careers_job(
    gateway: web::Data<Gateway>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (slug, job_slug) = path.into_inner();
    let company = gateway
        .get_company_by_slug(&slug)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Company '{}' not found", slug)))?;
    let job = gateway
        .get_job_by_slug(&company.id, &job_slug)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Job '{}' not found", job_slug)))?;

    Ok(HttpResponse::Ok().json(job))
}
