use actix_web::{web, HttpResponse, Result};
use shared_types::{CreateJobRequest, Job, JobsResponse, UpdateJobRequest};

use super::admin::require_company_admin;
use crate::auth::SignedIn;
use crate::error::ApiError;
use crate::gateway::Gateway;

async fn owned_job(gateway: &Gateway, user_id: &str, id: &str) -> Result<Job, ApiError> {
    let job = gateway
        .get_job(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Job {} not found", id)))?;
    require_company_admin(gateway, user_id, &job.company_id).await?;
    Ok(job)
}

/// `GET /api/admin/companies/{id}/jobs`
pub async fn list_jobs(
    signed_in: SignedIn,
    gateway: web::Data<Gateway>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let company_id = path.into_inner();
    require_company_admin(&gateway, &signed_in.user.id, &company_id).await?;
    let jobs = gateway.list_jobs(&company_id).await;
    Ok(HttpResponse::Ok().json(JobsResponse { jobs }))
}

/// `POST /api/admin/companies/{id}/jobs`
pub async fn create_job(
    signed_in: SignedIn,
    gateway: web::Data<Gateway>,
    path: web::Path<String>,
    request: web::Json<CreateJobRequest>,
) -> Result<HttpResponse, ApiError> {
    let company_id = path.into_inner();
    require_company_admin(&gateway, &signed_in.user.id, &company_id).await?;

    let now = chrono::Utc::now().timestamp_millis();
    let new_job = request.into_inner().into_new_job(&company_id, now)?;
    let job = gateway.create_job(new_job).await?;
    Ok(HttpResponse::Created().json(job))
}

/// `PUT /api/admin/jobs/{id}`
pub async fn update_job(
    signed_in: SignedIn,
    gateway: web::Data<Gateway>,
    path: web::Path<String>,
    request: web::Json<UpdateJobRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let patch = request.into_inner();
    patch.validate()?;
    owned_job(&gateway, &signed_in.user.id, &id).await?;

    let job = gateway.update_job(&id, patch).await?;
    Ok(HttpResponse::Ok().json(job))
}

/// `DELETE /api/admin/jobs/{id}`
pub async fn delete_job(
    signed_in: SignedIn,
    gateway: web::Data<Gateway>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    owned_job(&gateway, &signed_in.user.id, &id).await?;

    gateway.delete_job(&id).await?;
    tracing::info!("Deleted job {}", id);
    Ok(HttpResponse::NoContent().finish())
}
