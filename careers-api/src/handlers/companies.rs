use actix_web::{web, HttpResponse, Result};
use page_composer::compose::careers_path;
use page_composer::sections::{self, normalize_order, sort_by_order};
use page_composer::SectionError;
use shared_types::validation::{
    require_non_empty, validate_brand_config, validate_company_slug, validate_sections,
};
use shared_types::{
    AddSectionRequest, Company, EditorDataResponse, MoveSectionRequest, PageSection,
    UpdateCompanyRequest, UpdateSectionRequest,
};

use super::admin::require_company_admin;
use crate::auth::SignedIn;
use crate::error::ApiError;
use crate::gateway::Gateway;

/// `GET /api/admin/companies/{slug}`
pub async fn editor_data(
    signed_in: SignedIn,
    gateway: web::Data<Gateway>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let slug = path.into_inner();
    let mut company = gateway
        .get_company_by_slug(&slug)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Company '{}' not found", slug)))?;
    require_company_admin(&gateway, &signed_in.user.id, &company.id).await?;

    sort_by_order(&mut company.page_sections);
    let jobs = gateway.list_jobs(&company.id).await;
    let public_path = careers_path(&company.slug);

    Ok(HttpResponse::Ok().json(EditorDataResponse {
        company,
        jobs,
        public_path,
    }))
}

fn validate_company_patch(patch: &UpdateCompanyRequest) -> Result<(), ApiError> {
    if patch.is_empty() {
        return Err(ApiError::Validation("Nothing to update".to_string()));
    }
    if let Some(name) = &patch.name {
        require_non_empty("name", name)?;
    }
    if let Some(slug) = &patch.slug {
        validate_company_slug("slug", slug.trim())?;
    }
    if let Some(brand) = &patch.brand_config {
        validate_brand_config(brand)?;
    }
    if let Some(sections) = &patch.page_sections {
        validate_sections(sections)?;
    }
    Ok(())
}

/// `PUT /api/admin/companies/{id}`
pub async fn update_company(
    signed_in: SignedIn,
    gateway: web::Data<Gateway>,
    path: web::Path<String>,
    request: web::Json<UpdateCompanyRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let mut patch = request.into_inner();
    validate_company_patch(&patch)?;
    require_company_admin(&gateway, &signed_in.user.id, &id).await?;

    if let Some(slug) = patch.slug.as_mut() {
        *slug = slug.trim().to_string();
    }
    if let Some(sections) = patch.page_sections.as_mut() {
        normalize_order(sections);
    }

    let company = gateway.update_company(&id, &patch).await?;
    Ok(HttpResponse::Ok().json(company))
}

/// Loads the section list, applies `edit`, and saves the whole list back.
/// The edited list must pass the same checks as a `PUT`, so a list holding an
/// unknown section type can only be edited by deleting that section.
async fn edit_sections<F>(
    gateway: &Gateway,
    user_id: &str,
    company_id: &str,
    edit: F,
) -> Result<Company, ApiError>
where
    F: FnOnce(&mut Vec<PageSection>) -> Result<(), SectionError>,
{
    require_company_admin(gateway, user_id, company_id).await?;
    let company = gateway
        .get_company(company_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Company {} not found", company_id)))?;

    let mut page_sections = company.page_sections;
    edit(&mut page_sections)?;
    // A stored type this build cannot name would be saved back as "Unknown"
    validate_sections(&page_sections)?;

    let patch = UpdateCompanyRequest {
        page_sections: Some(page_sections),
        ..UpdateCompanyRequest::default()
    };
    Ok(gateway.update_company(company_id, &patch).await?)
}

/// `POST /api/admin/companies/{id}/sections`
pub async fn add_section(
    signed_in: SignedIn,
    gateway: web::Data<Gateway>,
    path: web::Path<String>,
    request: web::Json<AddSectionRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let kind = request.into_inner().kind;
    let company = edit_sections(&gateway, &signed_in.user.id, &id, |list| {
        sections::add_section(list, kind, uuid::Uuid::new_v4().to_string()).map(|_| ())
    })
    .await?;
    Ok(HttpResponse::Created().json(company))
}

/// `PATCH /api/admin/companies/{id}/sections/{section_id}`
pub async fn update_section(
    signed_in: SignedIn,
    gateway: web::Data<Gateway>,
    path: web::Path<(String, String)>,
    request: web::Json<UpdateSectionRequest>,
) -> Result<HttpResponse, ApiError> {
    let (id, section_id) = path.into_inner();
    let patch = request.into_inner();
    let company = edit_sections(&gateway, &signed_in.user.id, &id, |list| {
        sections::update_section(list, &section_id, patch).map(|_| ())
    })
    .await?;
    Ok(HttpResponse::Ok().json(company))
}

/// `POST /api/admin/companies/{id}/sections/{section_id}/move`
pub async fn move_section(
    signed_in: SignedIn,
    gateway: web::Data<Gateway>,
    path: web::Path<(String, String)>,
    request: web::Json<MoveSectionRequest>,
) -> Result<HttpResponse, ApiError> {
    let (id, section_id) = path.into_inner();
    let direction = request.direction;
    let company = edit_sections(&gateway, &signed_in.user.id, &id, |list| {
        sections::move_section(list, &section_id, direction)
    })
    .await?;
    Ok(HttpResponse::Ok().json(company))
}

/// `DELETE /api/admin/companies/{id}/sections/{section_id}`
pub async fn delete_section(
    signed_in: SignedIn,
    gateway: web::Data<Gateway>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (id, section_id) = path.into_inner();
    let company = edit_sections(&gateway, &signed_in.user.id, &id, |list| {
        sections::remove_section(list, &section_id).map(|_| ())
    })
    .await?;
    Ok(HttpResponse::Ok().json(company))
}
