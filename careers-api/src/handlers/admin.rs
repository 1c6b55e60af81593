use actix_web::{http::header, web, HttpResponse, Result};
use shared_types::{AdminProfile, CreateAdminCompanyRequest, EditorRedirect};

use crate::auth::{CurrentAuth, SignedIn};
use crate::error::ApiError;
use crate::gateway::Gateway;

pub const SIGN_IN_PATH: &str = "/admin/auth";
pub const DASHBOARD_PATH: &str = "/admin";

/// Fails with 403 unless `user_id` is the admin linked to `company_id`.
pub async fn require_company_admin(
    gateway: &Gateway,
    user_id: &str,
    company_id: &str,
) -> Result<AdminProfile, ApiError> {
    let profile = gateway
        .get_admin_profile(user_id)
        .await?
        .ok_or_else(|| ApiError::Forbidden("No admin profile for this account".to_string()))?;

    if profile.company_id.as_deref() != Some(company_id) {
        tracing::warn!(
            "Admin {} attempted to edit company {} they are not linked to",
            user_id,
            company_id
        );
        return Err(ApiError::Forbidden(
            "You are not an admin of this company".to_string(),
        ));
    }
    Ok(profile)
}

/// `GET /api/admin/profile`
pub async fn profile(
    signed_in: SignedIn,
    gateway: web::Data<Gateway>,
) -> Result<HttpResponse, ApiError> {
    let profile = gateway
        .get_admin_profile(&signed_in.user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Admin profile not found".to_string()))?;
    Ok(HttpResponse::Ok().json(profile))
}

/// `POST /api/admin/companies`: creates a company and links the caller to it.
pub async fn create_company(
    signed_in: SignedIn,
    gateway: web::Data<Gateway>,
    request: web::Json<CreateAdminCompanyRequest>,
) -> Result<HttpResponse, ApiError> {
    let (name, slug) = request.resolve()?;
    let existing = gateway.get_admin_profile(&signed_in.user.id).await?;

    let company = gateway.create_company(&name, &slug).await?;
    match existing {
        Some(_) => {
            gateway
                .link_admin_to_company(&signed_in.user.id, &company.id)
                .await?
        }
        None => {
            gateway
                .upsert_admin_profile(
                    &signed_in.user.id,
                    &signed_in.user.email,
                    "",
                    Some(&company.id),
                )
                .await?
        }
    }

    tracing::info!("Admin {} created company {}", signed_in.user.email, company.slug);
    Ok(HttpResponse::Created().json(company))
}

/// `GET /admin/editor`: redirects to the editor of the caller's company,
/// to the dashboard when they have none, or to sign-in.
pub async fn editor_redirect(auth: CurrentAuth, gateway: web::Data<Gateway>) -> HttpResponse {
    let location = match auth.0.user() {
        None => SIGN_IN_PATH.to_string(),
        Some(user) => match gateway.get_admin_profile(&user.id).await {
            Ok(Some(AdminProfile {
                company: Some(company),
                ..
            })) => format!("/admin/{}", company.slug),
            Ok(_) => DASHBOARD_PATH.to_string(),
            Err(e) => {
                tracing::warn!("Could not load admin profile for {}: {}", user.id, e);
                DASHBOARD_PATH.to_string()
            }
        },
    };

    HttpResponse::Found()
        .insert_header((header::LOCATION, location.clone()))
        .json(EditorRedirect { location })
}
