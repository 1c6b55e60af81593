use actix_web::{web, HttpResponse, Result};
use shared_types::{AuthSessionResponse, AuthUser, SignInRequest, SignUpRequest, SignUpResponse};

use crate::auth::{CurrentAuth, SignedIn};
use crate::error::ApiError;
use crate::gateway::Gateway;

/// `POST /api/auth/sign-up`
///
/// Creates the account, then the admin profile and, when requested, the
/// admin's company.
pub async fn sign_up(
    auth: CurrentAuth,
    gateway: web::Data<Gateway>,
    request: web::Json<SignUpRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = request.into_inner();
    req.validate()?;

    if !gateway.has_store() {
        return Err(ApiError::RemoteUnavailable(
            "Sign-up needs a database; none is configured".to_string(),
        ));
    }
    let company = req.company();
    if let Some((_, slug)) = &company {
        if gateway.get_company_by_slug(slug).await.is_some() {
            return Err(ApiError::Conflict(format!("Slug '{}' is already taken", slug)));
        }
    }

    let outcome = auth.0.sign_up(req.email.trim(), &req.password).await?;

    if let Err(e) = link_new_admin(&gateway, &outcome.user, req.full_name.trim(), company).await {
        tracing::warn!(
            "Account {} ({}) was created but its profile setup failed, the account has no profile: {}",
            outcome.user.id,
            outcome.user.email,
            e
        );
        return Err(e);
    }

    let message = if outcome.session.is_some() {
        "Account created successfully!"
    } else {
        "Account created! Please confirm your email address before signing in."
    };
    tracing::info!("Admin account created for {}", outcome.user.email);

    Ok(HttpResponse::Created().json(SignUpResponse {
        user: outcome.user,
        session: outcome.session.map(AuthSessionResponse::from),
        message: message.to_string(),
    }))
}

/// Creates the requested company, then the admin profile linked to it.
async fn link_new_admin(
    gateway: &Gateway,
    user: &AuthUser,
    full_name: &str,
    company: Option<(String, String)>,
) -> Result<(), ApiError> {
    let company_id = match company {
        Some((name, slug)) => Some(gateway.create_company(&name, &slug).await?.id),
        None => None,
    };
    gateway
        .upsert_admin_profile(&user.id, &user.email, full_name, company_id.as_deref())
        .await?;
    Ok(())
}

/// `POST /api/auth/sign-in`
pub async fn sign_in(
    auth: CurrentAuth,
    request: web::Json<SignInRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate()?;
    let session = auth.0.sign_in(request.email.trim(), &request.password).await?;
    Ok(HttpResponse::Ok().json(AuthSessionResponse::from(session)))
}

/// `POST /api/auth/sign-out`
pub async fn sign_out(signed_in: SignedIn) -> Result<HttpResponse, ApiError> {
    signed_in.context.sign_out().await?;
    tracing::info!("Admin {} signed out", signed_in.user.email);
    Ok(HttpResponse::NoContent().finish())
}

/// `GET /api/auth/session`: the caller's user, or `null` when signed out.
pub async fn session(auth: CurrentAuth) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "user": auth.0.user() }))
}
