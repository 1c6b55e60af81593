use actix_web::{http::StatusCode, HttpResponse};
use shared_types::{ErrorResponse, ValidationError};

use crate::auth::AuthError;
use crate::gateway::GatewayError;

/// Error returned by every JSON handler, rendered as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Auth(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    RemoteUnavailable(String),
    #[error("{0}")]
    Internal(String),
}

impl actix_web::error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::RemoteUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(msg) = self {
            tracing::error!("Request failed: {}", msg);
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<GatewayError> for ApiError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::NotFound(_) => ApiError::NotFound(e.to_string()),
            GatewayError::Conflict(_) => ApiError::Conflict(e.to_string()),
            GatewayError::Unavailable(_) => ApiError::RemoteUnavailable(e.to_string()),
            GatewayError::Store(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials
            | AuthError::EmailNotConfirmed
            | AuthError::InvalidToken
            | AuthError::NotSignedIn => ApiError::Auth(e.to_string()),
            AuthError::UserExists => ApiError::Conflict(e.to_string()),
            AuthError::Rejected(_) => ApiError::Validation(e.to_string()),
            AuthError::Unavailable(_) => ApiError::RemoteUnavailable(e.to_string()),
        }
    }
}

impl From<page_composer::SectionError> for ApiError {
    fn from(e: page_composer::SectionError) -> Self {
        match e {
            page_composer::SectionError::NotFound(_) => ApiError::NotFound(e.to_string()),
            _ => ApiError::Validation(e.to_string()),
        }
    }
}
