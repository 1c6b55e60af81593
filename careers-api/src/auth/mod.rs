//! Authentication seam.
//!
//! Accounts and sessions belong to an external service reached through
//! [`AuthProvider`]. Handlers never talk to a provider directly; they get an
//! [`AuthContext`] from the request extractors in [`context`].

pub mod context;
pub mod hosted;
pub mod memory;

pub use context::{AuthContext, CurrentAuth, SignedIn};
pub use hosted::HostedAuthProvider;
pub use memory::MemoryAuthProvider;

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{AuthSessionResponse, AuthUser};

use crate::config::ApiConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Email not confirmed. Check your inbox for the confirmation link")]
    EmailNotConfirmed,
    #[error("Session is invalid or has expired")]
    InvalidToken,
    #[error("Sign in required")]
    NotSignedIn,
    #[error("An account with this email already exists")]
    UserExists,
    #[error("{0}")]
    Rejected(String),
    #[error("Authentication service unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub access_token: String,
    pub user: AuthUser,
}

impl From<AuthSession> for AuthSessionResponse {
    fn from(session: AuthSession) -> Self {
        AuthSessionResponse {
            access_token: session.access_token,
            user: session.user,
        }
    }
}

/// Result of a sign-up. `session` is `None` while the email is unconfirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    pub user: AuthUser,
    pub session: Option<AuthSession>,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
    /// User owning `access_token`; `InvalidToken` when it is unknown or expired.
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError>;
}

/// The hosted provider when `[auth]` names one, otherwise in-memory accounts.
pub fn provider_from_config(config: &ApiConfig) -> Arc<dyn AuthProvider> {
    match config.hosted_auth() {
        Some((url, anon_key)) => {
            tracing::info!("Using hosted auth service at {}", url);
            Arc::new(HostedAuthProvider::new(url, anon_key))
        }
        None => {
            tracing::warn!("No auth service configured; accounts are kept in memory");
            Arc::new(MemoryAuthProvider::new(config.auth.require_email_confirmation))
        }
    }
}
