use std::sync::Arc;

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use shared_types::AuthUser;
use tokio::sync::watch;

use super::{AuthError, AuthProvider, AuthSession, SignUpOutcome};
use crate::error::ApiError;

/// The auth provider plus the session of whoever is calling.
///
/// Built once per request from the bearer token. Session changes (sign in,
/// sign up, sign out) are published on a watch channel.
pub struct AuthContext {
    provider: Arc<dyn AuthProvider>,
    session: watch::Sender<Option<AuthSession>>,
}

impl AuthContext {
    /// Resolves `token` against the provider. An unknown or expired token
    /// yields a signed-out context; only an unreachable provider is an error.
    pub async fn init(
        provider: Arc<dyn AuthProvider>,
        token: Option<&str>,
    ) -> Result<Self, AuthError> {
        let session = match token {
            Some(token) => match provider.get_user(token).await {
                Ok(user) => Some(AuthSession {
                    access_token: token.to_string(),
                    user,
                }),
                Err(AuthError::Unavailable(msg)) => return Err(AuthError::Unavailable(msg)),
                Err(e) => {
                    tracing::debug!("Ignoring bearer token: {}", e);
                    None
                }
            },
            None => None,
        };

        let (session, _) = watch::channel(session);
        Ok(Self { provider, session })
    }

    pub fn session(&self) -> Option<AuthSession> {
        self.session.borrow().clone()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.session.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn require_user(&self) -> Result<AuthUser, AuthError> {
        self.user().ok_or(AuthError::NotSignedIn)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<AuthSession>> {
        self.session.subscribe()
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        let outcome = self.provider.sign_up(email, password).await?;
        if let Some(session) = &outcome.session {
            self.session.send_replace(Some(session.clone()));
        }
        Ok(outcome)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let session = self.provider.sign_in(email, password).await?;
        self.session.send_replace(Some(session.clone()));
        tracing::info!("Admin {} signed in", session.user.email);
        Ok(session)
    }

    /// Ends the current session. The local session is cleared even when the
    /// provider no longer knows the token.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.session() else {
            return Err(AuthError::NotSignedIn);
        };

        let result = match self.provider.sign_out(&session.access_token).await {
            Err(AuthError::InvalidToken) => Ok(()),
            other => other,
        };
        self.session.send_replace(None);
        result
    }
}

pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

fn context_from_request(req: &HttpRequest) -> LocalBoxFuture<'static, Result<AuthContext, ApiError>> {
    let provider = req
        .app_data::<web::Data<Arc<dyn AuthProvider>>>()
        .map(|data| data.get_ref().clone());
    let token = bearer_token(req);

    Box::pin(async move {
        let provider =
            provider.ok_or_else(|| ApiError::Internal("auth provider not configured".to_string()))?;
        Ok(AuthContext::init(provider, token.as_deref()).await?)
    })
}

/// Auth context of the caller, signed in or not.
pub struct CurrentAuth(pub AuthContext);

impl FromRequest for CurrentAuth {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let context = context_from_request(req);
        Box::pin(async move { Ok(CurrentAuth(context.await?)) })
    }
}

/// A caller with a valid session; rejects the request with 401 otherwise.
pub struct SignedIn {
    pub user: AuthUser,
    pub context: AuthContext,
}

impl FromRequest for SignedIn {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let context = context_from_request(req);
        Box::pin(async move {
            let context = context.await?;
            let user = context.require_user()?;
            Ok(SignedIn { user, context })
        })
    }
}
