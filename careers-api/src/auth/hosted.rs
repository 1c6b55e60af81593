use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use shared_types::AuthUser;

use super::{AuthError, AuthProvider, AuthSession, SignUpOutcome};

/// GoTrue-style auth REST API (`/auth/v1/...`) authenticated with the
/// project's anon key.
pub struct HostedAuthProvider {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct UserBody {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl From<UserBody> for AuthUser {
    fn from(body: UserBody) -> Self {
        AuthUser {
            id: body.id,
            email: body.email.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionBody {
    access_token: String,
    user: UserBody,
}

impl From<SessionBody> for AuthSession {
    fn from(body: SessionBody) -> Self {
        AuthSession {
            access_token: body.access_token,
            user: body.user.into(),
        }
    }
}

/// Sign-up answers with a session when the project auto-confirms emails,
/// otherwise with the bare user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpBody {
    Session(SessionBody),
    User(UserBody),
}

impl HostedAuthProvider {
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str, token: Option<&str>) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header("apikey", &self.anon_key)
            .bearer_auth(token.unwrap_or(&self.anon_key))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, AuthError> {
        let response = request
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!("Auth service answered {}: {}", status, body);
        Err(classify_failure(status, &body))
    }
}

/// Maps an error response onto `AuthError`.
fn classify_failure(status: StatusCode, body: &str) -> AuthError {
    let message = error_message(body);
    let lowered = message.to_lowercase();

    if status.is_server_error() {
        return AuthError::Unavailable(format!("{} {}", status, message));
    }
    if lowered.contains("email not confirmed") {
        return AuthError::EmailNotConfirmed;
    }
    if lowered.contains("already registered") || lowered.contains("already exists") {
        return AuthError::UserExists;
    }
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AuthError::InvalidToken,
        StatusCode::BAD_REQUEST if lowered.contains("invalid") => AuthError::InvalidCredentials,
        _ => AuthError::Rejected(message),
    }
}

/// GoTrue reports errors under a few different keys depending on the endpoint.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["msg", "error_description", "message", "error"]
                .iter()
                .find_map(|key| value[*key].as_str().map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl AuthProvider for HostedAuthProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        let request = self
            .request(reqwest::Method::POST, "signup", None)
            .json(&serde_json::json!({ "email": email, "password": password }));
        let body: SignUpBody = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        Ok(match body {
            SignUpBody::Session(session) => {
                let session: AuthSession = session.into();
                SignUpOutcome {
                    user: session.user.clone(),
                    session: Some(session),
                }
            }
            SignUpBody::User(user) => SignUpOutcome {
                user: user.into(),
                session: None,
            },
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let request = self
            .request(reqwest::Method::POST, "token?grant_type=password", None)
            .json(&serde_json::json!({ "email": email, "password": password }));
        let body: SessionBody = self
            .send(request)
            .await
            .map_err(|e| match e {
                AuthError::InvalidToken | AuthError::Rejected(_) => AuthError::InvalidCredentials,
                other => other,
            })?
            .json()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;
        Ok(body.into())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let request = self.request(reqwest::Method::POST, "logout", Some(access_token));
        self.send(request).await?;
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let request = self.request(reqwest::Method::GET, "user", Some(access_token));
        let body: UserBody = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;
        Ok(body.into())
    }
}
