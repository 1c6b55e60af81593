use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use shared_types::AuthUser;

use super::{AuthError, AuthProvider, AuthSession, SignUpOutcome};

struct MemoryUser {
    user: AuthUser,
    password: String,
    confirmed: bool,
}

#[derive(Default)]
struct MemoryState {
    users: HashMap<String, MemoryUser>,
    sessions: HashMap<String, AuthUser>,
}

/// Accounts kept in process memory, for local development and tests.
/// Nothing survives a restart.
pub struct MemoryAuthProvider {
    require_email_confirmation: bool,
    state: Mutex<MemoryState>,
}

impl MemoryAuthProvider {
    pub fn new(require_email_confirmation: bool) -> Self {
        Self {
            require_email_confirmation,
            state: Mutex::new(MemoryState::default()),
        }
    }

    /// Marks an account as confirmed, as following the emailed link would.
    pub fn confirm_email(&self, email: &str) -> bool {
        match self.state() {
            Ok(mut state) => match state.users.get_mut(&normalize(email)) {
                Some(account) => {
                    account.confirmed = true;
                    true
                }
                None => false,
            },
            Err(_) => false,
        }
    }

    fn state(&self) -> Result<MutexGuard<'_, MemoryState>, AuthError> {
        self.state
            .lock()
            .map_err(|_| AuthError::Unavailable("auth state poisoned".to_string()))
    }

    fn issue_session(state: &mut MemoryState, user: &AuthUser) -> AuthSession {
        let access_token = uuid::Uuid::new_v4().to_string();
        state.sessions.insert(access_token.clone(), user.clone());
        AuthSession {
            access_token,
            user: user.clone(),
        }
    }
}

impl Default for MemoryAuthProvider {
    fn default() -> Self {
        Self::new(false)
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        let email = normalize(email);
        let mut state = self.state()?;
        if state.users.contains_key(&email) {
            return Err(AuthError::UserExists);
        }

        let user = AuthUser {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.clone(),
        };
        let confirmed = !self.require_email_confirmation;
        state.users.insert(
            email,
            MemoryUser {
                user: user.clone(),
                password: password.to_string(),
                confirmed,
            },
        );

        let session = confirmed.then(|| Self::issue_session(&mut state, &user));
        Ok(SignUpOutcome { user, session })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let mut state = self.state()?;
        let user = match state.users.get(&normalize(email)) {
            Some(account) if account.password == password => {
                if !account.confirmed {
                    return Err(AuthError::EmailNotConfirmed);
                }
                account.user.clone()
            }
            _ => return Err(AuthError::InvalidCredentials),
        };
        Ok(Self::issue_session(&mut state, &user))
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let mut state = self.state()?;
        state
            .sessions
            .remove(access_token)
            .map(|_| ())
            .ok_or(AuthError::InvalidToken)
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let state = self.state()?;
        state
            .sessions
            .get(access_token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
