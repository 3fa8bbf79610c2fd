//! Authentication service
//!
//! Registration, login and logout. Login exchanges an email and password for
//! a bearer token from the session store.

use tracing::{info, warn};

use super::UserService;
use crate::auth::{verify_password, Session, SessionStore};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{ActivityType, LoginRequest, RegisterRequest, User, UserDto};
use crate::storage::Storage;

const BAD_CREDENTIALS: &str = "Invalid email or password";

/// Service for sign-in and sign-out
pub struct AuthService<'a> {
    storage: &'a Storage,
    sessions: &'a SessionStore,
}

impl<'a> AuthService<'a> {
    pub fn new(storage: &'a Storage, sessions: &'a SessionStore) -> Self {
        Self { storage, sessions }
    }

    pub fn register(&self, request: &RegisterRequest) -> FinanceResult<User> {
        let dto = UserDto {
            name: request.name.clone(),
            email: request.email.clone(),
            password: request.password.clone(),
            ..Default::default()
        };
        UserService::new(self.storage).register(&dto)
    }

    /// Check credentials and issue a token
    ///
    /// Unknown email and wrong password fail the same way.
    pub fn login(&self, request: &LoginRequest) -> FinanceResult<Session> {
        let (email, password) = match (request.email.as_deref(), request.password.as_deref()) {
            (Some(e), Some(p)) if !e.trim().is_empty() && !p.is_empty() => (e, p),
            _ => {
                return Err(FinanceError::InvalidFields(vec![
                    "Email and password are required".into(),
                ]))
            }
        };

        let user = match self.storage.users.get_by_email(email)? {
            Some(user) if verify_password(password, &user.password_hash)? => user,
            _ => {
                warn!(email = %email.trim(), "failed login");
                return Err(FinanceError::Unauthorized(BAD_CREDENTIALS.into()));
            }
        };

        let session = self.sessions.issue(user.id)?;
        self.storage
            .log_event(user.id, ActivityType::Login, "Logged in")?;
        info!(user = %user.id, expires_at = %session.expires_at, "user logged in");

        Ok(session)
    }

    /// Revoke the token the request was made with
    pub fn logout(&self, session: &Session) -> FinanceResult<()> {
        self.sessions.revoke(&session.token)?;
        self.storage
            .log_event(session.user_id, ActivityType::Logout, "Logged out")?;
        info!(user = %session.user_id, "user logged out");
        Ok(())
    }
}
