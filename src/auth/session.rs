//! Bearer token sessions
//!
//! Tokens are opaque random strings mapped to a user and an expiry. They live
//! in memory only, so restarting the server signs everyone out.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::{FinanceError, FinanceResult};
use crate::models::UserId;

/// An issued token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Token table shared by all request handlers
pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Store whose tokens live for `hours`
    ///
    /// A lifetime too large to represent is kept as the maximum; `issue`
    /// then refuses to mint tokens instead of overflowing.
    pub fn with_ttl_hours(hours: i64) -> Self {
        Self::new(Duration::try_hours(hours.max(1)).unwrap_or(Duration::MAX))
    }

    fn read(&self) -> FinanceResult<RwLockReadGuard<'_, HashMap<String, Session>>> {
        self.sessions
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire session lock: {}", e)))
    }

    fn write(&self) -> FinanceResult<RwLockWriteGuard<'_, HashMap<String, Session>>> {
        self.sessions
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire session lock: {}", e)))
    }

    /// Issue a new token for a user
    pub fn issue(&self, user_id: UserId) -> FinanceResult<Session> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
            FinanceError::Config(format!("Session lifetime of {} is out of range", self.ttl))
        })?;
        let token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        let session = Session {
            token: token.clone(),
            user_id,
            issued_at: now,
            expires_at,
        };
        self.write()?.insert(token, session.clone());
        Ok(session)
    }

    /// Resolve a token to its session
    ///
    /// Unknown and expired tokens are both `Unauthorized`; an expired token is
    /// dropped on the way out.
    pub fn resolve(&self, token: &str) -> FinanceResult<Session> {
        let now = Utc::now();
        let session = self
            .read()?
            .get(token)
            .cloned()
            .ok_or_else(|| FinanceError::Unauthorized("Invalid or unknown token".into()))?;

        if session.is_expired_at(now) {
            self.write()?.remove(token);
            return Err(FinanceError::Unauthorized("Token has expired".into()));
        }

        Ok(session)
    }

    /// Revoke one token. Returns whether it existed.
    pub fn revoke(&self, token: &str) -> FinanceResult<bool> {
        Ok(self.write()?.remove(token).is_some())
    }

    /// Revoke every token of a user, returning how many were dropped
    pub fn revoke_user(&self, user_id: UserId) -> FinanceResult<usize> {
        let mut sessions = self.write()?;
        let before = sessions.len();
        sessions.retain(|_, s| s.user_id != user_id);
        Ok(before - sessions.len())
    }

    /// Drop expired tokens, returning how many were dropped
    pub fn purge_expired(&self) -> FinanceResult<usize> {
        let now = Utc::now();
        let mut sessions = self.write()?;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        Ok(before - sessions.len())
    }

    pub fn active_count(&self) -> FinanceResult<usize> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_resolve() {
        let store = SessionStore::with_ttl_hours(1);
        let session = store.issue(UserId::new(3)).unwrap();

        assert_eq!(session.token.len(), 64);
        let resolved = store.resolve(&session.token).unwrap();
        assert_eq!(resolved.user_id, UserId::new(3));
        assert!(store.resolve("bogus").is_err());
    }

    #[test]
    fn test_expired_tokens_rejected_and_purged() {
        let store = SessionStore::new(Duration::seconds(-1));
        let session = store.issue(UserId::new(1)).unwrap();
        store.issue(UserId::new(2)).unwrap();

        let err = store.resolve(&session.token).unwrap_err();
        assert_eq!(err.to_string(), "Authentication failed: Token has expired");

        assert_eq!(store.purge_expired().unwrap(), 1);
        assert_eq!(store.active_count().unwrap(), 0);
    }

    #[test]
    fn test_oversized_lifetime_fails_cleanly() {
        for hours in [1_000_000_000_000, i64::MAX] {
            let store = SessionStore::with_ttl_hours(hours);
            let err = store.issue(UserId::new(1)).unwrap_err();
            assert!(matches!(err, FinanceError::Config(_)));
            assert_eq!(store.active_count().unwrap(), 0);
        }
    }

    #[test]
    fn test_revoke() {
        let store = SessionStore::with_ttl_hours(24);
        let a = store.issue(UserId::new(1)).unwrap();
        store.issue(UserId::new(1)).unwrap();
        let b = store.issue(UserId::new(2)).unwrap();

        assert!(store.revoke(&a.token).unwrap());
        assert!(!store.revoke(&a.token).unwrap());
        assert_eq!(store.revoke_user(UserId::new(1)).unwrap(), 1);
        assert!(store.resolve(&b.token).is_ok());
    }
}
