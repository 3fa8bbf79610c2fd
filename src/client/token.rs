//! Locally stored session
//!
//! After a successful login the CLI keeps the bearer token, the email it was
//! issued for and, once known, the user id in `session.json` under the data
//! directory.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::paths::FinancePaths;
use crate::error::{FinanceError, FinanceResult};
use crate::models::UserId;
use crate::storage::file_io::write_json_atomic;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredToken {
    pub token: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredToken {
    pub fn new(token: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            email: email.into(),
            user_id: None,
            expires_at: None,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Reads and writes the stored session file
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(paths: &FinancePaths) -> Self {
        Self {
            path: paths.session_file(),
        }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// The stored session, `None` when nobody is logged in
    pub fn load(&self) -> FinanceResult<Option<StoredToken>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let token = serde_json::from_str(&content).map_err(|e| {
            FinanceError::Storage(format!("Failed to parse {}: {}", self.path.display(), e))
        })?;
        Ok(Some(token))
    }

    pub fn save(&self, token: &StoredToken) -> FinanceResult<()> {
        write_json_atomic(&self.path, token)
    }

    /// Forget the stored session; returns whether one existed
    pub fn clear(&self) -> FinanceResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = TokenStore::at(temp_dir.path().join("session.json"));
        assert!(store.load().unwrap().is_none());

        let mut token = StoredToken::new("abc", "ana@example.com");
        token.user_id = Some(UserId::new(3));
        store.save(&token).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, token);

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"userId\": 3") || raw.contains("\"userId\":3"));

        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let mut token = StoredToken::new("abc", "ana@example.com");
        assert!(!token.is_expired_at(now));

        token.expires_at = Some(now - Duration::minutes(1));
        assert!(token.is_expired_at(now));

        token.expires_at = Some(now + Duration::hours(1));
        assert!(!token.is_expired_at(now));
    }
}
