//! User model
//!
//! `User` is the stored record and carries the password hash. `UserDto` is
//! the wire shape: `password` and `currentPassword` are accepted on input and
//! never serialized back out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;
use super::money::Money;
use super::validation::{is_valid_email, Violations};
use crate::error::{FinanceError, FinanceResult};

pub const NAME_MAX_LEN: usize = 100;
pub const PASSWORD_MIN_LEN: usize = 6;

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Stored lower-cased
    pub email: String,
    /// Argon2id PHC string
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub balance: Money,
}

impl User {
    /// Public view of this user
    pub fn to_dto(&self) -> UserDto {
        UserDto {
            id: Some(self.id),
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            password: None,
            current_password: None,
            created_at: Some(self.created_at),
            balance: Some(self.balance),
        }
    }
}

/// Normalize an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Wire representation of a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    #[serde(default, skip_serializing)]
    pub current_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Money>,
}

/// Validated profile fields extracted from a `UserDto`
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
}

impl UserDto {
    /// Validate the fields needed to create a user (password required)
    pub fn validate_new(&self) -> FinanceResult<UserProfile> {
        self.validate_profile(true)
    }

    /// Validate the fields needed to update a user (password optional)
    pub fn validate_update(&self) -> FinanceResult<UserProfile> {
        self.validate_profile(false)
    }

    fn validate_profile(&self, password_required: bool) -> FinanceResult<UserProfile> {
        let mut v = Violations::new();
        let name = v.text(self.name.clone(), "Name", NAME_MAX_LEN);

        let email = match self.email.as_deref().map(normalize_email) {
            None => {
                v.push("Email must not be null or blank");
                None
            }
            Some(e) if e.is_empty() => {
                v.push("Email must not be null or blank");
                None
            }
            Some(e) if !is_valid_email(&e) => {
                v.push("Email must be a valid address");
                None
            }
            Some(e) => Some(e),
        };

        let password = match self.password.as_deref() {
            None | Some("") if password_required => {
                v.push("Password cannot be empty");
                None
            }
            None | Some("") => None,
            Some(p) if p.chars().count() < PASSWORD_MIN_LEN => {
                v.push(format!(
                    "Password must be at least {} characters",
                    PASSWORD_MIN_LEN
                ));
                None
            }
            Some(p) => Some(p.to_string()),
        };

        v.finish()?;
        match (name, email) {
            (Some(name), Some(email)) => Ok(UserProfile {
                name,
                email,
                password,
            }),
            _ => Err(FinanceError::Validation("Invalid user profile".into())),
        }
    }
}
