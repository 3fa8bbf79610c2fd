//! User activity feed entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ActivityId, UserId};

/// Kind of activity shown in a user's feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Registration,
    Login,
    Logout,
    Create,
    Update,
    Delete,
    PasswordChange,
}

impl ActivityType {
    /// PrimeIcons class shown next to the entry
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Registration => "pi pi-user-plus",
            Self::Login => "pi pi-sign-in",
            Self::Logout => "pi pi-sign-out",
            Self::Create => "pi pi-plus",
            Self::Update => "pi pi-pencil",
            Self::Delete => "pi pi-trash",
            Self::PasswordChange => "pi pi-lock",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Registration => "REGISTRATION",
            Self::Login => "LOGIN",
            Self::Logout => "LOGOUT",
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::PasswordChange => "PASSWORD_CHANGE",
        };
        f.write_str(name)
    }
}

/// Wire representation of an activity entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDto {
    pub id: ActivityId,
    pub user_id: UserId,
    pub activity_type: ActivityType,
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Field-level change summary for updates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
}
