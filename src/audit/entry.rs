//! Activity entry data structures
//!
//! An entry records one thing that happened to a user's data: a login, a
//! registration, or a create/update/delete of one of their records with
//! before/after snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::diff::generate_diff;
use crate::models::{ActivityDto, ActivityId, ActivityType, UserId};

/// Types of records whose changes are logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    User,
    Expense,
    Income,
    Payment,
    Saving,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityType::User => "profile",
            EntityType::Expense => "expense",
            EntityType::Income => "income",
            EntityType::Payment => "payment",
            EntityType::Saving => "saving",
        };
        f.write_str(name)
    }
}

/// A single activity log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// Sequence number, assigned by the log when written
    pub id: ActivityId,

    /// When it happened (UTC)
    pub timestamp: DateTime<Utc>,

    /// Whose feed the entry belongs to
    pub user_id: UserId,

    pub activity_type: ActivityType,

    /// Sentence shown in the feed
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<i64>,

    /// Record before the operation (updates/deletes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Record after the operation (creates/updates)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl ActivityEntry {
    /// An entry that is not about a stored record (login, registration, ...)
    pub fn event(
        user_id: UserId,
        activity_type: ActivityType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: ActivityId::new(0),
            timestamp: Utc::now(),
            user_id,
            activity_type,
            description: description.into(),
            entity_type: None,
            entity_id: None,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// Entry for a newly created record
    pub fn create<T: Serialize>(
        user_id: UserId,
        entity_type: EntityType,
        entity_id: i64,
        label: &str,
        entity: &T,
    ) -> Self {
        Self {
            entity_type: Some(entity_type),
            entity_id: Some(entity_id),
            after: serde_json::to_value(entity).ok(),
            ..Self::event(
                user_id,
                ActivityType::Create,
                format!("Added {} {}", entity_type, label),
            )
        }
    }

    /// Entry for an updated record, with a field-level diff
    pub fn update<T: Serialize>(
        user_id: UserId,
        entity_type: EntityType,
        entity_id: i64,
        label: &str,
        before: &T,
        after: &T,
    ) -> Self {
        let before = serde_json::to_value(before).ok();
        let after = serde_json::to_value(after).ok();
        let diff_summary = match (&before, &after) {
            (Some(b), Some(a)) => generate_diff(b, a),
            _ => None,
        };
        Self {
            entity_type: Some(entity_type),
            entity_id: Some(entity_id),
            before,
            after,
            diff_summary,
            ..Self::event(
                user_id,
                ActivityType::Update,
                format!("Updated {} {}", entity_type, label),
            )
        }
    }

    /// Entry for a deleted record
    pub fn delete<T: Serialize>(
        user_id: UserId,
        entity_type: EntityType,
        entity_id: i64,
        label: &str,
        entity: &T,
    ) -> Self {
        Self {
            entity_type: Some(entity_type),
            entity_id: Some(entity_id),
            before: serde_json::to_value(entity).ok(),
            ..Self::event(
                user_id,
                ActivityType::Delete,
                format!("Deleted {} {}", entity_type, label),
            )
        }
    }

    /// Feed view of this entry
    pub fn to_dto(&self) -> ActivityDto {
        ActivityDto {
            id: self.id,
            user_id: self.user_id,
            activity_type: self.activity_type,
            description: self.description.clone(),
            created_at: self.timestamp,
            icon: Some(self.activity_type.icon().to_string()),
            changes: self.diff_summary.clone(),
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.activity_type,
            self.description
        );

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_entry() {
        let data = json!({"category": "Groceries", "amount": 42.5});
        let entry = ActivityEntry::create(UserId::new(1), EntityType::Expense, 7, "Groceries", &data);

        assert_eq!(entry.activity_type, ActivityType::Create);
        assert_eq!(entry.description, "Added expense Groceries");
        assert_eq!(entry.entity_id, Some(7));
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
    }

    #[test]
    fn test_update_entry_computes_diff() {
        let before = json!({"amount": 10.0, "goal": "Car"});
        let after = json!({"amount": 15.0, "goal": "Car"});
        let entry =
            ActivityEntry::update(UserId::new(1), EntityType::Saving, 3, "Car", &before, &after);

        assert_eq!(entry.activity_type, ActivityType::Update);
        assert_eq!(entry.diff_summary.as_deref(), Some("amount: 10.0 -> 15.0"));
        assert_eq!(entry.to_dto().changes.as_deref(), Some("amount: 10.0 -> 15.0"));
    }

    #[test]
    fn test_delete_entry() {
        let entry = ActivityEntry::delete(
            UserId::new(2),
            EntityType::Payment,
            9,
            "Rent",
            &json!({"name": "Rent"}),
        );
        assert_eq!(entry.description, "Deleted payment Rent");
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_event_dto_has_icon() {
        let entry = ActivityEntry::event(UserId::new(5), ActivityType::Login, "Logged in");
        let dto = entry.to_dto();
        assert_eq!(dto.icon.as_deref(), Some("pi pi-sign-in"));
        assert_eq!(dto.description, "Logged in");

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("LOGIN Logged in"));
    }
}
