//! Saving model
//!
//! An amount set aside towards a named goal ("Emergency fund", "Retirement", ...).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::dates;
use super::ids::{SavingId, UserId};
use super::money::Money;
use super::query::Filterable;
use super::validation::Violations;
use crate::error::{FinanceError, FinanceResult};

pub const GOAL_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 200;

/// A stored saving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Saving {
    pub id: SavingId,
    pub user_id: UserId,
    pub amount: Money,
    pub date: NaiveDate,
    pub goal: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated saving fields
#[derive(Debug, Clone, PartialEq)]
pub struct SavingFields {
    pub amount: Money,
    pub date: NaiveDate,
    pub goal: String,
    pub description: String,
}

impl Saving {
    /// Create a new saving; the id is assigned by storage
    pub fn new(user_id: UserId, fields: SavingFields) -> Self {
        let now = Utc::now();
        Self {
            id: SavingId::new(0),
            user_id,
            amount: fields.amount,
            date: fields.date,
            goal: fields.goal,
            description: fields.description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, fields: SavingFields) {
        self.amount = fields.amount;
        self.date = fields.date;
        self.goal = fields.goal;
        self.description = fields.description;
        self.updated_at = Utc::now();
    }

    pub fn to_dto(&self) -> SavingDto {
        SavingDto {
            id: Some(self.id),
            user_id: Some(self.user_id),
            amount: Some(self.amount),
            date: Some(self.date),
            goal: Some(self.goal.clone()),
            description: Some(self.description.clone()),
        }
    }
}

impl Filterable for Saving {
    fn record_id(&self) -> i64 {
        self.id.get()
    }

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn record_amount(&self) -> Money {
        self.amount
    }

    fn matches_text(&self, needle: &str) -> bool {
        self.goal.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Wire representation of a saving
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SavingId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(default, with = "dates::optional", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SavingDto {
    pub fn validate(&self, today: NaiveDate) -> FinanceResult<SavingFields> {
        let mut v = Violations::new();

        let amount = v.positive_amount(self.amount);
        let date = v.past_or_present(self.date, today, "Date cannot be in the future");
        let goal = v.text(self.goal.clone(), "Goal", GOAL_MAX_LEN);
        let description =
            v.optional_text(self.description.clone(), "Description", DESCRIPTION_MAX_LEN);

        v.finish()?;
        match (amount, date, goal) {
            (Some(amount), Some(date), Some(goal)) => Ok(SavingFields {
                amount,
                date,
                goal,
                description,
            }),
            _ => Err(FinanceError::Validation("Invalid saving".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_saving_reports_all_fields() {
        // Negative amount, future date and empty goal
        let dto: SavingDto = serde_json::from_str(
            r#"{"userId":1,"amount":-100,"date":"2099-01-01T00:00:00+00:00","goal":""}"#,
        )
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 9, 4).unwrap();
        let details = dto.validate(today).unwrap_err().details();
        assert_eq!(details.len(), 3);
        assert!(details.contains(&"Goal cannot be empty".to_string()));
    }

    #[test]
    fn test_valid_saving() {
        let dto = SavingDto {
            amount: Some(Money::from_cents(10000)),
            date: NaiveDate::from_ymd_opt(2025, 9, 4),
            goal: Some("Emergency fund".into()),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 9, 4).unwrap();
        let saving = Saving::new(UserId::new(2), dto.validate(today).unwrap());
        assert_eq!(saving.goal, "Emergency fund");
        assert_eq!(saving.to_dto().user_id, Some(UserId::new(2)));
    }
}
