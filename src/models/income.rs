//! Income model
//!
//! Money received by a user, optionally recurring until an end date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::dates;
use super::frequency::Frequency;
use super::ids::{IncomeId, UserId};
use super::money::Money;
use super::query::Filterable;
use super::validation::Violations;
use crate::error::{FinanceError, FinanceResult};

pub const SOURCE_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 200;

/// A stored income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: IncomeId,
    pub user_id: UserId,
    pub amount: Money,
    pub source: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated income fields
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeFields {
    pub amount: Money,
    pub source: String,
    pub date: NaiveDate,
    pub description: String,
    pub frequency: Frequency,
    pub end_date: Option<NaiveDate>,
}

impl Income {
    /// Create a new income; the id is assigned by storage
    pub fn new(user_id: UserId, fields: IncomeFields) -> Self {
        let now = Utc::now();
        Self {
            id: IncomeId::new(0),
            user_id,
            amount: fields.amount,
            source: fields.source,
            date: fields.date,
            description: fields.description,
            frequency: fields.frequency,
            end_date: fields.end_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace all editable fields
    pub fn apply(&mut self, fields: IncomeFields) {
        self.amount = fields.amount;
        self.source = fields.source;
        self.date = fields.date;
        self.description = fields.description;
        self.frequency = fields.frequency;
        self.end_date = fields.end_date;
        self.updated_at = Utc::now();
    }

    pub fn to_dto(&self) -> IncomeDto {
        IncomeDto {
            id: Some(self.id),
            user_id: Some(self.user_id),
            amount: Some(self.amount),
            source: Some(self.source.clone()),
            date: Some(self.date),
            description: Some(self.description.clone()),
            frequency: Some(self.frequency),
            end_date: self.end_date,
        }
    }
}

impl Filterable for Income {
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
        self.source.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Wire representation of an income
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<IncomeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, with = "dates::optional", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(default, with = "dates::optional", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl IncomeDto {
    /// Validate every rule and return the checked fields
    pub fn validate(&self, today: NaiveDate) -> FinanceResult<IncomeFields> {
        let mut v = Violations::new();

        let amount = v.positive_amount(self.amount);
        let source = v.text(self.source.clone(), "Source", SOURCE_MAX_LEN);
        let date = v.past_or_present(self.date, today, "Date cannot be in the future");
        let description =
            v.optional_text(self.description.clone(), "Description", DESCRIPTION_MAX_LEN);
        v.not_before(
            self.end_date,
            self.date,
            "End date cannot be before the income date",
        );

        v.finish()?;
        match (amount, source, date) {
            (Some(amount), Some(source), Some(date)) => Ok(IncomeFields {
                amount,
                source,
                date,
                description,
                frequency: self.frequency.unwrap_or_default(),
                end_date: self.end_date,
            }),
            _ => Err(FinanceError::Validation("Invalid income".into())),
        }
    }
}
