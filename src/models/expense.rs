//! Expense model
//!
//! An expense belongs to one user and may recur monthly or yearly. Recurring
//! expenses track the next date they fall due.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::dates;
use super::frequency::Frequency;
use super::ids::{ExpenseId, UserId};
use super::money::Money;
use super::query::Filterable;
use super::validation::Violations;
use crate::error::{FinanceError, FinanceResult};

pub const CATEGORY_MAX_LEN: usize = 50;
pub const DESCRIPTION_MAX_LEN: usize = 200;

/// How an expense is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    Transfer,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card => write!(f, "Card"),
            Self::Transfer => write!(f, "Transfer"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" => Ok(Self::Card),
            "transfer" => Ok(Self::Transfer),
            other => Err(format!("unknown payment method '{}'", other)),
        }
    }
}

/// A stored expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub user_id: UserId,
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub frequency: Frequency,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub next_due_date: Option<NaiveDate>,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated expense fields
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFields {
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub description: String,
    pub frequency: Frequency,
    pub end_date: Option<NaiveDate>,
    pub next_due_date: Option<NaiveDate>,
    pub payment_method: PaymentMethod,
}

impl Expense {
    /// Create a new expense; the id is assigned by storage
    pub fn new(user_id: UserId, fields: ExpenseFields, today: NaiveDate) -> Self {
        let now = Utc::now();
        let mut expense = Self {
            id: ExpenseId::new(0),
            user_id,
            amount: fields.amount,
            category: String::new(),
            date: fields.date,
            description: String::new(),
            frequency: fields.frequency,
            end_date: None,
            next_due_date: None,
            payment_method: fields.payment_method,
            created_at: now,
            updated_at: now,
        };
        expense.apply(fields, today);
        expense
    }

    /// Replace all editable fields
    pub fn apply(&mut self, fields: ExpenseFields, today: NaiveDate) {
        self.amount = fields.amount;
        self.category = fields.category;
        self.date = fields.date;
        self.description = fields.description;
        self.frequency = fields.frequency;
        self.end_date = fields.end_date;
        self.payment_method = fields.payment_method;
        self.next_due_date = match fields.next_due_date {
            Some(due) => Some(due),
            None => self
                .frequency
                .next_occurrence(self.date, self.end_date, today),
        };
        self.updated_at = Utc::now();
    }

    /// Amount normalized to one month (one-time expenses count as zero)
    pub fn monthly_equivalent(&self) -> Money {
        match self.frequency {
            Frequency::OneTime => Money::zero(),
            Frequency::Monthly => self.amount,
            Frequency::Yearly => self.amount.div_round(12),
        }
    }

    pub fn to_dto(&self) -> ExpenseDto {
        ExpenseDto {
            id: Some(self.id),
            user_id: Some(self.user_id),
            amount: Some(self.amount),
            category: Some(self.category.clone()),
            date: Some(self.date),
            description: Some(self.description.clone()),
            frequency: Some(self.frequency),
            end_date: self.end_date,
            next_due_date: self.next_due_date,
            payment_method: Some(self.payment_method),
        }
    }
}

impl Filterable for Expense {
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
        self.category.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Wire representation of an expense
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ExpenseId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, with = "dates::optional", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(default, with = "dates::optional", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, with = "dates::optional", skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
}

impl ExpenseDto {
    /// Validate every rule and return the checked fields
    pub fn validate(&self, today: NaiveDate) -> FinanceResult<ExpenseFields> {
        let mut v = Violations::new();

        let amount = v.positive_amount(self.amount);
        let category = v.text(self.category.clone(), "Category", CATEGORY_MAX_LEN);
        let date = v.past_or_present(self.date, today, "Expense date cannot be in the future");
        let description =
            v.optional_text(self.description.clone(), "Description", DESCRIPTION_MAX_LEN);
        let frequency = v.require(self.frequency, "Frequency must be set");
        let payment_method = v.require(self.payment_method, "Payment method must be set");
        v.not_before(
            self.end_date,
            self.date,
            "End date cannot be before the expense date",
        );
        v.not_before(
            self.next_due_date,
            self.date,
            "Next due date cannot be before the expense date",
        );

        v.finish()?;
        match (amount, category, date, frequency, payment_method) {
            (Some(amount), Some(category), Some(date), Some(frequency), Some(payment_method)) => {
                Ok(ExpenseFields {
                    amount,
                    category,
                    date,
                    description,
                    frequency,
                    end_date: self.end_date,
                    next_due_date: self.next_due_date,
                    payment_method,
                })
            }
            _ => Err(FinanceError::Validation("Invalid expense".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn valid_dto() -> ExpenseDto {
        ExpenseDto {
            amount: Some(Money::from_cents(4250)),
            category: Some("Groceries".into()),
            date: Some(day("2025-03-10")),
            description: Some("Weekly shop".into()),
            frequency: Some(Frequency::OneTime),
            payment_method: Some(PaymentMethod::Card),
            ..Default::default()
        }
    }

    #[test]
    fn test_wire_names() {
        let json: serde_json::Value = serde_json::to_value(Expense::new(
            UserId::new(1),
            valid_dto().validate(day("2025-03-10")).unwrap(),
            day("2025-03-10"),
        )
        .to_dto())
        .unwrap();
        assert_eq!(json["userId"], 1);
        assert_eq!(json["amount"], 42.5);
        assert_eq!(json["paymentMethod"], "CARD");
        assert_eq!(json["frequency"], "ONE_TIME");
        assert_eq!(json["date"], "2025-03-10");
        assert!(json.get("nextDueDate").is_none());
    }

    #[test]
    fn test_valid_expense() {
        let fields = valid_dto().validate(day("2025-03-10")).unwrap();
        assert_eq!(fields.category, "Groceries");
        assert_eq!(fields.amount.cents(), 4250);
    }

    #[test]
    fn test_huge_amounts_never_reach_storage() {
        let body = r#"{"amount":1e300,"category":"Rent","date":"2025-03-01",
            "frequency":"MONTHLY","paymentMethod":"TRANSFER"}"#;
        assert!(serde_json::from_str::<ExpenseDto>(body).is_err());

        let body = r#"{"amount":5000000000,"category":"Rent","date":"2025-03-01",
            "frequency":"MONTHLY","paymentMethod":"TRANSFER"}"#;
        let dto: ExpenseDto = serde_json::from_str(body).unwrap();
        let err = dto.validate(day("2025-03-10")).unwrap_err();
        assert_eq!(err.details(), vec!["Amount cannot exceed 1000000000.00".to_string()]);
    }

    #[test]
    fn test_validation_collects_every_violation() {
        let dto = ExpenseDto {
            amount: Some(Money::zero()),
            category: Some("".into()),
            date: Some(day("2025-04-01")),
            end_date: Some(day("2025-03-01")),
            ..Default::default()
        };
        let err = dto.validate(day("2025-03-10")).unwrap_err();
        let details = err.details();
        assert!(details.contains(&"Amount must be greater than 0".to_string()));
        assert!(details.contains(&"Category cannot be empty".to_string()));
        assert!(details.contains(&"Expense date cannot be in the future".to_string()));
        assert!(details.contains(&"Frequency must be set".to_string()));
        assert!(details.contains(&"Payment method must be set".to_string()));
        assert!(details.contains(&"End date cannot be before the expense date".to_string()));
    }

    #[test]
    fn test_category_length_limit() {
        let mut dto = valid_dto();
        dto.category = Some("c".repeat(51));
        assert!(dto.validate(day("2025-03-10")).is_err());
    }

    #[test]
    fn test_recurring_expense_gets_next_due_date() {
        let mut dto = valid_dto();
        dto.frequency = Some(Frequency::Monthly);
        let today = day("2025-05-01");
        let expense = Expense::new(UserId::new(1), dto.validate(today).unwrap(), today);
        assert_eq!(expense.next_due_date, Some(day("2025-05-10")));
        assert_eq!(expense.monthly_equivalent().cents(), 4250);
    }

    #[test]
    fn test_explicit_next_due_date_kept() {
        let mut dto = valid_dto();
        dto.frequency = Some(Frequency::Yearly);
        dto.next_due_date = Some(day("2026-01-01"));
        let today = day("2025-05-01");
        let expense = Expense::new(UserId::new(1), dto.validate(today).unwrap(), today);
        assert_eq!(expense.next_due_date, Some(day("2026-01-01")));
        assert_eq!(expense.monthly_equivalent().cents(), 354);
    }

    #[test]
    fn test_unknown_enum_rejected() {
        let result = serde_json::from_str::<ExpenseDto>(r#"{"paymentMethod":"CASH"}"#);
        assert!(result.is_err());
    }
}
