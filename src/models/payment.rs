//! Payment model
//!
//! A payment settles one expense. The wire shape carries the linked expense
//! both as `expenseId` and, on output, as a nested `expense` object.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::dates;
use super::expense::{Expense, ExpenseDto};
use super::ids::{ExpenseId, PaymentId};
use super::money::Money;
use super::query::Filterable;
use super::validation::Violations;
use crate::error::{FinanceError, FinanceResult};

pub const NAME_MAX_LEN: usize = 100;

/// Settlement state of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Paid => write!(f, "Paid"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown payment status '{}'", other)),
        }
    }
}

/// A stored payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub expense_id: ExpenseId,
    pub name: String,
    pub amount: Money,
    #[serde(default)]
    pub status: PaymentStatus,
    pub payment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated payment fields
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentFields {
    pub expense_id: ExpenseId,
    pub name: String,
    pub amount: Money,
    pub status: PaymentStatus,
    pub payment_date: NaiveDate,
}

impl Payment {
    /// Create a new payment; the id is assigned by storage
    pub fn new(fields: PaymentFields) -> Self {
        let now = Utc::now();
        Self {
            id: PaymentId::new(0),
            expense_id: fields.expense_id,
            name: fields.name,
            amount: fields.amount,
            status: fields.status,
            payment_date: fields.payment_date,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, fields: PaymentFields) {
        self.expense_id = fields.expense_id;
        self.name = fields.name;
        self.amount = fields.amount;
        self.status = fields.status;
        self.payment_date = fields.payment_date;
        self.updated_at = Utc::now();
    }

    /// Wire view, embedding the linked expense when it is known
    pub fn to_dto(&self, expense: Option<&Expense>) -> PaymentDto {
        PaymentDto {
            id: Some(self.id),
            expense_id: Some(self.expense_id),
            expense: expense.map(Expense::to_dto),
            name: Some(self.name.clone()),
            amount: Some(self.amount),
            status: Some(self.status),
            payment_date: Some(self.payment_date),
        }
    }
}

impl Filterable for Payment {
    fn record_id(&self) -> i64 {
        self.id.get()
    }

    fn record_date(&self) -> Option<NaiveDate> {
        Some(self.payment_date)
    }

    fn record_amount(&self) -> Money {
        self.amount
    }

    fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}

/// Wire representation of a payment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PaymentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_id: Option<ExpenseId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense: Option<ExpenseDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    #[serde(default, with = "dates::optional", skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
}

impl PaymentDto {
    /// The linked expense, from `expenseId` or the nested `expense.id`
    pub fn linked_expense_id(&self) -> Option<ExpenseId> {
        self.expense_id
            .or_else(|| self.expense.as_ref().and_then(|e| e.id))
    }

    /// Validate every rule and return the checked fields
    ///
    /// A missing status defaults to PENDING and a missing payment date to `today`.
    pub fn validate(&self, today: NaiveDate) -> FinanceResult<PaymentFields> {
        let mut v = Violations::new();

        let expense_id = match self.linked_expense_id() {
            Some(id) if id.get() > 0 => Some(id),
            _ => {
                v.push("Payment must be linked to an Expense");
                None
            }
        };
        let name = v.text(self.name.clone(), "Name", NAME_MAX_LEN);
        let amount = v.positive_amount(self.amount);

        v.finish()?;
        match (expense_id, name, amount) {
            (Some(expense_id), Some(name), Some(amount)) => Ok(PaymentFields {
                expense_id,
                name,
                amount,
                status: self.status.unwrap_or_default(),
                payment_date: self.payment_date.unwrap_or(today),
            }),
            _ => Err(FinanceError::Validation("Invalid payment".into())),
        }
    }
}
