//! Payment repository
//!
//! Payments have no owner of their own; they belong to whoever owns the
//! linked expense.

use std::collections::HashSet;

use super::table::{Record, Table};
use crate::error::FinanceResult;
use crate::models::{ExpenseId, Payment, PaymentId};

pub type PaymentRepository = Table<Payment>;

impl Record for Payment {
    type Id = PaymentId;
    const ENTITY: &'static str = "Payment";

    fn id(&self) -> PaymentId {
        self.id
    }

    fn set_id(&mut self, id: PaymentId) {
        self.id = id;
    }
}

impl Table<Payment> {
    /// The payment settling an expense, if any
    pub fn for_expense(&self, expense_id: ExpenseId) -> FinanceResult<Option<Payment>> {
        self.find_first(|p| p.expense_id == expense_id)
    }

    /// Payments linked to any of the given expenses
    pub fn for_expenses(&self, expense_ids: &HashSet<ExpenseId>) -> FinanceResult<Vec<Payment>> {
        self.find(|p| expense_ids.contains(&p.expense_id))
    }
}
