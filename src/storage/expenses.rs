//! Expense repository

use super::table::{Record, Table};
use crate::error::FinanceResult;
use crate::models::{Expense, ExpenseId, UserId};

pub type ExpenseRepository = Table<Expense>;

impl Record for Expense {
    type Id = ExpenseId;
    const ENTITY: &'static str = "Expense";

    fn id(&self) -> ExpenseId {
        self.id
    }

    fn set_id(&mut self, id: ExpenseId) {
        self.id = id;
    }
}

impl Table<Expense> {
    /// All expenses owned by a user
    pub fn for_user(&self, user_id: UserId) -> FinanceResult<Vec<Expense>> {
        self.find(|e| e.user_id == user_id)
    }
}
