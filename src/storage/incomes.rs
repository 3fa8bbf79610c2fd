//! Income repository

use super::table::{Record, Table};
use crate::error::FinanceResult;
use crate::models::{Income, IncomeId, UserId};

pub type IncomeRepository = Table<Income>;

impl Record for Income {
    type Id = IncomeId;
    const ENTITY: &'static str = "Income";

    fn id(&self) -> IncomeId {
        self.id
    }

    fn set_id(&mut self, id: IncomeId) {
        self.id = id;
    }
}

impl Table<Income> {
    /// All incomes owned by a user
    pub fn for_user(&self, user_id: UserId) -> FinanceResult<Vec<Income>> {
        self.find(|i| i.user_id == user_id)
    }
}
