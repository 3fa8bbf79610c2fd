//! Saving repository

use super::table::{Record, Table};
use crate::error::FinanceResult;
use crate::models::{Saving, SavingId, UserId};

pub type SavingRepository = Table<Saving>;

impl Record for Saving {
    type Id = SavingId;
    const ENTITY: &'static str = "Saving";

    fn id(&self) -> SavingId {
        self.id
    }

    fn set_id(&mut self, id: SavingId) {
        self.id = id;
    }
}

impl Table<Saving> {
    /// All savings owned by a user
    pub fn for_user(&self, user_id: UserId) -> FinanceResult<Vec<Saving>> {
        self.find(|s| s.user_id == user_id)
    }
}
