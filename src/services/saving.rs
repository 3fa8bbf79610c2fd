//! Saving service
//!
//! CRUD over a user's savings entries.

use tracing::{debug, info};

use super::{ensure_owner, ensure_path_id, today};
use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{ListFilter, Saving, SavingDto, SavingId, UserId};
use crate::storage::Storage;

/// Service for savings management
pub struct SavingService<'a> {
    storage: &'a Storage,
}

impl<'a> SavingService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn list(&self, actor: UserId, filter: &ListFilter) -> FinanceResult<Vec<Saving>> {
        let savings = self.storage.savings.for_user(actor)?;
        debug!(user = %actor, total = savings.len(), "listing savings");
        Ok(filter.apply(savings))
    }

    pub fn get(&self, actor: UserId, id: SavingId) -> FinanceResult<Saving> {
        self.storage
            .savings
            .get(id)?
            .filter(|s| s.user_id == actor)
            .ok_or_else(|| FinanceError::saving_not_found(id.to_string()))
    }

    pub fn create(&self, actor: UserId, dto: &SavingDto) -> FinanceResult<Saving> {
        ensure_owner(actor, dto.user_id)?;
        let fields = dto.validate(today())?;

        let _guard = self.storage.lock_writes()?;
        let saving = self.storage.savings.insert(Saving::new(actor, fields))?;
        self.storage.savings.save()?;

        self.storage.log_create(
            actor,
            EntityType::Saving,
            saving.id.get(),
            &saving.goal,
            &saving.to_dto(),
        )?;
        info!(user = %actor, saving = %saving.id, amount = %saving.amount, "saving created");

        Ok(saving)
    }

    pub fn update(&self, actor: UserId, id: SavingId, dto: &SavingDto) -> FinanceResult<Saving> {
        ensure_path_id(id, dto.id)?;
        ensure_owner(actor, dto.user_id)?;
        let fields = dto.validate(today())?;

        let _guard = self.storage.lock_writes()?;
        let before = self.get(actor, id)?;
        let mut saving = before.clone();
        saving.apply(fields);

        let saving = self.storage.savings.update(saving)?;
        self.storage.savings.save()?;

        self.storage.log_update(
            actor,
            EntityType::Saving,
            id.get(),
            &saving.goal,
            &before.to_dto(),
            &saving.to_dto(),
        )?;
        info!(user = %actor, saving = %id, "saving updated");

        Ok(saving)
    }

    pub fn delete(&self, actor: UserId, id: SavingId) -> FinanceResult<Saving> {
        let _guard = self.storage.lock_writes()?;
        let saving = self.get(actor, id)?;

        self.storage.savings.remove(id)?;
        self.storage.savings.save()?;

        self.storage.log_delete(
            actor,
            EntityType::Saving,
            id.get(),
            &saving.goal,
            &saving.to_dto(),
        )?;
        info!(user = %actor, saving = %id, "saving deleted");

        Ok(saving)
    }
}
