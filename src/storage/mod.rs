//! Storage layer for fintrack
//!
//! Each resource lives in its own JSON table file under the data directory,
//! written atomically after every mutation. The activity log sits next to
//! the tables as an append-only JSONL file.

pub mod expenses;
pub mod file_io;
pub mod incomes;
pub mod init;
pub mod payments;
pub mod savings;
pub mod table;
pub mod users;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use incomes::IncomeRepository;
pub use init::initialize_storage;
pub use payments::PaymentRepository;
pub use savings::SavingRepository;
pub use table::{Record, Table};
pub use users::UserRepository;

use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use crate::audit::{ActivityEntry, ActivityLog, EntityType};
use crate::config::paths::FinancePaths;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{ActivityType, UserId};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FinancePaths,
    pub users: UserRepository,
    pub expenses: ExpenseRepository,
    pub incomes: IncomeRepository,
    pub payments: PaymentRepository,
    pub savings: SavingRepository,
    activity: ActivityLog,
    write_lock: Mutex<()>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: FinancePaths) -> FinanceResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            users: UserRepository::new(paths.users_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            incomes: IncomeRepository::new(paths.incomes_file()),
            payments: PaymentRepository::new(paths.payments_file()),
            savings: SavingRepository::new(paths.savings_file()),
            activity: ActivityLog::new(paths.activity_log()),
            write_lock: Mutex::new(()),
            paths,
        })
    }

    /// Create storage and load everything already on disk
    pub fn open(paths: FinancePaths) -> FinanceResult<Self> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &FinancePaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> FinanceResult<()> {
        self.users.load()?;
        self.expenses.load()?;
        self.incomes.load()?;
        self.payments.load()?;
        self.savings.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> FinanceResult<()> {
        self.users.save()?;
        self.expenses.save()?;
        self.incomes.save()?;
        self.payments.save()?;
        self.savings.save()?;
        Ok(())
    }

    /// Serialize a check-then-write sequence against other writers
    ///
    /// Hold the guard across the uniqueness checks and the mutation so two
    /// concurrent requests cannot both pass the same check.
    pub fn lock_writes(&self) -> FinanceResult<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Log a non-record event (login, registration, ...)
    pub fn log_event(
        &self,
        user_id: UserId,
        activity_type: ActivityType,
        description: impl Into<String>,
    ) -> FinanceResult<()> {
        self.activity
            .log(ActivityEntry::event(user_id, activity_type, description))?;
        Ok(())
    }

    /// Log a create operation
    pub fn log_create<T: Serialize>(
        &self,
        user_id: UserId,
        entity_type: EntityType,
        entity_id: i64,
        label: &str,
        entity: &T,
    ) -> FinanceResult<()> {
        self.activity.log(ActivityEntry::create(
            user_id,
            entity_type,
            entity_id,
            label,
            entity,
        ))?;
        Ok(())
    }

    /// Log an update operation
    pub fn log_update<T: Serialize>(
        &self,
        user_id: UserId,
        entity_type: EntityType,
        entity_id: i64,
        label: &str,
        before: &T,
        after: &T,
    ) -> FinanceResult<()> {
        self.activity.log(ActivityEntry::update(
            user_id,
            entity_type,
            entity_id,
            label,
            before,
            after,
        ))?;
        Ok(())
    }

    /// Log a delete operation
    pub fn log_delete<T: Serialize>(
        &self,
        user_id: UserId,
        entity_type: EntityType,
        entity_id: i64,
        label: &str,
        entity: &T,
    ) -> FinanceResult<()> {
        self.activity.log(ActivityEntry::delete(
            user_id,
            entity_type,
            entity_id,
            label,
            entity,
        ))?;
        Ok(())
    }
}
