//! Expense service
//!
//! CRUD over a user's expenses. Deleting an expense also deletes the payment
//! that settles it.

use tracing::{debug, info};

use super::{ensure_owner, ensure_path_id, today};
use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Expense, ExpenseDto, ExpenseId, ListFilter, UserId};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The actor's expenses, filtered and sorted
    pub fn list(&self, actor: UserId, filter: &ListFilter) -> FinanceResult<Vec<Expense>> {
        let expenses = self.storage.expenses.for_user(actor)?;
        debug!(user = %actor, total = expenses.len(), "listing expenses");
        Ok(filter.apply(expenses))
    }

    /// Get one of the actor's expenses
    ///
    /// Someone else's expense is reported as not found.
    pub fn get(&self, actor: UserId, id: ExpenseId) -> FinanceResult<Expense> {
        self.storage
            .expenses
            .get(id)?
            .filter(|e| e.user_id == actor)
            .ok_or_else(|| FinanceError::expense_not_found(id.to_string()))
    }

    pub fn create(&self, actor: UserId, dto: &ExpenseDto) -> FinanceResult<Expense> {
        ensure_owner(actor, dto.user_id)?;
        let today = today();
        let fields = dto.validate(today)?;

        let _guard = self.storage.lock_writes()?;
        let expense = self
            .storage
            .expenses
            .insert(Expense::new(actor, fields, today))?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            actor,
            EntityType::Expense,
            expense.id.get(),
            &expense.category,
            &expense.to_dto(),
        )?;
        info!(user = %actor, expense = %expense.id, amount = %expense.amount, "expense created");

        Ok(expense)
    }

    pub fn update(&self, actor: UserId, id: ExpenseId, dto: &ExpenseDto) -> FinanceResult<Expense> {
        ensure_path_id(id, dto.id)?;
        ensure_owner(actor, dto.user_id)?;
        let today = today();
        let fields = dto.validate(today)?;

        let _guard = self.storage.lock_writes()?;
        let before = self.get(actor, id)?;
        let mut expense = before.clone();
        expense.apply(fields, today);

        let expense = self.storage.expenses.update(expense)?;
        self.storage.expenses.save()?;

        self.storage.log_update(
            actor,
            EntityType::Expense,
            id.get(),
            &expense.category,
            &before.to_dto(),
            &expense.to_dto(),
        )?;
        info!(user = %actor, expense = %id, "expense updated");

        Ok(expense)
    }

    /// Delete an expense and the payment linked to it
    pub fn delete(&self, actor: UserId, id: ExpenseId) -> FinanceResult<Expense> {
        let _guard = self.storage.lock_writes()?;
        let expense = self.get(actor, id)?;

        let payments = self.storage.payments.remove_where(|p| p.expense_id == id)?;
        self.storage.expenses.remove(id)?;
        self.storage.expenses.save()?;
        if !payments.is_empty() {
            self.storage.payments.save()?;
        }

        for payment in &payments {
            self.storage.log_delete(
                actor,
                EntityType::Payment,
                payment.id.get(),
                &payment.name,
                &payment.to_dto(None),
            )?;
        }
        self.storage.log_delete(
            actor,
            EntityType::Expense,
            id.get(),
            &expense.category,
            &expense.to_dto(),
        )?;
        info!(user = %actor, expense = %id, payments = payments.len(), "expense deleted");

        Ok(expense)
    }
}
