//! Payment service
//!
//! A payment settles exactly one of the actor's expenses; an expense can have
//! at most one payment. Payments are returned with the linked expense
//! embedded.

use std::collections::HashSet;

use tracing::{debug, info};

use super::{ensure_path_id, today};
use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    Expense, ExpenseId, ListFilter, Payment, PaymentDto, PaymentFields, PaymentId, UserId,
};
use crate::storage::Storage;

/// Service for payment management
pub struct PaymentService<'a> {
    storage: &'a Storage,
}

impl<'a> PaymentService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Payments of the actor's expenses, filtered and sorted
    pub fn list(&self, actor: UserId, filter: &ListFilter) -> FinanceResult<Vec<Payment>> {
        let expense_ids: HashSet<ExpenseId> = self
            .storage
            .expenses
            .for_user(actor)?
            .into_iter()
            .map(|e| e.id)
            .collect();
        let payments = self.storage.payments.for_expenses(&expense_ids)?;
        debug!(user = %actor, total = payments.len(), "listing payments");
        Ok(filter.apply(payments))
    }

    /// Get a payment whose expense belongs to the actor
    pub fn get(&self, actor: UserId, id: PaymentId) -> FinanceResult<Payment> {
        let payment = self
            .storage
            .payments
            .get(id)?
            .ok_or_else(|| FinanceError::payment_not_found(id.to_string()))?;

        match self.storage.expenses.get(payment.expense_id)? {
            Some(expense) if expense.user_id == actor => Ok(payment),
            _ => Err(FinanceError::payment_not_found(id.to_string())),
        }
    }

    /// Wire view of a payment with its expense embedded
    pub fn to_dto(&self, payment: &Payment) -> FinanceResult<PaymentDto> {
        let expense = self.storage.expenses.get(payment.expense_id)?;
        Ok(payment.to_dto(expense.as_ref()))
    }

    pub fn create(&self, actor: UserId, dto: &PaymentDto) -> FinanceResult<Payment> {
        let fields = dto.validate(today())?;

        let _guard = self.storage.lock_writes()?;
        self.check_link(actor, &fields, None)?;

        let payment = self.storage.payments.insert(Payment::new(fields))?;
        self.storage.payments.save()?;

        self.storage.log_create(
            actor,
            EntityType::Payment,
            payment.id.get(),
            &payment.name,
            &payment.to_dto(None),
        )?;
        info!(
            user = %actor,
            payment = %payment.id,
            expense = %payment.expense_id,
            status = %payment.status,
            "payment created"
        );

        Ok(payment)
    }

    pub fn update(&self, actor: UserId, id: PaymentId, dto: &PaymentDto) -> FinanceResult<Payment> {
        ensure_path_id(id, dto.id)?;
        let fields = dto.validate(today())?;

        let _guard = self.storage.lock_writes()?;
        let before = self.get(actor, id)?;
        self.check_link(actor, &fields, Some(id))?;

        let mut payment = before.clone();
        payment.apply(fields);
        let payment = self.storage.payments.update(payment)?;
        self.storage.payments.save()?;

        self.storage.log_update(
            actor,
            EntityType::Payment,
            id.get(),
            &payment.name,
            &before.to_dto(None),
            &payment.to_dto(None),
        )?;
        info!(user = %actor, payment = %id, status = %payment.status, "payment updated");

        Ok(payment)
    }

    pub fn delete(&self, actor: UserId, id: PaymentId) -> FinanceResult<Payment> {
        let _guard = self.storage.lock_writes()?;
        let payment = self.get(actor, id)?;

        self.storage.payments.remove(id)?;
        self.storage.payments.save()?;

        self.storage.log_delete(
            actor,
            EntityType::Payment,
            id.get(),
            &payment.name,
            &payment.to_dto(None),
        )?;
        info!(user = %actor, payment = %id, "payment deleted");

        Ok(payment)
    }

    /// The linked expense must be the actor's and not already settled by
    /// another payment
    fn check_link(
        &self,
        actor: UserId,
        fields: &PaymentFields,
        updating: Option<PaymentId>,
    ) -> FinanceResult<Expense> {
        let expense = self
            .storage
            .expenses
            .get(fields.expense_id)?
            .filter(|e| e.user_id == actor)
            .ok_or_else(|| {
                FinanceError::InvalidFields(vec![format!(
                    "Linked expense {} does not exist",
                    fields.expense_id
                )])
            })?;

        if let Some(existing) = self.storage.payments.for_expense(expense.id)? {
            if Some(existing.id) != updating {
                return Err(FinanceError::Duplicate {
                    entity_type: "Payment",
                    identifier: format!("for expense {}", expense.id),
                });
            }
        }

        Ok(expense)
    }
}
