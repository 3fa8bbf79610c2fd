//! Income service
//!
//! CRUD over a user's incomes.

use tracing::{debug, info};

use super::{ensure_owner, ensure_path_id, today};
use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Income, IncomeDto, IncomeId, ListFilter, UserId};
use crate::storage::Storage;

/// Service for income management
pub struct IncomeService<'a> {
    storage: &'a Storage,
}

impl<'a> IncomeService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The actor's incomes, filtered and sorted
    pub fn list(&self, actor: UserId, filter: &ListFilter) -> FinanceResult<Vec<Income>> {
        let incomes = self.storage.incomes.for_user(actor)?;
        debug!(user = %actor, total = incomes.len(), "listing incomes");
        Ok(filter.apply(incomes))
    }

    pub fn get(&self, actor: UserId, id: IncomeId) -> FinanceResult<Income> {
        self.storage
            .incomes
            .get(id)?
            .filter(|i| i.user_id == actor)
            .ok_or_else(|| FinanceError::income_not_found(id.to_string()))
    }

    pub fn create(&self, actor: UserId, dto: &IncomeDto) -> FinanceResult<Income> {
        ensure_owner(actor, dto.user_id)?;
        let fields = dto.validate(today())?;

        let _guard = self.storage.lock_writes()?;
        let income = self.storage.incomes.insert(Income::new(actor, fields))?;
        self.storage.incomes.save()?;

        self.storage.log_create(
            actor,
            EntityType::Income,
            income.id.get(),
            &income.source,
            &income.to_dto(),
        )?;
        info!(user = %actor, income = %income.id, amount = %income.amount, "income created");

        Ok(income)
    }

    pub fn update(&self, actor: UserId, id: IncomeId, dto: &IncomeDto) -> FinanceResult<Income> {
        ensure_path_id(id, dto.id)?;
        ensure_owner(actor, dto.user_id)?;
        let fields = dto.validate(today())?;

        let _guard = self.storage.lock_writes()?;
        let before = self.get(actor, id)?;
        let mut income = before.clone();
        income.apply(fields);

        let income = self.storage.incomes.update(income)?;
        self.storage.incomes.save()?;

        self.storage.log_update(
            actor,
            EntityType::Income,
            id.get(),
            &income.source,
            &before.to_dto(),
            &income.to_dto(),
        )?;
        info!(user = %actor, income = %id, "income updated");

        Ok(income)
    }

    pub fn delete(&self, actor: UserId, id: IncomeId) -> FinanceResult<Income> {
        let _guard = self.storage.lock_writes()?;
        let income = self.get(actor, id)?;

        self.storage.incomes.remove(id)?;
        self.storage.incomes.save()?;

        self.storage.log_delete(
            actor,
            EntityType::Income,
            id.get(),
            &income.source,
            &income.to_dto(),
        )?;
        info!(user = %actor, income = %id, "income deleted");

        Ok(income)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, Money};
    use crate::services::test_support::{add_user, create_test_storage};

    fn dto(source: &str, cents: i64, date: &str) -> IncomeDto {
        IncomeDto {
            amount: Some(Money::from_cents(cents)),
            source: Some(source.into()),
            date: Some(date.parse().unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_defaults_frequency() {
        let (_temp, storage) = create_test_storage();
        let ana = add_user(&storage, "ana@example.com");
        let service = IncomeService::new(&storage);

        let income = service.create(ana, &dto("Salary", 250000, "2024-02-28")).unwrap();
        assert_eq!(income.frequency, Frequency::OneTime);
        assert_eq!(income.user_id, ana);
        assert_eq!(storage.incomes.count().unwrap(), 1);
    }

    #[test]
    fn test_search_filter() {
        let (_temp, storage) = create_test_storage();
        let ana = add_user(&storage, "ana@example.com");
        let service = IncomeService::new(&storage);

        service.create(ana, &dto("Salary", 250000, "2024-02-28")).unwrap();
        service.create(ana, &dto("Freelance", 40000, "2024-03-02")).unwrap();

        let filter = ListFilter {
            search: Some("SAL".into()),
            ..Default::default()
        };
        let found = service.list(ana, &filter).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].source, "Salary");
    }

    #[test]
    fn test_update_and_delete() {
        let (_temp, storage) = create_test_storage();
        let ana = add_user(&storage, "ana@example.com");
        let ben = add_user(&storage, "ben@example.com");
        let service = IncomeService::new(&storage);

        let income = service.create(ana, &dto("Salary", 250000, "2024-02-28")).unwrap();

        let mut body = dto("Salary", 260000, "2024-02-28");
        body.frequency = Some(Frequency::Monthly);
        assert!(service.update(ben, income.id, &body).unwrap_err().is_not_found());

        let updated = service.update(ana, income.id, &body).unwrap();
        assert_eq!(updated.frequency, Frequency::Monthly);
        assert_eq!(updated.amount.cents(), 260000);

        service.delete(ana, income.id).unwrap();
        assert!(service.get(ana, income.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_invalid_income_not_stored() {
        let (_temp, storage) = create_test_storage();
        let ana = add_user(&storage, "ana@example.com");
        let service = IncomeService::new(&storage);

        let err = service.create(ana, &dto("", 0, "2024-02-28")).unwrap_err();
        assert_eq!(err.details().len(), 2);
        assert_eq!(storage.incomes.count().unwrap(), 0);
    }
}
