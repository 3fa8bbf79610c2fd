//! User service
//!
//! Registration, profile reads and updates, password changes and account
//! deletion. A user can only see and change their own profile.

use tracing::{info, warn};

use super::require_path_id;
use crate::audit::EntityType;
use crate::auth::{hash_password, verify_password};
use crate::error::{FinanceError, FinanceResult};
use crate::models::user::normalize_email;
use crate::models::{ActivityType, ExpenseId, Money, User, UserDto, UserId};
use crate::storage::Storage;

/// Records removed when a user account is deleted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletedAccount {
    pub expenses: usize,
    pub incomes: usize,
    pub savings: usize,
    pub payments: usize,
}

/// Service for user management
pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new user
    ///
    /// The email must not belong to another account (case-insensitive).
    pub fn register(&self, dto: &UserDto) -> FinanceResult<User> {
        let profile = dto.validate_new()?;
        let password = profile
            .password
            .ok_or_else(|| FinanceError::InvalidFields(vec!["Password cannot be empty".into()]))?;
        let password_hash = hash_password(&password)?;

        let _guard = self.storage.lock_writes()?;
        if self.storage.users.email_taken(&profile.email, None)? {
            warn!(email = %profile.email, "registration with existing email");
            return Err(FinanceError::Duplicate {
                entity_type: "User",
                identifier: profile.email,
            });
        }

        let user = self.storage.users.insert(User {
            id: UserId::new(0),
            name: profile.name,
            email: profile.email,
            password_hash,
            created_at: chrono::Utc::now(),
            balance: dto.balance.unwrap_or_else(Money::zero),
        })?;
        self.storage.users.save()?;

        self.storage.log_event(
            user.id,
            ActivityType::Registration,
            format!("Registered as {}", user.email),
        )?;
        info!(user = %user.id, email = %user.email, "user registered");

        Ok(user)
    }

    /// The actor's own profile, as a one-element list
    pub fn list(&self, actor: UserId) -> FinanceResult<Vec<User>> {
        Ok(self.storage.users.get(actor)?.into_iter().collect())
    }

    /// Get a profile; only the actor's own is visible
    pub fn get(&self, actor: UserId, id: UserId) -> FinanceResult<User> {
        if id != actor {
            return Err(FinanceError::user_not_found(id.to_string()));
        }
        self.storage
            .users
            .get(id)?
            .ok_or_else(|| FinanceError::user_not_found(id.to_string()))
    }

    /// Look a profile up by email; only the actor's own is visible
    pub fn find_by_email(&self, actor: UserId, email: &str) -> FinanceResult<User> {
        self.storage
            .users
            .get_by_email(email)?
            .filter(|u| u.id == actor)
            .ok_or_else(|| FinanceError::user_not_found(normalize_email(email)))
    }

    /// Replace name and email, and optionally the password
    ///
    /// A new password is only accepted together with the current one.
    pub fn update(&self, actor: UserId, id: UserId, dto: &UserDto) -> FinanceResult<User> {
        require_path_id(id, dto.id)?;
        if id != actor {
            return Err(FinanceError::Forbidden(
                "Cannot modify another user's profile".into(),
            ));
        }
        let profile = dto.validate_update()?;

        let _guard = self.storage.lock_writes()?;
        let before = self.get(actor, id)?;

        if self.storage.users.email_taken(&profile.email, Some(id))? {
            return Err(FinanceError::Duplicate {
                entity_type: "User",
                identifier: profile.email,
            });
        }

        let mut user = before.clone();
        user.name = profile.name;
        user.email = profile.email;
        if let Some(balance) = dto.balance {
            user.balance = balance;
        }

        let password_changed = match profile.password {
            Some(new_password) => {
                self.check_current_password(&before, dto.current_password.as_deref())?;
                user.password_hash = hash_password(&new_password)?;
                true
            }
            None => false,
        };

        let user = self.storage.users.update(user)?;
        self.storage.users.save()?;

        self.storage.log_update(
            actor,
            EntityType::User,
            id.get(),
            &user.email,
            &before.to_dto(),
            &user.to_dto(),
        )?;
        if password_changed {
            self.storage
                .log_event(actor, ActivityType::PasswordChange, "Changed password")?;
        }
        info!(user = %id, password_changed, "user updated");

        Ok(user)
    }

    /// Change only the password
    pub fn change_password(
        &self,
        actor: UserId,
        current_password: &str,
        new_password: &str,
    ) -> FinanceResult<()> {
        let user = self.get(actor, actor)?;
        let dto = UserDto {
            id: Some(actor),
            name: Some(user.name),
            email: Some(user.email),
            password: Some(new_password.to_string()),
            current_password: Some(current_password.to_string()),
            ..Default::default()
        };
        self.update(actor, actor, &dto).map(|_| ())
    }

    /// Delete the actor's account together with everything they own
    pub fn delete(&self, actor: UserId, id: UserId) -> FinanceResult<DeletedAccount> {
        if id != actor {
            return Err(FinanceError::Forbidden(
                "Cannot delete another user's profile".into(),
            ));
        }

        let _guard = self.storage.lock_writes()?;
        let user = self.get(actor, id)?;

        let expenses = self.storage.expenses.remove_where(|e| e.user_id == id)?;
        let expense_ids: std::collections::HashSet<ExpenseId> =
            expenses.iter().map(|e| e.id).collect();
        let payments = self
            .storage
            .payments
            .remove_where(|p| expense_ids.contains(&p.expense_id))?;
        let incomes = self.storage.incomes.remove_where(|i| i.user_id == id)?;
        let savings = self.storage.savings.remove_where(|s| s.user_id == id)?;
        self.storage.users.remove(id)?;
        self.storage.save_all()?;

        self.storage.log_delete(
            actor,
            EntityType::User,
            id.get(),
            &user.email,
            &user.to_dto(),
        )?;

        let removed = DeletedAccount {
            expenses: expenses.len(),
            incomes: incomes.len(),
            savings: savings.len(),
            payments: payments.len(),
        };
        info!(user = %id, ?removed, "user deleted");

        Ok(removed)
    }

    fn check_current_password(&self, user: &User, current: Option<&str>) -> FinanceResult<()> {
        let current = current.filter(|c| !c.is_empty()).ok_or_else(|| {
            FinanceError::InvalidFields(vec![
                "Current password is required to set a new password".into(),
            ])
        })?;

        if !verify_password(current, &user.password_hash)? {
            warn!(user = %user.id, "password change with wrong current password");
            return Err(FinanceError::InvalidFields(vec![
                "Current password is incorrect".into(),
            ]));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseDto, Frequency, PaymentDto, PaymentMethod, SavingDto};
    use crate::services::test_support::create_test_storage;
    use crate::services::{ExpenseService, PaymentService, SavingService};

    fn register(storage: &Storage, name: &str, email: &str) -> User {
        UserService::new(storage)
            .register(&UserDto {
                name: Some(name.into()),
                email: Some(email.into()),
                password: Some("secret123".into()),
                ..Default::default()
            })
            .unwrap()
    }

    #[test]
    fn test_register_hashes_password_and_logs() {
        let (_temp, storage) = create_test_storage();
        let user = register(&storage, "Ana", "Ana@Example.com");

        assert_eq!(user.email, "ana@example.com");
        assert!(user.password_hash.starts_with("$argon2id$"));
        assert!(user.balance.is_zero());

        let feed = storage.activity().recent_for_user(user.id, 5).unwrap();
        assert_eq!(feed[0].activity_type, ActivityType::Registration);
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let (_temp, storage) = create_test_storage();
        register(&storage, "Ana", "ana@example.com");

        let err = UserService::new(&storage)
            .register(&UserDto {
                name: Some("Other".into()),
                email: Some("ANA@example.com".into()),
                password: Some("secret123".into()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, FinanceError::Duplicate { .. }));
    }

    #[test]
    fn test_profiles_are_private() {
        let (_temp, storage) = create_test_storage();
        let ana = register(&storage, "Ana", "ana@example.com");
        let ben = register(&storage, "Ben", "ben@example.com");
        let service = UserService::new(&storage);

        assert!(service.get(ana.id, ben.id).unwrap_err().is_not_found());
        assert!(service.find_by_email(ana.id, "ben@example.com").unwrap_err().is_not_found());
        assert_eq!(service.find_by_email(ana.id, "ANA@example.com").unwrap().id, ana.id);
        assert_eq!(service.list(ana.id).unwrap().len(), 1);

        let err = service.update(ana.id, ben.id, &ben.to_dto()).unwrap_err();
        assert!(matches!(err, FinanceError::Forbidden(_)));
        assert!(matches!(
            service.delete(ana.id, ben.id),
            Err(FinanceError::Forbidden(_))
        ));
    }

    #[test]
    fn test_update_requires_matching_body_id() {
        let (_temp, storage) = create_test_storage();
        let ana = register(&storage, "Ana", "ana@example.com");
        let service = UserService::new(&storage);

        let mut dto = ana.to_dto();
        dto.id = None;
        dto.name = Some("Renamed".into());
        assert!(service.update(ana.id, ana.id, &dto).unwrap_err().is_validation());

        dto.id = Some(UserId::new(ana.id.get() + 1));
        assert!(service.update(ana.id, ana.id, &dto).unwrap_err().is_validation());
        assert_eq!(storage.users.get(ana.id).unwrap().unwrap().name, "Ana");
    }

    #[test]
    fn test_update_email_uniqueness() {
        let (_temp, storage) = create_test_storage();
        let ana = register(&storage, "Ana", "ana@example.com");
        register(&storage, "Ben", "ben@example.com");
        let service = UserService::new(&storage);

        let mut dto = ana.to_dto();
        dto.email = Some("ben@example.com".into());
        assert!(matches!(
            service.update(ana.id, ana.id, &dto),
            Err(FinanceError::Duplicate { .. })
        ));

        dto.email = Some("ana.new@example.com".into());
        dto.name = Some("Ana Maria".into());
        let updated = service.update(ana.id, ana.id, &dto).unwrap();
        assert_eq!(updated.email, "ana.new@example.com");
        assert_eq!(updated.name, "Ana Maria");
    }

    #[test]
    fn test_password_change_requires_current_password() {
        let (_temp, storage) = create_test_storage();
        let ana = register(&storage, "Ana", "ana@example.com");
        let service = UserService::new(&storage);

        let err = service
            .change_password(ana.id, "wrong-one", "newsecret")
            .unwrap_err();
        assert_eq!(err.details(), vec!["Current password is incorrect".to_string()]);

        service
            .change_password(ana.id, "secret123", "newsecret")
            .unwrap();
        let stored = storage.users.get(ana.id).unwrap().unwrap();
        assert!(verify_password("newsecret", &stored.password_hash).unwrap());

        let feed = storage.activity().recent_for_user(ana.id, 1).unwrap();
        assert_eq!(feed[0].activity_type, ActivityType::PasswordChange);
    }

    #[test]
    fn test_delete_cascades() {
        let (_temp, storage) = create_test_storage();
        let ana = register(&storage, "Ana", "ana@example.com");
        let ben = register(&storage, "Ben", "ben@example.com");

        let expense = ExpenseService::new(&storage)
            .create(
                ana.id,
                &ExpenseDto {
                    amount: Some(Money::from_cents(1000)),
                    category: Some("Phone".into()),
                    date: Some("2024-05-01".parse().unwrap()),
                    frequency: Some(Frequency::Monthly),
                    payment_method: Some(PaymentMethod::Card),
                    ..Default::default()
                },
            )
            .unwrap();
        PaymentService::new(&storage)
            .create(
                ana.id,
                &PaymentDto {
                    expense_id: Some(expense.id),
                    name: Some("Phone May".into()),
                    amount: Some(Money::from_cents(1000)),
                    ..Default::default()
                },
            )
            .unwrap();
        SavingService::new(&storage)
            .create(
                ben.id,
                &SavingDto {
                    amount: Some(Money::from_cents(500)),
                    goal: Some("Bike".into()),
                    date: Some("2024-05-01".parse().unwrap()),
                    ..Default::default()
                },
            )
            .unwrap();

        let removed = UserService::new(&storage).delete(ana.id, ana.id).unwrap();
        assert_eq!(
            removed,
            DeletedAccount {
                expenses: 1,
                incomes: 0,
                savings: 0,
                payments: 1
            }
        );
        assert!(storage.users.get(ana.id).unwrap().is_none());
        assert_eq!(storage.payments.count().unwrap(), 0);
        assert_eq!(storage.savings.count().unwrap(), 1);
    }
}
