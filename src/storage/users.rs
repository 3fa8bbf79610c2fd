//! User repository
//!
//! Users are looked up by id and by (lower-cased) email.

use super::table::{Record, Table};
use crate::error::FinanceResult;
use crate::models::user::normalize_email;
use crate::models::{User, UserId};

pub type UserRepository = Table<User>;

impl Record for User {
    type Id = UserId;
    const ENTITY: &'static str = "User";

    fn id(&self) -> UserId {
        self.id
    }

    fn set_id(&mut self, id: UserId) {
        self.id = id;
    }
}

impl Table<User> {
    /// Find a user by email, ignoring case and surrounding whitespace
    pub fn get_by_email(&self, email: &str) -> FinanceResult<Option<User>> {
        let email = normalize_email(email);
        self.find_first(|u| u.email == email)
    }

    /// Whether `email` belongs to a user other than `except`
    pub fn email_taken(&self, email: &str, except: Option<UserId>) -> FinanceResult<bool> {
        Ok(self
            .get_by_email(email)?
            .is_some_and(|u| Some(u.id) != except))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn user(email: &str) -> User {
        User {
            id: UserId::new(0),
            name: "Test".into(),
            email: email.into(),
            password_hash: "hash".into(),
            created_at: Utc::now(),
            balance: Default::default(),
        }
    }

    #[test]
    fn test_email_lookup_ignores_case() {
        let temp_dir = TempDir::new().unwrap();
        let repo = UserRepository::new(temp_dir.path().join("users.json"));
        let ana = repo.insert(user("ana@example.com")).unwrap();
        repo.insert(user("ben@example.com")).unwrap();

        let found = repo.get_by_email(" ANA@example.com").unwrap().unwrap();
        assert_eq!(found.id, ana.id);
        assert!(repo.get_by_email("cara@example.com").unwrap().is_none());

        assert!(repo.email_taken("ana@example.com", None).unwrap());
        assert!(!repo.email_taken("ana@example.com", Some(ana.id)).unwrap());
        assert!(repo.email_taken("ben@example.com", Some(ana.id)).unwrap());
    }
}
