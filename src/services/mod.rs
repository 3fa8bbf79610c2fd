//! Service layer for fintrack
//!
//! Services sit between the REST handlers and storage. Every operation runs
//! on behalf of an authenticated user (the actor): services validate input,
//! enforce ownership, write through to storage and record the change in the
//! actor's activity feed.

pub mod activity;
pub mod auth;
pub mod expense;
pub mod income;
pub mod payment;
pub mod saving;
pub mod user;

pub use activity::ActivityService;
pub use auth::AuthService;
pub use expense::ExpenseService;
pub use income::IncomeService;
pub use payment::PaymentService;
pub use saving::SavingService;
pub use user::UserService;

use std::fmt::Display;

use chrono::{NaiveDate, Utc};

use crate::error::{FinanceError, FinanceResult};
use crate::models::UserId;

/// Today's date, used for "not in the future" checks and recurrence
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Reject a body that names a different owner than the actor
///
/// An omitted owner is fine: the record is assigned to the actor.
pub(crate) fn ensure_owner(actor: UserId, claimed: Option<UserId>) -> FinanceResult<()> {
    match claimed {
        Some(owner) if owner != actor => Err(FinanceError::Forbidden(format!(
            "Cannot act on behalf of user {}",
            owner
        ))),
        _ => Ok(()),
    }
}

/// Reject a body whose id disagrees with the id in the path
pub(crate) fn ensure_path_id<I>(path_id: I, body_id: Option<I>) -> FinanceResult<()>
where
    I: PartialEq + Display,
{
    match body_id {
        Some(body_id) if body_id != path_id => Err(FinanceError::Validation(format!(
            "Path id {} does not match body id {}",
            path_id, body_id
        ))),
        _ => Ok(()),
    }
}

/// Like `ensure_path_id`, but the body must carry the id
pub(crate) fn require_path_id<I>(path_id: I, body_id: Option<I>) -> FinanceResult<()>
where
    I: PartialEq + Display,
{
    match body_id {
        Some(_) => ensure_path_id(path_id, body_id),
        None => Err(FinanceError::Validation(format!(
            "Path id {} does not match body id (missing)",
            path_id
        ))),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseId;

    #[test]
    fn test_ensure_owner() {
        let me = UserId::new(1);
        assert!(ensure_owner(me, None).is_ok());
        assert!(ensure_owner(me, Some(me)).is_ok());
        assert!(matches!(
            ensure_owner(me, Some(UserId::new(2))),
            Err(FinanceError::Forbidden(_))
        ));
    }

    #[test]
    fn test_ensure_path_id() {
        let id = ExpenseId::new(3);
        assert!(ensure_path_id(id, None).is_ok());
        assert!(ensure_path_id(id, Some(id)).is_ok());
        let err = ensure_path_id(id, Some(ExpenseId::new(4))).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Path id 3 does not match body id 4");
    }

    #[test]
    fn test_require_path_id() {
        let id = UserId::new(3);
        assert!(require_path_id(id, Some(id)).is_ok());
        assert!(require_path_id(id, Some(UserId::new(4))).unwrap_err().is_validation());
        let err = require_path_id(id, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Path id 3 does not match body id (missing)"
        );
    }
}
