//! Per-resource API handles
//!
//! Each handle pairs request factories (`*_request`, building a
//! `RequestContext` from typed parameters) with async calls that execute
//! them through the owning `FinanceClient`.

mod activities;
mod auth;
mod resource;
mod users;

pub use activities::ActivitiesApi;
pub use auth::AuthApi;
pub use resource::ResourceApi;
pub use users::UsersApi;

use crate::models::{
    ExpenseDto, ExpenseId, IncomeDto, IncomeId, PaymentDto, PaymentId, SavingDto, SavingId,
};

pub const EXPENSES_PATH: &str = "/api/v1/expenses";
pub const INCOMES_PATH: &str = "/api/v1/incomes";
pub const PAYMENTS_PATH: &str = "/api/v1/payments";
pub const SAVINGS_PATH: &str = "/api/v1/savings";
pub const USERS_PATH: &str = "/api/v1/users";

pub type ExpensesApi<'a> = ResourceApi<'a, ExpenseDto, ExpenseId>;
pub type IncomesApi<'a> = ResourceApi<'a, IncomeDto, IncomeId>;
pub type PaymentsApi<'a> = ResourceApi<'a, PaymentDto, PaymentId>;
pub type SavingsApi<'a> = ResourceApi<'a, SavingDto, SavingId>;
