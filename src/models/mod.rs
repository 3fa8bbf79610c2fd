//! Core data models for fintrack
//!
//! Each resource has a stored record (`Expense`, `Income`, ...) and a wire
//! DTO (`ExpenseDto`, ...) whose fields are all optional. DTO validation
//! turns a wire value into checked fields the services can store.

pub mod activity;
pub mod auth;
pub mod dates;
pub mod expense;
pub mod frequency;
pub mod ids;
pub mod income;
pub mod money;
pub mod payment;
pub mod query;
pub mod saving;
pub mod user;
pub mod validation;

pub use activity::{ActivityDto, ActivityType};
pub use auth::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
pub use expense::{Expense, ExpenseDto, ExpenseFields, PaymentMethod};
pub use frequency::Frequency;
pub use ids::{ActivityId, ExpenseId, IncomeId, PaymentId, RecordId, SavingId, UserId};
pub use income::{Income, IncomeDto, IncomeFields};
pub use money::Money;
pub use payment::{Payment, PaymentDto, PaymentFields, PaymentStatus};
pub use query::{Filterable, ListFilter, SortOrder};
pub use saving::{Saving, SavingDto, SavingFields};
pub use user::{User, UserDto, UserProfile};
