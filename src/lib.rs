//! fintrack - personal finance tracker
//!
//! This library provides the core functionality for fintrack: a REST API
//! server for expenses, incomes, payments and savings, a typed client for
//! that API, and the command-line frontend built on the client.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models, wire DTOs and validation
//! - `storage`: JSON file storage layer
//! - `audit`: Activity log with before/after snapshots
//! - `auth`: Password hashing and bearer sessions
//! - `services`: Business logic layer
//! - `api`: axum REST server
//! - `client`: reqwest client for the REST API
//! - `reports`: Overviews computed from fetched records
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `fintrack` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::{paths::FinancePaths, settings::Settings};
//!
//! let paths = FinancePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! fintrack::api::serve(paths, settings).await?;
//! ```

pub mod api;
pub mod audit;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
