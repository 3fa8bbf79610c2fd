//! Configuration module for fintrack
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Persisted settings for the server and the command-line client

pub mod paths;
pub mod settings;

pub use paths::FinancePaths;
pub use settings::Settings;
