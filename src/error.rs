//! Custom error types for fintrack
//!
//! This module defines the error hierarchy shared by storage, services and the
//! REST server. The HTTP client has its own error type in `client::error`.

use thiserror::Error;

/// The main error type for fintrack operations
#[derive(Error, Debug)]
pub enum FinanceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A single validation failure
    #[error("Validation error: {0}")]
    Validation(String),

    /// One or more field violations collected while validating a record
    #[error("Validation failed: {}", .0.join("; "))]
    InvalidFields(Vec<String>),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Missing, invalid or expired credentials
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Authenticated, but acting on someone else's data
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Password hashing errors
    #[error("Password error: {0}")]
    Password(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FinanceError {
    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for incomes
    pub fn income_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Income",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for payments
    pub fn payment_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Payment",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for savings
    pub fn saving_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Saving",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidFields(_))
    }

    /// Field-level messages carried by a validation error
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::InvalidFields(errors) => errors.clone(),
            Self::Validation(msg) => vec![msg.clone()],
            _ => Vec::new(),
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for fintrack operations
pub type FinanceResult<T> = Result<T, FinanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FinanceError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = FinanceError::expense_not_found("42");
        assert_eq!(err.to_string(), "Expense not found: 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_fields_joins_messages() {
        let err = FinanceError::InvalidFields(vec![
            "Amount must be greater than 0".into(),
            "Category must not be empty".into(),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: Amount must be greater than 0; Category must not be empty"
        );
        assert!(err.is_validation());
        assert_eq!(err.details().len(), 2);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FinanceError = io_err.into();
        assert!(matches!(err, FinanceError::Io(_)));
    }
}
