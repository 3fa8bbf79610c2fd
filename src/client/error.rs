//! Client error types

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::api::Problem;
use crate::error::FinanceError;

/// A non-2xx answer from the server
///
/// Carries the status code, the raw body and the response headers. When the
/// body is a problem document its message is surfaced as `message`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiException {
    pub code: u16,
    pub message: String,
    pub body: String,
    pub headers: BTreeMap<String, String>,
}

impl ApiException {
    pub fn new(code: u16, body: impl Into<String>, headers: BTreeMap<String, String>) -> Self {
        let body = body.into();
        let message = match serde_json::from_str::<Problem>(&body) {
            Ok(problem) => problem.message,
            Err(_) if body.trim().is_empty() => format!("HTTP {}", code),
            Err(_) => body.trim().to_string(),
        };
        Self {
            code,
            message,
            body,
            headers,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code == 404
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == 401
    }

    /// The server's problem body, if the response carried one
    pub fn problem(&self) -> Option<Problem> {
        serde_json::from_str(&self.body).ok()
    }

    /// Field-level messages from a problem body
    pub fn details(&self) -> Vec<String> {
        self.problem().map(|p| p.details).unwrap_or_default()
    }
}

impl fmt::Display for ApiException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiException {}

/// Errors from the fintrack client
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match the expected type
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered 404
    #[error("Not found: {}", .0.message)]
    NotFound(ApiException),

    /// The server answered with another non-2xx status
    #[error("{0}")]
    Api(ApiException),

    /// No usable session is stored locally
    #[error("Not logged in: {0}")]
    NotLoggedIn(String),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Local session file problems
    #[error(transparent)]
    Local(#[from] FinanceError),
}

impl ClientError {
    /// The server's answer, for 404 and other non-2xx statuses
    pub fn exception(&self) -> Option<&ApiException> {
        match self {
            Self::NotFound(e) | Self::Api(e) => Some(e),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.exception().map(|e| e.code)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
