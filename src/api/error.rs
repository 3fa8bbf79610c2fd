//! HTTP error responses
//!
//! Every failure is answered with a problem body:
//! `{timestamp, status, error, message, path, details?}`. Handlers return
//! `ApiError`; the `fill_problem_path` middleware adds the request path once
//! the response is on its way out.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Request,
    },
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::error::FinanceError;

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

/// An error ready to be turned into an HTTP response
#[derive(Debug, Error)]
#[error("{status}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Vec<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    fn problem(&self) -> Problem {
        Problem {
            timestamp: Utc::now(),
            status: self.status.as_u16(),
            error: self
                .status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message: self.message.clone(),
            path: String::new(),
            details: self.details.clone(),
        }
    }
}

impl From<FinanceError> for ApiError {
    fn from(err: FinanceError) -> Self {
        match err {
            FinanceError::InvalidFields(details) => {
                warn!(?details, "rejected invalid input");
                Self::bad_request("Validation failed").with_details(details)
            }
            FinanceError::Validation(message) => {
                warn!(%message, "rejected invalid input");
                Self::bad_request(message)
            }
            FinanceError::NotFound { .. } => Self::not_found(err.to_string()),
            FinanceError::Duplicate { .. } => Self::new(StatusCode::CONFLICT, err.to_string()),
            FinanceError::Unauthorized(message) => Self::unauthorized(message),
            FinanceError::Forbidden(message) => Self::new(StatusCode::FORBIDDEN, message),
            FinanceError::Config(_)
            | FinanceError::Io(_)
            | FinanceError::Json(_)
            | FinanceError::Password(_)
            | FinanceError::Storage(_) => {
                error!(error = %err, "request failed");
                Self::internal("Internal server error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("Malformed request body")
            .with_details(vec![rejection.body_text()])
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request("Invalid path parameter").with_details(vec![rejection.body_text()])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request("Invalid query parameter").with_details(vec![rejection.body_text()])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let problem = self.problem();
        let mut response = (self.status, Json(problem.clone())).into_response();
        response.extensions_mut().insert(problem);
        response
    }
}

/// Rewrite problem bodies with the path of the request that produced them
pub async fn fill_problem_path(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<Problem>() {
        Some(problem) => {
            let status = response.status();
            (status, Json(Problem { path, ..problem })).into_response()
        }
        None => response,
    }
}

/// Answer for routes that do not exist
pub async fn route_not_found(request: Request) -> ApiError {
    ApiError::not_found(format!(
        "No route for {} {}",
        request.method(),
        request.uri().path()
    ))
}

/// `Json` extractor whose rejections are problem bodies
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Path` extractor whose rejections are problem bodies
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// `Query` extractor whose rejections are problem bodies
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
