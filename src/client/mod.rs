//! Typed HTTP client for the fintrack REST API
//!
//! # Example
//!
//! ```no_run
//! use fintrack::client::FinanceClient;
//! use fintrack::models::ListFilter;
//!
//! # async fn example() -> Result<(), fintrack::client::ClientError> {
//! let client = FinanceClient::new("http://localhost:8080")?.with_token("secret");
//! let expenses = client.expenses().list(&ListFilter::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod apis;
pub mod error;
pub mod identity;
pub mod request;
pub mod response;
pub mod token;

pub use apis::{
    ActivitiesApi, AuthApi, ExpensesApi, IncomesApi, PaymentsApi, ResourceApi, SavingsApi,
    UsersApi,
};
pub use error::{ApiException, ClientError};
pub use identity::resolve_user_id;
pub use request::RequestContext;
pub use token::{StoredToken, TokenStore};

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a fintrack server
#[derive(Debug, Clone)]
pub struct FinanceClient {
    base_url: String,
    client: Client,
    token: Option<String>,
}

impl FinanceClient {
    /// Create a client with the default timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            token: None,
        })
    }

    /// Attach a bearer token to every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub fn expenses(&self) -> ExpensesApi<'_> {
        ResourceApi::new(self, apis::EXPENSES_PATH)
    }

    pub fn incomes(&self) -> IncomesApi<'_> {
        ResourceApi::new(self, apis::INCOMES_PATH)
    }

    pub fn payments(&self) -> PaymentsApi<'_> {
        ResourceApi::new(self, apis::PAYMENTS_PATH)
    }

    pub fn savings(&self) -> SavingsApi<'_> {
        ResourceApi::new(self, apis::SAVINGS_PATH)
    }

    pub fn activities(&self) -> ActivitiesApi<'_> {
        ActivitiesApi::new(self)
    }

    /// Send a request and return the raw response
    pub async fn send(&self, ctx: RequestContext) -> Result<reqwest::Response, ClientError> {
        let url = format!("{}{}", self.base_url, ctx.path);
        debug!(method = %ctx.method, %url, "sending request");

        let mut request = self.client.request(ctx.method, &url);
        if !ctx.query.is_empty() {
            request = request.query(&ctx.query);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &ctx.body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    /// Send a request and parse a typed 2xx body
    pub async fn execute<T: DeserializeOwned>(&self, ctx: RequestContext) -> Result<T, ClientError> {
        let response = self.send(ctx).await?;
        response::process(response).await
    }

    /// Send a request whose success body is ignored
    pub async fn execute_empty(&self, ctx: RequestContext) -> Result<(), ClientError> {
        let response = self.send(ctx).await?;
        response::process_empty(response).await
    }

    /// Check that the server answers its health endpoint
    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        self.execute(RequestContext::get("/health")).await
    }
}
