//! Request factories
//!
//! A `RequestContext` describes one HTTP call (method, path, query string and
//! JSON body). API handles build contexts; `FinanceClient::execute` sends them.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::error::ClientError;

/// A request ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestContext {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add query parameters from a flat serializable value
    ///
    /// `None` fields are skipped. Nested values are rejected.
    pub fn with_query<Q: Serialize>(mut self, query: &Q) -> Result<Self, ClientError> {
        match serde_json::to_value(query)? {
            Value::Object(map) => {
                for (key, value) in map {
                    let text = match value {
                        Value::Null => continue,
                        Value::String(s) => s,
                        Value::Bool(b) => b.to_string(),
                        Value::Number(n) => n.to_string(),
                        Value::Array(_) | Value::Object(_) => {
                            return Err(ClientError::InvalidRequest(format!(
                                "query parameter '{}' must be a scalar",
                                key
                            )))
                        }
                    };
                    self.query.push((key, text));
                }
                Ok(self)
            }
            Value::Null => Ok(self),
            _ => Err(ClientError::InvalidRequest(
                "query must serialize to an object".into(),
            )),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn with_json<B: Serialize>(mut self, body: &B) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}
