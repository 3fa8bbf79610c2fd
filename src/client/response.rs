//! Response processors
//!
//! 2xx is parsed into the expected type, 404 becomes `ClientError::NotFound`
//! and every other status becomes `ClientError::Api`. Both carry an
//! `ApiException` with the status, body and headers.

use std::collections::BTreeMap;

use reqwest::header::HeaderMap;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use super::error::{ApiException, ClientError};

/// Headers as a sorted name to value map (non-UTF-8 values are dropped)
pub fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

/// Map a non-2xx status to the matching client error
pub fn error_for(status: StatusCode, headers: &HeaderMap, body: String) -> ClientError {
    let exception = ApiException::new(status.as_u16(), body, header_map(headers));
    if status == StatusCode::NOT_FOUND {
        ClientError::NotFound(exception)
    } else {
        ClientError::Api(exception)
    }
}

/// Parse a typed body from a 2xx response
pub async fn process<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(error_for(status, &headers, body));
    }
    Ok(serde_json::from_str(&body)?)
}

/// Accept any 2xx response, ignoring its body
pub async fn process_empty(response: Response) -> Result<(), ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let headers = response.headers().clone();
    let body = response.text().await?;
    Err(error_for(status, &headers, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, CONTENT_TYPE};

    #[test]
    fn test_not_found_is_special_cased() {
        let err = error_for(StatusCode::NOT_FOUND, &HeaderMap::new(), String::new());
        assert!(err.is_not_found());

        let err = error_for(StatusCode::CONFLICT, &HeaderMap::new(), "taken".into());
        assert!(matches!(err, ClientError::Api(ref e) if e.code == 409 && e.message == "taken"));
    }

    #[test]
    fn test_headers_are_kept() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let err = error_for(StatusCode::BAD_REQUEST, &headers, "{}".into());

        let exception = err.exception().unwrap();
        assert_eq!(
            exception.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(exception.body, "{}");
    }
}
