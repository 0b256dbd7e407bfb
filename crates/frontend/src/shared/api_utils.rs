//! API utilities for frontend-backend communication
//!
//! Base URL construction, the bearer header and the error type every API
//! function returns.

use crate::shared::config::config;
use crate::system::auth::storage;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Failed to send request: {0}")]
    Network(String),
    #[error("Server responded with {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

/// Get the base URL for API requests
///
/// Uses the protocol and host of the current page and the API port from
/// the configuration. Empty string if window is not available.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, config().api.port)
}

/// Build a full API URL from a path starting with "/api/"
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

pub fn auth_header() -> Result<String, ApiError> {
    storage::get_access_token()
        .map(|token| format!("Bearer {}", token))
        .ok_or(ApiError::NotAuthenticated)
}

/// Map a non-2xx response to [`ApiError::Status`]
pub fn ensure_ok(response: &gloo_net::http::Response) -> Result<(), ApiError> {
    if response.ok() {
        Ok(())
    } else {
        Err(ApiError::Status {
            status: response.status(),
            url: response.url(),
        })
    }
}

pub async fn decode<T>(response: gloo_net::http::Response) -> Result<T, ApiError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ApiError::Status {
            status: 404,
            url: "/api/users".into(),
        };
        assert_eq!(err.to_string(), "Server responded with 404 for /api/users");
        assert_eq!(ApiError::NotAuthenticated.to_string(), "Not authenticated");
    }
}
