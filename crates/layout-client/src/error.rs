//! Error types for the layout-client crate.

use thiserror::Error;

/// Errors returned by the remote layout endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL cannot hold a layout path.
    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL as configured.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    /// Server rejected the bearer token (401).
    #[error("Unauthorized. Check the layout endpoint token.")]
    Unauthorized,

    /// Server asked us to back off (429).
    #[error("Rate limited{}", retry_after.as_ref().map(|r| format!(", retry after {r}")).unwrap_or_default())]
    RateLimited {
        /// Raw `Retry-After` header value, if present.
        retry_after: Option<String>,
    },

    /// Server-side failure (5xx).
    #[error("Server error: HTTP {0}")]
    Server(u16),

    /// Any other status code.
    #[error("Unexpected response: HTTP {0}")]
    Unexpected(u16),

    /// Response body was not JSON.
    #[error("Failed to decode layout payload: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_display_includes_retry_after() {
        let err = ApiError::RateLimited {
            retry_after: Some("30".to_string()),
        };
        assert_eq!(err.to_string(), "Rate limited, retry after 30");
    }

    #[test]
    fn rate_limited_display_without_retry_after() {
        let err = ApiError::RateLimited { retry_after: None };
        assert_eq!(err.to_string(), "Rate limited");
    }

    #[test]
    fn server_display_includes_status() {
        assert!(ApiError::Server(503).to_string().contains("503"));
    }
}
