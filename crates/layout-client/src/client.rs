//! HTTP client for the remote layout endpoint.
//!
//! The endpoint stores one full layout document per user:
//! - `GET {base}/users/{user}/dashboard-layout` returns the last saved payload,
//!   or 204/404 when the user has never saved one.
//! - `PUT` on the same URL replaces the document wholesale.

use reqwest::header::{AUTHORIZATION, RETRY_AFTER};
use reqwest::{StatusCode, Url};
use serde_json::Value;

use crate::error::ApiError;

/// Path segment appended after the user id.
pub const LAYOUT_RESOURCE: &str = "dashboard-layout";

/// Async client bound to a single user's layout document.
#[derive(Debug, Clone)]
pub struct LayoutClient {
    http: reqwest::Client,
    url: Url,
    token: Option<String>,
}

impl LayoutClient {
    /// Creates a client for `user` under `base_url`.
    ///
    /// The user id is pushed as a single path segment, so it is percent-encoded
    /// rather than interpreted as a path.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `base_url` does not parse or cannot
    /// carry path segments (e.g. `mailto:`).
    pub fn new(base_url: &str, user: &str, token: Option<String>) -> Result<Self, ApiError> {
        let url = layout_url(base_url, user)?;
        Ok(Self {
            http: reqwest::Client::new(),
            url,
            token,
        })
    }

    /// The fully resolved document URL.
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Fetches the stored layout document.
    ///
    /// Returns `Ok(None)` when the server has nothing stored for this user
    /// (204, 404, or an empty 200 body).
    pub async fn fetch(&self) -> Result<Option<Value>, ApiError> {
        let response = self
            .authorize(self.http.get(self.url.clone()))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT || status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        check_status(status.as_u16(), retry_after(&response))?;

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode_body(&body)
    }

    /// Replaces the stored layout document with `payload`.
    pub async fn put(&self, payload: &Value) -> Result<(), ApiError> {
        let response = self
            .authorize(self.http.put(self.url.clone()).json(payload))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        check_status(response.status().as_u16(), retry_after(&response))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }
}

/// Builds `{base}/users/{user}/dashboard-layout`.
fn layout_url(base_url: &str, user: &str) -> Result<Url, ApiError> {
    let invalid = |reason: String| ApiError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("URL cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(["users", user, LAYOUT_RESOURCE]);
    Ok(url)
}

fn retry_after(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// Maps a non-success status to its error variant.
fn check_status(status: u16, retry_after: Option<String>) -> Result<(), ApiError> {
    match status {
        200..=299 => Ok(()),
        401 => Err(ApiError::Unauthorized),
        429 => Err(ApiError::RateLimited { retry_after }),
        500..=599 => Err(ApiError::Server(status)),
        _ => Err(ApiError::Unexpected(status)),
    }
}

fn decode_body(body: &str) -> Result<Option<Value>, ApiError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Null) => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_url_appends_user_segments() {
        let url = layout_url("https://api.example.com/v1", "alice").expect("valid url");
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v1/users/alice/dashboard-layout"
        );
    }

    #[test]
    fn test_layout_url_handles_trailing_slash() {
        let url = layout_url("https://api.example.com/v1/", "bob").expect("valid url");
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v1/users/bob/dashboard-layout"
        );
    }

    #[test]
    fn test_layout_url_encodes_user() {
        let url = layout_url("https://api.example.com", "a/b c").expect("valid url");
        assert!(url.as_str().ends_with("/users/a%2Fb%20c/dashboard-layout"));
    }

    #[test]
    fn test_layout_url_rejects_garbage() {
        let err = layout_url("not a url", "alice").expect_err("should fail");
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }

    #[test]
    fn test_layout_url_rejects_cannot_be_base() {
        let err = layout_url("mailto:ops@example.com", "alice").expect_err("should fail");
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }

    #[test]
    fn test_check_status_mapping() {
        assert!(check_status(200, None).is_ok());
        assert!(check_status(204, None).is_ok());
        assert!(matches!(check_status(401, None), Err(ApiError::Unauthorized)));
        assert!(matches!(
            check_status(429, Some("5".to_string())),
            Err(ApiError::RateLimited { retry_after: Some(ref r) }) if r == "5"
        ));
        assert!(matches!(check_status(502, None), Err(ApiError::Server(502))));
        assert!(matches!(check_status(418, None), Err(ApiError::Unexpected(418))));
    }

    #[test]
    fn test_decode_body_empty_is_none() {
        assert!(decode_body("").expect("empty ok").is_none());
        assert!(decode_body("  \n").expect("blank ok").is_none());
        assert!(decode_body("null").expect("null ok").is_none());
    }

    #[test]
    fn test_decode_body_object() {
        let value = decode_body(r#"{"version":2}"#)
            .expect("json ok")
            .expect("some");
        assert_eq!(value["version"], 2);
    }

    #[test]
    fn test_decode_body_invalid_json() {
        assert!(matches!(decode_body("{oops"), Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_network_error() {
        let client = LayoutClient::new("http://127.0.0.1:9", "alice", None).expect("valid url");
        let err = client.fetch().await.expect_err("port 9 should refuse");
        assert!(matches!(err, ApiError::Network(_)));
    }
}
