//! Request specification type

use super::HttpMethod;

/// Complete specification for an HTTP request issued by a test case.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: String,
    /// JSON body, sent with `Content-Type: application/json`
    pub json: Option<serde_json::Value>,
}

impl RequestSpec {
    /// Creates a GET request with the given URL.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            json: None,
        }
    }

    /// Creates a POST request carrying a JSON body.
    #[must_use]
    pub fn post_json(url: impl Into<String>, json: serde_json::Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            json: Some(json),
        }
    }
}
