//! Outgoing request specification

use serde::{Deserialize, Serialize};
use url::Url;

use super::HttpMethod;

/// Media type sent with every JSON body.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// A single HTTP header with name and value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// The header name (e.g., "Authorization")
    pub name: String,
    /// The header value (e.g., "Bearer abc")
    pub value: String,
}

impl Header {
    /// Creates a new header.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates an `Authorization: Bearer <token>` header.
    #[must_use]
    pub fn bearer(token: &str) -> Self {
        Self::new("Authorization", format!("Bearer {token}"))
    }

    /// Creates a `Content-Type: application/json` header.
    #[must_use]
    pub fn json_content_type() -> Self {
        Self::new("Content-Type", CONTENT_TYPE_JSON)
    }
}

/// How a successful response body should be interpreted.
///
/// Declared by the caller per request, not negotiated from the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseExpectation {
    /// Parse the body as JSON.
    #[default]
    Json,
    /// Return the body as a string.
    Text,
    /// Ignore the body.
    Void,
}

/// A fully resolved HTTP exchange, ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL, query included
    pub url: Url,
    /// Headers in the order they were added
    pub headers: Vec<Header>,
    /// Serialized JSON body
    pub body: Option<String>,
}

impl ApiRequest {
    /// Creates a request without headers or body.
    #[must_use]
    pub const fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, header: Header) -> Self {
        self.headers.push(header);
        self
    }

    /// Sets a serialized JSON body and the matching content type.
    #[must_use]
    pub fn with_json_body(mut self, body: impl Into<String>) -> Self {
        self.headers.push(Header::json_content_type());
        self.body = Some(body.into());
        self
    }

    /// Looks up a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Returns true if the request carries credentials.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.header("authorization").is_some()
    }
}
