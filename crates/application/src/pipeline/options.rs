//! Per-call request options and response payloads.

use dailybook_domain::{DomainError, HttpMethod, QueryParams, ResponseExpectation};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Options of a single API call.
///
/// Defaults: `GET`, authenticated, no body, no query, JSON response.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    /// HTTP method
    pub method: HttpMethod,
    /// JSON body; `None` and `Some(Value::Null)` both send no body
    pub body: Option<Value>,
    /// Attach the bearer token when a valid one exists
    pub auth: bool,
    /// Query parameters
    pub query: QueryParams,
    /// How to interpret a successful response body
    pub expect: ResponseExpectation,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: HttpMethod::Get,
            body: None,
            auth: true,
            query: QueryParams::new(),
            expect: ResponseExpectation::Json,
        }
    }
}

impl RequestOptions {
    /// Default options with the given method.
    #[must_use]
    pub fn method(method: HttpMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// A `GET` call.
    #[must_use]
    pub fn get() -> Self {
        Self::method(HttpMethod::Get)
    }

    /// A `POST` call.
    #[must_use]
    pub fn post() -> Self {
        Self::method(HttpMethod::Post)
    }

    /// A `PUT` call.
    #[must_use]
    pub fn put() -> Self {
        Self::method(HttpMethod::Put)
    }

    /// A `DELETE` call.
    #[must_use]
    pub fn delete() -> Self {
        Self::method(HttpMethod::Delete)
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Never send credentials, even if a valid token exists.
    #[must_use]
    pub const fn anonymous(mut self) -> Self {
        self.auth = false;
        self
    }

    /// Sets the query parameters.
    #[must_use]
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Sets the response expectation.
    #[must_use]
    pub const fn expect(mut self, expect: ResponseExpectation) -> Self {
        self.expect = expect;
        self
    }

    /// Returns the body to send, if any.
    #[must_use]
    pub fn sendable_body(&self) -> Option<&Value> {
        self.body.as_ref().filter(|b| !b.is_null())
    }
}

/// Serializes a payload into a request body.
///
/// # Errors
/// Returns [`ApiError::InvalidRequest`] if the payload cannot be serialized.
pub fn json_body<T: Serialize + ?Sized>(payload: &T) -> ApiResult<Value> {
    serde_json::to_value(payload)
        .map_err(|e| ApiError::InvalidRequest(DomainError::InvalidBody(e.to_string())))
}

/// A successful response body, shaped by the call's [`ResponseExpectation`].
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsePayload {
    /// The body was ignored.
    Empty,
    /// The raw body text.
    Text(String),
    /// The parsed JSON body.
    Json(Value),
}

impl ResponsePayload {
    /// Converts the payload into a typed value.
    ///
    /// # Errors
    /// Returns [`ApiError::Parse`] if the payload does not match `T`.
    pub fn into_json<T: DeserializeOwned>(self) -> ApiResult<T> {
        let value = match self {
            Self::Json(value) => value,
            Self::Text(text) => serde_json::from_str(&text)?,
            Self::Empty => Value::Null,
        };
        Ok(serde_json::from_value(value)?)
    }

    /// Returns the payload as text. JSON is re-serialized compactly.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text,
            Self::Json(value) => value.to_string(),
        }
    }
}
