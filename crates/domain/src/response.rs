//! Response types
//!
//! A transport hands back a [`RawResponse`]: the status code and the body
//! text. Interpreting the body is the pipeline's job.

use serde::{Deserialize, Serialize};

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns true if this is a 2xx success status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns true if the server rejected the caller's credentials.
    #[must_use]
    pub const fn is_auth_rejection(&self) -> bool {
        matches!(self.0, 401 | 403)
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Status and body text of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response body decoded as UTF-8 (lossy).
    pub body: String,
}

impl RawResponse {
    /// Creates a response from a status and body.
    #[must_use]
    pub fn new(status: impl Into<StatusCode>, body: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            body: body.into(),
        }
    }

    /// Creates a response from raw body bytes, replacing invalid UTF-8.
    #[must_use]
    pub fn from_bytes(status: impl Into<StatusCode>, body: &[u8]) -> Self {
        Self::new(status, String::from_utf8_lossy(body).into_owned())
    }

    /// Returns true for 2xx responses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
