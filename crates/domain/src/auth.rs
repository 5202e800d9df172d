//! Authentication payloads exchanged with the API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Desired username
    pub username: String,
    /// Contact email
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account username
    pub username: String,
    /// Plain-text password
    pub password: String,
}

impl LoginRequest {
    /// Creates a login request.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Successful login response.
///
/// `expiresAt` is kept as raw JSON: backends send epoch seconds or
/// milliseconds, as a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token
    pub token: String,
    /// Raw expiry timestamp
    #[serde(default)]
    pub expires_at: Value,
    /// Display name, when the backend returns one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl LoginResponse {
    /// Returns the expiry as a number, or NaN when it is not numeric.
    #[must_use]
    pub fn expires_at_raw(&self) -> f64 {
        match &self.expires_at {
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }
}

/// Body of `PUT /api/profile/me`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// Free-form biography
    pub bio: String,
    /// Profile picture URL
    pub profile_picture: String,
}
