//! Application error types

use dailybook_domain::{DomainError, RawResponse, StatusCode};
use thiserror::Error;

use crate::ports::{StorageError, TransportError};

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// The server answered with a non-success status.
    HttpStatus,
    /// The exchange never completed.
    Transport,
    /// The response body did not match the declared expectation.
    Parse,
    /// The request could not be built.
    InvalidRequest,
    /// The session could not be persisted.
    Storage,
}

/// Errors surfaced by API calls.
///
/// Every failed call yields exactly one of these.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success status. Displays as the response body text, or a
    /// generic message when the body was empty.
    #[error("{message}")]
    HttpStatus {
        /// Response status
        status: StatusCode,
        /// Body text or generic message
        message: String,
    },

    /// Transport failure, passed through from the adapter.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Malformed response body.
    #[error("failed to parse response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] DomainError),

    /// Session storage failed.
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Builds the error for a non-success response.
    #[must_use]
    pub fn from_response(response: RawResponse) -> Self {
        let message = if response.body.is_empty() {
            format!("Request failed with status {}", response.status.as_u16())
        } else {
            response.body
        };
        Self::HttpStatus {
            status: response.status,
            message,
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> ApiErrorKind {
        match self {
            Self::HttpStatus { .. } => ApiErrorKind::HttpStatus,
            Self::Transport(_) => ApiErrorKind::Transport,
            Self::Parse(_) => ApiErrorKind::Parse,
            Self::InvalidRequest(_) => ApiErrorKind::InvalidRequest,
            Self::Storage(_) => ApiErrorKind::Storage,
        }
    }

    /// Returns the response status for [`ApiError::HttpStatus`].
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the server rejected the caller's credentials.
    #[must_use]
    pub const fn is_auth_rejection(&self) -> bool {
        match self.status() {
            Some(status) => status.is_auth_rejection(),
            None => false,
        }
    }
}

/// Result type alias for API calls.
pub type ApiResult<T> = Result<T, ApiError>;
