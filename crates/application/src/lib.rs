//! Dailybook Application - Session lifecycle and request pipeline
//!
//! This crate holds the client logic: it persists the authenticated
//! session through the [`ports::SessionStorage`] port, attaches bearer
//! credentials to outgoing calls, and normalizes every outcome into an
//! [`ApiResult`]. Concrete I/O lives behind the ports and is provided by
//! the infrastructure crate.

pub mod api;
pub mod auth;
pub mod error;
pub mod pipeline;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use api::ApiClient;
pub use auth::{TokenStatus, TokenStore};
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use pipeline::{Endpoint, RequestOptions, RequestPipeline, ResponsePayload, json_body};
