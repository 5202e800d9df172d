//! Dailybook Domain - Core client types
//!
//! This crate defines the session model and the request/response value
//! types used by the Dailybook API client.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod pagination;
pub mod request;
pub mod response;
pub mod routes;
pub mod session;

pub use auth::{LoginRequest, LoginResponse, ProfileUpdate, RegisterRequest};
pub use error::{DomainError, DomainResult};
pub use pagination::PageRequest;
pub use request::{ApiRequest, Header, HttpMethod, QueryParam, QueryParams, ResponseExpectation};
pub use response::{RawResponse, StatusCode};
pub use session::{
    DEFAULT_SESSION_LIFETIME_MS, SECONDS_THRESHOLD, Session, SessionRead, SessionSlot,
    SessionSlots, normalize_expiry_ms, validate,
};
