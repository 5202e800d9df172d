//! Dailybook Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: a reqwest transport, the system
//! clock, in-memory and file session storage, and configuration loading.

pub mod adapters;
pub mod client;
pub mod config;
pub mod serialization;
pub mod storage;

pub use adapters::{DEFAULT_USER_AGENT, ReqwestHttpClient, SystemClock};
pub use client::{DailybookClient, build_client};
pub use config::{ClientConfig, ConfigError};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};
pub use storage::{FileSessionStorage, InMemorySessionStorage};
