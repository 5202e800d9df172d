//! Authentication state for the Dailybook client.
//!
//! This module provides the persisted session store with lazy expiry
//! detection and a display-oriented status report.

mod token_store;

pub use token_store::{TokenStatus, TokenStore};
