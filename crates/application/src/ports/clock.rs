//! Clock port for session expiry checks

use chrono::{DateTime, Utc};

/// Port for getting the current time.
///
/// Session expiry is compared against this clock, so tests can move time
/// forward without sleeping.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current time in epoch milliseconds.
    fn now_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }
}
