//! Stable JSON encoding for the session file.
//!
//! Keys are written in sorted order with 2-space indentation and a
//! trailing newline, so the file diffs cleanly between writes.

mod json;

pub use json::*;
