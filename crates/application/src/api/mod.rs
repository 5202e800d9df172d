//! Typed facade over the request pipeline, one method per backend route.

mod client;

pub use client::ApiClient;
