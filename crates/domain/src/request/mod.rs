//! Request types for API calls.

mod method;
mod query;
mod spec;

pub use method::HttpMethod;
pub use query::{QueryParam, QueryParams};
pub use spec::{ApiRequest, CONTENT_TYPE_JSON, Header, ResponseExpectation};
