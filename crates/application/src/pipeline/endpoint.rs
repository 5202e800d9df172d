//! Base URL resolution and query encoding.

use dailybook_domain::{DomainError, DomainResult, QueryParams};
use url::Url;

/// Where API calls are sent.
///
/// `base_url` is prepended to every path and the result is resolved
/// against `origin`, so it may be absolute (`https://api.example.com`), a
/// path prefix (`/backend`), or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    origin: Url,
    base_url: String,
}

impl Endpoint {
    /// Creates an endpoint.
    ///
    /// # Errors
    /// Returns an error if `origin` is not an absolute URL.
    pub fn new(origin: &str, base_url: impl Into<String>) -> DomainResult<Self> {
        let origin =
            Url::parse(origin).map_err(|e| DomainError::InvalidUrl(format!("{e}: {origin}")))?;
        Ok(Self {
            origin,
            base_url: base_url.into(),
        })
    }

    /// Returns the origin relative URLs are resolved against.
    #[must_use]
    pub const fn origin(&self) -> &Url {
        &self.origin
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the absolute URL for `path`.
    ///
    /// Defined query parameters are appended in insertion order; undefined
    /// ones are left out entirely.
    ///
    /// # Errors
    /// Returns an error if the joined URL cannot be parsed.
    pub fn build_url(&self, path: &str, query: &QueryParams) -> DomainResult<Url> {
        let target = format!("{}{path}", self.base_url);
        let mut url = self
            .origin
            .join(&target)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {target}")))?;

        let mut defined = query.defined().peekable();
        if defined.peek().is_some() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in defined {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}
