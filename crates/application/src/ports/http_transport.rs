//! HTTP transport port

use async_trait::async_trait;
use dailybook_domain::{ApiRequest, RawResponse};

/// Transport-level failures: the exchange did not produce a response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The URL was rejected by the transport.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The host name could not be resolved.
    #[error("DNS lookup failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve
        host: String,
        /// Resolver message
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host
        host: String,
        /// Target port
        port: u16,
    },

    /// The connection could not be established or was lost.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// A timeout configured on the transport elapsed.
    #[error("request timed out")]
    Timeout,

    /// The redirect limit was exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit
        max: usize,
    },

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP exchanges.
///
/// Implementations perform exactly one network call per invocation: no
/// retries, no caching.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the request and returns status and body, whatever the status.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response was received.
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError>;
}
