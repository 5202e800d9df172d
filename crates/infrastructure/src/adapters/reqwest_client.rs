//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port. It performs exactly
//! one exchange per call and hands back the status and body whatever the
//! status is; classifying non-success statuses is the pipeline's job.

use async_trait::async_trait;
use dailybook_application::ports::{HttpTransport, TransportError};
use dailybook_domain::{ApiRequest, HttpMethod, RawResponse};
use reqwest::{Client, Method};
use tracing::debug;

/// Redirects followed before giving up.
const MAX_REDIRECTS: usize = 10;

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("Dailybook/", env!("CARGO_PKG_VERSION"));

/// HTTP transport backed by `reqwest::Client`.
///
/// Default configuration:
/// - Follow redirects: up to 10
/// - TLS verification: enabled
/// - No request timeout
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a transport with the default user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    /// Creates a transport that identifies itself as `user_agent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_user_agent(user_agent: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wraps a preconfigured reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Maps reqwest errors to `TransportError`.
    fn map_error(error: &reqwest::Error) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout;
        }

        let host = || {
            error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = error.to_string();
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return TransportError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lower.contains("refused") {
                return TransportError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return TransportError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return TransportError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        if error.is_builder() {
            return TransportError::InvalidUrl(error.to_string());
        }

        TransportError::Other(error.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestHttpClient {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), request.url);

        for header in &request.headers {
            builder = builder.header(header.name.as_str(), header.value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;
        debug!(status, bytes = bytes.len(), "response received");

        Ok(RawResponse::from_bytes(status, &bytes))
    }
}
