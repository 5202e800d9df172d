//! Authenticated request pipeline.
//!
//! Turns a logical API call (path plus [`RequestOptions`]) into an
//! [`ApiRequest`], hands it to the [`HttpTransport`], and maps the outcome
//! to an [`ApiResult`]. The pipeline holds no per-call state: no retries,
//! no caching, no timeouts.

mod endpoint;
mod options;

use dailybook_domain::{ApiRequest, DomainError, Header, ResponseExpectation};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

use crate::auth::TokenStore;
use crate::error::{ApiError, ApiResult};
use crate::ports::{Clock, HttpTransport, SessionStorage};

pub use endpoint::Endpoint;
pub use options::{RequestOptions, ResponsePayload, json_body};

/// Executes API calls against one [`Endpoint`].
#[derive(Debug)]
pub struct RequestPipeline<T, S, C> {
    transport: T,
    tokens: TokenStore<S, C>,
    endpoint: Endpoint,
}

impl<T, S, C> RequestPipeline<T, S, C>
where
    T: HttpTransport,
    S: SessionStorage,
    C: Clock,
{
    /// Creates a pipeline.
    pub const fn new(transport: T, tokens: TokenStore<S, C>, endpoint: Endpoint) -> Self {
        Self {
            transport,
            tokens,
            endpoint,
        }
    }

    /// Returns the session store credentials are read from.
    pub const fn token_store(&self) -> &TokenStore<S, C> {
        &self.tokens
    }

    /// Returns the transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the endpoint calls are sent to.
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Builds the absolute URL for `path` with the given query.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidRequest`] if the URL cannot be built.
    pub fn build_url(&self, path: &str, query: &dailybook_domain::QueryParams) -> ApiResult<Url> {
        Ok(self.endpoint.build_url(path, query)?)
    }

    /// Builds the HTTP exchange for a call without sending it.
    ///
    /// Reads the session when `options.auth` is set, which may clear an
    /// expired one. A missing token is not an error: the request goes out
    /// without credentials and the server decides.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidRequest`] if the URL or body is invalid.
    pub async fn prepare(&self, path: &str, options: &RequestOptions) -> ApiResult<ApiRequest> {
        let url = self.build_url(path, &options.query)?;
        let mut request = ApiRequest::new(options.method, url);

        if options.auth {
            if let Some(token) = self.tokens.get_valid_token().await {
                request = request.with_header(Header::bearer(&token));
            }
        }

        if let Some(body) = options.sendable_body() {
            let encoded = serde_json::to_string(body)
                .map_err(|e| DomainError::InvalidBody(e.to_string()))?;
            request = request.with_json_body(encoded);
        }

        Ok(request)
    }

    /// Performs a call and interprets the body per `options.expect`.
    ///
    /// # Errors
    /// - [`ApiError::HttpStatus`] for a non-success status, carrying the
    ///   body text or `Request failed with status <code>`
    /// - [`ApiError::Transport`] when no response was received
    /// - [`ApiError::Parse`] when a JSON body is malformed
    /// - [`ApiError::InvalidRequest`] when the request cannot be built
    #[instrument(
        level = "debug",
        skip_all,
        fields(request_id = %Uuid::now_v7(), method = %options.method, path = path)
    )]
    pub async fn request(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<ResponsePayload> {
        let request = self.prepare(path, &options).await?;
        debug!(
            url = %request.url,
            authenticated = request.is_authenticated(),
            "dispatching request"
        );

        let response = self.transport.execute(request).await?;
        debug!(status = response.status.as_u16(), "response received");

        if !response.is_success() {
            return Err(ApiError::from_response(response));
        }

        Ok(match options.expect {
            ResponseExpectation::Void => ResponsePayload::Empty,
            ResponseExpectation::Text => ResponsePayload::Text(response.body),
            ResponseExpectation::Json => {
                ResponsePayload::Json(serde_json::from_str(&response.body)?)
            }
        })
    }

    /// Performs a call and deserializes the JSON body into `R`.
    ///
    /// # Errors
    /// Same as [`RequestPipeline::request`].
    pub async fn request_json<R: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<R> {
        self.request(path, options.expect(ResponseExpectation::Json))
            .await?
            .into_json()
    }

    /// Performs a call and returns the body text.
    ///
    /// # Errors
    /// Same as [`RequestPipeline::request`].
    pub async fn request_text(&self, path: &str, options: RequestOptions) -> ApiResult<String> {
        Ok(self
            .request(path, options.expect(ResponseExpectation::Text))
            .await?
            .into_text())
    }

    /// Performs a call and discards the body.
    ///
    /// # Errors
    /// Same as [`RequestPipeline::request`].
    pub async fn request_void(&self, path: &str, options: RequestOptions) -> ApiResult<()> {
        self.request(path, options.expect(ResponseExpectation::Void))
            .await
            .map(|_| ())
    }
}
