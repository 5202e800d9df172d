//! Wiring of the production adapters into an [`ApiClient`].

use dailybook_application::{ApiClient, RequestPipeline, TokenStore};

use crate::adapters::{ReqwestHttpClient, SystemClock};
use crate::config::{ClientConfig, ConfigError};
use crate::storage::FileSessionStorage;

/// API client over reqwest, a session file and the system clock.
pub type DailybookClient = ApiClient<ReqwestHttpClient, FileSessionStorage, SystemClock>;

/// Builds a client from configuration.
///
/// # Errors
///
/// Returns an error if the endpoint is invalid, no session file location
/// can be determined, or the HTTP client cannot be created.
pub fn build_client(config: &ClientConfig) -> Result<DailybookClient, ConfigError> {
    let endpoint = config.endpoint()?;
    let storage = FileSessionStorage::new(config.session_path()?);
    let transport = ReqwestHttpClient::with_user_agent(&config.user_agent)?;

    Ok(ApiClient::new(RequestPipeline::new(
        transport,
        TokenStore::new(storage, SystemClock::new()),
        endpoint,
    )))
}
