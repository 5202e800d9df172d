//! [`ClientConfig`]-related definitions.

use std::path::{Path, PathBuf};

use config::{ConfigBuilder, Environment, File, builder::DefaultState};
use dailybook_application::Endpoint;
use serde::Deserialize;

use crate::adapters::DEFAULT_USER_AGENT;
use crate::storage::FileSessionStorage;

/// Prefix of the environment variables read by [`ClientConfig::load`].
pub const ENV_PREFIX: &str = "DAILYBOOK";

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_NAME: &str = "dailybook";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("invalid configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The origin or base URL is not usable.
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] dailybook_domain::DomainError),

    /// The HTTP client could not be created.
    #[error("could not create HTTP client: {0}")]
    Transport(#[from] dailybook_application::ports::TransportError),

    /// No session file was configured and the platform has no config dir.
    #[error("could not determine config directory for the session file")]
    NoConfigDir,
}

/// Client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin that relative base URLs are resolved against.
    pub origin: String,

    /// Prefix of every API path. May be absolute, a path prefix, or empty.
    pub api_base_url: String,

    /// Session file; the platform config directory when unset.
    pub session_file: Option<PathBuf>,

    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:8080".to_owned(),
            api_base_url: String::new(),
            session_file: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Creates a new [`ClientConfig`] by:
    /// - loading the file at `path`, or an optional `dailybook.toml` in the
    ///   working directory;
    /// - merging it with `DAILYBOOK_*` environment variables;
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing or any source is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::build(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn build(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };
        Ok(ConfigBuilder::<DefaultState>::default()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()?)
    }

    /// Returns the endpoint API calls are sent to.
    ///
    /// # Errors
    ///
    /// Returns an error if `origin` is not an absolute URL.
    pub fn endpoint(&self) -> Result<Endpoint, ConfigError> {
        Ok(Endpoint::new(&self.origin, self.api_base_url.clone())?)
    }

    /// Returns the session file path.
    ///
    /// # Errors
    ///
    /// Returns an error if none is configured and no config dir exists.
    pub fn session_path(&self) -> Result<PathBuf, ConfigError> {
        self.session_file
            .clone()
            .or_else(FileSessionStorage::default_path)
            .ok_or(ConfigError::NoConfigDir)
    }
}
