//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FLYERCRAFT_API_URL` - Backend base URL (default: `http://localhost:3001`)
//! - `FLYERCRAFT_STATE_DIR` - Directory for persisted credentials
//!   (default: `<platform data dir>/flyercraft`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default backend base URL, matching the development backend.
const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
    #[error("No usable state directory; set FLYERCRAFT_STATE_DIR")]
    NoStateDir,
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL all request paths are joined against.
    pub api_base_url: Url,
    /// Directory holding the persisted credential files.
    pub state_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `FLYERCRAFT_API_URL` is set but not a valid URL,
    /// or if no state directory can be determined.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = std::env::var("FLYERCRAFT_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        let api_base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("FLYERCRAFT_API_URL", e.to_string()))?;

        let state_dir = match std::env::var("FLYERCRAFT_STATE_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::data_local_dir()
                .map(|d| d.join("flyercraft"))
                .ok_or(ConfigError::NoStateDir)?,
        };

        Ok(Self {
            api_base_url,
            state_dir,
        })
    }

    /// Build a configuration pointing at an explicit backend, for tests and
    /// embedders that do not use the environment.
    #[must_use]
    pub const fn new(api_base_url: Url, state_dir: PathBuf) -> Self {
        Self {
            api_base_url,
            state_dir,
        }
    }
}
