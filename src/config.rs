//! Configuration
//!
//! Layered configuration for the content API client and logging, loaded with
//! the `config` crate. Precedence, lowest first: built-in defaults, global
//! config file, explicitly named file, `FOLIO__*` environment variables.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Content API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST API, including the `/api` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Bearer token for the session; usually supplied through `FOLIO__API__TOKEN`
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> Result<(), ApiError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ApiError::ConfigError(format!(
                "Invalid API base URL: {} (must start with http:// or https://)",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ApiError::ConfigError(
                "API timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}
