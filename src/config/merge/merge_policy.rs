use crate::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with the built-in defaults (lowest precedence).
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("api.base_url", DEFAULT_BASE_URL)?
        .set_default("api.timeout_secs", DEFAULT_TIMEOUT_SECS)?
        .set_default("logging.level", "info")
}
