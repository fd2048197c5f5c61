//! Environment variable source: FOLIO_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses FOLIO prefix and __ as separator, e.g. `FOLIO__API__BASE_URL`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("FOLIO")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
