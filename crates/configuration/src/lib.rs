use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{DatabaseSettings, LoggingSettings, ServerSettings, Settings, StoreBackend};

/// Name of the configuration file looked up when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "trivia.toml";

/// Prefix for environment overrides, e.g. `TRIVIA__SERVER__PORT=8080`.
const ENV_PREFIX: &str = "TRIVIA";

/// Loads the application configuration.
///
/// Sources, from lowest to highest priority: built-in defaults, the TOML file at
/// `path` (optional, missing files are skipped), and `TRIVIA__*` environment
/// variables. When no database URL is configured, `DATABASE_URL` is used.
pub fn load_config(path: &Path) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut settings = builder.try_deserialize::<Settings>()?;
    if settings.database.url.is_none() {
        settings.database.url = std::env::var("DATABASE_URL").ok();
    }

    settings.validate()?;
    Ok(settings)
}
