//! Application configuration module
//!
//! Configuration is read from environment variables (and a `.env` file if
//! present) with the `KART_FRONTIER` prefix. Nested values use `__`.
//!
//! # Example
//!
//! ```no_run
//! use kart_frontier::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Reading parts from {}", config.data.catalog_path.display());
//! ```

mod data;
mod engine;
mod error;
mod logging;

pub use data::{DataConfig, SectionOverrides};
pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Catalog input and export output
    #[serde(default)]
    pub data: DataConfig,

    /// Projection modes and dispatch
    #[serde(default)]
    pub engine: EngineConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `KART_FRONTIER__DATA__CATALOG_PATH=MK8Data.csv` -> `data.catalog_path`
    /// - `KART_FRONTIER__ENGINE__TRIPLES=false` -> `engine.triples`
    /// - `KART_FRONTIER__LOGGING__JSON=true` -> `logging.json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("KART_FRONTIER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first section that is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.data.validate()?;
        self.engine.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
