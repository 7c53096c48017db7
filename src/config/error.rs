//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Cannot tell catalog format of '{0}'; set data.catalog_format")]
    UnknownCatalogFormat(String),

    #[error("Section start for {0} cannot be empty")]
    EmptySectionStart(&'static str),

    #[error("At least one of engine.pairs, engine.triples, engine.full must be enabled")]
    NoModesEnabled,

    #[error("Log filter cannot be empty")]
    EmptyLogLevel,
}
