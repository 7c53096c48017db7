//! Catalog Source Port - Where the four part catalogs come from.
//!
//! The engine never reads files itself. A source produces a validated
//! [`CatalogSet`] before any projection runs.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::domain::catalog::CatalogSet;
use crate::domain::foundation::{EngineError, ValidationError};

/// Port for loading part catalogs.
///
/// # Contract
///
/// Implementations must:
/// - Return catalogs sharing one attribute schema
/// - Drop part rows with missing values rather than guessing them
/// - Keep parts in the order the underlying document lists them
///
/// # Usage
///
/// ```rust,ignore
/// let source: &dyn CatalogSource = &CsvCatalogSource::new("parts.csv");
/// let catalogs = source.load()?;
/// ```
pub trait CatalogSource: Send + Sync {
    /// Loads and validates the four catalogs.
    ///
    /// # Errors
    ///
    /// Returns `CatalogSourceError` if the document cannot be read, is not
    /// laid out as expected, or yields catalogs the engine rejects.
    fn load(&self) -> Result<CatalogSet, CatalogSourceError>;

    /// Human readable description for logs, e.g. the file path.
    fn describe(&self) -> String;
}

/// On-disk catalog layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogFormat {
    /// Single table with one header row and slot sections.
    Csv,
    /// Document with an attribute list and one mapping per slot.
    Yaml,
}

impl CatalogFormat {
    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl std::fmt::Display for CatalogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogFormat::Csv => write!(f, "csv"),
            CatalogFormat::Yaml => write!(f, "yaml"),
        }
    }
}

impl std::str::FromStr for CatalogFormat {
    type Err = CatalogSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(CatalogFormat::Csv),
            "yaml" | "yml" => Ok(CatalogFormat::Yaml),
            _ => Err(CatalogSourceError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Errors that can occur while loading catalogs.
#[derive(Debug, Error)]
pub enum CatalogSourceError {
    /// The document could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document was read but is not laid out as expected.
    #[error("Malformed catalog at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// A structured document failed to deserialize.
    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    /// No reader exists for the requested layout.
    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    /// The catalogs were rejected by the engine.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl CatalogSourceError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        CatalogSourceError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        CatalogSourceError::Malformed {
            line,
            reason: reason.into(),
        }
    }
}

impl From<ValidationError> for CatalogSourceError {
    fn from(err: ValidationError) -> Self {
        CatalogSourceError::Engine(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_common_spellings() {
        assert_eq!("CSV".parse::<CatalogFormat>().unwrap(), CatalogFormat::Csv);
        assert_eq!("yml".parse::<CatalogFormat>().unwrap(), CatalogFormat::Yaml);
        assert!("xlsx".parse::<CatalogFormat>().is_err());
    }

    #[test]
    fn format_guessed_from_extension() {
        assert_eq!(
            CatalogFormat::from_path(Path::new("data/parts.yaml")),
            Some(CatalogFormat::Yaml)
        );
        assert_eq!(CatalogFormat::from_path(Path::new("parts")), None);
    }

    #[test]
    fn validation_errors_surface_as_engine_errors() {
        let err: CatalogSourceError = ValidationError::empty_field("part name").into();
        assert!(matches!(err, CatalogSourceError::Engine(EngineError::Validation(_))));
        assert_eq!(err.to_string(), "Field 'part name' cannot be empty");
    }
}
