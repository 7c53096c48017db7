//! Frontier Exporter Port - Where finished results go.

use std::path::Path;
use thiserror::Error;

use crate::domain::analysis::{CombinationTable, ProjectionResults, RunReport};

/// Port for publishing the results of a completed run.
///
/// Exporters run after the engine has returned; they only read the table
/// and results. Failed projections are present in `results` and it is up to
/// the exporter whether to skip or record them.
pub trait FrontierExporter: Send + Sync {
    /// Writes the results of one run.
    fn export(
        &self,
        table: &CombinationTable,
        results: &ProjectionResults,
        report: &RunReport,
    ) -> Result<(), ExportError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Errors that can occur while exporting results.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing to the destination failed.
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Results could not be encoded.
    #[error("Failed to serialize results: {0}")]
    Serialization(String),
}

impl ExportError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialization(err.to_string())
    }
}
