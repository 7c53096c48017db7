//! JSON Report Exporter
//!
//! Writes the run report as pretty-printed JSON.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::analysis::{CombinationTable, ProjectionResults, RunReport};
use crate::ports::{ExportError, FrontierExporter};

pub const REPORT_FILE: &str = "report.json";

/// Exporter writing `report.json` into an output directory.
#[derive(Debug, Clone)]
pub struct JsonReportExporter {
    output_dir: PathBuf,
}

impl JsonReportExporter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE)
    }
}

impl FrontierExporter for JsonReportExporter {
    fn export(
        &self,
        _table: &CombinationTable,
        _results: &ProjectionResults,
        report: &RunReport,
    ) -> Result<(), ExportError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| ExportError::io(&self.output_dir, e))?;

        let path = self.report_path();
        let file = File::create(&path).map_err(|e| ExportError::io(&path, e))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, report)?;
        out.flush().map_err(|e| ExportError::io(&path, e))?;

        debug!(path = %path.display(), run_id = %report.run_id, "Wrote run report");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "json"
    }
}
