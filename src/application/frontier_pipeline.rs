//! FrontierPipeline - Load catalogs, run every projection, export the results.
//!
//! All I/O happens at the two ends: the catalog source is read before the
//! engine starts and exporters run after it returns.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use super::{DriverConfig, ProjectionDriver};
use crate::domain::analysis::{CombinationTable, ProjectionResults, RunReport};
use crate::domain::foundation::{CancellationToken, EngineError, RunId, Timestamp};
use crate::ports::{CatalogSource, CatalogSourceError, ExportError, FrontierExporter};

/// Failures that abort a whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to load catalogs: {0}")]
    Source(#[from] CatalogSourceError),

    #[error("Engine failed: {0}")]
    Engine(#[from] EngineError),

    #[error("Exporter '{exporter}' failed: {source}")]
    Export {
        exporter: &'static str,
        #[source]
        source: ExportError,
    },

    #[error("Run cancelled before export")]
    Cancelled,
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub table: CombinationTable,
    pub results: ProjectionResults,
    pub report: RunReport,
}

/// Orchestrates one batch run from a catalog source to a set of exporters.
pub struct FrontierPipeline {
    source: Arc<dyn CatalogSource>,
    exporters: Vec<Arc<dyn FrontierExporter>>,
    driver: ProjectionDriver,
    dimensions: Option<Vec<String>>,
}

impl FrontierPipeline {
    /// Creates a new FrontierPipeline.
    pub fn new(
        source: Arc<dyn CatalogSource>,
        exporters: Vec<Arc<dyn FrontierExporter>>,
        config: DriverConfig,
    ) -> Self {
        Self {
            source,
            exporters,
            driver: ProjectionDriver::new(config),
            dimensions: None,
        }
    }

    /// Restricts the run to these attribute names instead of the whole schema.
    pub fn with_dimensions(mut self, dimensions: Vec<String>) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Runs the pipeline and returns the report handed to the exporters.
    pub fn run(&self, cancel: &CancellationToken) -> Result<RunReport, PipelineError> {
        self.run_detailed(cancel).map(|output| output.report)
    }

    /// Same as [`FrontierPipeline::run`], also returning the table and results.
    ///
    /// # Errors
    ///
    /// - `Source` if the catalogs cannot be loaded
    /// - `Engine` for whole-run engine failures (empty input, too few names
    ///   for every enabled mode)
    /// - `Cancelled` if `cancel` fired; nothing is exported in that case
    /// - `Export` for the first exporter that fails
    pub fn run_detailed(&self, cancel: &CancellationToken) -> Result<PipelineOutput, PipelineError> {
        let run_id = RunId::new();
        let started_at = Timestamp::now();
        info!(run_id = %run_id, source = %self.source.describe(), "Starting frontier run");

        let catalogs = self.source.load()?;
        let table = CombinationTable::generate(&catalogs)?;
        info!(
            run_id = %run_id,
            combinations = table.len(),
            attributes = table.schema().len(),
            collapsed = catalogs.collapsed().len(),
            "Generated combination table"
        );

        let results = match &self.dimensions {
            Some(dims) => self.driver.run_all(&table, dims.as_slice(), cancel)?,
            None => self.driver.run_schema(&table, cancel)?,
        };
        if cancel.is_cancelled() {
            warn!(run_id = %run_id, "Run cancelled, skipping export");
            return Err(PipelineError::Cancelled);
        }

        let report = RunReport::build(run_id, started_at, &table, catalogs.collapsed(), &results);
        for exporter in &self.exporters {
            exporter
                .export(&table, &results, &report)
                .map_err(|source| PipelineError::Export {
                    exporter: exporter.name(),
                    source,
                })?;
        }

        info!(
            run_id = %run_id,
            projections = report.projections.len(),
            failed = report.failures().count(),
            skipped_modes = report.skipped_modes.len(),
            elapsed_ms = report.elapsed_ms,
            "Frontier run complete"
        );

        Ok(PipelineOutput {
            table,
            results,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryCatalogSource, InMemoryExporter};
    use crate::application::ModeSelection;
    use crate::domain::analysis::{ModeCounts, ProjectionKey, ProjectionMode};
    use crate::domain::catalog::{CatalogSet, PartCatalog};
    use crate::domain::foundation::{AttributeSchema, Slot};

    fn catalogs() -> CatalogSet {
        let schema = AttributeSchema::new(vec!["Speed", "Weight", "Handling"]).unwrap();
        let catalog = |slot, parts: &[(&str, [f64; 3])]| {
            let mut builder = PartCatalog::builder(slot, schema.clone());
            for (name, values) in parts {
                builder = builder.part(*name, values.to_vec());
            }
            builder.build().unwrap()
        };
        CatalogSet::new(
            catalog(Slot::Character, &[("Mario", [2.0, 3.0, 1.0]), ("Toad", [1.0, 1.0, 4.0])]),
            catalog(Slot::Kart, &[("Standard Kart", [1.0, 1.0, 1.0])]),
            catalog(Slot::Wheel, &[("Standard", [0.0, 0.0, 0.0]), ("Slick", [1.0, 0.0, -1.0])]),
            catalog(Slot::Glider, &[("Super Glider", [0.0, 0.0, 0.0])]),
        )
        .unwrap()
    }

    fn pipeline(exporter: &InMemoryExporter) -> FrontierPipeline {
        FrontierPipeline::new(
            Arc::new(InMemoryCatalogSource::new(catalogs())),
            vec![Arc::new(exporter.clone())],
            DriverConfig::default(),
        )
    }

    #[test]
    fn run_exports_report_once() {
        let exporter = InMemoryExporter::new();
        let report = pipeline(&exporter).run(&CancellationToken::new()).unwrap();

        assert_eq!(exporter.export_count(), 1);
        assert_eq!(exporter.reports()[0], report);
        assert_eq!(report.combination_count, 4);
        assert_eq!(report.pairs.attempted, 3);
        assert_eq!(report.triples.attempted, 6);
        assert_eq!(report.full.attempted, 1);
        assert!(report.is_clean());
    }

    #[test]
    fn cancelled_run_exports_nothing() {
        let exporter = InMemoryExporter::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = pipeline(&exporter).run(&cancel).unwrap_err();
        assert!(matches!(err, PipelineError::Cancelled));
        assert_eq!(exporter.export_count(), 0);
    }

    #[test]
    fn explicit_dimensions_restrict_the_run() {
        let exporter = InMemoryExporter::new();
        let output = FrontierPipeline::new(
            Arc::new(InMemoryCatalogSource::new(catalogs())),
            vec![Arc::new(exporter.clone())],
            DriverConfig {
                parallel: false,
                modes: ModeSelection::only(ProjectionMode::Pairs),
            },
        )
        .with_dimensions(vec!["Handling".into(), "Speed".into()])
        .run_detailed(&CancellationToken::new())
        .unwrap();

        assert_eq!(output.results.len(), 1);
        let key = ProjectionKey::pair("Speed", "Handling");
        assert!(exporter.frontier_size(&key).is_some());
        let best = output.results.get(&key).unwrap().as_ref().unwrap().best.clone().unwrap();
        assert_eq!(best.ranking_dimension, "Handling");
    }

    #[test]
    fn modes_short_of_names_are_reported_not_fatal() {
        let exporter = InMemoryExporter::new();
        let report = pipeline(&exporter)
            .with_dimensions(vec!["Speed".into(), "Weight".into()])
            .run(&CancellationToken::new())
            .unwrap();

        assert_eq!(exporter.export_count(), 1);
        assert_eq!(report.pairs, ModeCounts { attempted: 1, succeeded: 1 });
        assert_eq!(report.full.succeeded, 1);
        assert_eq!(report.triples.attempted, 0);
        assert_eq!(report.skipped_modes.len(), 1);
        assert_eq!(report.skipped_modes[0].mode, ProjectionMode::Triples);
        assert!(!report.is_clean());
    }

    #[test]
    fn too_few_dimensions_for_every_mode_abort_the_run() {
        let exporter = InMemoryExporter::new();
        let err = FrontierPipeline::new(
            Arc::new(InMemoryCatalogSource::new(catalogs())),
            vec![Arc::new(exporter.clone())],
            DriverConfig {
                parallel: false,
                modes: ModeSelection::only(ProjectionMode::Pairs),
            },
        )
        .with_dimensions(vec!["Speed".into()])
        .run(&CancellationToken::new())
        .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Engine(EngineError::InsufficientDimensions { .. })
        ));
        assert_eq!(exporter.export_count(), 0);
    }
}
