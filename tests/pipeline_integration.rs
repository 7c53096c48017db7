//! End-to-end runs: catalog file on disk -> pipeline -> exported files.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use kart_frontier::adapters::{
    CsvCatalogSource, CsvFrontierExporter, InMemoryExporter, JsonReportExporter,
    YamlCatalogSource,
};
use kart_frontier::application::{DriverConfig, FrontierPipeline, ModeSelection, PipelineError};
use kart_frontier::domain::analysis::{ProjectionKey, ProjectionMode, RunReport};
use kart_frontier::domain::foundation::CancellationToken;
use kart_frontier::ports::{CatalogSource, FrontierExporter};

const CATALOG_CSV: &str = "\
Names,Speed,Weight,Handling
Mario,3,3,3
Peach,2,2,4
Bowser,5,5,1
Koopa,2,1,4
Standard Kart,1,1,1
Pipe Frame,1,0,2
Standard,0,0,0
Roller,-1,-1,2
Slick,1,0,-1
Super Glider,0,0,0
Wario Wing,0,0,0
";

const CATALOG_YAML: &str = "\
attributes: [Speed, Weight]
slots:
  character:
    A: [1, 5]
  kart:
    B: [2, 0]
  wheel:
    C: [0, 0]
  glider:
    D: [0, 0]
";

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn exporters(out: &Path) -> Vec<Arc<dyn FrontierExporter>> {
    vec![
        Arc::new(CsvFrontierExporter::new(out)),
        Arc::new(JsonReportExporter::new(out)),
    ]
}

#[test]
fn csv_catalog_produces_every_table_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write(dir.path(), "parts.csv", CATALOG_CSV);
    let out = dir.path().join("frontiers");

    let report = FrontierPipeline::new(
        Arc::new(CsvCatalogSource::new(&catalog)),
        exporters(&out),
        DriverConfig::default(),
    )
    .run(&CancellationToken::new())
    .unwrap();

    // Wario Wing collapses into Super Glider.
    assert_eq!(report.combination_count, 4 * 2 * 3);
    assert_eq!(report.collapsed_parts.len(), 1);
    assert_eq!(report.collapsed_parts[0].dropped, "Wario Wing");
    assert_eq!(report.pairs.attempted, 3);
    assert_eq!(report.triples.attempted, 6);
    assert_eq!(report.full.attempted, 1);
    assert!(report.is_clean());

    for file in ["2dCoords.csv", "2dStats.csv", "3dCoords.csv", "3dStats.csv", "AllCoords.csv"] {
        let text = fs::read_to_string(out.join(file)).unwrap();
        assert!(text.lines().count() > 1, "{} has no rows", file);
    }

    let json = fs::read_to_string(out.join("report.json")).unwrap();
    let written: RunReport = serde_json::from_str(&json).unwrap();
    assert_eq!(written, report);
}

#[test]
fn stats_rows_match_coord_rows_on_the_frontier() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write(dir.path(), "parts.csv", CATALOG_CSV);

    let output = FrontierPipeline::new(
        Arc::new(CsvCatalogSource::new(&catalog)),
        vec![],
        DriverConfig {
            parallel: false,
            modes: ModeSelection::only(ProjectionMode::Pairs),
        },
    )
    .run_detailed(&CancellationToken::new())
    .unwrap();

    for (key, outcome) in output.results.successes(ProjectionMode::Pairs) {
        let best = outcome.best.as_ref().unwrap();
        assert!(best.len() >= outcome.frontier.len(), "{}", key);
        for combination in &best.combinations {
            let values = combination.stats.project(outcome.frontier.indices());
            assert!(outcome.frontier.contains_values(&values), "{}", key);
        }
    }
}

#[test]
fn yaml_single_combination_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write(dir.path(), "parts.yaml", CATALOG_YAML);
    let exporter = InMemoryExporter::new();

    let output = FrontierPipeline::new(
        Arc::new(YamlCatalogSource::new(&catalog)),
        vec![Arc::new(exporter.clone())],
        DriverConfig {
            parallel: false,
            modes: ModeSelection {
                pairs: true,
                triples: false,
                full: true,
            },
        },
    )
    .run_detailed(&CancellationToken::new())
    .unwrap();

    let outcome = output.results.pair("Speed", "Weight").unwrap().as_ref().unwrap();
    assert_eq!(outcome.frontier.points.len(), 1);
    assert_eq!(outcome.frontier.points[0].values, vec![3.0, 5.0]);

    let best = outcome.best.as_ref().unwrap();
    assert_eq!(best.len(), 1);
    assert_eq!(best.combinations[0].label(), "A_B_C_D");

    assert_eq!(output.report.triples.attempted, 0);
    assert_eq!(exporter.frontier_size(&ProjectionKey::full(vec!["Speed", "Weight"])), Some(1));
}

#[test]
fn two_attributes_skip_triples_but_export_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write(dir.path(), "parts.yaml", CATALOG_YAML);
    let out = dir.path().join("frontiers");

    let report = FrontierPipeline::new(
        Arc::new(YamlCatalogSource::new(&catalog)),
        exporters(&out),
        DriverConfig::default(),
    )
    .run(&CancellationToken::new())
    .unwrap();

    assert_eq!(report.pairs.succeeded, 1);
    assert_eq!(report.full.succeeded, 1);
    assert_eq!(report.triples.attempted, 0);
    assert_eq!(report.skipped_modes.len(), 1);
    assert_eq!(report.skipped_modes[0].mode, ProjectionMode::Triples);
    assert_eq!(report.skipped_modes[0].error_code, "INSUFFICIENT_DIMENSIONS");

    assert!(out.join("2dCoords.csv").exists());
    assert!(out.join("AllCoords.csv").exists());
    assert!(!out.join("3dCoords.csv").exists());
    let written: RunReport =
        serde_json::from_str(&fs::read_to_string(out.join("report.json")).unwrap()).unwrap();
    assert_eq!(written.skipped_modes, report.skipped_modes);
}

#[test]
fn unknown_dimension_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write(dir.path(), "parts.csv", CATALOG_CSV);
    let out = dir.path().join("frontiers");

    let report = FrontierPipeline::new(
        Arc::new(CsvCatalogSource::new(&catalog)),
        exporters(&out),
        DriverConfig {
            parallel: true,
            modes: ModeSelection::only(ProjectionMode::Pairs),
        },
    )
    .with_dimensions(vec!["Speed".into(), "Drift".into(), "Weight".into()])
    .run(&CancellationToken::new())
    .unwrap();

    assert_eq!(report.pairs.attempted, 3);
    assert_eq!(report.pairs.succeeded, 1);
    let codes: Vec<_> = report
        .failures()
        .map(|f| f.error_code.clone().unwrap())
        .collect();
    assert_eq!(codes, vec!["UNKNOWN_DIMENSION", "UNKNOWN_DIMENSION"]);
    assert!(out.join("2dCoords.csv").exists());
}

#[test]
fn missing_catalog_file_fails_before_export() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("frontiers");
    let source = CsvCatalogSource::new(dir.path().join("absent.csv"));
    assert!(source.describe().ends_with("absent.csv"));

    let err = FrontierPipeline::new(Arc::new(source), exporters(&out), DriverConfig::default())
        .run(&CancellationToken::new())
        .unwrap_err();

    assert!(matches!(err, PipelineError::Source(_)));
    assert!(!out.exists());
}
