//! CSV Frontier Exporter
//!
//! Writes one table per projection mode into an output directory:
//!
//! | File            | Columns                                                     |
//! |-----------------|-------------------------------------------------------------|
//! | `2dCoords.csv`  | `Coord1,Coord2,Ind,Value1,Value2`                           |
//! | `2dStats.csv`   | `Coord1,Coord2,Ind,Character,Kart,Wheel,Glider,<attrs>`     |
//! | `3dCoords.csv`  | `Coord1,Coord2,Coord3,Ind,Value1,Value2,Value3`             |
//! | `3dStats.csv`   | `Coord1,Coord2,Coord3,Ind,Character,Kart,Wheel,Glider,<attrs>` |
//! | `AllCoords.csv` | `Ind,<dims>`                                                |
//!
//! `Ind` restarts at 0 for every projection. A file is only written when the
//! results contain its mode.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::adapters::csv_row::quote_field;
use crate::domain::analysis::{
    CombinationTable, ProjectionMode, ProjectionResults, RunReport,
};
use crate::domain::foundation::Slot;
use crate::ports::{ExportError, FrontierExporter};

pub const PAIR_COORDS_FILE: &str = "2dCoords.csv";
pub const PAIR_STATS_FILE: &str = "2dStats.csv";
pub const TRIPLE_COORDS_FILE: &str = "3dCoords.csv";
pub const TRIPLE_STATS_FILE: &str = "3dStats.csv";
pub const FULL_COORDS_FILE: &str = "AllCoords.csv";

/// Exporter writing frontier tables as CSV files.
#[derive(Debug, Clone)]
pub struct CsvFrontierExporter {
    output_dir: PathBuf,
}

impl CsvFrontierExporter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn write_table(
        &self,
        file_name: &str,
        write: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
    ) -> Result<(), ExportError> {
        let path = self.output_dir.join(file_name);
        let file = File::create(&path).map_err(|e| ExportError::io(&path, e))?;
        let mut out = BufWriter::new(file);
        write(&mut out)
            .and_then(|_| out.flush())
            .map_err(|e| ExportError::io(&path, e))?;
        debug!(path = %path.display(), "Wrote frontier table");
        Ok(())
    }
}

fn has_mode(results: &ProjectionResults, mode: ProjectionMode) -> bool {
    results.iter().any(|(key, _)| key.mode() == mode)
}

fn coord_headers(arity: usize) -> Vec<String> {
    (1..=arity).map(|i| format!("Coord{}", i)).collect()
}

fn key_fields(dims: &[String]) -> String {
    dims.iter()
        .map(|d| quote_field(d).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

fn number_fields(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn write_coords(
    out: &mut impl Write,
    results: &ProjectionResults,
    mode: ProjectionMode,
) -> io::Result<()> {
    let arity = mode.required_dimensions();
    let values: Vec<String> = (1..=arity).map(|i| format!("Value{}", i)).collect();
    writeln!(out, "{},Ind,{}", coord_headers(arity).join(","), values.join(","))?;

    for (key, outcome) in results.successes(mode) {
        let coords = key_fields(key.dims());
        for (ind, point) in outcome.frontier.points.iter().enumerate() {
            writeln!(out, "{},{},{}", coords, ind, number_fields(&point.values))?;
        }
    }
    Ok(())
}

fn write_stats(
    out: &mut impl Write,
    table: &CombinationTable,
    results: &ProjectionResults,
    mode: ProjectionMode,
) -> io::Result<()> {
    let arity = mode.required_dimensions();
    let slots: Vec<&str> = Slot::all().iter().map(|s| s.display_name()).collect();
    writeln!(
        out,
        "{},Ind,{},{}",
        coord_headers(arity).join(","),
        slots.join(","),
        key_fields(table.schema().names())
    )?;

    for (key, outcome) in results.successes(mode) {
        let Some(best) = &outcome.best else {
            continue;
        };
        let coords = key_fields(key.dims());
        for (ind, combination) in best.combinations.iter().enumerate() {
            writeln!(
                out,
                "{},{},{},{}",
                coords,
                ind,
                key_fields(&combination.parts),
                number_fields(combination.stats.values())
            )?;
        }
    }
    Ok(())
}

fn write_full(out: &mut impl Write, results: &ProjectionResults) -> io::Result<()> {
    let Some(Ok(outcome)) = results.full() else {
        return Ok(());
    };
    writeln!(out, "Ind,{}", key_fields(outcome.frontier.dims()))?;
    for (ind, point) in outcome.frontier.points.iter().enumerate() {
        writeln!(out, "{},{}", ind, number_fields(&point.values))?;
    }
    Ok(())
}

impl FrontierExporter for CsvFrontierExporter {
    fn export(
        &self,
        table: &CombinationTable,
        results: &ProjectionResults,
        _report: &RunReport,
    ) -> Result<(), ExportError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| ExportError::io(&self.output_dir, e))?;

        for (key, err) in results.failures() {
            warn!(projection = %key, code = %err.code(), "Skipping failed projection in CSV export");
        }
        for (mode, err) in results.skipped_modes() {
            debug!(mode = %mode, code = %err.code(), "No CSV tables for skipped mode");
        }

        if has_mode(results, ProjectionMode::Pairs) {
            self.write_table(PAIR_COORDS_FILE, |out| {
                write_coords(out, results, ProjectionMode::Pairs)
            })?;
            self.write_table(PAIR_STATS_FILE, |out| {
                write_stats(out, table, results, ProjectionMode::Pairs)
            })?;
        }
        if has_mode(results, ProjectionMode::Triples) {
            self.write_table(TRIPLE_COORDS_FILE, |out| {
                write_coords(out, results, ProjectionMode::Triples)
            })?;
            self.write_table(TRIPLE_STATS_FILE, |out| {
                write_stats(out, table, results, ProjectionMode::Triples)
            })?;
        }
        if matches!(results.full(), Some(Ok(_))) {
            self.write_table(FULL_COORDS_FILE, |out| write_full(out, results))?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}
