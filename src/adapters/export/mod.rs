//! Export Adapters
//!
//! Implementations of the FrontierExporter port.
//!
//! ## Available Adapters
//!
//! - **CsvFrontierExporter** - Coordinate and stats tables per projection mode
//! - **JsonReportExporter** - The run report as `report.json`
//! - **InMemoryExporter** - Records exports in memory (testing)

mod csv_tables;
mod in_memory;
mod json_report;

pub use csv_tables::{
    CsvFrontierExporter, FULL_COORDS_FILE, PAIR_COORDS_FILE, PAIR_STATS_FILE, TRIPLE_COORDS_FILE,
    TRIPLE_STATS_FILE,
};
pub use in_memory::InMemoryExporter;
pub use json_report::{JsonReportExporter, REPORT_FILE};
