//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the engine to the filesystem:
//! - `catalog` - Catalog sources (CSV, YAML, in-memory)
//! - `export` - Frontier exporters (CSV tables, JSON report, in-memory)

pub mod catalog;
pub mod export;

mod csv_row;

pub use catalog::{CsvCatalogSource, InMemoryCatalogSource, SectionLayout, YamlCatalogSource};
pub use export::{CsvFrontierExporter, InMemoryExporter, JsonReportExporter};
