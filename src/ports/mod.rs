//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the engine and the outside world. Adapters implement these ports.
//!
//! - `CatalogSource` - Loads the four part catalogs before a run
//! - `FrontierExporter` - Publishes frontiers and reports after a run

mod catalog_source;
mod frontier_exporter;

pub use catalog_source::{CatalogFormat, CatalogSource, CatalogSourceError};
pub use frontier_exporter::{ExportError, FrontierExporter};
