//! Catalog Adapters
//!
//! Implementations of the CatalogSource port.
//!
//! ## Available Adapters
//!
//! - **CsvCatalogSource** - One sectioned table, the layout of the published stat sheet
//! - **YamlCatalogSource** - One mapping of parts per slot
//! - **InMemoryCatalogSource** - Prebuilt catalogs (testing/embedding)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::catalog::{CsvCatalogSource, SectionLayout};
//!
//! let source = CsvCatalogSource::new("./data/MK8Data.csv")
//!     .with_layout(SectionLayout::default());
//! let catalogs = source.load()?;
//! ```

mod csv_table;
mod in_memory;
mod yaml_document;

pub use csv_table::{CsvCatalogSource, SectionLayout};
pub use in_memory::InMemoryCatalogSource;
pub use yaml_document::YamlCatalogSource;
