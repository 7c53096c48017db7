//! Catalog Module - the per-slot part tables a run starts from.
//!
//! # Components
//!
//! - `PartCatalog` - ordered part name -> attribute delta mapping for one slot
//! - `CatalogSet` - the four catalogs, schema-checked and deduplicated

mod catalog_set;
mod part_catalog;

pub use catalog_set::CatalogSet;
pub use part_catalog::{CollapsedPart, Part, PartCatalog, PartCatalogBuilder};
