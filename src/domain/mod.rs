//! Domain layer containing the frontier engine and its vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (attribute schema, IDs, slots, errors)
//! - `catalog` - Per-slot part catalogs and the validated catalog set
//! - `analysis` - Combination generation, dominance filtering and map-back

pub mod analysis;
pub mod catalog;
pub mod foundation;
