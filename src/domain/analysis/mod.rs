//! Analysis Module - Pure domain services for Pareto frontier analysis.
//!
//! # Components
//!
//! - `CombinationTable` - Cross product of the four slot catalogs
//! - `DominanceFilter` - Non-dominated subset of a projection
//! - `FrontierMapper` - Combinations attaining each frontier point, ties included
//! - `ProjectionResults` - Per-projection outcomes, failures kept per key
//! - `RunReport` - Serializable digest of a run
//!
//! Everything here is synchronous and free of I/O.

mod combination_table;
mod dominance_filter;
mod frontier_mapper;
mod projection;
mod summary;

pub use combination_table::{Combination, CombinationTable};
pub use dominance_filter::{DominanceFilter, ProjectedPoint};
pub use frontier_mapper::FrontierMapper;
pub use projection::{
    BestAchievers, FrontierPoint, FrontierSet, ProjectionKey, ProjectionMode, ProjectionOutcome,
    ProjectionResults,
};
pub use summary::{ModeCounts, ProjectionSummary, RunReport, SkippedMode};
