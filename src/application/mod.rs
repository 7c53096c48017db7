//! Application layer - Orchestration of the frontier engine.
//!
//! - `ProjectionDriver` enumerates projections and collects their outcomes
//! - `FrontierPipeline` wires a catalog source and exporters around a run

mod frontier_pipeline;
mod projection_driver;

pub use frontier_pipeline::{FrontierPipeline, PipelineError, PipelineOutput};
pub use projection_driver::{DriverConfig, ModeSelection, ProjectionDriver};
