//! Kart Frontier - Pareto frontiers over Mario Kart part combinations
//!
//! Every character/kart/wheel/glider combination is scored by summing its
//! parts' attributes. For each pair, ordered triple, and the full set of
//! attributes the crate finds the non-dominated values and maps them back to
//! every combination that achieves them.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
