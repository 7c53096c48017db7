//! ProjectionDriver - Runs the dominance filter and mapper across projections.
//!
//! Enumerates the requested dimension subsets (unordered pairs, ordered
//! triples, the full set), evaluates each against one shared
//! [`CombinationTable`] and collects the outcomes keyed by projection.
//!
//! Failures are isolated per projection: an unknown dimension fails only the
//! keys that mention it. A mode that cannot be formed at all from the
//! supplied names is recorded as skipped while the other modes still run.
//! Pair keys are stored in schema order.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::analysis::{
    CombinationTable, DominanceFilter, FrontierMapper, ProjectionKey, ProjectionMode,
    ProjectionOutcome, ProjectionResults,
};
use crate::domain::foundation::{CancellationToken, EngineError};

/// Which enumerations a run evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeSelection {
    pub pairs: bool,
    pub triples: bool,
    pub full: bool,
}

impl ModeSelection {
    /// Every mode enabled.
    pub fn all() -> Self {
        Self {
            pairs: true,
            triples: true,
            full: true,
        }
    }

    /// Only the given mode enabled.
    pub fn only(mode: ProjectionMode) -> Self {
        Self {
            pairs: mode == ProjectionMode::Pairs,
            triples: mode == ProjectionMode::Triples,
            full: mode == ProjectionMode::Full,
        }
    }

    pub fn is_enabled(&self, mode: ProjectionMode) -> bool {
        match mode {
            ProjectionMode::Pairs => self.pairs,
            ProjectionMode::Triples => self.triples,
            ProjectionMode::Full => self.full,
        }
    }

    /// Enabled modes in evaluation order.
    pub fn enabled(&self) -> Vec<ProjectionMode> {
        [ProjectionMode::Pairs, ProjectionMode::Triples, ProjectionMode::Full]
            .into_iter()
            .filter(|m| self.is_enabled(*m))
            .collect()
    }

    pub fn any(&self) -> bool {
        self.pairs || self.triples || self.full
    }
}

impl Default for ModeSelection {
    fn default() -> Self {
        Self::all()
    }
}

/// Driver settings passed in per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Dispatch projections on the rayon pool instead of one by one.
    pub parallel: bool,
    pub modes: ModeSelection,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            modes: ModeSelection::all(),
        }
    }
}

/// Evaluates projections over a read-only combination table.
#[derive(Debug, Clone, Default)]
pub struct ProjectionDriver {
    config: DriverConfig,
}

impl ProjectionDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Every unordered pair of `dims`, earlier name first.
    pub fn pair_keys<S: AsRef<str>>(dims: &[S]) -> Vec<ProjectionKey> {
        let mut keys = Vec::new();
        for (i, a) in dims.iter().enumerate() {
            for b in &dims[i + 1..] {
                keys.push(ProjectionKey::pair(a.as_ref(), b.as_ref()));
            }
        }
        keys
    }

    /// Every ordered triple of distinct positions in `dims`.
    pub fn triple_keys<S: AsRef<str>>(dims: &[S]) -> Vec<ProjectionKey> {
        let mut keys = Vec::new();
        for (i, a) in dims.iter().enumerate() {
            for (j, b) in dims.iter().enumerate() {
                if j == i {
                    continue;
                }
                for (k, c) in dims.iter().enumerate() {
                    if k == i || k == j {
                        continue;
                    }
                    keys.push(ProjectionKey::triple(a.as_ref(), b.as_ref(), c.as_ref()));
                }
            }
        }
        keys
    }

    /// Filters one projection and maps its frontier back onto the table.
    pub fn run_projection(
        &self,
        table: &CombinationTable,
        key: &ProjectionKey,
        cancel: &CancellationToken,
    ) -> Result<ProjectionOutcome, EngineError> {
        cancel.check()?;
        let frontier = DominanceFilter::frontier(table, key, cancel)?;
        let best = FrontierMapper::map_back(&frontier, table);

        debug!(
            projection = %key,
            frontier = frontier.len(),
            achievers = best.as_ref().map_or(0, |b| b.len()),
            "Projection evaluated"
        );

        Ok(ProjectionOutcome { frontier, best })
    }

    /// Runs every unordered pair of `dims`.
    ///
    /// # Errors
    ///
    /// `InsufficientDimensions` if fewer than two distinct names are given.
    pub fn run_pairs<S: AsRef<str>>(
        &self,
        table: &CombinationTable,
        dims: &[S],
        cancel: &CancellationToken,
    ) -> Result<ProjectionResults, EngineError> {
        let mut results = ProjectionResults::new();
        self.run_mode(ProjectionMode::Pairs, table, &distinct(dims), cancel, &mut results)?;
        Ok(results)
    }

    /// Runs every ordered triple of `dims`.
    ///
    /// # Errors
    ///
    /// `InsufficientDimensions` if fewer than three distinct names are given.
    pub fn run_triples<S: AsRef<str>>(
        &self,
        table: &CombinationTable,
        dims: &[S],
        cancel: &CancellationToken,
    ) -> Result<ProjectionResults, EngineError> {
        let mut results = ProjectionResults::new();
        self.run_mode(ProjectionMode::Triples, table, &distinct(dims), cancel, &mut results)?;
        Ok(results)
    }

    /// Runs one projection over all of `dims` at once, without map-back.
    pub fn run_full<S: AsRef<str>>(
        &self,
        table: &CombinationTable,
        dims: &[S],
        cancel: &CancellationToken,
    ) -> Result<ProjectionResults, EngineError> {
        let mut results = ProjectionResults::new();
        self.run_mode(ProjectionMode::Full, table, &distinct(dims), cancel, &mut results)?;
        Ok(results)
    }

    /// Runs every enabled mode over `dims`.
    ///
    /// Repeated names are ignored after their first occurrence. Once `cancel`
    /// fires, projections not yet started are recorded as `Cancelled`. An
    /// enabled mode needing more distinct names than were supplied is
    /// recorded via [`ProjectionResults::skip_mode`].
    ///
    /// # Errors
    ///
    /// `InsufficientDimensions` if no enabled mode can run. Nothing is
    /// evaluated in that case.
    pub fn run_all<S: AsRef<str>>(
        &self,
        table: &CombinationTable,
        dims: &[S],
        cancel: &CancellationToken,
    ) -> Result<ProjectionResults, EngineError> {
        let dims = distinct(dims);
        let modes = self.config.modes.enabled();
        let mut runnable = Vec::with_capacity(modes.len());
        let mut skipped = Vec::new();
        for mode in modes {
            match ensure_enough(mode, dims.len()) {
                Ok(()) => runnable.push(mode),
                Err(err) => skipped.push((mode, err)),
            }
        }
        if runnable.is_empty() {
            if let Some((_, err)) = skipped.first() {
                return Err(err.clone());
            }
        }

        let started = Instant::now();
        let mut results = ProjectionResults::new();
        for (mode, err) in skipped {
            warn!(mode = %mode, code = %err.code(), error = %err, "Skipping projection mode");
            results.skip_mode(mode, err);
        }
        for mode in runnable {
            self.run_mode(mode, table, &dims, cancel, &mut results)?;
        }

        info!(
            projections = results.len(),
            failed = results.failures().count(),
            skipped_modes = results.skipped_modes().count(),
            combinations = table.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Projection run finished"
        );
        Ok(results)
    }

    /// Runs every enabled mode over the table's whole schema.
    pub fn run_schema(
        &self,
        table: &CombinationTable,
        cancel: &CancellationToken,
    ) -> Result<ProjectionResults, EngineError> {
        self.run_all(table, table.schema().names(), cancel)
    }

    fn run_mode(
        &self,
        mode: ProjectionMode,
        table: &CombinationTable,
        dims: &[String],
        cancel: &CancellationToken,
        results: &mut ProjectionResults,
    ) -> Result<(), EngineError> {
        ensure_enough(mode, dims.len())?;

        let keys = match mode {
            ProjectionMode::Pairs => Self::pair_keys(dims)
                .into_iter()
                .map(|key| key.in_schema_order(table.schema()))
                .collect(),
            ProjectionMode::Triples => Self::triple_keys(dims),
            ProjectionMode::Full => vec![ProjectionKey::full(dims.to_vec())],
        };
        debug!(mode = %mode, projections = keys.len(), parallel = self.config.parallel, "Dispatching projections");

        let outcomes: Vec<_> = if self.config.parallel {
            keys.into_par_iter()
                .map(|key| {
                    let outcome = self.run_projection(table, &key, cancel);
                    (key, outcome)
                })
                .collect()
        } else {
            keys.into_iter()
                .map(|key| {
                    let outcome = self.run_projection(table, &key, cancel);
                    (key, outcome)
                })
                .collect()
        };

        for (key, outcome) in outcomes {
            if let Err(err) = &outcome {
                if *err != EngineError::Cancelled {
                    warn!(projection = %key, code = %err.code(), error = %err, "Projection failed");
                }
            }
            results.insert(key, outcome);
        }
        Ok(())
    }
}

fn distinct<S: AsRef<str>>(dims: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(dims.len());
    for d in dims {
        let d = d.as_ref();
        if !out.iter().any(|seen| seen == d) {
            out.push(d.to_string());
        }
    }
    out
}

fn ensure_enough(mode: ProjectionMode, supplied: usize) -> Result<(), EngineError> {
    let required = mode.required_dimensions();
    if supplied < required {
        return Err(EngineError::InsufficientDimensions { required, supplied });
    }
    Ok(())
}
