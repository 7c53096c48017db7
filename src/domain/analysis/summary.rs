//! Run summaries.
//!
//! A [`RunReport`] is the serializable digest of one driver run: what went
//! in, how many projections succeeded per mode, and the size of every
//! frontier. It carries no frontier points itself.

use serde::{Deserialize, Serialize};

use super::{CombinationTable, ProjectionKey, ProjectionMode, ProjectionResults};
use crate::domain::catalog::CollapsedPart;
use crate::domain::foundation::{AttributeSchema, RunId, Timestamp};

/// Outcome of one projection, reduced to sizes or the failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub key: ProjectionKey,
    /// Distinct frontier points; `None` if the projection failed.
    pub frontier_size: Option<usize>,
    /// Combinations attaining the frontier; `None` for full projections
    /// and failures.
    pub achiever_count: Option<usize>,
    /// Stable error code, e.g. `UNKNOWN_DIMENSION`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProjectionSummary {
    pub fn is_success(&self) -> bool {
        self.error_code.is_none()
    }
}

/// An enabled mode that never ran because too few names were supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedMode {
    pub mode: ProjectionMode,
    pub error_code: String,
    pub error: String,
}

/// Attempted/succeeded counts for one projection mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeCounts {
    pub attempted: usize,
    pub succeeded: usize,
}

impl ModeCounts {
    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }
}

/// Digest of one complete run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub started_at: Timestamp,
    pub computed_at: Timestamp,
    pub elapsed_ms: u64,
    pub schema: AttributeSchema,
    pub combination_count: usize,
    /// Parts dropped because an earlier part in the same slot had
    /// identical stats.
    pub collapsed_parts: Vec<CollapsedPart>,
    pub pairs: ModeCounts,
    pub triples: ModeCounts,
    pub full: ModeCounts,
    /// One entry per projection, in key order.
    pub projections: Vec<ProjectionSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_modes: Vec<SkippedMode>,
}

impl RunReport {
    /// Summarizes `results` computed over `table`.
    pub fn build(
        run_id: RunId,
        started_at: Timestamp,
        table: &CombinationTable,
        collapsed_parts: &[CollapsedPart],
        results: &ProjectionResults,
    ) -> Self {
        let computed_at = Timestamp::now();
        let mut pairs = ModeCounts::default();
        let mut triples = ModeCounts::default();
        let mut full = ModeCounts::default();
        let mut projections = Vec::with_capacity(results.len());

        for (key, outcome) in results.iter() {
            let counts = match key.mode() {
                ProjectionMode::Pairs => &mut pairs,
                ProjectionMode::Triples => &mut triples,
                ProjectionMode::Full => &mut full,
            };
            counts.attempted += 1;

            let summary = match outcome {
                Ok(outcome) => {
                    counts.succeeded += 1;
                    ProjectionSummary {
                        key: key.clone(),
                        frontier_size: Some(outcome.frontier.len()),
                        achiever_count: outcome.best.as_ref().map(|b| b.len()),
                        error_code: None,
                        error: None,
                    }
                }
                Err(err) => ProjectionSummary {
                    key: key.clone(),
                    frontier_size: None,
                    achiever_count: None,
                    error_code: Some(err.code().to_string()),
                    error: Some(err.to_string()),
                },
            };
            projections.push(summary);
        }

        let skipped_modes = results
            .skipped_modes()
            .map(|(mode, err)| SkippedMode {
                mode,
                error_code: err.code().to_string(),
                error: err.to_string(),
            })
            .collect();

        Self {
            run_id,
            started_at,
            computed_at,
            elapsed_ms: computed_at.millis_since(&started_at),
            schema: table.schema().clone(),
            combination_count: table.len(),
            collapsed_parts: collapsed_parts.to_vec(),
            pairs,
            triples,
            full,
            projections,
            skipped_modes,
        }
    }

    /// Projections that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ProjectionSummary> {
        self.projections.iter().filter(|p| !p.is_success())
    }

    /// True if every enabled mode ran and every projection succeeded.
    pub fn is_clean(&self) -> bool {
        self.skipped_modes.is_empty() && self.failures().next().is_none()
    }
}
