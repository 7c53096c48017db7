//! In-Memory Exporter
//!
//! Records exported reports and frontier sizes in memory.
//! Useful for testing.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::analysis::{CombinationTable, ProjectionKey, ProjectionResults, RunReport};
use crate::ports::{ExportError, FrontierExporter};

#[derive(Debug, Default)]
struct Recorded {
    reports: Vec<RunReport>,
    frontier_sizes: BTreeMap<ProjectionKey, usize>,
}

/// Exporter that keeps everything it is given.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExporter {
    recorded: Arc<Mutex<Recorded>>,
}

impl InMemoryExporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Reports exported so far, oldest first.
    pub fn reports(&self) -> Vec<RunReport> {
        self.lock().reports.clone()
    }

    pub fn export_count(&self) -> usize {
        self.lock().reports.len()
    }

    /// Frontier size of a successful projection from the latest export.
    pub fn frontier_size(&self, key: &ProjectionKey) -> Option<usize> {
        self.lock().frontier_sizes.get(key).copied()
    }

    pub fn clear(&self) {
        let mut recorded = self.lock();
        recorded.reports.clear();
        recorded.frontier_sizes.clear();
    }
}

impl FrontierExporter for InMemoryExporter {
    fn export(
        &self,
        _table: &CombinationTable,
        results: &ProjectionResults,
        report: &RunReport,
    ) -> Result<(), ExportError> {
        let mut recorded = self.lock();
        recorded.frontier_sizes = results
            .iter()
            .filter_map(|(key, outcome)| {
                outcome
                    .as_ref()
                    .ok()
                    .map(|o| (key.clone(), o.frontier.len()))
            })
            .collect();
        recorded.reports.push(report.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
