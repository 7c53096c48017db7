//! Dominance Filter - Pareto-optimal subset of projected vectors.
//!
//! Uses simple culling: repeatedly take the front candidate out of the
//! working set, drop every point it dominates, and keep it unless some
//! remaining point dominates it. Points that dominate the candidate stay in
//! the working set for their own turn. Exact duplicates must be removed
//! first because equal vectors never dominate each other.

use std::cmp::Ordering;
use std::collections::{HashSet, VecDeque};

use super::{CombinationTable, FrontierPoint, FrontierSet, ProjectionKey};
use crate::domain::foundation::{canonical_bits, CancellationToken, CombinationId, EngineError};

/// Projected vector tagged with the combination it came from.
pub type ProjectedPoint = (CombinationId, Vec<f64>);

/// Pareto filtering over an arbitrary ordered set of dimensions.
pub struct DominanceFilter;

impl DominanceFilter {
    /// True if `a >= b` on every dimension.
    pub fn weakly_dominates(a: &[f64], b: &[f64]) -> bool {
        a.iter().zip(b).all(|(x, y)| x >= y)
    }

    /// True if `a >= b` on every dimension and `a != b`.
    ///
    /// # Edge Cases
    /// - Equal vectors: neither dominates the other
    pub fn dominates(a: &[f64], b: &[f64]) -> bool {
        Self::weakly_dominates(a, b) && a != b
    }

    /// Removes exact duplicate vectors, keeping the first occurrence.
    pub fn dedup(points: &[ProjectedPoint]) -> Vec<ProjectedPoint> {
        let mut seen = HashSet::with_capacity(points.len());
        points
            .iter()
            .filter(|(_, values)| seen.insert(canonical_bits(values)))
            .cloned()
            .collect()
    }

    /// Culls dominated points from an already deduplicated input.
    ///
    /// Survivors come out in the order they were taken as candidates.
    pub fn cull(points: Vec<ProjectedPoint>) -> Vec<ProjectedPoint> {
        let (frontier, _) = Self::cull_while(points, || true);
        frontier
    }

    /// Same as [`DominanceFilter::cull`], checking `cancel` before every candidate.
    pub fn cull_with_cancel(
        points: Vec<ProjectedPoint>,
        cancel: &CancellationToken,
    ) -> Result<Vec<ProjectedPoint>, EngineError> {
        let (frontier, completed) = Self::cull_while(points, || !cancel.is_cancelled());
        if completed {
            Ok(frontier)
        } else {
            Err(EngineError::Cancelled)
        }
    }

    /// Runs the culling loop while `keep_going` holds before each candidate.
    ///
    /// Returns the survivors and whether the working set was exhausted.
    fn cull_while(
        points: Vec<ProjectedPoint>,
        mut keep_going: impl FnMut() -> bool,
    ) -> (Vec<ProjectedPoint>, bool) {
        let mut working: VecDeque<ProjectedPoint> = points.into();
        let mut frontier = Vec::new();

        while let Some(candidate) = working.pop_front() {
            if !keep_going() {
                return (frontier, false);
            }

            let mut non_dominated = true;
            working.retain(|row| {
                if Self::dominates(&candidate.1, &row.1) {
                    return false;
                }
                if Self::dominates(&row.1, &candidate.1) {
                    non_dominated = false;
                }
                true
            });

            if non_dominated {
                frontier.push(candidate);
            }
        }

        (frontier, true)
    }

    /// Deduplicates, culls and sorts ascending by the first dimension.
    pub fn filter(points: &[ProjectedPoint]) -> Vec<FrontierPoint> {
        let frontier = Self::cull(Self::dedup(points));
        Self::sorted(frontier)
    }

    /// Cancellable form of [`DominanceFilter::filter`].
    pub fn filter_with_cancel(
        points: &[ProjectedPoint],
        cancel: &CancellationToken,
    ) -> Result<Vec<FrontierPoint>, EngineError> {
        let frontier = Self::cull_with_cancel(Self::dedup(points), cancel)?;
        Ok(Self::sorted(frontier))
    }

    /// Computes the frontier of `table` projected onto the dimensions of `key`.
    ///
    /// # Errors
    ///
    /// - `UnknownDimension` / `InsufficientDimensions` from key resolution
    /// - `EmptyInput` if the table is empty
    /// - `Cancelled` if `cancel` fires between candidates
    pub fn frontier(
        table: &CombinationTable,
        key: &ProjectionKey,
        cancel: &CancellationToken,
    ) -> Result<FrontierSet, EngineError> {
        let indices = key.resolve(table.schema())?;
        if table.is_empty() {
            return Err(EngineError::empty_input("combination table"));
        }

        let points = Self::filter_with_cancel(&table.project(&indices), cancel)?;
        Ok(FrontierSet {
            key: key.clone(),
            points,
            indices,
        })
    }

    fn sorted(frontier: Vec<ProjectedPoint>) -> Vec<FrontierPoint> {
        let mut points: Vec<FrontierPoint> = frontier
            .into_iter()
            .map(|(representative, values)| FrontierPoint {
                values,
                representative,
            })
            .collect();
        points.sort_by(|a, b| {
            a.values
                .first()
                .partial_cmp(&b.values.first())
                .unwrap_or(Ordering::Equal)
        });
        points
    }
}
