//! Projection keys and the per-projection result types.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use super::Combination;
use crate::domain::foundation::{AttributeSchema, CombinationId, EngineError};

/// Which enumeration a projection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Unordered pairs; the later name ranks.
    Pairs,
    /// Ordered triples; the third name ranks.
    Triples,
    /// Every requested name at once; nothing ranks.
    Full,
}

impl ProjectionMode {
    /// Distinct dimensions a projection of this mode needs.
    pub fn required_dimensions(&self) -> usize {
        match self {
            ProjectionMode::Pairs => 2,
            ProjectionMode::Triples => 3,
            ProjectionMode::Full => 1,
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProjectionMode::Pairs => "2d",
            ProjectionMode::Triples => "3d",
            ProjectionMode::Full => "all",
        };
        write!(f, "{}", s)
    }
}

/// Identifies one projection of the combination table.
///
/// Pair keys built by the driver hold the names in schema order, so the
/// second name is the ranking dimension. Triple keys are order sensitive.
/// A full key lists every dimension evaluated together.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", content = "dims", rename_all = "snake_case")]
pub enum ProjectionKey {
    Pair([String; 2]),
    Triple([String; 3]),
    Full(Vec<String>),
}

impl ProjectionKey {
    pub fn pair(first: impl Into<String>, second: impl Into<String>) -> Self {
        ProjectionKey::Pair([first.into(), second.into()])
    }

    pub fn triple(
        first: impl Into<String>,
        second: impl Into<String>,
        third: impl Into<String>,
    ) -> Self {
        ProjectionKey::Triple([first.into(), second.into(), third.into()])
    }

    pub fn full(dims: Vec<impl Into<String>>) -> Self {
        ProjectionKey::Full(dims.into_iter().map(|d| d.into()).collect())
    }

    pub fn mode(&self) -> ProjectionMode {
        match self {
            ProjectionKey::Pair(_) => ProjectionMode::Pairs,
            ProjectionKey::Triple(_) => ProjectionMode::Triples,
            ProjectionKey::Full(_) => ProjectionMode::Full,
        }
    }

    /// Dimension names in evaluation order.
    pub fn dims(&self) -> &[String] {
        match self {
            ProjectionKey::Pair(d) => d,
            ProjectionKey::Triple(d) => d,
            ProjectionKey::Full(d) => d,
        }
    }

    /// The last dimension for pairs and triples; `None` for full projections.
    pub fn ranking_dimension(&self) -> Option<&str> {
        match self {
            ProjectionKey::Full(_) => None,
            _ => self.dims().last().map(|s| s.as_str()),
        }
    }

    /// Validates the key against `schema` and resolves schema positions.
    ///
    /// # Errors
    ///
    /// - `InsufficientDimensions` if the key repeats a name and so has fewer
    ///   distinct names than its mode requires
    /// - `UnknownDimension` for a name missing from the schema
    pub fn resolve(&self, schema: &AttributeSchema) -> Result<Vec<usize>, EngineError> {
        let dims = self.dims();
        let distinct: HashSet<&str> = dims.iter().map(|d| d.as_str()).collect();
        let required = self.mode().required_dimensions();
        if distinct.len() < required || distinct.len() != dims.len() {
            return Err(EngineError::InsufficientDimensions {
                required: required.max(dims.len()),
                supplied: distinct.len(),
            });
        }
        schema.resolve(dims)
    }

    /// Puts a pair's names in schema order so the later attribute ranks.
    ///
    /// Triples and full keys are returned unchanged, as are pairs naming an
    /// attribute outside the schema.
    pub fn in_schema_order(self, schema: &AttributeSchema) -> Self {
        match self {
            ProjectionKey::Pair([a, b]) => match (schema.index_of(&a), schema.index_of(&b)) {
                (Some(i), Some(j)) if i > j => ProjectionKey::Pair([b, a]),
                _ => ProjectionKey::Pair([a, b]),
            },
            other => other,
        }
    }
}

impl fmt::Display for ProjectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionKey::Full(dims) => write!(f, "all {} attributes", dims.len()),
            _ => write!(f, "{}", self.dims().join(" vs ")),
        }
    }
}

/// A non-dominated projected vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontierPoint {
    /// Values in the projection's dimension order.
    pub values: Vec<f64>,
    /// First combination, in generation order, that projects to `values`.
    pub representative: CombinationId,
}

/// Pareto-optimal points of one projection, sorted by the first dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrontierSet {
    pub key: ProjectionKey,
    pub points: Vec<FrontierPoint>,
    #[serde(skip)]
    pub(crate) indices: Vec<usize>,
}

impl FrontierSet {
    pub fn dims(&self) -> &[String] {
        self.key.dims()
    }

    /// Schema positions of the projected dimensions.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True if some frontier point has exactly these values.
    pub fn contains_values(&self, values: &[f64]) -> bool {
        self.points.iter().any(|p| p.values.as_slice() == values)
    }
}

/// Every combination attaining a frontier point, ties included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestAchievers {
    pub key: ProjectionKey,
    pub ranking_dimension: String,
    /// Sorted by the first dimension, then by generation order.
    pub combinations: Vec<Combination>,
}

impl BestAchievers {
    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    /// Ids of the achieving combinations, in output order.
    pub fn ids(&self) -> Vec<CombinationId> {
        self.combinations.iter().map(|c| c.id).collect()
    }
}

/// Result of one successful projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionOutcome {
    pub frontier: FrontierSet,
    /// `None` for full projections, which have no ranking dimension.
    pub best: Option<BestAchievers>,
}

/// Results of a driver run keyed by projection, failures kept per key.
///
/// A mode that could not be formed from the supplied names is recorded once
/// as skipped instead of per key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectionResults {
    entries: BTreeMap<ProjectionKey, Result<ProjectionOutcome, EngineError>>,
    skipped: BTreeMap<ProjectionMode, EngineError>,
}

impl ProjectionResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ProjectionKey, outcome: Result<ProjectionOutcome, EngineError>) {
        self.entries.insert(key, outcome);
    }

    pub fn get(&self, key: &ProjectionKey) -> Option<&Result<ProjectionOutcome, EngineError>> {
        self.entries.get(key)
    }

    /// Looks up a pair in either order.
    pub fn pair(&self, a: &str, b: &str) -> Option<&Result<ProjectionOutcome, EngineError>> {
        self.get(&ProjectionKey::pair(a, b))
            .or_else(|| self.get(&ProjectionKey::pair(b, a)))
    }

    /// Looks up an ordered triple; `c` is the ranking dimension.
    pub fn triple(&self, a: &str, b: &str, c: &str) -> Option<&Result<ProjectionOutcome, EngineError>> {
        self.get(&ProjectionKey::triple(a, b, c))
    }

    /// The full projection, if one was run.
    pub fn full(&self) -> Option<&Result<ProjectionOutcome, EngineError>> {
        self.entries
            .iter()
            .find(|(k, _)| k.mode() == ProjectionMode::Full)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProjectionKey, &Result<ProjectionOutcome, EngineError>)> {
        self.entries.iter()
    }

    /// Successful projections of `mode`, in key order.
    pub fn successes(&self, mode: ProjectionMode) -> impl Iterator<Item = (&ProjectionKey, &ProjectionOutcome)> {
        self.entries
            .iter()
            .filter(move |(k, _)| k.mode() == mode)
            .filter_map(|(k, v)| v.as_ref().ok().map(|o| (k, o)))
    }

    /// Every failed projection with its error.
    pub fn failures(&self) -> impl Iterator<Item = (&ProjectionKey, &EngineError)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().err().map(|e| (k, e)))
    }

    /// Records that `mode` was not run at all.
    pub fn skip_mode(&mut self, mode: ProjectionMode, err: EngineError) {
        self.skipped.insert(mode, err);
    }

    /// Why `mode` was skipped, if it was.
    pub fn mode_failure(&self, mode: ProjectionMode) -> Option<&EngineError> {
        self.skipped.get(&mode)
    }

    /// Every skipped mode with its error, in evaluation order.
    pub fn skipped_modes(&self) -> impl Iterator<Item = (ProjectionMode, &EngineError)> {
        self.skipped.iter().map(|(m, e)| (*m, e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
