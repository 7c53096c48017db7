//! Attribute schema and attribute vectors.
//!
//! Every vector in a run shares one [`AttributeSchema`]: the same names in
//! the same order. Vectors only hold finite values, so exact comparison is
//! well defined and dedup/joins can hash the bit patterns.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::{EngineError, ValidationError};

/// Stat names of Mario Kart 8 Deluxe parts, in data-file order.
pub static MARIO_KART_8_ATTRIBUTES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "Weight",
        "Acceleration",
        "On-road Traction",
        "Off-road Traction",
        "Mini-Turbo",
        "Ground Speed",
        "Water Speed",
        "Anti-gravity Speed",
        "Air Speed",
        "Ground Handling",
        "Water Handling",
        "Anti-gravity Handling",
        "Air Handling",
    ]
});

/// Ordered, duplicate-free list of attribute names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct AttributeSchema {
    names: Vec<String>,
}

impl AttributeSchema {
    /// Creates a schema, rejecting empty lists, empty names and duplicates.
    pub fn new(names: Vec<impl Into<String>>) -> Result<Self, ValidationError> {
        let names: Vec<String> = names.into_iter().map(|n| n.into()).collect();
        if names.is_empty() {
            return Err(ValidationError::empty_field("attribute schema"));
        }

        let mut seen = HashSet::new();
        for name in &names {
            if name.trim().is_empty() {
                return Err(ValidationError::empty_field("attribute name"));
            }
            if !seen.insert(name.as_str()) {
                return Err(ValidationError::duplicate_name("attribute", name.clone()));
            }
        }

        Ok(Self { names })
    }

    /// The 13-attribute Mario Kart 8 schema.
    pub fn mario_kart_8() -> Self {
        Self {
            names: MARIO_KART_8_ATTRIBUTES.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// Attribute names in schema order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of `name` in the schema.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Resolves dimension names to schema positions, preserving `dims` order.
    ///
    /// # Errors
    ///
    /// `UnknownDimension` for the first name not present in the schema.
    pub fn resolve<S: AsRef<str>>(&self, dims: &[S]) -> Result<Vec<usize>, EngineError> {
        dims.iter()
            .map(|d| {
                let d = d.as_ref();
                self.index_of(d)
                    .ok_or_else(|| EngineError::UnknownDimension(d.to_string()))
            })
            .collect()
    }
}

impl TryFrom<Vec<String>> for AttributeSchema {
    type Error = ValidationError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<AttributeSchema> for Vec<String> {
    fn from(schema: AttributeSchema) -> Self {
        schema.names
    }
}

impl fmt::Display for AttributeSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.join(", "))
    }
}

/// Finite attribute values laid out in schema order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeVector(Vec<f64>);

impl AttributeVector {
    /// Validates `values` for `part` against `schema`.
    pub fn try_new(
        part: &str,
        schema: &AttributeSchema,
        values: Vec<f64>,
    ) -> Result<Self, ValidationError> {
        if values.len() != schema.len() {
            return Err(ValidationError::length_mismatch(part, schema.len(), values.len()));
        }
        if let Some((i, v)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ValidationError::non_finite(part, &schema.names()[i], *v));
        }
        Ok(Self(values))
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Element-wise sum of several vectors of the same length.
    pub fn sum<'a>(parts: impl IntoIterator<Item = &'a AttributeVector>) -> Self {
        let mut total: Vec<f64> = Vec::new();
        for part in parts {
            if total.is_empty() {
                total = part.0.clone();
            } else {
                for (acc, v) in total.iter_mut().zip(&part.0) {
                    *acc += v;
                }
            }
        }
        Self(total)
    }

    /// Restricts the vector to the given schema positions.
    pub fn project(&self, indices: &[usize]) -> Vec<f64> {
        indices.iter().map(|&i| self.0[i]).collect()
    }

    /// True if both vectors hold exactly the same values.
    pub fn is_identical(&self, other: &AttributeVector) -> bool {
        canonical_bits(&self.0) == canonical_bits(&other.0)
    }
}

/// Bit patterns used as an exact-equality hash key for value tuples.
///
/// `-0.0` is folded onto `0.0` so both zeros compare equal, matching `==`.
pub fn canonical_bits(values: &[f64]) -> Vec<u64> {
    values
        .iter()
        .map(|v| if *v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> AttributeSchema {
        AttributeSchema::new(vec!["Speed", "Weight", "Handling"]).unwrap()
    }

    #[test]
    fn schema_rejects_empty_list() {
        let names: Vec<String> = vec![];
        assert!(matches!(
            AttributeSchema::new(names),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn schema_rejects_duplicates() {
        let err = AttributeSchema::new(vec!["Speed", "Speed"]).unwrap_err();
        assert_eq!(err, ValidationError::duplicate_name("attribute", "Speed"));
    }

    #[test]
    fn schema_rejects_blank_names() {
        assert!(AttributeSchema::new(vec!["Speed", "  "]).is_err());
    }

    #[test]
    fn mario_kart_schema_has_thirteen_attributes() {
        let schema = AttributeSchema::mario_kart_8();
        assert_eq!(schema.len(), 13);
        assert_eq!(schema.names()[0], "Weight");
        assert_eq!(schema.names()[12], "Air Handling");
    }

    #[test]
    fn resolve_preserves_requested_order() {
        let indices = schema().resolve(&["Handling", "Speed"]).unwrap();
        assert_eq!(indices, vec![2, 0]);
    }

    #[test]
    fn resolve_reports_unknown_dimension() {
        let err = schema().resolve(&["Speed", "Drift"]).unwrap_err();
        assert_eq!(err, EngineError::UnknownDimension("Drift".into()));
    }

    #[test]
    fn vector_rejects_wrong_length() {
        let err = AttributeVector::try_new("Mario", &schema(), vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err, ValidationError::length_mismatch("Mario", 3, 2));
    }

    #[test]
    fn vector_rejects_nan() {
        let err =
            AttributeVector::try_new("Mario", &schema(), vec![1.0, f64::NAN, 2.0]).unwrap_err();
        assert!(matches!(err, ValidationError::NonFiniteValue { ref attribute, .. } if attribute == "Weight"));
    }

    #[test]
    fn sum_adds_element_wise() {
        let s = schema();
        let a = AttributeVector::try_new("a", &s, vec![1.0, 2.0, 3.0]).unwrap();
        let b = AttributeVector::try_new("b", &s, vec![0.5, 0.25, -1.0]).unwrap();
        let total = AttributeVector::sum([&a, &b, &a]);
        assert_eq!(total.values(), &[2.5, 4.25, 5.0]);
    }

    #[test]
    fn project_picks_requested_positions() {
        let v = AttributeVector::try_new("a", &schema(), vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(v.project(&[2, 0]), vec![3.0, 1.0]);
    }

    #[test]
    fn signed_zeros_are_identical() {
        assert_eq!(canonical_bits(&[0.0]), canonical_bits(&[-0.0]));
        assert_ne!(canonical_bits(&[1.0]), canonical_bits(&[-1.0]));
    }

    #[test]
    fn schema_deserializes_with_validation() {
        let ok: AttributeSchema = serde_json::from_str(r#"["Speed","Weight"]"#).unwrap();
        assert_eq!(ok.len(), 2);
        assert!(serde_json::from_str::<AttributeSchema>(r#"["Speed","Speed"]"#).is_err());
    }
}
