//! Part Catalog - named attribute deltas for one slot.

use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::domain::foundation::{canonical_bits, AttributeSchema, AttributeVector, Slot, ValidationError};

/// A single part and the stats it contributes to a combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Part {
    pub name: String,
    pub stats: AttributeVector,
}

/// A part removed because an earlier part has bit-identical stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapsedPart {
    pub slot: Slot,
    pub dropped: String,
    pub kept: String,
}

/// Ordered mapping from part name to attribute delta for one slot.
///
/// Names are unique within a catalog and iteration follows insertion order,
/// which fixes the order of the generated cross product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartCatalog {
    slot: Slot,
    schema: AttributeSchema,
    parts: Vec<Part>,
}

impl PartCatalog {
    /// Creates an empty catalog for `slot`.
    pub fn new(slot: Slot, schema: AttributeSchema) -> Self {
        Self {
            slot,
            schema,
            parts: Vec::new(),
        }
    }

    /// Creates a builder for constructing a catalog.
    pub fn builder(slot: Slot, schema: AttributeSchema) -> PartCatalogBuilder {
        PartCatalogBuilder::new(slot, schema)
    }

    /// Adds a part, validating its name and values against the schema.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<(), ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("part name"));
        }
        if self.parts.iter().any(|p| p.name == name) {
            return Err(ValidationError::duplicate_name(
                format!("{} part", self.slot.display_name().to_lowercase()),
                name,
            ));
        }
        let stats = AttributeVector::try_new(&name, &self.schema, values)?;
        self.parts.push(Part { name, stats });
        Ok(())
    }

    /// Collapses parts whose stats are bit-identical to an earlier part.
    ///
    /// The first inserted name survives. Returns what was removed.
    pub fn dedup_identical(&mut self) -> Vec<CollapsedPart> {
        let mut seen: HashMap<Vec<u64>, String> = HashMap::with_capacity(self.parts.len());
        let mut collapsed = Vec::new();

        let keep: Vec<bool> = self
            .parts
            .iter()
            .map(|part| match seen.entry(canonical_bits(part.stats.values())) {
                Entry::Occupied(kept) => {
                    collapsed.push(CollapsedPart {
                        slot: self.slot,
                        dropped: part.name.clone(),
                        kept: kept.get().clone(),
                    });
                    false
                }
                Entry::Vacant(slot) => {
                    slot.insert(part.name.clone());
                    true
                }
            })
            .collect();

        if !collapsed.is_empty() {
            let parts = std::mem::take(&mut self.parts);
            self.parts = parts
                .into_iter()
                .zip(keep)
                .filter_map(|(part, kept)| kept.then_some(part))
                .collect();
        }
        collapsed
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Looks up a part by name.
    pub fn get(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Builder for constructing PartCatalog instances.
#[derive(Debug)]
pub struct PartCatalogBuilder {
    catalog: PartCatalog,
    pending: Vec<(String, Vec<f64>)>,
}

impl PartCatalogBuilder {
    /// Creates a new builder.
    pub fn new(slot: Slot, schema: AttributeSchema) -> Self {
        Self {
            catalog: PartCatalog::new(slot, schema),
            pending: Vec::new(),
        }
    }

    /// Queues a part.
    pub fn part(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.pending.push((name.into(), values));
        self
    }

    /// Validates every queued part and builds the catalog.
    pub fn build(self) -> Result<PartCatalog, ValidationError> {
        let mut catalog = self.catalog;
        for (name, values) in self.pending {
            catalog.insert(name, values)?;
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> AttributeSchema {
        AttributeSchema::new(vec!["Speed", "Weight"]).unwrap()
    }

    #[test]
    fn builder_preserves_insertion_order() {
        let catalog = PartCatalog::builder(Slot::Kart, schema())
            .part("Pipe Frame", vec![1.0, 2.0])
            .part("Mach 8", vec![3.0, 1.0])
            .build()
            .unwrap();

        let names: Vec<_> = catalog.parts().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Pipe Frame", "Mach 8"]);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn insert_rejects_duplicate_name() {
        let err = PartCatalog::builder(Slot::Kart, schema())
            .part("Pipe Frame", vec![1.0, 2.0])
            .part("Pipe Frame", vec![3.0, 1.0])
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::duplicate_name("kart part", "Pipe Frame"));
    }

    #[test]
    fn insert_rejects_wrong_width() {
        let mut catalog = PartCatalog::new(Slot::Wheel, schema());
        assert!(catalog.insert("Slick", vec![1.0]).is_err());
        assert!(catalog.is_empty());
    }

    #[test]
    fn insert_rejects_empty_name() {
        let mut catalog = PartCatalog::new(Slot::Wheel, schema());
        assert_eq!(
            catalog.insert(" ", vec![1.0, 1.0]),
            Err(ValidationError::empty_field("part name"))
        );
    }

    #[test]
    fn dedup_keeps_first_name() {
        let mut catalog = PartCatalog::builder(Slot::Character, schema())
            .part("Mario", vec![1.0, 2.0])
            .part("Luigi", vec![1.5, 2.0])
            .part("Tanooki Mario", vec![1.0, 2.0])
            .part("Metal Mario", vec![1.0, 2.0])
            .build()
            .unwrap();

        let collapsed = catalog.dedup_identical();

        let names: Vec<_> = catalog.parts().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Mario", "Luigi"]);
        assert_eq!(collapsed.len(), 2);
        assert_eq!(collapsed[0].dropped, "Tanooki Mario");
        assert_eq!(collapsed[0].kept, "Mario");
        assert_eq!(collapsed[1].dropped, "Metal Mario");
    }

    #[test]
    fn dedup_handles_interleaved_groups_and_signed_zero() {
        let mut catalog = PartCatalog::builder(Slot::Wheel, schema())
            .part("Standard", vec![0.0, 0.0])
            .part("Slick", vec![1.0, -1.0])
            .part("Blue Standard", vec![-0.0, 0.0])
            .part("Monster", vec![2.0, 2.0])
            .part("Cyber Slick", vec![1.0, -1.0])
            .part("Ancient Tires", vec![2.0, 2.0])
            .build()
            .unwrap();

        let collapsed = catalog.dedup_identical();

        let names: Vec<_> = catalog.parts().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Standard", "Slick", "Monster"]);
        let pairs: Vec<_> = collapsed
            .iter()
            .map(|c| (c.dropped.as_str(), c.kept.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Blue Standard", "Standard"),
                ("Cyber Slick", "Slick"),
                ("Ancient Tires", "Monster"),
            ]
        );
    }

    #[test]
    fn dedup_without_duplicates_is_noop() {
        let mut catalog = PartCatalog::builder(Slot::Glider, schema())
            .part("Super Glider", vec![0.0, 1.0])
            .part("Parafoil", vec![1.0, 0.0])
            .build()
            .unwrap();
        assert!(catalog.dedup_identical().is_empty());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn get_finds_part_by_name() {
        let catalog = PartCatalog::builder(Slot::Glider, schema())
            .part("Super Glider", vec![0.0, 1.0])
            .build()
            .unwrap();
        assert_eq!(catalog.get("Super Glider").unwrap().stats.values(), &[0.0, 1.0]);
        assert!(catalog.get("Parafoil").is_none());
    }
}
