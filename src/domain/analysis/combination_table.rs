//! Combination Table - the full cross product of the four slot catalogs.

use serde::Serialize;

use crate::domain::catalog::CatalogSet;
use crate::domain::foundation::{
    AttributeSchema, AttributeVector, CombinationId, EngineError, Slot, ValidationError,
};

/// One part from every slot plus the summed stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Combination {
    pub id: CombinationId,
    /// Part names in slot order: character, kart, wheel, glider.
    pub parts: [String; 4],
    pub stats: AttributeVector,
}

impl Combination {
    /// Part name chosen for `slot`.
    pub fn part(&self, slot: Slot) -> &str {
        &self.parts[slot.order_index()]
    }

    /// Joined label, e.g. `Mario_Standard Kart_Standard_Super Glider`.
    pub fn label(&self) -> String {
        self.parts.join("_")
    }
}

/// Read-only table of every combination, in generation order.
#[derive(Debug, Clone, Serialize)]
pub struct CombinationTable {
    schema: AttributeSchema,
    combinations: Vec<Combination>,
}

impl CombinationTable {
    /// Generates the cross product of the four catalogs.
    ///
    /// Iteration runs slot1 outermost to slot4 innermost, each catalog in its
    /// own order. Each combination's stats are the element-wise sum of the
    /// four part deltas.
    ///
    /// # Errors
    ///
    /// - `EmptyInput` if the product is empty
    /// - `Validation` if the product does not fit the id space
    pub fn generate(set: &CatalogSet) -> Result<Self, EngineError> {
        let count = set.combination_count();
        if count == 0 {
            return Err(EngineError::empty_input("combination table"));
        }
        if count > u32::MAX as usize {
            return Err(ValidationError::invalid_format(
                "combination table",
                format!("{} combinations exceed the supported maximum", count),
            )
            .into());
        }

        let [characters, karts, wheels, gliders] = set.catalogs();
        let mut combinations = Vec::with_capacity(count);

        for c in characters.parts() {
            for k in karts.parts() {
                for w in wheels.parts() {
                    for g in gliders.parts() {
                        let id = CombinationId::new(combinations.len() as u32);
                        combinations.push(Combination {
                            id,
                            parts: [c.name.clone(), k.name.clone(), w.name.clone(), g.name.clone()],
                            stats: AttributeVector::sum([&c.stats, &k.stats, &w.stats, &g.stats]),
                        });
                    }
                }
            }
        }

        Ok(Self {
            schema: set.schema().clone(),
            combinations,
        })
    }

    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }

    pub fn get(&self, id: CombinationId) -> Option<&Combination> {
        self.combinations.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    /// Projects every combination onto the given schema positions.
    pub fn project(&self, indices: &[usize]) -> Vec<(CombinationId, Vec<f64>)> {
        self.combinations
            .iter()
            .map(|c| (c.id, c.stats.project(indices)))
            .collect()
    }
}
