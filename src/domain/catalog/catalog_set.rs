//! Catalog Set - the four slot catalogs a combination table is built from.

use tracing::debug;

use super::{CollapsedPart, PartCatalog};
use crate::domain::foundation::{AttributeSchema, EngineError, Slot, ValidationError};

/// Four part catalogs sharing one attribute schema.
///
/// Construction validates the shared schema, rejects empty catalogs and
/// collapses duplicate deltas inside every catalog, so everything handed to
/// the generator is already free of redundant parts.
#[derive(Debug, Clone)]
pub struct CatalogSet {
    schema: AttributeSchema,
    catalogs: [PartCatalog; 4],
    collapsed: Vec<CollapsedPart>,
}

impl CatalogSet {
    /// Builds a set from one catalog per slot.
    ///
    /// # Errors
    ///
    /// - `SchemaMismatch` if any catalog's schema differs from the character catalog's
    /// - `EmptyInput` if any catalog has no parts
    /// - `Validation` if a catalog was built for a different slot than its position
    pub fn new(
        character: PartCatalog,
        kart: PartCatalog,
        wheel: PartCatalog,
        glider: PartCatalog,
    ) -> Result<Self, EngineError> {
        let mut catalogs = [character, kart, wheel, glider];
        let schema = catalogs[0].schema().clone();

        for (expected, catalog) in Slot::all().iter().zip(catalogs.iter()) {
            if catalog.slot() != *expected {
                return Err(ValidationError::invalid_format(
                    "slot",
                    format!("expected {} catalog, got {}", expected, catalog.slot()),
                )
                .into());
            }
            if catalog.schema() != &schema {
                return Err(EngineError::SchemaMismatch {
                    slot: expected.to_string(),
                    expected: schema.to_string(),
                    found: catalog.schema().to_string(),
                });
            }
            if catalog.is_empty() {
                return Err(EngineError::empty_input(format!(
                    "{} catalog",
                    expected.display_name().to_lowercase()
                )));
            }
        }

        let mut collapsed = Vec::new();
        for catalog in catalogs.iter_mut() {
            let removed = catalog.dedup_identical();
            if !removed.is_empty() {
                debug!(
                    slot = %catalog.slot(),
                    collapsed = removed.len(),
                    remaining = catalog.len(),
                    "Collapsed parts with identical stats"
                );
            }
            collapsed.extend(removed);
        }

        Ok(Self {
            schema,
            catalogs,
            collapsed,
        })
    }

    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    /// Catalogs in generation order.
    pub fn catalogs(&self) -> &[PartCatalog; 4] {
        &self.catalogs
    }

    pub fn catalog(&self, slot: Slot) -> &PartCatalog {
        &self.catalogs[slot.order_index()]
    }

    /// Parts removed as duplicates during construction.
    pub fn collapsed(&self) -> &[CollapsedPart] {
        &self.collapsed
    }

    /// Size of the cross product after deduplication.
    pub fn combination_count(&self) -> usize {
        self.catalogs.iter().map(|c| c.len()).product()
    }
}
