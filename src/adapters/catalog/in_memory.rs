//! In-Memory Catalog Adapter
//!
//! Serves a prebuilt catalog set. Useful for testing and embedding.

use crate::domain::catalog::CatalogSet;
use crate::ports::{CatalogSource, CatalogSourceError};

/// Catalog source that hands out clones of a fixed set.
#[derive(Debug, Clone)]
pub struct InMemoryCatalogSource {
    catalogs: CatalogSet,
}

impl InMemoryCatalogSource {
    pub fn new(catalogs: CatalogSet) -> Self {
        Self { catalogs }
    }
}

impl CatalogSource for InMemoryCatalogSource {
    fn load(&self) -> Result<CatalogSet, CatalogSourceError> {
        Ok(self.catalogs.clone())
    }

    fn describe(&self) -> String {
        format!("memory:{} combinations", self.catalogs.combination_count())
    }
}
