//! YAML Catalog Adapter
//!
//! Reads catalogs from a document of the form:
//!
//! ```yaml
//! attributes: [Weight, Acceleration]
//! slots:
//!   character:
//!     Mario: [6.0, 2.0]
//!   kart:
//!     Standard Kart: [2.0, 1.0]
//!   wheel:
//!     Standard: [2.0, 2.0]
//!   glider:
//!     Super Glider: [1.0, 1.0]
//! ```
//!
//! `attributes` defaults to the Mario Kart 8 schema. A `null` value drops the
//! part.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::domain::catalog::{CatalogSet, PartCatalog};
use crate::domain::foundation::{AttributeSchema, Slot};
use crate::ports::{CatalogSource, CatalogSourceError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    #[serde(default)]
    attributes: Option<Vec<String>>,
    slots: SlotDocuments,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SlotDocuments {
    character: serde_yaml::Mapping,
    kart: serde_yaml::Mapping,
    wheel: serde_yaml::Mapping,
    glider: serde_yaml::Mapping,
}

impl SlotDocuments {
    fn get(&self, slot: Slot) -> &serde_yaml::Mapping {
        match slot {
            Slot::Character => &self.character,
            Slot::Kart => &self.kart,
            Slot::Wheel => &self.wheel,
            Slot::Glider => &self.glider,
        }
    }
}

/// Catalog source backed by a YAML document.
#[derive(Debug, Clone)]
pub struct YamlCatalogSource {
    path: PathBuf,
}

impl YamlCatalogSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parses a YAML document already in memory.
    pub fn parse_str(text: &str) -> Result<CatalogSet, CatalogSourceError> {
        let document: CatalogDocument =
            serde_yaml::from_str(text).map_err(|e| CatalogSourceError::Parse(e.to_string()))?;

        let schema = match document.attributes {
            Some(names) => AttributeSchema::new(names)?,
            None => AttributeSchema::mario_kart_8(),
        };

        let mut catalogs = Vec::with_capacity(4);
        for slot in Slot::all() {
            catalogs.push(read_catalog(*slot, document.slots.get(*slot), &schema)?);
        }

        info!(
            characters = catalogs[0].len(),
            karts = catalogs[1].len(),
            wheels = catalogs[2].len(),
            gliders = catalogs[3].len(),
            "Parsed YAML catalog"
        );

        let mut catalogs = catalogs.into_iter();
        match (catalogs.next(), catalogs.next(), catalogs.next(), catalogs.next()) {
            (Some(character), Some(kart), Some(wheel), Some(glider)) => {
                Ok(CatalogSet::new(character, kart, wheel, glider)?)
            }
            _ => Err(CatalogSourceError::Parse("expected four slot catalogs".to_string())),
        }
    }
}

fn read_catalog(
    slot: Slot,
    parts: &serde_yaml::Mapping,
    schema: &AttributeSchema,
) -> Result<PartCatalog, CatalogSourceError> {
    let mut catalog = PartCatalog::new(slot, schema.clone());
    for (key, value) in parts {
        let name = key.as_str().ok_or_else(|| {
            CatalogSourceError::Parse(format!("{} part names must be strings", slot))
        })?;
        let values: Option<Vec<Option<f64>>> = serde_yaml::from_value(value.clone())
            .map_err(|e| CatalogSourceError::Parse(format!("part '{}': {}", name, e)))?;

        match values.and_then(|v| v.into_iter().collect::<Option<Vec<f64>>>()) {
            Some(values) => catalog.insert(name, values)?,
            None => warn!(slot = %slot, part = name, "Dropping part with missing values"),
        }
    }
    Ok(catalog)
}

impl CatalogSource for YamlCatalogSource {
    fn load(&self) -> Result<CatalogSet, CatalogSourceError> {
        let text = fs::read_to_string(&self.path).map_err(|e| CatalogSourceError::io(&self.path, e))?;
        Self::parse_str(&text)
    }

    fn describe(&self) -> String {
        format!("yaml:{}", self.path.display())
    }
}
