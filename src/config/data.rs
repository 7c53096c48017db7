//! Data configuration: where catalogs come from and where results go

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::ValidationError;
use crate::adapters::SectionLayout;
use crate::ports::CatalogFormat;

/// Input and output locations
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Part catalog file (CSV or YAML)
    #[serde(default)]
    pub catalog_path: PathBuf,

    /// Catalog format; guessed from the file extension when unset
    pub catalog_format: Option<CatalogFormat>,

    /// Directory receiving exported tables and the run report
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Overrides for the CSV section starts
    #[serde(default)]
    pub sections: SectionOverrides,
}

/// Optional replacements for individual CSV section starts
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionOverrides {
    pub character: Option<String>,
    pub kart: Option<String>,
    pub wheel: Option<String>,
    pub glider: Option<String>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./frontiers")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::new(),
            catalog_format: None,
            output_dir: default_output_dir(),
            sections: SectionOverrides::default(),
        }
    }
}

impl SectionOverrides {
    /// Default layout with every override applied.
    pub fn layout(&self) -> SectionLayout {
        let mut layout = SectionLayout::default();
        if let Some(start) = &self.character {
            layout.character = start.clone();
        }
        if let Some(start) = &self.kart {
            layout.kart = start.clone();
        }
        if let Some(start) = &self.wheel {
            layout.wheel = start.clone();
        }
        if let Some(start) = &self.glider {
            layout.glider = start.clone();
        }
        layout
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let entries = [
            ("character", &self.character),
            ("kart", &self.kart),
            ("wheel", &self.wheel),
            ("glider", &self.glider),
        ];
        for (slot, start) in entries {
            if start.as_deref().is_some_and(|s| s.trim().is_empty()) {
                return Err(ValidationError::EmptySectionStart(slot));
            }
        }
        Ok(())
    }
}

impl DataConfig {
    /// Configured format, or the one implied by the catalog path.
    pub fn resolved_format(&self) -> Option<CatalogFormat> {
        self.catalog_format
            .or_else(|| CatalogFormat::from_path(Path::new(&self.catalog_path)))
    }

    /// Validate data configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.catalog_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("data.catalog_path"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("data.output_dir"));
        }
        if self.resolved_format().is_none() {
            return Err(ValidationError::UnknownCatalogFormat(
                self.catalog_path.display().to_string(),
            ));
        }
        self.sections.validate()
    }
}
