//! Engine configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::{DriverConfig, ModeSelection};

/// Which projections to run and how to dispatch them
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Dispatch projections on the rayon pool
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Run every pair of attributes
    #[serde(default = "default_true")]
    pub pairs: bool,

    /// Run every ordered triple of attributes
    #[serde(default = "default_true")]
    pub triples: bool,

    /// Run all attributes at once
    #[serde(default = "default_true")]
    pub full: bool,

    /// Attribute names to project on (comma-separated); whole schema if unset
    pub dimensions: Option<String>,
}

fn default_true() -> bool {
    true
}

impl EngineConfig {
    /// Driver settings for this configuration.
    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            parallel: self.parallel,
            modes: ModeSelection {
                pairs: self.pairs,
                triples: self.triples,
                full: self.full,
            },
        }
    }

    /// Requested dimensions as a list, if any were given.
    pub fn dimensions_list(&self) -> Option<Vec<String>> {
        self.dimensions.as_ref().map(|s| {
            s.split(',')
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())
                .collect()
        })
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.pairs || self.triples || self.full) {
            return Err(ValidationError::NoModesEnabled);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            pairs: true,
            triples: true,
            full: true,
            dimensions: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_everything() {
        let engine = EngineConfig::default();
        assert_eq!(engine.driver_config(), DriverConfig::default());
        assert!(engine.validate().is_ok());
    }

    #[test]
    fn all_modes_disabled_is_rejected() {
        let engine = EngineConfig {
            pairs: false,
            triples: false,
            full: false,
            ..Default::default()
        };
        assert_eq!(engine.validate(), Err(ValidationError::NoModesEnabled));
    }

    #[test]
    fn dimensions_are_split_and_trimmed() {
        let engine = EngineConfig {
            dimensions: Some("Weight, Acceleration,,Mini-Turbo".into()),
            ..Default::default()
        };
        assert_eq!(
            engine.dimensions_list().unwrap(),
            vec!["Weight", "Acceleration", "Mini-Turbo"]
        );
    }

    #[test]
    fn deserializes_with_defaults() {
        let engine: EngineConfig = serde_json::from_str(r#"{"triples": false}"#).unwrap();
        assert!(engine.parallel);
        assert!(!engine.triples);
        assert!(engine.dimensions.is_none());
    }
}
