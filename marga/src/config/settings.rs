//! Top-level configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::defaults;
use super::ConfigLoadError;
use crate::analyzer::AnalyzerConfig;

/// Output settings section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    /// Destination of the metric record stream
    #[serde(default = "defaults::csv_path")]
    pub csv_path: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            csv_path: defaults::csv_path(),
        }
    }
}

/// Clearance search settings section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClearanceSection {
    /// Half-width of the search window in map units
    #[serde(default = "defaults::search_radius")]
    pub search_radius: f64,
}

impl Default for ClearanceSection {
    fn default() -> Self {
        Self {
            search_radius: defaults::search_radius(),
        }
    }
}

/// Map loading settings section
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapSection {
    /// Replaces the `occupied_thresh` from the map YAML when set
    #[serde(default)]
    pub occupied_thresh_override: Option<f64>,
}

/// Marga configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MargaConfig {
    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub clearance: ClearanceSection,

    #[serde(default)]
    pub map: MapSection,
}

impl MargaConfig {
    /// Load from TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Load from `path` if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigLoadError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self =
            toml::from_str(toml).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        let radius = self.clearance.search_radius;
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(ConfigLoadError::Parse(format!(
                "clearance.search_radius must be a non-negative number, got {}",
                radius
            )));
        }
        if let Some(thresh) = self.map.occupied_thresh_override {
            if !(0.0..=1.0).contains(&thresh) {
                return Err(ConfigLoadError::Parse(format!(
                    "map.occupied_thresh_override must be in [0, 1], got {}",
                    thresh
                )));
            }
        }
        Ok(())
    }

    /// Analyzer settings derived from this config
    pub fn to_analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig::new(&self.output.csv_path)
            .with_search_radius(self.clearance.search_radius)
    }
}
