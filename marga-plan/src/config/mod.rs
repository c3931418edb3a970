//! Unified planner configuration.
//!
//! Loads all configuration from a single YAML file. Every section has
//! serde defaults, so a missing file or an empty document yields the
//! built-in configuration.

mod defaults;
mod search;
mod vehicle;

pub use search::{AStarSection, AraStarSection, SearchSection};
pub use vehicle::{CarSection, CarrierSection, FootprintSection, UnicycleSection, VehiclesSection};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::discretize::Discretizer;
use crate::error::ConfigError;
use crate::model::ModelRegistry;

/// Lattice discretization section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LatticeSection {
    /// Meters per lattice cell
    #[serde(default = "defaults::resolution")]
    pub resolution: f32,

    /// Number of discrete headings
    #[serde(default = "defaults::heading_count")]
    pub heading_count: u16,
}

impl Default for LatticeSection {
    fn default() -> Self {
        Self {
            resolution: defaults::resolution(),
            heading_count: defaults::heading_count(),
        }
    }
}

/// Primitive table store section
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct TablesSection {
    /// Directory holding `.mprm` store files. When unset (or a model's
    /// file is absent) tables are built in memory at startup.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Full planner configuration loaded from YAML
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct PlannerConfig {
    /// Lattice settings
    #[serde(default)]
    pub lattice: LatticeSection,

    /// Search settings
    #[serde(default)]
    pub search: SearchSection,

    /// Vehicle settings
    #[serde(default)]
    pub vehicles: VehiclesSection,

    /// Primitive table store settings
    #[serde(default)]
    pub tables: TablesSection,
}

impl PlannerConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// The lattice discretizer this configuration describes.
    pub fn discretizer(&self) -> Discretizer {
        Discretizer::new(self.lattice.resolution, self.lattice.heading_count)
    }

    /// Build the vehicle model registry.
    pub fn build_registry(&self) -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        registry.register(Box::new(self.vehicles.car.to_model()));
        registry.register(Box::new(self.vehicles.load_carrier.to_model()));
        registry.register(Box::new(self.vehicles.unicycle.to_model()));
        registry
    }
}
