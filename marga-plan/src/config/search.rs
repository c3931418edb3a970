//! Search configuration section.

use serde::{Deserialize, Serialize};

use crate::search::{AStarTuning, AraTuning};

use super::defaults;

/// Search settings section
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct SearchSection {
    /// Baseline A* settings
    #[serde(default)]
    pub astar: AStarSection,

    /// Anytime ARA* settings
    #[serde(default)]
    pub arastar: AraStarSection,
}

/// A* settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AStarSection {
    /// Expansions between time-budget checks
    #[serde(default = "defaults::budget_check_interval")]
    pub budget_check_interval: usize,
}

impl Default for AStarSection {
    fn default() -> Self {
        Self {
            budget_check_interval: defaults::budget_check_interval(),
        }
    }
}

impl AStarSection {
    /// Convert to the search loop tuning.
    pub fn to_tuning(&self) -> AStarTuning {
        AStarTuning {
            budget_check_interval: self.budget_check_interval.max(1),
        }
    }
}

/// ARA* settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AraStarSection {
    /// Initial inflation factor (≥ 1)
    #[serde(default = "defaults::epsilon_start")]
    pub epsilon_start: f32,

    /// Fixed ε decrement between passes
    #[serde(default = "defaults::epsilon_step")]
    pub epsilon_step: f32,

    /// Expansions between time-budget checks
    #[serde(default = "defaults::budget_check_interval")]
    pub budget_check_interval: usize,
}

impl Default for AraStarSection {
    fn default() -> Self {
        Self {
            epsilon_start: defaults::epsilon_start(),
            epsilon_step: defaults::epsilon_step(),
            budget_check_interval: defaults::budget_check_interval(),
        }
    }
}

impl AraStarSection {
    /// Convert to the search loop tuning.
    pub fn to_tuning(&self) -> AraTuning {
        AraTuning {
            epsilon_start: self.epsilon_start.max(1.0),
            epsilon_step: self.epsilon_step.max(0.01),
            budget_check_interval: self.budget_check_interval.max(1),
        }
    }
}
