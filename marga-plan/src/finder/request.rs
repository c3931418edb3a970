//! Planning request types.

use std::time::Duration;

use marga_grid::Pose2D;
use serde::{Deserialize, Serialize};

use crate::search::GoalTolerance;

/// Which search algorithm a request runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Baseline optimal lattice A*
    #[default]
    AStar,
    /// Anytime-repairing ARA*, returns improving solutions under a budget
    AraStar,
}

/// One planning request.
///
/// Created per call, consumed entirely within one planning invocation and
/// discarded after the result is returned. The map snapshot is passed
/// separately so the request itself stays plain data.
#[derive(Clone, Debug)]
pub struct PlanningRequest {
    /// Start pose in world coordinates
    pub start: Pose2D,
    /// Goal pose in world coordinates
    pub goal: Pose2D,
    /// Vehicle model id ("car", "load_carrier", "unicycle")
    pub model: String,
    /// Search algorithm
    pub algorithm: Algorithm,
    /// Time budget; `None` runs to completion
    pub time_budget: Option<Duration>,
    /// Goal acceptance region; `None` uses the lattice default
    /// (half a cell, half a heading step)
    pub tolerance: Option<GoalTolerance>,
}

impl PlanningRequest {
    /// Create a request with defaults: A*, no budget, lattice tolerance.
    pub fn new(start: Pose2D, goal: Pose2D, model: impl Into<String>) -> Self {
        Self {
            start,
            goal,
            model: model.into(),
            algorithm: Algorithm::AStar,
            time_budget: None,
            tolerance: None,
        }
    }

    /// Select the search algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Bound the search by a time budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Override the goal acceptance region.
    pub fn with_tolerance(mut self, tolerance: GoalTolerance) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
}
