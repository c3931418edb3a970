//! Heuristics and goal tests.

use serde::{Deserialize, Serialize};

use marga_grid::core::math::angle_diff;

use crate::discretize::Configuration;

/// Euclidean distance-to-goal lower bound.
///
/// Admissible for every vehicle model: a primitive's cost is floored at
/// its chord length, so accumulated cost can never undercut straight-line
/// distance. Ignoring obstacles and heading keeps the estimate a true
/// lower bound (and consistent, which lets the searches close nodes once
/// per pass).
#[inline]
pub fn euclidean(from: &Configuration, to: &Configuration) -> f32 {
    from.pose.position().distance(&to.pose.position())
}

/// Goal acceptance region around the goal configuration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GoalTolerance {
    /// Maximum position error in meters
    pub xy: f32,
    /// Maximum heading error in radians
    pub theta: f32,
}

impl GoalTolerance {
    /// Exact-cell tolerance for a lattice: half a cell, half a heading step.
    pub fn for_lattice(resolution: f32, heading_count: u16) -> Self {
        Self {
            xy: resolution / 2.0,
            theta: std::f32::consts::PI / heading_count as f32,
        }
    }
}

/// Does `config` fall inside the goal region?
#[inline]
pub fn satisfies_goal(config: &Configuration, goal: &Configuration, tol: &GoalTolerance) -> bool {
    euclidean(config, goal) <= tol.xy
        && angle_diff(config.pose.theta, goal.pose.theta).abs() <= tol.theta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discretize::{ConfigKey, Discretizer};
    use marga_grid::OccupancyGrid;

    fn config_at(ix: i32, iy: i32, ih: u16) -> Configuration {
        let grid = OccupancyGrid::centered_free(21, 21, 1.0);
        let disc = Discretizer::new(1.0, 8);
        Configuration::from_key(ConfigKey { ix, iy, ih }, &grid, &disc)
    }

    #[test]
    fn test_euclidean() {
        let a = config_at(0, 0, 0);
        let b = config_at(3, 4, 2);
        assert!((euclidean(&a, &b) - 5.0).abs() < 1e-5);
        assert_eq!(euclidean(&a, &a), 0.0);
    }

    #[test]
    fn test_goal_region() {
        let tol = GoalTolerance::for_lattice(1.0, 8);
        let goal = config_at(5, 5, 0);

        assert!(satisfies_goal(&goal, &goal, &tol));
        // Neighbor cell is outside the half-cell tolerance
        assert!(!satisfies_goal(&config_at(6, 5, 0), &goal, &tol));
        // Same cell, adjacent heading is outside the half-step tolerance
        assert!(!satisfies_goal(&config_at(5, 5, 1), &goal, &tol));
    }

    #[test]
    fn test_loose_tolerance_accepts_neighbors() {
        let tol = GoalTolerance { xy: 1.5, theta: 1.0 };
        let goal = config_at(5, 5, 0);
        assert!(satisfies_goal(&config_at(6, 5, 0), &goal, &tol));
        assert!(satisfies_goal(&config_at(5, 5, 1), &goal, &tol));
        assert!(!satisfies_goal(&config_at(8, 5, 0), &goal, &tol));
    }
}
