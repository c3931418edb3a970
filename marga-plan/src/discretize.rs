//! Pose discretization onto the search lattice.
//!
//! A [`Configuration`] pairs a continuous pose with its discrete lattice
//! indices `(ix, iy, ih)`. The indices are always derived from the pose
//! under the active [`Discretizer`] and grid, so search equality is defined
//! on indices alone ([`ConfigKey`]).

use marga_grid::core::math::{normalize_angle, TWO_PI};
use marga_grid::{GridCoord, OccupancyGrid, Pose2D};
use serde::{Deserialize, Serialize};

/// Lattice discretization parameters shared by primitive generation and
/// search: translation resolution and the number of discrete headings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Discretizer {
    /// Meters per lattice cell (must match the grid resolution)
    resolution: f32,
    /// Number of discrete headings over a full turn
    heading_count: u16,
}

impl Discretizer {
    /// Create a new discretizer.
    pub fn new(resolution: f32, heading_count: u16) -> Self {
        debug_assert!(resolution > 0.0);
        debug_assert!(heading_count > 0);
        Self {
            resolution,
            heading_count,
        }
    }

    /// Meters per lattice cell
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// Number of discrete headings
    #[inline]
    pub fn heading_count(&self) -> u16 {
        self.heading_count
    }

    /// Angular width of one heading step (radians)
    #[inline]
    pub fn heading_step(&self) -> f32 {
        TWO_PI / self.heading_count as f32
    }

    /// Discretize a continuous heading to the nearest heading index.
    #[inline]
    pub fn heading_to_index(&self, theta: f32) -> u16 {
        let step = self.heading_step();
        let positive = normalize_angle(theta).rem_euclid(TWO_PI);
        ((positive / step).round() as u32 % self.heading_count as u32) as u16
    }

    /// Continuous heading of a heading index, normalized to [-π, π).
    #[inline]
    pub fn index_to_heading(&self, index: u16) -> f32 {
        normalize_angle(index as f32 * self.heading_step())
    }

    /// Wrap a signed heading-index offset onto [0, heading_count).
    #[inline]
    pub fn wrap_heading(&self, index: i32) -> u16 {
        index.rem_euclid(self.heading_count as i32) as u16
    }

    /// Snap a world-frame displacement to a whole-cell offset.
    #[inline]
    pub fn snap_delta(&self, dx: f32, dy: f32) -> (i32, i32) {
        (
            (dx / self.resolution).round() as i32,
            (dy / self.resolution).round() as i32,
        )
    }
}

/// Discrete lattice key: the identity of a configuration for search
/// purposes. Two configurations with equal keys are the same search state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConfigKey {
    /// Cell column index
    pub ix: i32,
    /// Cell row index
    pub iy: i32,
    /// Heading index
    pub ih: u16,
}

/// A lattice configuration: continuous pose plus its discrete key.
///
/// The pose is always the lattice vertex pose (cell center, exact index
/// heading), so the key↔pose invariant holds by construction.
#[derive(Clone, Copy, Debug)]
pub struct Configuration {
    /// Continuous pose at the lattice vertex
    pub pose: Pose2D,
    /// Discrete lattice indices
    pub key: ConfigKey,
}

impl Configuration {
    /// Snap a continuous world pose onto the lattice.
    pub fn from_world(pose: Pose2D, grid: &OccupancyGrid, disc: &Discretizer) -> Self {
        let cell = grid.world_to_grid(pose.position());
        let ih = disc.heading_to_index(pose.theta);
        Self::from_key(
            ConfigKey {
                ix: cell.x,
                iy: cell.y,
                ih,
            },
            grid,
            disc,
        )
    }

    /// Build the configuration at a lattice key.
    pub fn from_key(key: ConfigKey, grid: &OccupancyGrid, disc: &Discretizer) -> Self {
        let center = grid.grid_to_world(GridCoord::new(key.ix, key.iy));
        Self {
            pose: Pose2D::new(center.x, center.y, disc.index_to_heading(key.ih)),
            key,
        }
    }

    /// The configuration's grid cell.
    #[inline]
    pub fn cell(&self) -> GridCoord {
        GridCoord::new(self.key.ix, self.key.iy)
    }
}

impl PartialEq for Configuration {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Configuration {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn disc8() -> Discretizer {
        Discretizer::new(1.0, 8)
    }

    #[test]
    fn test_heading_round_trip() {
        let disc = disc8();
        for i in 0..8u16 {
            assert_eq!(disc.heading_to_index(disc.index_to_heading(i)), i);
        }
    }

    #[test]
    fn test_heading_snaps_to_nearest() {
        let disc = disc8();
        assert_eq!(disc.heading_to_index(0.1), 0);
        assert_eq!(disc.heading_to_index(FRAC_PI_4 - 0.05), 1);
        assert_eq!(disc.heading_to_index(FRAC_PI_2), 2);
        assert_eq!(disc.heading_to_index(-FRAC_PI_2), 6);
        // Just below the wrap point snaps back to index 0
        assert_eq!(disc.heading_to_index(-0.1), 0);
        assert_eq!(disc.heading_to_index(PI), 4);
    }

    #[test]
    fn test_wrap_heading() {
        let disc = disc8();
        assert_eq!(disc.wrap_heading(-1), 7);
        assert_eq!(disc.wrap_heading(8), 0);
        assert_eq!(disc.wrap_heading(9), 1);
    }

    #[test]
    fn test_configuration_invariant() {
        let disc = disc8();
        // Cell centers at integer coordinates
        let grid = OccupancyGrid::centered_free(11, 11, 1.0);
        let config = Configuration::from_world(Pose2D::new(0.2, -0.3, 0.1), &grid, &disc);

        // Pose is the lattice vertex of the key
        let rebuilt = Configuration::from_key(config.key, &grid, &disc);
        assert_eq!(config.key, rebuilt.key);
        assert!(config.pose.approx_eq(rebuilt.pose, 1e-6, 1e-6));

        // Key matches what the grid/discretizer produce for the pose
        assert_eq!(grid.world_to_grid(config.pose.position()), config.cell());
        assert_eq!(disc.heading_to_index(config.pose.theta), config.key.ih);
    }

    #[test]
    fn test_snap_delta() {
        let disc = Discretizer::new(0.5, 8);
        assert_eq!(disc.snap_delta(1.1, -0.2), (2, 0));
        assert_eq!(disc.snap_delta(0.26, 0.24), (1, 0));
    }
}
