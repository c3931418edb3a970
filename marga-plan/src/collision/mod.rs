//! Collision detection against the occupancy grid.
//!
//! This is the dominant per-expansion cost in the search: a primitive
//! check walks its precomputed swept-cell offset list translated by the
//! start cell and fails fast on the first blocked cell. Cost is
//! O(swept-cell count), independent of map size.

use marga_grid::{GridCoord, OccupancyGrid};

use crate::primitive::MotionPrimitive;

/// Validates primitives and stationary footprints against a map snapshot.
///
/// Borrows the grid for the duration of one planning request; the
/// closed-world policy (out-of-bounds and unknown cells are blocked) lives
/// in [`OccupancyGrid::is_blocked`].
pub struct CollisionChecker<'a> {
    grid: &'a OccupancyGrid,
}

impl<'a> CollisionChecker<'a> {
    /// Create a checker for one map snapshot.
    pub fn new(grid: &'a OccupancyGrid) -> Self {
        Self { grid }
    }

    /// The map snapshot this checker reads.
    #[inline]
    pub fn grid(&self) -> &OccupancyGrid {
        self.grid
    }

    /// Can `primitive` be executed from `start` without touching a
    /// blocked cell?
    #[inline]
    pub fn is_primitive_free(&self, start: GridCoord, primitive: &MotionPrimitive) -> bool {
        self.are_cells_free(start, &primitive.swept_cells)
    }

    /// Check a translated offset list, failing fast on the first hit.
    #[inline]
    pub fn are_cells_free(&self, start: GridCoord, offsets: &[(i32, i32)]) -> bool {
        offsets
            .iter()
            .all(|&(dx, dy)| !self.grid.is_blocked(start.offset(dx, dy)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marga_grid::{CellState, Pose2D};

    fn straight_prim() -> MotionPrimitive {
        MotionPrimitive {
            id: 0,
            start_heading: 0,
            end_heading: 0,
            cell_delta: (2, 0),
            delta: Pose2D::new(2.0, 0.0, 0.0),
            cost: 2.0,
            swept_cells: vec![(0, 0), (1, 0), (2, 0)],
        }
    }

    #[test]
    fn test_free_path() {
        let grid = OccupancyGrid::centered_free(10, 10, 1.0);
        let checker = CollisionChecker::new(&grid);
        assert!(checker.is_primitive_free(GridCoord::new(3, 5), &straight_prim()));
    }

    #[test]
    fn test_blocked_by_obstacle() {
        let mut grid = OccupancyGrid::centered_free(10, 10, 1.0);
        grid.set_state(GridCoord::new(5, 5), CellState::Occupied);
        let checker = CollisionChecker::new(&grid);

        // Sweep passes through (5, 5)
        assert!(!checker.is_primitive_free(GridCoord::new(3, 5), &straight_prim()));
        // One row down is clear
        assert!(checker.is_primitive_free(GridCoord::new(3, 4), &straight_prim()));
    }

    #[test]
    fn test_blocked_by_unknown() {
        let mut grid = OccupancyGrid::centered_free(10, 10, 1.0);
        grid.set_state(GridCoord::new(4, 5), CellState::Unknown);
        let checker = CollisionChecker::new(&grid);
        assert!(!checker.is_primitive_free(GridCoord::new(3, 5), &straight_prim()));
    }

    #[test]
    fn test_blocked_by_bounds() {
        let grid = OccupancyGrid::centered_free(10, 10, 1.0);
        let checker = CollisionChecker::new(&grid);
        // Sweep would leave the map on the right edge
        assert!(!checker.is_primitive_free(GridCoord::new(8, 5), &straight_prim()));
    }
}
