//! Occupancy grid snapshot.
//!
//! The grid uses a coordinate system where:
//! - Cell (0, 0) starts at `origin` in world coordinates
//! - Positive X is to the right, positive Y is up
//! - Cell (x, y) covers the area from (origin + x*resolution) to
//!   (origin + (x+1)*resolution); `grid_to_world` returns cell centers

use crate::core::{CellState, GridCoord, WorldPoint};

/// A 2-D occupancy grid snapshot.
///
/// Cell states are stored in a flat row-major `Vec<u8>`. The planner only
/// reads from the grid; the mutation API exists for map construction and
/// test scenario building. A snapshot handed to a planning request must not
/// change for the lifetime of that request.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    /// Cell states (CellState as u8: Unknown=0, Free=1, Occupied=2)
    states: Vec<u8>,
    /// Grid width in cells
    width: usize,
    /// Grid height in cells
    height: usize,
    /// Resolution in meters per cell
    resolution: f32,
    /// World coordinates of the lower-left corner of cell (0, 0)
    origin: WorldPoint,
}

impl OccupancyGrid {
    /// Create a new grid with every cell in the given state.
    pub fn filled(width: usize, height: usize, resolution: f32, origin: WorldPoint, state: CellState) -> Self {
        Self {
            states: vec![state as u8; width * height],
            width,
            height,
            resolution,
            origin,
        }
    }

    /// Create a new all-Unknown grid.
    pub fn new(width: usize, height: usize, resolution: f32, origin: WorldPoint) -> Self {
        Self::filled(width, height, resolution, origin, CellState::Unknown)
    }

    /// Create an all-Free grid centered on the world origin.
    pub fn centered_free(width: usize, height: usize, resolution: f32) -> Self {
        let half_width = (width as f32 * resolution) / 2.0;
        let half_height = (height as f32 * resolution) / 2.0;
        let origin = WorldPoint::new(-half_width, -half_height);
        Self::filled(width, height, resolution, origin, CellState::Free)
    }

    /// Reassemble a grid from raw parts (used by the map file loader).
    ///
    /// Returns `None` if the state vector length does not match the
    /// dimensions.
    pub fn from_raw(
        states: Vec<u8>,
        width: usize,
        height: usize,
        resolution: f32,
        origin: WorldPoint,
    ) -> Option<Self> {
        if states.len() != width * height {
            return None;
        }
        Some(Self {
            states,
            width,
            height,
            resolution,
            origin,
        })
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Resolution in meters per cell
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// World coordinates of the grid's lower-left corner
    #[inline]
    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Raw state bytes (for serialization)
    #[inline]
    pub fn states_raw(&self) -> &[u8] {
        &self.states
    }

    /// World bounds: (min_point, max_point)
    pub fn bounds(&self) -> (WorldPoint, WorldPoint) {
        let min = self.origin;
        let max = WorldPoint::new(
            self.origin.x + self.width as f32 * self.resolution,
            self.origin.y + self.height as f32 * self.resolution,
        );
        (min, max)
    }

    /// Convert world coordinates to grid coordinates
    #[inline]
    pub fn world_to_grid(&self, point: WorldPoint) -> GridCoord {
        let x = ((point.x - self.origin.x) / self.resolution).floor() as i32;
        let y = ((point.y - self.origin.y) / self.resolution).floor() as i32;
        GridCoord::new(x, y)
    }

    /// Convert grid coordinates to world coordinates (cell center)
    #[inline]
    pub fn grid_to_world(&self, coord: GridCoord) -> WorldPoint {
        WorldPoint::new(
            self.origin.x + (coord.x as f32 + 0.5) * self.resolution,
            self.origin.y + (coord.y as f32 + 0.5) * self.resolution,
        )
    }

    /// Check if grid coordinates are within bounds
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Convert grid coordinates to flat array index
    #[inline]
    pub fn coord_to_index(&self, coord: GridCoord) -> Option<usize> {
        if self.is_valid_coord(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    /// Get cell state (returns Unknown if out of bounds)
    #[inline]
    pub fn state(&self, coord: GridCoord) -> CellState {
        self.coord_to_index(coord)
            .map(|i| CellState::from_u8(self.states[i]))
            .unwrap_or(CellState::Unknown)
    }

    /// Closed-world blocked test: occupied, unknown, or out of bounds.
    ///
    /// This is the single traversability predicate used by the planner's
    /// collision checker.
    #[inline]
    pub fn is_blocked(&self, coord: GridCoord) -> bool {
        match self.coord_to_index(coord) {
            Some(i) => CellState::from_u8(self.states[i]).is_blocked(),
            None => true,
        }
    }

    /// Set a cell state (map construction / test scenarios only).
    ///
    /// Out-of-bounds coordinates are ignored.
    #[inline]
    pub fn set_state(&mut self, coord: GridCoord, state: CellState) {
        if let Some(i) = self.coord_to_index(coord) {
            self.states[i] = state as u8;
        }
    }

    /// Paint a rectangular region of cells (inclusive corners).
    pub fn fill_rect(&mut self, from: GridCoord, to: GridCoord, state: CellState) {
        let (x0, x1) = (from.x.min(to.x), from.x.max(to.x));
        let (y0, y1) = (from.y.min(to.y), from.y.max(to.y));
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.set_state(GridCoord::new(x, y), state);
            }
        }
    }

    /// Count cells by state.
    pub fn count_states(&self) -> (usize, usize, usize) {
        let mut unknown = 0;
        let mut free = 0;
        let mut occupied = 0;
        for &s in &self.states {
            match CellState::from_u8(s) {
                CellState::Unknown => unknown += 1,
                CellState::Free => free += 1,
                CellState::Occupied => occupied += 1,
            }
        }
        (unknown, free, occupied)
    }

    /// Render as ASCII art, row 0 at the bottom (debugging aid).
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                out.push(self.state(GridCoord::new(x as i32, y as i32)).as_char());
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = OccupancyGrid::new(100, 50, 0.1, WorldPoint::ZERO);
        assert_eq!(grid.width(), 100);
        assert_eq!(grid.height(), 50);
        assert_eq!(grid.cell_count(), 5000);
        assert_eq!(grid.state(GridCoord::new(3, 3)), CellState::Unknown);
    }

    #[test]
    fn test_centered_free() {
        let grid = OccupancyGrid::centered_free(10, 10, 1.0);
        let (min, max) = grid.bounds();
        assert!((min.x + 5.0).abs() < 1e-6);
        assert!((max.y - 5.0).abs() < 1e-6);
        assert_eq!(grid.state(GridCoord::new(0, 0)), CellState::Free);
    }

    #[test]
    fn test_world_grid_round_trip() {
        let grid = OccupancyGrid::new(100, 100, 0.05, WorldPoint::ZERO);
        let coord = grid.world_to_grid(WorldPoint::new(1.0, 1.0));
        assert_eq!(coord, GridCoord::new(20, 20));

        let center = grid.grid_to_world(GridCoord::new(0, 0));
        assert!((center.x - 0.025).abs() < 1e-6);
        assert!((center.y - 0.025).abs() < 1e-6);

        // A cell center maps back to the same cell
        assert_eq!(grid.world_to_grid(center), GridCoord::new(0, 0));
    }

    #[test]
    fn test_closed_world_blocking() {
        let mut grid = OccupancyGrid::centered_free(10, 10, 1.0);
        assert!(!grid.is_blocked(GridCoord::new(5, 5)));

        grid.set_state(GridCoord::new(5, 5), CellState::Occupied);
        assert!(grid.is_blocked(GridCoord::new(5, 5)));

        grid.set_state(GridCoord::new(5, 6), CellState::Unknown);
        assert!(grid.is_blocked(GridCoord::new(5, 6)));

        // Out of bounds is blocked
        assert!(grid.is_blocked(GridCoord::new(-1, 0)));
        assert!(grid.is_blocked(GridCoord::new(100, 100)));
    }

    #[test]
    fn test_fill_rect() {
        let mut grid = OccupancyGrid::centered_free(10, 10, 1.0);
        grid.fill_rect(GridCoord::new(2, 0), GridCoord::new(2, 9), CellState::Occupied);

        let (_, _, occupied) = grid.count_states();
        assert_eq!(occupied, 10);
        assert!(grid.is_blocked(GridCoord::new(2, 4)));
        assert!(!grid.is_blocked(GridCoord::new(3, 4)));
    }

    #[test]
    fn test_from_raw_rejects_bad_length() {
        assert!(OccupancyGrid::from_raw(vec![1; 9], 10, 10, 1.0, WorldPoint::ZERO).is_none());
        assert!(OccupancyGrid::from_raw(vec![1; 100], 10, 10, 1.0, WorldPoint::ZERO).is_some());
    }
}
