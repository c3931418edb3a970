//! Shared scenario builders for the integration tests.
//!
//! All scenarios use a 1 m lattice with 8 headings and a compact car
//! footprint, so cell centers sit on integer world coordinates and the
//! vehicle fits through one-cell gaps.

use marga_grid::{CellState, GridCoord, OccupancyGrid, WorldPoint};
use marga_plan::config::PlannerConfig;
use marga_plan::finder::PlannerContext;

/// Planner configuration used by every scenario.
pub fn test_config() -> PlannerConfig {
    PlannerConfig::from_yaml(
        r#"
lattice:
  resolution: 1.0
  heading_count: 8
vehicles:
  car:
    wheelbase: 1.0
    max_steering_angle: 0.6
    reverse_cost_factor: 2.0
    footprint:
      length: 0.8
      width: 0.5
      offset: 0.2
  unicycle:
    turn_in_place_cost: 0.5
    footprint:
      length: 0.6
      width: 0.5
search:
  arastar:
    epsilon_start: 3.0
    epsilon_step: 0.5
"#,
    )
    .expect("test config parses")
}

/// Context built from [`test_config`].
pub fn test_context() -> PlannerContext {
    let _ = env_logger::try_init();
    PlannerContext::from_config(&test_config()).expect("context builds")
}

/// Free n x n grid whose cell centers lie on integer coordinates
/// (0..n-1, 0..n-1).
pub fn free_grid(n: usize) -> OccupancyGrid {
    OccupancyGrid::filled(n, n, 1.0, WorldPoint::new(-0.5, -0.5), CellState::Free)
}

/// Scenario A: empty 11x11 grid.
pub fn empty_grid() -> OccupancyGrid {
    free_grid(11)
}

/// Scenario B: occupied column at x = 2 with a single one-cell gap
/// at y = 3.
pub fn wall_with_gap_grid() -> OccupancyGrid {
    let mut grid = free_grid(11);
    grid.fill_rect(GridCoord::new(2, 0), GridCoord::new(2, 10), CellState::Occupied);
    grid.set_state(GridCoord::new(2, 3), CellState::Free);
    grid
}

/// Scenario C: goal cell (8, 8) fully enclosed by occupied cells.
pub fn enclosed_goal_grid() -> OccupancyGrid {
    let mut grid = free_grid(11);
    for dx in -1..=1i32 {
        for dy in -1..=1i32 {
            if (dx, dy) != (0, 0) {
                grid.set_state(GridCoord::new(8 + dx, 8 + dy), CellState::Occupied);
            }
        }
    }
    grid
}

/// Scenario D: a large free grid for budget-expiry tests.
pub fn large_grid() -> OccupancyGrid {
    free_grid(301)
}
