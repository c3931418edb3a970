//! Baseline lattice A* search.

use std::collections::BinaryHeap;
use std::time::Instant;

use log::{debug, trace};

use marga_grid::OccupancyGrid;

use crate::collision::CollisionChecker;
use crate::discretize::{ConfigKey, Configuration, Discretizer};
use crate::primitive::{PrimitiveId, PrimitiveTable};

use super::arena::{NodeArena, NodeTag};
use super::heuristic::{euclidean, satisfies_goal, GoalTolerance};
use super::queue::QueueEntry;
use super::SearchStats;

/// Cost comparisons tolerate this much floating-point noise.
const COST_EPS: f32 = 1e-6;

/// Search loop parameters.
#[derive(Clone, Copy, Debug)]
pub struct AStarTuning {
    /// Expansions between time-budget checks. Suspension happens only at
    /// this boundary, never mid-expansion.
    pub budget_check_interval: usize,
}

impl Default for AStarTuning {
    fn default() -> Self {
        Self {
            budget_check_interval: 64,
        }
    }
}

/// Result of one A* invocation.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    /// A path was found; optimal under the admissible heuristic.
    Found {
        /// Ordered configurations with the primitive leading into each
        steps: Vec<(Configuration, Option<PrimitiveId>)>,
        /// Total path cost
        cost: f32,
        /// Search counters
        stats: SearchStats,
    },
    /// The reachable space was exhausted without reaching the goal.
    NoPath {
        /// Search counters
        stats: SearchStats,
    },
    /// The time budget expired; plain A* has no partial solution to offer.
    DeadlineExceeded {
        /// Search counters
        stats: SearchStats,
    },
}

/// Classic weighted lattice search: priority queue on `f = g + h`,
/// successors from the primitive table filtered through the collision
/// checker. Terminates when a configuration inside the goal tolerance is
/// popped (success) or the open set empties (no path).
///
/// Tie-breaking among equal `f` prefers larger `g`; the full deterministic
/// order lives in the queue entry.
pub struct AStarSearch<'a> {
    grid: &'a OccupancyGrid,
    table: &'a PrimitiveTable,
    disc: &'a Discretizer,
    tuning: AStarTuning,
}

impl<'a> AStarSearch<'a> {
    /// Create a search over one map snapshot and primitive table.
    pub fn new(
        grid: &'a OccupancyGrid,
        table: &'a PrimitiveTable,
        disc: &'a Discretizer,
        tuning: AStarTuning,
    ) -> Self {
        Self {
            grid,
            table,
            disc,
            tuning,
        }
    }

    /// Run the search. `deadline` is the absolute budget expiry instant.
    pub fn search(
        &self,
        start: Configuration,
        goal: Configuration,
        tol: GoalTolerance,
        deadline: Option<Instant>,
    ) -> SearchOutcome {
        let checker = CollisionChecker::new(self.grid);
        let mut arena = NodeArena::new();
        let mut open: BinaryHeap<QueueEntry> = BinaryHeap::new();
        let mut seq: u64 = 0;
        let mut expanded: usize = 0;

        let h0 = euclidean(&start, &goal);
        let start_idx = arena.get_or_create(start, h0);
        arena.node_mut(start_idx).g = 0.0;
        open.push(QueueEntry {
            f: h0,
            g: 0.0,
            seq,
            node: start_idx,
        });
        seq += 1;

        while let Some(entry) = open.pop() {
            // Budget check only at the expansion boundary
            if expanded % self.tuning.budget_check_interval == 0 {
                if let Some(deadline) = deadline {
                    if Instant::now() >= deadline {
                        debug!("[astar] deadline exceeded after {} expansions", expanded);
                        return SearchOutcome::DeadlineExceeded {
                            stats: self.stats(expanded, &arena),
                        };
                    }
                }
            }

            let node = arena.node(entry.node);
            if node.tag == NodeTag::Closed {
                continue;
            }
            if entry.g > node.g + COST_EPS {
                continue; // stale entry, a cheaper route was found later
            }

            if satisfies_goal(&node.config, &goal, &tol) {
                let cost = node.g;
                trace!(
                    "[astar] goal reached: cost={:.3} expanded={} generated={}",
                    cost,
                    expanded,
                    arena.len()
                );
                return SearchOutcome::Found {
                    steps: arena.reconstruct_path(entry.node),
                    cost,
                    stats: self.stats(expanded, &arena),
                };
            }

            let key = node.config.key;
            let cell = node.config.cell();
            let g = node.g;
            arena.node_mut(entry.node).tag = NodeTag::Closed;
            expanded += 1;

            for prim in self.table.primitives_at(key.ih) {
                if !checker.is_primitive_free(cell, prim) {
                    continue;
                }

                let succ = Configuration::from_key(
                    ConfigKey {
                        ix: key.ix + prim.cell_delta.0,
                        iy: key.iy + prim.cell_delta.1,
                        ih: prim.end_heading,
                    },
                    self.grid,
                    self.disc,
                );
                let h = euclidean(&succ, &goal);
                let idx = arena.get_or_create(succ, h);

                // Consistent heuristic: closed nodes never improve
                if arena.node(idx).tag == NodeTag::Closed {
                    continue;
                }

                let ng = g + prim.cost;
                if ng + COST_EPS < arena.node(idx).g {
                    arena.update_cost(idx, ng, entry.node, prim.id);
                    open.push(QueueEntry {
                        f: ng + h,
                        g: ng,
                        seq,
                        node: idx,
                    });
                    seq += 1;
                }
            }
        }

        debug!("[astar] open set exhausted after {} expansions", expanded);
        SearchOutcome::NoPath {
            stats: self.stats(expanded, &arena),
        }
    }

    fn stats(&self, expanded: usize, arena: &NodeArena) -> SearchStats {
        SearchStats {
            nodes_expanded: expanded,
            nodes_generated: arena.len(),
            passes: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BodyRect, CarModel, UnicycleModel};
    use marga_grid::{CellState, GridCoord, Pose2D};
    use std::time::Duration;

    fn disc() -> Discretizer {
        Discretizer::new(1.0, 8)
    }

    fn car_table(disc: &Discretizer) -> PrimitiveTable {
        let car = CarModel::new(1.0, 0.6, 2.0, BodyRect::new(0.8, 0.5, 0.2));
        PrimitiveTable::build(&car, disc).unwrap()
    }

    fn grid_11() -> OccupancyGrid {
        // Cell centers on integer coordinates 0..=10 in both axes
        OccupancyGrid::filled(
            11,
            11,
            1.0,
            marga_grid::WorldPoint::new(-0.5, -0.5),
            CellState::Free,
        )
    }

    fn config(grid: &OccupancyGrid, disc: &Discretizer, x: f32, y: f32, theta: f32) -> Configuration {
        Configuration::from_world(Pose2D::new(x, y, theta), grid, disc)
    }

    #[test]
    fn test_straight_line_plan() {
        let disc = disc();
        let grid = grid_11();
        let table = car_table(&disc);
        let search = AStarSearch::new(&grid, &table, &disc, AStarTuning::default());

        let start = config(&grid, &disc, 0.0, 0.0, 0.0);
        let goal = config(&grid, &disc, 5.0, 0.0, 0.0);
        let tol = GoalTolerance::for_lattice(1.0, 8);

        match search.search(start, goal, tol, None) {
            SearchOutcome::Found { steps, cost, .. } => {
                assert!((cost - 5.0).abs() < 1e-3, "cost was {}", cost);
                // Two-cell straights keep the step count minimal
                assert!(steps.len() <= 5, "took {} steps", steps.len());
                assert_eq!(steps.first().unwrap().0.key, start.key);
                assert!(steps.last().unwrap().0.key.ix == 5);
            }
            other => panic!("expected path, got {:?}", other),
        }
    }

    #[test]
    fn test_start_equals_goal() {
        let disc = disc();
        let grid = grid_11();
        let table = car_table(&disc);
        let search = AStarSearch::new(&grid, &table, &disc, AStarTuning::default());

        let start = config(&grid, &disc, 3.0, 3.0, 0.0);
        let tol = GoalTolerance::for_lattice(1.0, 8);
        match search.search(start, start, tol, None) {
            SearchOutcome::Found { steps, cost, .. } => {
                assert_eq!(steps.len(), 1);
                assert_eq!(cost, 0.0);
            }
            other => panic!("expected trivial path, got {:?}", other),
        }
    }

    #[test]
    fn test_no_path_when_goal_enclosed() {
        let disc = disc();
        let mut grid = grid_11();
        // Wall off the goal cell (8, 8) completely
        for dx in -1..=1 {
            for dy in -1..=1 {
                if (dx, dy) != (0, 0) {
                    grid.set_state(GridCoord::new(8 + dx, 8 + dy), CellState::Occupied);
                }
            }
        }
        let table = car_table(&disc);
        let search = AStarSearch::new(&grid, &table, &disc, AStarTuning::default());

        let start = config(&grid, &disc, 0.0, 0.0, 0.0);
        let goal = config(&grid, &disc, 8.0, 8.0, 0.0);
        let tol = GoalTolerance::for_lattice(1.0, 8);

        assert!(matches!(
            search.search(start, goal, tol, None),
            SearchOutcome::NoPath { .. }
        ));
    }

    #[test]
    fn test_deadline_exceeded() {
        let disc = disc();
        let grid = OccupancyGrid::centered_free(201, 201, 1.0);
        let table = car_table(&disc);
        let search = AStarSearch::new(&grid, &table, &disc, AStarTuning::default());

        let start = config(&grid, &disc, -90.0, -90.0, 0.0);
        let goal = config(&grid, &disc, 90.0, 90.0, 0.0);
        let tol = GoalTolerance::for_lattice(1.0, 8);
        let deadline = Instant::now() + Duration::from_nanos(1);

        assert!(matches!(
            search.search(start, goal, tol, Some(deadline)),
            SearchOutcome::DeadlineExceeded { .. }
        ));
    }

    #[test]
    fn test_turn_in_place_reaches_rotated_goal() {
        let disc = disc();
        let grid = grid_11();
        let cart = UnicycleModel::new(BodyRect::new(0.6, 0.5, 0.0), 0.5);
        let table = PrimitiveTable::build(&cart, &disc).unwrap();
        let search = AStarSearch::new(&grid, &table, &disc, AStarTuning::default());

        let start = config(&grid, &disc, 5.0, 5.0, 0.0);
        let goal = config(&grid, &disc, 5.0, 5.0, std::f32::consts::PI);
        let tol = GoalTolerance::for_lattice(1.0, 8);

        match search.search(start, goal, tol, None) {
            SearchOutcome::Found { steps, cost, .. } => {
                assert!(cost > 0.0);
                // All steps stay on the same cell
                assert!(steps.iter().all(|(c, _)| c.key.ix == 5 && c.key.iy == 5));
            }
            other => panic!("expected rotation path, got {:?}", other),
        }
    }
}
