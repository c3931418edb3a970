//! Anytime Repairing A* (ARA*).
//!
//! Runs a sequence of weighted-A* passes with a shrinking inflation
//! factor ε. Each completed pass yields a solution whose cost is within
//! ε of optimal; locally-inconsistent nodes (improved after being closed)
//! seed the next pass instead of restarting from scratch. The search is
//! an explicit state machine; every transition has a single trigger:
//! goal reached, open set empty, or budget expired.

use std::collections::BinaryHeap;
use std::time::Instant;

use log::{debug, info};

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

/// Anytime search state. Transitions:
///
/// ```text
/// Searching ──goal reached──► Improving ──ε reaches 1──► Exhausted
///     │  ▲                        │
///     │  └──────ε decreased───────┤
///     │                           ├──open set empty──► Exhausted
///     └───────────────────────────┴──budget expired──► Cancelled
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AraState {
    /// Running the first pass, no solution yet
    Searching,
    /// At least one solution found, tightening ε
    Improving,
    /// Search space fully resolved; last solution is proven optimal
    Exhausted,
    /// Time budget expired mid-pass
    Cancelled,
}

impl AraState {
    /// Terminal states end the invocation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AraState::Exhausted | AraState::Cancelled)
    }

    /// Short name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            AraState::Searching => "SEARCHING",
            AraState::Improving => "IMPROVING",
            AraState::Exhausted => "EXHAUSTED",
            AraState::Cancelled => "CANCELLED",
        }
    }
}

/// One improving solution reported during the run.
#[derive(Clone, Copy, Debug)]
pub struct SolutionReport {
    /// Path cost of this solution
    pub cost: f32,
    /// Suboptimality bound (the ε of the pass that produced it)
    pub bound: f32,
    /// Total nodes expanded when the report was made
    pub nodes_expanded: usize,
}

/// ε schedule and loop parameters.
#[derive(Clone, Copy, Debug)]
pub struct AraTuning {
    /// Initial inflation factor (≥ 1)
    pub epsilon_start: f32,
    /// Fixed decrement applied after each completed pass
    pub epsilon_step: f32,
    /// Expansions between time-budget checks
    pub budget_check_interval: usize,
}

impl Default for AraTuning {
    fn default() -> Self {
        Self {
            epsilon_start: 3.0,
            epsilon_step: 0.5,
            budget_check_interval: 64,
        }
    }
}

/// Result of one ARA* invocation.
#[derive(Clone, Debug)]
pub enum AraOutcome {
    /// At least one pass completed. `bound == 1.0` means the path is
    /// proven optimal; larger bounds are best-so-far returns after
    /// budget expiry.
    Found {
        /// Ordered configurations with the primitive leading into each
        steps: Vec<(Configuration, Option<PrimitiveId>)>,
        /// Cost of the best (last reported) solution
        cost: f32,
        /// Suboptimality bound of the returned path
        bound: f32,
        /// Every improving report, in order; costs are non-increasing
        reports: Vec<SolutionReport>,
        /// Terminal state of the run
        final_state: AraState,
        /// Search counters
        stats: SearchStats,
    },
    /// Reachable space exhausted with no route to the goal.
    NoPath {
        /// Search counters
        stats: SearchStats,
    },
    /// Budget expired before the first pass completed.
    DeadlineExceeded {
        /// Search counters
        stats: SearchStats,
    },
}

enum PassEnd {
    GoalReached(usize),
    OpenEmpty,
    Deadline,
}

/// Anytime planner over the same primitive/collision substrate as A*.
pub struct AraSearch<'a> {
    grid: &'a OccupancyGrid,
    table: &'a PrimitiveTable,
    disc: &'a Discretizer,
    tuning: AraTuning,
}

impl<'a> AraSearch<'a> {
    /// Create a search over one map snapshot and primitive table.
    pub fn new(
        grid: &'a OccupancyGrid,
        table: &'a PrimitiveTable,
        disc: &'a Discretizer,
        tuning: AraTuning,
    ) -> Self {
        Self {
            grid,
            table,
            disc,
            tuning,
        }
    }

    /// Run the anytime search until exhaustion or deadline.
    pub fn search(
        &self,
        start: Configuration,
        goal: Configuration,
        tol: GoalTolerance,
        deadline: Option<Instant>,
    ) -> AraOutcome {
        let checker = CollisionChecker::new(self.grid);
        let mut arena = NodeArena::new();
        let mut open: BinaryHeap<QueueEntry> = BinaryHeap::new();
        let mut incons: Vec<usize> = Vec::new();
        let mut seq: u64 = 0;
        let mut expanded: usize = 0;
        let mut passes: u32 = 0;

        let mut epsilon = self.tuning.epsilon_start.max(1.0);
        let mut state = AraState::Searching;
        let mut reports: Vec<SolutionReport> = Vec::new();
        let mut best: Option<(Vec<(Configuration, Option<PrimitiveId>)>, f32)> = None;

        let h0 = euclidean(&start, &goal);
        let start_idx = arena.get_or_create(start, h0);
        arena.node_mut(start_idx).g = 0.0;
        open.push(QueueEntry {
            f: epsilon * h0,
            g: 0.0,
            seq,
            node: start_idx,
        });
        seq += 1;

        loop {
            let pass = passes + 1;
            let end = self.improve_pass(
                &checker,
                &mut arena,
                &mut open,
                &mut incons,
                epsilon,
                pass,
                &goal,
                &tol,
                deadline,
                &mut expanded,
                &mut seq,
            );

            match end {
                PassEnd::GoalReached(goal_idx) => {
                    passes += 1;
                    let cost = arena.node(goal_idx).g;
                    best = Some((arena.reconstruct_path(goal_idx), cost));
                    reports.push(SolutionReport {
                        cost,
                        bound: epsilon,
                        nodes_expanded: expanded,
                    });
                    info!(
                        "[arastar] pass {} complete: cost={:.3} eps={:.2} expanded={}",
                        passes, cost, epsilon, expanded
                    );

                    if epsilon <= 1.0 + COST_EPS {
                        state = AraState::Exhausted;
                        break;
                    }
                    state = AraState::Improving;
                    epsilon = (epsilon - self.tuning.epsilon_step).max(1.0);
                    self.reseed_open(&mut arena, &mut open, &mut incons, epsilon, &mut seq);
                }
                PassEnd::OpenEmpty => {
                    if best.is_none() {
                        debug!("[arastar] no path after {} expansions", expanded);
                        return AraOutcome::NoPath {
                            stats: self.stats(expanded, passes, &arena),
                        };
                    }
                    // Nothing left to improve: the incumbent is optimal
                    state = AraState::Exhausted;
                    break;
                }
                PassEnd::Deadline => {
                    state = AraState::Cancelled;
                    break;
                }
            }
        }

        let stats = self.stats(expanded, passes, &arena);
        match best {
            Some((steps, cost)) => {
                let bound = match state {
                    AraState::Exhausted => 1.0,
                    _ => reports.last().map(|r| r.bound).unwrap_or(epsilon),
                };
                info!(
                    "[arastar] done: state={} cost={:.3} bound={:.2} passes={}",
                    state.as_str(),
                    cost,
                    bound,
                    passes
                );
                AraOutcome::Found {
                    steps,
                    cost,
                    bound,
                    reports,
                    final_state: state,
                    stats,
                }
            }
            None => AraOutcome::DeadlineExceeded { stats },
        }
    }

    /// Expand until the goal is popped, OPEN empties, or the budget runs
    /// out. Nodes are closed at most once per pass; re-improved closed
    /// nodes join INCONS for the next pass.
    #[allow(clippy::too_many_arguments)]
    fn improve_pass(
        &self,
        checker: &CollisionChecker<'_>,
        arena: &mut NodeArena,
        open: &mut BinaryHeap<QueueEntry>,
        incons: &mut Vec<usize>,
        epsilon: f32,
        pass: u32,
        goal: &Configuration,
        tol: &GoalTolerance,
        deadline: Option<Instant>,
        expanded: &mut usize,
        seq: &mut u64,
    ) -> PassEnd {
        while let Some(entry) = open.pop() {
            if *expanded % self.tuning.budget_check_interval == 0 {
                if let Some(deadline) = deadline {
                    if Instant::now() >= deadline {
                        return PassEnd::Deadline;
                    }
                }
            }

            let node = arena.node(entry.node);
            if node.closed_pass == pass {
                continue;
            }
            if entry.g > node.g + COST_EPS {
                continue; // stale entry
            }

            // The goal node is not closed, so the next pass can improve it
            if satisfies_goal(&node.config, goal, tol) {
                return PassEnd::GoalReached(entry.node);
            }

            let key = node.config.key;
            let cell = node.config.cell();
            let g = node.g;
            {
                let node = arena.node_mut(entry.node);
                node.tag = NodeTag::Closed;
                node.closed_pass = pass;
            }
            *expanded += 1;

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
                let h = euclidean(&succ, goal);
                let idx = arena.get_or_create(succ, h);

                let ng = g + prim.cost;
                if ng + COST_EPS >= arena.node(idx).g {
                    continue;
                }
                arena.update_cost(idx, ng, entry.node, prim.id);

                if arena.node(idx).closed_pass == pass {
                    // Improved after closing: locally inconsistent
                    if arena.node(idx).tag != NodeTag::Incons {
                        arena.node_mut(idx).tag = NodeTag::Incons;
                        incons.push(idx);
                    }
                } else {
                    let h = arena.node(idx).h;
                    arena.node_mut(idx).tag = NodeTag::Open;
                    open.push(QueueEntry {
                        f: ng + epsilon * h,
                        g: ng,
                        seq: *seq,
                        node: idx,
                    });
                    *seq += 1;
                }
            }
        }

        PassEnd::OpenEmpty
    }

    /// Build the next pass's OPEN from surviving open nodes plus INCONS,
    /// re-prioritized under the new ε. Arena creation order keeps the
    /// rebuild deterministic.
    fn reseed_open(
        &self,
        arena: &mut NodeArena,
        open: &mut BinaryHeap<QueueEntry>,
        incons: &mut Vec<usize>,
        epsilon: f32,
        seq: &mut u64,
    ) {
        for idx in incons.drain(..) {
            arena.node_mut(idx).tag = NodeTag::Open;
        }

        open.clear();
        let mut entries = Vec::new();
        for (idx, node) in arena.iter() {
            if node.tag == NodeTag::Open && node.g.is_finite() {
                entries.push((idx, node.g, node.h));
            }
        }
        for (idx, g, h) in entries {
            open.push(QueueEntry {
                f: g + epsilon * h,
                g,
                seq: *seq,
                node: idx,
            });
            *seq += 1;
        }
    }

    fn stats(&self, expanded: usize, passes: u32, arena: &NodeArena) -> SearchStats {
        SearchStats {
            nodes_expanded: expanded,
            nodes_generated: arena.len(),
            passes,
        }
    }
}
