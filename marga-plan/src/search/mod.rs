//! Lattice graph search: baseline A* and anytime-repairing ARA*.

pub mod arena;
pub mod arastar;
pub mod astar;
pub mod heuristic;
mod queue;

pub use arastar::{AraOutcome, AraSearch, AraState, AraTuning, SolutionReport};
pub use arena::{NodeArena, NodeTag, SearchNode};
pub use astar::{AStarSearch, AStarTuning, SearchOutcome};
pub use heuristic::GoalTolerance;

/// Counters reported with every search result.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    /// Nodes expanded (popped and closed)
    pub nodes_expanded: usize,
    /// Nodes ever created in the arena
    pub nodes_generated: usize,
    /// Completed ε-passes (always ≤ 1 for plain A*)
    pub passes: u32,
}
