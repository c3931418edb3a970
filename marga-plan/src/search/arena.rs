//! Search node arena.
//!
//! All nodes touched by a search live in one arena for the lifetime of the
//! request. Parent links are arena indices, never references, so path
//! reconstruction is an index walk and the whole store is freed wholesale
//! when the request ends. Nodes are never removed mid-search: `Closed` and
//! `Incons` are tags, which lets the anytime planner reopen nodes cheaply
//! across ε-passes.

use std::collections::HashMap;

use crate::discretize::{ConfigKey, Configuration};
use crate::primitive::PrimitiveId;

/// Search lifecycle tag of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NodeTag {
    /// Discovered, awaiting expansion
    #[default]
    Open,
    /// Expanded in the current pass
    Closed,
    /// Improved after being closed; queued for the next ε-pass
    Incons,
}

/// One search node.
#[derive(Clone, Debug)]
pub struct SearchNode {
    /// Lattice configuration of this node
    pub config: Configuration,
    /// Accumulated cost from the start
    pub g: f32,
    /// Heuristic estimate to the goal
    pub h: f32,
    /// Arena index of the parent and the primitive that led here
    pub parent: Option<(usize, PrimitiveId)>,
    /// Lifecycle tag
    pub tag: NodeTag,
    /// Pass counter at the time this node was last closed (0 = never)
    pub closed_pass: u32,
}

/// Arena-backed map from lattice key to search node.
pub struct NodeArena {
    nodes: Vec<SearchNode>,
    index: HashMap<ConfigKey, usize>,
}

impl NodeArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Number of nodes ever created.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no nodes have been created.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the node at an existing key, if any.
    pub fn lookup(&self, key: &ConfigKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Get the arena index for a configuration, creating an unexplored
    /// node (`g = ∞`) on first touch.
    pub fn get_or_create(&mut self, config: Configuration, h: f32) -> usize {
        if let Some(&idx) = self.index.get(&config.key) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(SearchNode {
            config,
            g: f32::INFINITY,
            h,
            parent: None,
            tag: NodeTag::Open,
            closed_pass: 0,
        });
        self.index.insert(config.key, idx);
        idx
    }

    /// Immutable node access.
    #[inline]
    pub fn node(&self, idx: usize) -> &SearchNode {
        &self.nodes[idx]
    }

    /// Mutable node access.
    #[inline]
    pub fn node_mut(&mut self, idx: usize) -> &mut SearchNode {
        &mut self.nodes[idx]
    }

    /// Iterate over `(index, node)` pairs in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &SearchNode)> {
        self.nodes.iter().enumerate()
    }

    /// Record a cost improvement through `parent` via `primitive`.
    pub fn update_cost(
        &mut self,
        idx: usize,
        g: f32,
        parent: usize,
        primitive: PrimitiveId,
    ) {
        let node = &mut self.nodes[idx];
        node.g = g;
        node.parent = Some((parent, primitive));
    }

    /// Reconstruct the path ending at `goal_idx` by walking parent
    /// indices back to the start, then reversing.
    ///
    /// Each entry pairs a configuration with the primitive used to reach
    /// it; the start entry carries no primitive.
    pub fn reconstruct_path(&self, goal_idx: usize) -> Vec<(Configuration, Option<PrimitiveId>)> {
        let mut path = Vec::new();
        let mut cursor = Some(goal_idx);

        while let Some(idx) = cursor {
            let node = &self.nodes[idx];
            path.push((node.config, node.parent.map(|(_, prim)| prim)));
            cursor = node.parent.map(|(p, _)| p);
        }

        path.reverse();
        path
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}
