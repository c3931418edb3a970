//! # Marga-Plan: Lattice Motion Planner for Industrial Vehicles
//!
//! Kinematically-feasible, collision-free path planning for industrial
//! autonomous vehicles (fork-lift cars, articulated load-haul-dump
//! carriers, unicycle carts) over a mapped, discretized workspace.
//!
//! The engine is a lattice search: graph edges are a finite precomputed
//! set of feasible short maneuvers (motion primitives) per vehicle model
//! and discrete heading, validated against an occupancy grid by a
//! swept-cell collision checker. Two searches run on that substrate —
//! optimal A* and anytime-repairing ARA*, which returns improving
//! bounded-suboptimal solutions under a time budget.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use marga_grid::{OccupancyGrid, Pose2D};
//! use marga_plan::config::PlannerConfig;
//! use marga_plan::finder::{PathFinder, PlannerContext, PlanningRequest};
//!
//! let config = PlannerConfig::default();
//! let ctx = PlannerContext::from_config(&config).expect("usable configuration");
//! let finder = PathFinder::new(&ctx);
//!
//! let grid = OccupancyGrid::centered_free(200, 200, 0.25);
//! let request = PlanningRequest::new(
//!     Pose2D::identity(),
//!     Pose2D::new(12.0, 5.0, 0.0),
//!     "car",
//! );
//! match finder.plan(&request, &grid) {
//!     Ok(result) => println!(
//!         "path: {} steps, cost {:.2}",
//!         result.steps.len(),
//!         result.total_cost
//!     ),
//!     Err(failure) => println!("planning failed: {}", failure),
//! }
//! ```
//!
//! ## Architecture
//!
//! The crate is organized leaf-first:
//!
//! - [`discretize`]: pose ↔ lattice mapping ([`discretize::Configuration`])
//! - [`model`]: vehicle models (car / load-carrier / unicycle) behind one
//!   capability trait
//! - [`primitive`]: motion primitive tables plus their binary store
//! - [`collision`]: swept-cell collision detection
//! - [`search`]: node arena, A*, ARA*
//! - [`finder`]: request orchestration and typed results
//! - [`config`]: YAML configuration with per-section defaults
//!
//! Data flow:
//!
//! ```text
//! PlanningRequest ──► PathFinder ──► (VehicleModel + PrimitiveTable + OccupancyGrid)
//!                                         │
//!                                         ▼
//!                              A* / ARA* over NodeArena
//!                          (CollisionChecker as edge oracle)
//!                                         │
//!                                         ▼
//!                          PlanningResult (configurations + primitive ids)
//! ```
//!
//! ## Concurrency
//!
//! A single invocation is sequential; suspension happens only at search
//! loop boundaries for time-budget checks. Context, tables, models, and
//! the grid snapshot are immutable during a request, so concurrent
//! requests may share them while owning their private search state.

pub mod collision;
pub mod config;
pub mod discretize;
pub mod error;
pub mod finder;
pub mod model;
pub mod primitive;
pub mod search;

pub use config::PlannerConfig;
pub use discretize::{ConfigKey, Configuration, Discretizer};
pub use error::ConfigError;
pub use finder::{
    Algorithm, BlockedReason, PathFinder, PathStep, PlanError, PlannerContext, PlanningRequest,
    PlanningResult,
};
pub use model::{VehicleKind, VehicleModel};
pub use primitive::{MotionPrimitive, PrimitiveId, PrimitiveTable};
pub use search::{AraState, GoalTolerance, SearchStats, SolutionReport};
