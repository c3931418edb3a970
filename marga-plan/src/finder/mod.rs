//! Path finder orchestration.
//!
//! [`PlannerContext`] is built once at startup from configuration: vehicle
//! models plus their primitive tables, loaded from the store or generated
//! in memory. A [`ConfigError`] here aborts construction — the planner
//! never starts in a degraded mode.
//!
//! [`PathFinder`] then serves individual requests against map snapshots.
//! It owns no search state beyond a single request's lifetime; concurrent
//! requests may share one context and one grid because both are read-only
//! during planning.

mod request;
mod result;

pub use request::{Algorithm, PlanningRequest};
pub use result::{BlockedReason, PathStep, PlanError, PlanningResult};

use std::collections::HashMap;
use std::time::Instant;

use log::{debug, info};

use marga_grid::OccupancyGrid;

use crate::collision::CollisionChecker;
use crate::config::PlannerConfig;
use crate::discretize::{Configuration, Discretizer};
use crate::error::ConfigError;
use crate::model::{stationary_cells, ModelRegistry, VehicleModel};
use crate::primitive::{store, PrimitiveTable};
use crate::search::{
    AStarSearch, AStarTuning, AraOutcome, AraSearch, AraTuning, GoalTolerance, SearchOutcome,
};

/// Immutable planning context: registry, tables, and lattice parameters.
///
/// Constructed once per configuration and passed by reference into every
/// request; there is no process-wide mutable lookup state.
pub struct PlannerContext {
    disc: Discretizer,
    registry: ModelRegistry,
    tables: HashMap<String, PrimitiveTable>,
    astar_tuning: AStarTuning,
    ara_tuning: AraTuning,
}

impl PlannerContext {
    /// Build the context from configuration.
    ///
    /// For each vehicle the primitive table is loaded from the configured
    /// store directory when a file is present (and validated against the
    /// lattice), otherwise generated in memory. Corrupt or mismatched
    /// store files are fatal.
    pub fn from_config(config: &PlannerConfig) -> Result<Self, ConfigError> {
        let disc = config.discretizer();
        let registry = config.build_registry();
        let mut tables = HashMap::new();

        for name in registry.names() {
            let model = registry
                .get(name)
                .ok_or_else(|| ConfigError::UnknownModel(name.to_string()))?;
            let table = Self::load_or_build(model, &disc, config)?;
            table.validate_for(name, &disc)?;
            tables.insert(name.to_string(), table);
        }

        info!(
            "[context] ready: {} models, lattice {}x{} headings",
            tables.len(),
            disc.resolution(),
            disc.heading_count()
        );

        Ok(Self {
            disc,
            registry,
            tables,
            astar_tuning: config.search.astar.to_tuning(),
            ara_tuning: config.search.arastar.to_tuning(),
        })
    }

    fn load_or_build(
        model: &dyn VehicleModel,
        disc: &Discretizer,
        config: &PlannerConfig,
    ) -> Result<PrimitiveTable, ConfigError> {
        if let Some(dir) = &config.tables.dir {
            let path = dir.join(store::table_file_name(model.name(), disc));
            if path.exists() {
                return store::load(&path);
            }
            debug!(
                "[context] no store file for model={}, generating",
                model.name()
            );
        }
        PrimitiveTable::build(model, disc)
    }

    /// The lattice discretizer.
    pub fn discretizer(&self) -> &Discretizer {
        &self.disc
    }

    /// Resolve a vehicle model by request id.
    pub fn model(&self, name: &str) -> Option<&dyn VehicleModel> {
        self.registry.get(name)
    }

    /// The primitive table of a vehicle model.
    pub fn table(&self, name: &str) -> Option<&PrimitiveTable> {
        self.tables.get(name)
    }
}

/// Serves planning requests against a context and a map snapshot.
pub struct PathFinder<'a> {
    ctx: &'a PlannerContext,
}

impl<'a> PathFinder<'a> {
    /// Create a finder over a planning context.
    pub fn new(ctx: &'a PlannerContext) -> Self {
        Self { ctx }
    }

    /// Run one planning request to completion (or budget expiry).
    pub fn plan(
        &self,
        request: &PlanningRequest,
        grid: &OccupancyGrid,
    ) -> Result<PlanningResult, PlanError> {
        let disc = &self.ctx.disc;
        if (grid.resolution() - disc.resolution()).abs() > 1e-6 {
            return Err(PlanError::GridMismatch {
                expected: disc.resolution(),
                found: grid.resolution(),
            });
        }

        let model = self
            .ctx
            .model(&request.model)
            .ok_or_else(|| PlanError::UnknownModel(request.model.clone()))?;
        let table = self
            .ctx
            .table(&request.model)
            .ok_or_else(|| PlanError::UnknownModel(request.model.clone()))?;

        let start = Configuration::from_world(request.start, grid, disc);
        let goal = Configuration::from_world(request.goal, grid, disc);

        debug!(
            "[finder] plan model={} algo={:?} start=({:.2},{:.2},{:.2}) goal=({:.2},{:.2},{:.2})",
            request.model,
            request.algorithm,
            request.start.x,
            request.start.y,
            request.start.theta,
            request.goal.x,
            request.goal.y,
            request.goal.theta
        );

        self.validate_endpoint(model, grid, &start)
            .map_err(PlanError::InvalidStart)?;
        self.validate_endpoint(model, grid, &goal)
            .map_err(PlanError::InvalidGoal)?;

        let tolerance = request.tolerance.unwrap_or_else(|| {
            GoalTolerance::for_lattice(disc.resolution(), disc.heading_count())
        });
        let deadline = request.time_budget.map(|budget| Instant::now() + budget);

        match request.algorithm {
            Algorithm::AStar => {
                let search = AStarSearch::new(grid, table, disc, self.ctx.astar_tuning);
                match search.search(start, goal, tolerance, deadline) {
                    SearchOutcome::Found { steps, cost, stats } => Ok(PlanningResult {
                        steps: to_steps(steps),
                        total_cost: cost,
                        suboptimality_bound: 1.0,
                        reports: Vec::new(),
                        stats,
                    }),
                    SearchOutcome::NoPath { .. } => Err(PlanError::NoPathFound),
                    SearchOutcome::DeadlineExceeded { .. } => Err(PlanError::Timeout),
                }
            }
            Algorithm::AraStar => {
                let search = AraSearch::new(grid, table, disc, self.ctx.ara_tuning);
                match search.search(start, goal, tolerance, deadline) {
                    AraOutcome::Found {
                        steps,
                        cost,
                        bound,
                        reports,
                        stats,
                        ..
                    } => Ok(PlanningResult {
                        steps: to_steps(steps),
                        total_cost: cost,
                        suboptimality_bound: bound,
                        reports,
                        stats,
                    }),
                    AraOutcome::NoPath { .. } => Err(PlanError::NoPathFound),
                    AraOutcome::DeadlineExceeded { .. } => Err(PlanError::Timeout),
                }
            }
        }
    }

    /// Bounds plus stationary-footprint collision check for one endpoint.
    fn validate_endpoint(
        &self,
        model: &dyn VehicleModel,
        grid: &OccupancyGrid,
        config: &Configuration,
    ) -> Result<(), BlockedReason> {
        if !grid.is_valid_coord(config.cell()) {
            return Err(BlockedReason::OutOfBounds);
        }
        let cells = stationary_cells(model.bodies(), &self.ctx.disc, config.key.ih);
        let checker = CollisionChecker::new(grid);
        if !checker.are_cells_free(config.cell(), &cells) {
            return Err(BlockedReason::Occupied);
        }
        Ok(())
    }
}

fn to_steps(
    steps: Vec<(Configuration, Option<crate::primitive::PrimitiveId>)>,
) -> Vec<PathStep> {
    steps
        .into_iter()
        .map(|(config, primitive)| PathStep { config, primitive })
        .collect()
}
