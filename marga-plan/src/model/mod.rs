//! Vehicle kinematic models.
//!
//! Every supported vehicle implements [`VehicleModel`]: primitive
//! generation for each lattice heading, footprint geometry, and a
//! kinematic feasibility test. Model instances are immutable configuration
//! data, shared read-only across planning requests.

mod car;
mod carrier;
pub mod footprint;
pub(crate) mod maneuver;
mod unicycle;

pub use car::CarModel;
pub use carrier::LoadCarrierModel;
pub use footprint::{stationary_cells, BodyRect};
pub use unicycle::UnicycleModel;

use marga_grid::core::math::angle_diff;
use marga_grid::{Pose2D, WorldPoint};

use crate::discretize::Discretizer;
use crate::primitive::MotionPrimitive;

/// Slack factor applied to the curvature bound when validating snapped
/// primitives: endpoint snapping can shorten the chord and inflate the
/// implied curvature of a maneuver that was generated within limits.
const CURVATURE_SLACK: f32 = 1.4;

/// Vehicle model family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VehicleKind {
    /// Front-steered car (fork-lift type)
    Car,
    /// Articulated tractor + load unit
    LoadCarrier,
    /// Differential-drive cart, unconstrained heading rate
    Unicycle,
}

/// Capability set shared by all vehicle models.
///
/// Models are pure functions of pose and discretization parameters: they
/// never touch map or search state.
pub trait VehicleModel: Send + Sync {
    /// Registry name of this model (the id used in planning requests).
    fn name(&self) -> &'static str;

    /// Model family.
    fn kind(&self) -> VehicleKind;

    /// Maximum path curvature this vehicle can follow (1/m).
    fn max_curvature(&self) -> f32;

    /// Can the vehicle rotate without translating?
    fn allows_turn_in_place(&self) -> bool {
        false
    }

    /// Footprint rectangles in the vehicle frame.
    fn bodies(&self) -> &[BodyRect];

    /// Generate the primitive set for one start heading.
    ///
    /// Runs once per model/resolution pair as an offline precomputation;
    /// headings are independent of each other.
    fn generate_primitives(&self, disc: &Discretizer, heading: u16) -> Vec<MotionPrimitive>;

    /// Check a primitive against this vehicle's kinematic limits.
    ///
    /// Uses the chord/heading-change relation `1/R = 2·sin(Δθ/2) / chord`
    /// to recover the curvature a snapped primitive implies.
    fn is_kinematically_valid(&self, prim: &MotionPrimitive, disc: &Discretizer) -> bool {
        if !(prim.cost > 0.0) {
            return false;
        }
        let chord = prim.chord_length(disc.resolution());
        let dtheta = angle_diff(
            disc.index_to_heading(prim.start_heading),
            disc.index_to_heading(prim.end_heading),
        );

        if chord < 1e-6 {
            return self.allows_turn_in_place() && dtheta.abs() > 1e-6;
        }
        if dtheta.abs() < 1e-6 {
            return true;
        }
        let curvature = 2.0 * (dtheta.abs() / 2.0).sin() / chord;
        curvature <= self.max_curvature() * CURVATURE_SLACK
    }

    /// Footprint polygon(s) at a world pose.
    fn footprint_at(&self, pose: Pose2D) -> Vec<[WorldPoint; 4]> {
        self.bodies().iter().map(|b| b.corners_at(pose)).collect()
    }
}

/// Resolves a vehicle model id to its model instance.
///
/// Built once at startup and passed by reference into every request —
/// there is no process-wide mutable model state.
pub struct ModelRegistry {
    models: Vec<Box<dyn VehicleModel>>,
}

impl ModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { models: Vec::new() }
    }

    /// Add a model. Later registrations shadow earlier ones of the same name.
    pub fn register(&mut self, model: Box<dyn VehicleModel>) {
        self.models.retain(|m| m.name() != model.name());
        self.models.push(model);
    }

    /// Look up a model by name.
    pub fn get(&self, name: &str) -> Option<&dyn VehicleModel> {
        self.models
            .iter()
            .find(|m| m.name() == name)
            .map(|m| m.as_ref())
    }

    /// Registered model names, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.models.iter().map(|m| m.name()).collect()
    }

    /// Number of registered models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// True if no models are registered.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop duplicate `(cell_delta, end_heading)` entries, keeping the
/// cheapest. Order of first occurrence is preserved so generated tables
/// are deterministic.
pub(crate) fn dedupe_primitives(prims: Vec<MotionPrimitive>) -> Vec<MotionPrimitive> {
    let mut out: Vec<MotionPrimitive> = Vec::with_capacity(prims.len());
    for prim in prims {
        match out
            .iter_mut()
            .find(|p| p.cell_delta == prim.cell_delta && p.end_heading == prim.end_heading)
        {
            Some(existing) => {
                if prim.cost < existing.cost {
                    *existing = prim;
                }
            }
            None => out.push(prim),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        let mut registry = ModelRegistry::new();
        assert!(registry.is_empty());

        registry.register(Box::new(UnicycleModel::new(
            BodyRect::new(0.6, 0.5, 0.0),
            0.5,
        )));
        registry.register(Box::new(CarModel::new(
            1.0,
            0.6,
            2.0,
            BodyRect::new(0.8, 0.5, 0.2),
        )));

        assert_eq!(registry.len(), 2);
        assert!(registry.get("car").is_some());
        assert!(registry.get("unicycle").is_some());
        assert!(registry.get("hovercraft").is_none());
        assert_eq!(registry.get("car").unwrap().kind(), VehicleKind::Car);
    }

    #[test]
    fn test_dedupe_keeps_cheapest() {
        let make = |cost: f32| MotionPrimitive {
            id: 0,
            start_heading: 0,
            end_heading: 0,
            cell_delta: (1, 0),
            delta: Pose2D::new(1.0, 0.0, 0.0),
            cost,
            swept_cells: vec![(0, 0), (1, 0)],
        };
        let deduped = dedupe_primitives(vec![make(2.0), make(1.0), make(3.0)]);
        assert_eq!(deduped.len(), 1);
        assert!((deduped[0].cost - 1.0).abs() < 1e-6);
    }
}
