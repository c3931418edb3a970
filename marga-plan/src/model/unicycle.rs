//! Unicycle model (differential-drive carts).

use crate::discretize::Discretizer;
use crate::primitive::MotionPrimitive;

use super::footprint::BodyRect;
use super::maneuver::{build_primitive, lattice_step, Maneuver};
use super::{dedupe_primitives, VehicleKind, VehicleModel};

/// Differential-drive cart with unconstrained heading rate.
///
/// The reference point is the axle center. The cart can rotate in place,
/// so its primitive set includes pure rotations by one heading step in
/// addition to straights and gentle arcs.
pub struct UnicycleModel {
    bodies: [BodyRect; 1],
    turn_in_place_cost: f32,
}

impl UnicycleModel {
    /// Create a unicycle model.
    ///
    /// # Arguments
    /// * `body` - Footprint rectangle relative to the axle center
    /// * `turn_in_place_cost` - Cost per radian of in-place rotation
    pub fn new(body: BodyRect, turn_in_place_cost: f32) -> Self {
        Self {
            bodies: [body],
            turn_in_place_cost,
        }
    }
}

impl VehicleModel for UnicycleModel {
    fn name(&self) -> &'static str {
        "unicycle"
    }

    fn kind(&self) -> VehicleKind {
        VehicleKind::Unicycle
    }

    fn max_curvature(&self) -> f32 {
        f32::INFINITY
    }

    fn allows_turn_in_place(&self) -> bool {
        true
    }

    fn bodies(&self) -> &[BodyRect] {
        &self.bodies
    }

    fn generate_primitives(&self, disc: &Discretizer, heading: u16) -> Vec<MotionPrimitive> {
        let (sx, sy) = lattice_step(disc, heading);
        let step_len = (((sx * sx + sy * sy) as f32).sqrt()) * disc.resolution();
        let step_angle = disc.heading_step();

        let mut maneuvers = vec![
            Maneuver::Arc {
                curvature: 0.0,
                length: step_len,
                cost_factor: 1.0,
            },
            Maneuver::Arc {
                curvature: 0.0,
                length: 2.0 * step_len,
                cost_factor: 1.0,
            },
            Maneuver::Arc {
                curvature: 0.0,
                length: -step_len,
                cost_factor: 1.0,
            },
            Maneuver::TurnInPlace {
                steps: 1,
                cost_per_rad: self.turn_in_place_cost,
            },
            Maneuver::TurnInPlace {
                steps: -1,
                cost_per_rad: self.turn_in_place_cost,
            },
        ];

        // Gentle arcs, one heading step over roughly one lattice step
        let k = step_angle / step_len;
        for turn in [1.0f32, -1.0] {
            maneuvers.push(Maneuver::Arc {
                curvature: turn * k,
                length: step_len,
                cost_factor: 1.0,
            });
        }

        let prims = maneuvers
            .into_iter()
            .filter_map(|m| build_primitive(&self.bodies, disc, heading, m))
            .filter(|p| self.is_kinematically_valid(p, disc))
            .collect();
        dedupe_primitives(prims)
    }
}
