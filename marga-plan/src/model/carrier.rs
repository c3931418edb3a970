//! Articulated load-carrier model (load-haul-dump type vehicles).

use crate::discretize::Discretizer;
use crate::primitive::MotionPrimitive;

use super::footprint::BodyRect;
use super::maneuver::{build_primitive, lattice_step, Maneuver};
use super::{dedupe_primitives, VehicleKind, VehicleModel};

/// Tractor and load unit joined at an articulation joint.
///
/// The reference point is the articulation joint. Path curvature is bounded
/// by the maximum articulation angle: at steady state a curvature `k`
/// implies an articulation of `atan(k * hitch_length)`. The trailing body
/// follows the tractor; its footprint is swept together with the tractor's.
pub struct LoadCarrierModel {
    hitch_length: f32,
    max_articulation_angle: f32,
    reverse_cost_factor: f32,
    bodies: [BodyRect; 2],
}

impl LoadCarrierModel {
    /// Create a load-carrier model.
    ///
    /// # Arguments
    /// * `hitch_length` - Joint-to-axle distance in meters
    /// * `max_articulation_angle` - Articulation limit in radians
    /// * `reverse_cost_factor` - Cost multiplier for reverse motion (≥ 1)
    /// * `tractor` - Leading body rectangle (positive offset)
    /// * `trailer` - Trailing body rectangle (negative offset)
    pub fn new(
        hitch_length: f32,
        max_articulation_angle: f32,
        reverse_cost_factor: f32,
        tractor: BodyRect,
        trailer: BodyRect,
    ) -> Self {
        Self {
            hitch_length,
            max_articulation_angle,
            reverse_cost_factor,
            bodies: [tractor, trailer],
        }
    }

    /// Steady-state articulation angle for a path curvature (radians).
    pub fn articulation_for_curvature(&self, curvature: f32) -> f32 {
        (curvature * self.hitch_length).atan()
    }
}

impl VehicleModel for LoadCarrierModel {
    fn name(&self) -> &'static str {
        "load_carrier"
    }

    fn kind(&self) -> VehicleKind {
        VehicleKind::LoadCarrier
    }

    fn max_curvature(&self) -> f32 {
        self.max_articulation_angle.tan() / self.hitch_length
    }

    fn bodies(&self) -> &[BodyRect] {
        &self.bodies
    }

    fn generate_primitives(&self, disc: &Discretizer, heading: u16) -> Vec<MotionPrimitive> {
        let (sx, sy) = lattice_step(disc, heading);
        let step_len = (((sx * sx + sy * sy) as f32).sqrt()) * disc.resolution();
        let k_max = self.max_curvature();
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
            // Straight reverse only: backing an articulated pair through a
            // turn is unstable and excluded from the lattice
            Maneuver::Arc {
                curvature: 0.0,
                length: -step_len,
                cost_factor: self.reverse_cost_factor,
            },
        ];

        for turn in [1.0f32, -1.0] {
            for frac in [1.0f32, 0.5] {
                let k = turn * k_max * frac;
                maneuvers.push(Maneuver::Arc {
                    curvature: k,
                    length: step_angle / (k_max * frac),
                    cost_factor: 1.0,
                });
            }
        }

        let prims = maneuvers
            .into_iter()
            .filter_map(|m| build_primitive(&self.bodies, disc, heading, m))
            .filter(|p| self.is_kinematically_valid(p, disc))
            .collect();
        dedupe_primitives(prims)
    }
}
