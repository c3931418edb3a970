//! Front-steered car model (fork-lift type vehicles).

use crate::discretize::Discretizer;
use crate::primitive::MotionPrimitive;

use super::footprint::BodyRect;
use super::maneuver::{build_primitive, lattice_step, Maneuver};
use super::{dedupe_primitives, VehicleKind, VehicleModel};

/// Car with a fixed wheelbase and bounded steering angle.
///
/// The reference point is the rear axle center. Minimum turn radius is
/// `wheelbase / tan(max_steering_angle)`; the car can drive in reverse at
/// a cost penalty but cannot rotate in place.
pub struct CarModel {
    wheelbase: f32,
    max_steering_angle: f32,
    reverse_cost_factor: f32,
    bodies: [BodyRect; 1],
}

impl CarModel {
    /// Create a car model.
    ///
    /// # Arguments
    /// * `wheelbase` - Distance between axles in meters
    /// * `max_steering_angle` - Steering lock in radians
    /// * `reverse_cost_factor` - Cost multiplier for reverse motion (≥ 1)
    /// * `body` - Footprint rectangle relative to the rear axle
    pub fn new(
        wheelbase: f32,
        max_steering_angle: f32,
        reverse_cost_factor: f32,
        body: BodyRect,
    ) -> Self {
        Self {
            wheelbase,
            max_steering_angle,
            reverse_cost_factor,
            bodies: [body],
        }
    }

    /// Minimum turn radius in meters.
    pub fn min_turn_radius(&self) -> f32 {
        self.wheelbase / self.max_steering_angle.tan()
    }
}

impl VehicleModel for CarModel {
    fn name(&self) -> &'static str {
        "car"
    }

    fn kind(&self) -> VehicleKind {
        VehicleKind::Car
    }

    fn max_curvature(&self) -> f32 {
        self.max_steering_angle.tan() / self.wheelbase
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
            // Straight moves: one and two lattice steps forward
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
            // One lattice step in reverse
            Maneuver::Arc {
                curvature: 0.0,
                length: -step_len,
                cost_factor: self.reverse_cost_factor,
            },
        ];

        // Forward turns: one heading step at full and half steering lock
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

        // Reverse turns at full lock (forklifts maneuver backwards a lot)
        for turn in [1.0f32, -1.0] {
            maneuvers.push(Maneuver::Arc {
                curvature: turn * k_max,
                length: -(step_angle / k_max),
                cost_factor: self.reverse_cost_factor,
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

#[cfg(test)]
mod tests {
    use super::*;

    fn test_car() -> CarModel {
        CarModel::new(1.0, 0.6, 2.0, BodyRect::new(0.8, 0.5, 0.2))
    }

    #[test]
    fn test_min_turn_radius() {
        let car = test_car();
        assert!((car.min_turn_radius() - 1.0 / 0.6f32.tan()).abs() < 1e-6);
        assert!((car.max_curvature() * car.min_turn_radius() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_generates_reasonable_set() {
        let car = test_car();
        let disc = Discretizer::new(1.0, 8);

        for heading in 0..8u16 {
            let prims = car.generate_primitives(&disc, heading);
            assert!(
                (3..=20).contains(&prims.len()),
                "heading {} produced {} primitives",
                heading,
                prims.len()
            );
            for prim in &prims {
                assert_eq!(prim.start_heading, heading);
                assert!(prim.cost > 0.0);
                assert!(!prim.swept_cells.is_empty());
                assert!(!prim.is_turn_in_place(), "cars cannot rotate in place");
            }
        }
    }

    #[test]
    fn test_straight_ahead_present() {
        let car = test_car();
        let disc = Discretizer::new(1.0, 8);
        let prims = car.generate_primitives(&disc, 0);
        assert!(prims
            .iter()
            .any(|p| p.cell_delta == (1, 0) && p.end_heading == 0));
        // Turning primitives reach both neighbor headings
        assert!(prims.iter().any(|p| p.end_heading == 1));
        assert!(prims.iter().any(|p| p.end_heading == 7));
    }

    #[test]
    fn test_turn_in_place_is_invalid_for_car() {
        let car = test_car();
        let disc = Discretizer::new(1.0, 8);
        let spin = MotionPrimitive {
            id: 0,
            start_heading: 0,
            end_heading: 1,
            cell_delta: (0, 0),
            delta: marga_grid::Pose2D::new(0.0, 0.0, disc.heading_step()),
            cost: 0.3,
            swept_cells: vec![(0, 0)],
        };
        assert!(!car.is_kinematically_valid(&spin, &disc));
    }

    #[test]
    fn test_over_tight_turn_is_invalid() {
        let car = test_car();
        let disc = Discretizer::new(1.0, 8);
        // One-cell move with a 90° heading change implies a turn far
        // tighter than the steering lock allows
        let tight = MotionPrimitive {
            id: 0,
            start_heading: 0,
            end_heading: 2,
            cell_delta: (1, 0),
            delta: marga_grid::Pose2D::new(1.0, 0.0, std::f32::consts::FRAC_PI_2),
            cost: 1.0,
            swept_cells: vec![(0, 0), (1, 0)],
        };
        assert!(!car.is_kinematically_valid(&tight, &disc));
    }
}
