//! Maneuver descriptions and primitive construction.
//!
//! A [`Maneuver`] is the continuous description of one candidate move
//! (an arc, a straight, or a rotation in place). [`build_primitive`]
//! integrates it from a lattice start heading, snaps the endpoint onto the
//! lattice, and rasterizes the swept footprint — producing the immutable
//! [`MotionPrimitive`] stored in a table.

use marga_grid::core::math::angle_diff;
use marga_grid::Pose2D;

use crate::discretize::Discretizer;
use crate::primitive::MotionPrimitive;

use super::footprint::{covered_cells, BodyRect};

/// Along-track sampling step for swept-cell rasterization, as a fraction
/// of the lattice resolution. Small enough that a footprint at least one
/// cell wide cannot skip a covered cell between samples.
const SWEEP_STEP_FRACTION: f32 = 1.0 / 3.0;

/// Curvature below this magnitude is treated as a straight line.
const STRAIGHT_EPS: f32 = 1e-6;

/// One candidate maneuver in the continuous plane.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Maneuver {
    /// Constant-curvature motion. Negative `length` drives in reverse.
    Arc {
        /// Signed curvature (1/m, positive = left)
        curvature: f32,
        /// Signed arc length (m, negative = reverse)
        length: f32,
        /// Cost multiplier (reverse penalty etc.)
        cost_factor: f32,
    },
    /// Rotation in place by a whole number of heading steps.
    TurnInPlace {
        /// Signed heading steps (positive = CCW)
        steps: i32,
        /// Cost per radian of rotation
        cost_per_rad: f32,
    },
}

/// Pose after driving `s` meters along a constant-curvature path that
/// starts at the origin with heading `theta`.
fn arc_pose(theta: f32, curvature: f32, s: f32) -> Pose2D {
    if curvature.abs() < STRAIGHT_EPS {
        Pose2D::new(s * theta.cos(), s * theta.sin(), theta)
    } else {
        let end = theta + curvature * s;
        Pose2D::new(
            (end.sin() - theta.sin()) / curvature,
            -(end.cos() - theta.cos()) / curvature,
            end,
        )
    }
}

/// Build a lattice primitive from a maneuver starting at `start_heading`.
///
/// Returns `None` for maneuvers that collapse to nothing after snapping
/// (no cell displacement and no heading change).
pub(crate) fn build_primitive(
    bodies: &[BodyRect],
    disc: &Discretizer,
    start_heading: u16,
    maneuver: Maneuver,
) -> Option<MotionPrimitive> {
    let theta = disc.index_to_heading(start_heading);
    let res = disc.resolution();

    match maneuver {
        Maneuver::Arc {
            curvature,
            length,
            cost_factor,
        } => {
            let end = arc_pose(theta, curvature, length);
            let cell_delta = disc.snap_delta(end.x, end.y);
            let end_heading = disc.heading_to_index(end.theta);

            if cell_delta == (0, 0) {
                // Arcs must displace the vehicle; rotation without
                // translation is only expressible as TurnInPlace.
                return None;
            }

            let snapped = Pose2D::new(
                cell_delta.0 as f32 * res,
                cell_delta.1 as f32 * res,
                angle_diff(theta, disc.index_to_heading(end_heading)),
            );
            let chord = (snapped.x * snapped.x + snapped.y * snapped.y).sqrt();
            let cost = length.abs().max(chord) * cost_factor;

            // Sample the true arc, then add the snapped end pose so the
            // swept set always covers the landing cell.
            let mut poses = sample_arc(theta, curvature, length, res);
            poses.push(Pose2D::new(
                snapped.x,
                snapped.y,
                disc.index_to_heading(end_heading),
            ));

            Some(MotionPrimitive {
                id: 0,
                start_heading,
                end_heading,
                cell_delta,
                delta: snapped,
                cost,
                swept_cells: covered_cells(bodies, disc, &poses),
            })
        }
        Maneuver::TurnInPlace {
            steps,
            cost_per_rad,
        } => {
            if steps == 0 {
                return None;
            }
            let end_heading = disc.wrap_heading(start_heading as i32 + steps);
            let dtheta = angle_diff(theta, disc.index_to_heading(end_heading));
            let poses = [
                Pose2D::new(0.0, 0.0, theta),
                Pose2D::new(0.0, 0.0, theta + dtheta / 2.0),
                Pose2D::new(0.0, 0.0, disc.index_to_heading(end_heading)),
            ];

            Some(MotionPrimitive {
                id: 0,
                start_heading,
                end_heading,
                cell_delta: (0, 0),
                delta: Pose2D::new(0.0, 0.0, dtheta),
                cost: dtheta.abs() * cost_per_rad,
                swept_cells: covered_cells(bodies, disc, &poses),
            })
        }
    }
}

/// Sample poses along an arc at `SWEEP_STEP_FRACTION` of the resolution.
fn sample_arc(theta: f32, curvature: f32, length: f32, resolution: f32) -> Vec<Pose2D> {
    let step = resolution * SWEEP_STEP_FRACTION;
    let count = (length.abs() / step).ceil().max(1.0) as usize;
    (0..=count)
        .map(|i| arc_pose(theta, curvature, length * i as f32 / count as f32))
        .collect()
}

/// Smallest whole-cell displacement approximating a lattice heading.
///
/// For axis and diagonal headings the result is exact; for intermediate
/// headings (16-heading lattices and finer) it is the best integer vector
/// with magnitude up to four cells, as in standard lattice designs.
pub(crate) fn lattice_step(disc: &Discretizer, heading: u16) -> (i32, i32) {
    let theta = disc.index_to_heading(heading);
    let (sin, cos) = theta.sin_cos();

    let mut best = (1, 0);
    let mut best_err = f32::INFINITY;
    for k in 1..=4 {
        let dx = (cos * k as f32).round() as i32;
        let dy = (sin * k as f32).round() as i32;
        if (dx, dy) == (0, 0) {
            continue;
        }
        let err = angle_diff((dy as f32).atan2(dx as f32), theta).abs();
        if err + 1e-6 < best_err {
            best = (dx, dy);
            best_err = err;
        }
        if best_err < 1e-3 {
            break;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    fn disc8() -> Discretizer {
        Discretizer::new(1.0, 8)
    }

    fn small_body() -> Vec<BodyRect> {
        vec![BodyRect::new(0.8, 0.5, 0.0)]
    }

    #[test]
    fn test_lattice_step_axis_and_diagonal() {
        let disc = disc8();
        assert_eq!(lattice_step(&disc, 0), (1, 0));
        assert_eq!(lattice_step(&disc, 1), (1, 1));
        assert_eq!(lattice_step(&disc, 2), (0, 1));
        assert_eq!(lattice_step(&disc, 4), (-1, 0));
        assert_eq!(lattice_step(&disc, 7), (1, -1));
    }

    #[test]
    fn test_straight_primitive() {
        let disc = disc8();
        let prim = build_primitive(
            &small_body(),
            &disc,
            0,
            Maneuver::Arc {
                curvature: 0.0,
                length: 1.0,
                cost_factor: 1.0,
            },
        )
        .unwrap();

        assert_eq!(prim.cell_delta, (1, 0));
        assert_eq!(prim.end_heading, 0);
        assert_relative_eq!(prim.cost, 1.0, epsilon = 1e-6);
        assert!(prim.swept_cells.contains(&(0, 0)));
        assert!(prim.swept_cells.contains(&(1, 0)));
    }

    #[test]
    fn test_diagonal_straight() {
        let disc = disc8();
        let len = std::f32::consts::SQRT_2;
        let prim = build_primitive(
            &small_body(),
            &disc,
            1,
            Maneuver::Arc {
                curvature: 0.0,
                length: len,
                cost_factor: 1.0,
            },
        )
        .unwrap();

        assert_eq!(prim.cell_delta, (1, 1));
        assert_eq!(prim.end_heading, 1);
        assert_relative_eq!(prim.cost, len, epsilon = 1e-5);
    }

    #[test]
    fn test_reverse_costs_more() {
        let disc = disc8();
        let prim = build_primitive(
            &small_body(),
            &disc,
            0,
            Maneuver::Arc {
                curvature: 0.0,
                length: -1.0,
                cost_factor: 2.0,
            },
        )
        .unwrap();

        assert_eq!(prim.cell_delta, (-1, 0));
        assert_eq!(prim.end_heading, 0);
        assert!((prim.cost - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_turning_arc_changes_heading() {
        let disc = disc8();
        // Turn radius 1.5 m, one heading step (45°)
        let curvature = 1.0 / 1.5;
        let length = FRAC_PI_4 / curvature;
        let prim = build_primitive(
            &small_body(),
            &disc,
            0,
            Maneuver::Arc {
                curvature,
                length,
                cost_factor: 1.0,
            },
        )
        .unwrap();

        assert_eq!(prim.end_heading, 1);
        assert!(prim.cell_delta.0 >= 1);
        // Arc length is a lower bound enforced by the cost floor
        assert!(prim.cost >= prim.chord_length(1.0) - 1e-6);
    }

    #[test]
    fn test_turn_in_place() {
        let disc = disc8();
        let prim = build_primitive(
            &small_body(),
            &disc,
            3,
            Maneuver::TurnInPlace {
                steps: -1,
                cost_per_rad: 0.5,
            },
        )
        .unwrap();

        assert!(prim.is_turn_in_place());
        assert_eq!(prim.end_heading, 2);
        assert!((prim.cost - FRAC_PI_4 * 0.5).abs() < 1e-6);
        assert!(prim.swept_cells.contains(&(0, 0)));
    }

    #[test]
    fn test_degenerate_maneuvers_rejected() {
        let disc = disc8();
        // Too short to leave the start cell
        assert!(build_primitive(
            &small_body(),
            &disc,
            0,
            Maneuver::Arc {
                curvature: 0.0,
                length: 0.2,
                cost_factor: 1.0,
            },
        )
        .is_none());

        assert!(build_primitive(
            &small_body(),
            &disc,
            0,
            Maneuver::TurnInPlace {
                steps: 0,
                cost_per_rad: 1.0,
            },
        )
        .is_none());
    }
}
