//! Vehicle footprint geometry and swept-cell rasterization.
//!
//! Footprints are axis-aligned rectangles in the vehicle frame (one per
//! rigid body). Rasterization samples the oriented rectangle interiors at
//! cell centers; swept sets for a maneuver are the union over poses sampled
//! along the motion.

use std::collections::HashSet;

use marga_grid::{Pose2D, WorldPoint};
use serde::{Deserialize, Serialize};

use crate::discretize::Discretizer;

/// Margin added to the rectangle half-extents during the cell-center
/// containment test. Keeps a cell whose center lies exactly on the
/// footprint edge inside the swept set.
const EDGE_EPS: f32 = 1e-4;

/// One rigid body of a vehicle footprint: a rectangle in the vehicle frame.
///
/// `offset` places the rectangle center forward of the vehicle reference
/// point (negative for a trailing body).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyRect {
    /// Rectangle length along the vehicle X axis (meters)
    pub length: f32,
    /// Rectangle width along the vehicle Y axis (meters)
    pub width: f32,
    /// Rectangle center offset forward of the reference point (meters)
    pub offset: f32,
}

impl BodyRect {
    /// Create a body rectangle.
    pub fn new(length: f32, width: f32, offset: f32) -> Self {
        Self {
            length,
            width,
            offset,
        }
    }

    /// Corner points of this rectangle at a world pose.
    pub fn corners_at(&self, pose: Pose2D) -> [WorldPoint; 4] {
        let hl = self.length / 2.0;
        let hw = self.width / 2.0;
        [
            pose.transform_point(WorldPoint::new(self.offset - hl, -hw)),
            pose.transform_point(WorldPoint::new(self.offset + hl, -hw)),
            pose.transform_point(WorldPoint::new(self.offset + hl, hw)),
            pose.transform_point(WorldPoint::new(self.offset - hl, hw)),
        ]
    }

    /// Does a point (in the vehicle frame) lie inside this rectangle?
    #[inline]
    fn contains_local(&self, local: WorldPoint) -> bool {
        (local.x - self.offset).abs() <= self.length / 2.0 + EDGE_EPS
            && local.y.abs() <= self.width / 2.0 + EDGE_EPS
    }

    /// Circumscribed radius around the reference point.
    fn reach(&self) -> f32 {
        let hl = self.length / 2.0;
        let hw = self.width / 2.0;
        let far_x = self.offset.abs() + hl;
        (far_x * far_x + hw * hw).sqrt()
    }
}

/// Collect the lattice cells covered by `bodies` over a sequence of poses.
///
/// Poses are relative to the start cell center: a cell offset `(ox, oy)`
/// has its center at `(ox * resolution, oy * resolution)`. The result is
/// sorted for deterministic table content.
pub(crate) fn covered_cells(
    bodies: &[BodyRect],
    disc: &Discretizer,
    poses: &[Pose2D],
) -> Vec<(i32, i32)> {
    let res = disc.resolution();
    let mut cells: HashSet<(i32, i32)> = HashSet::new();

    for pose in poses {
        for body in bodies {
            let reach = body.reach();
            let min_x = ((pose.x - reach) / res).floor() as i32;
            let max_x = ((pose.x + reach) / res).ceil() as i32;
            let min_y = ((pose.y - reach) / res).floor() as i32;
            let max_y = ((pose.y + reach) / res).ceil() as i32;

            for oy in min_y..=max_y {
                for ox in min_x..=max_x {
                    if cells.contains(&(ox, oy)) {
                        continue;
                    }
                    let center = WorldPoint::new(ox as f32 * res, oy as f32 * res);
                    let local = pose.inverse_transform_point(center);
                    if body.contains_local(local) {
                        cells.insert((ox, oy));
                    }
                }
            }
        }
    }

    let mut out: Vec<(i32, i32)> = cells.into_iter().collect();
    out.sort_unstable();
    out
}

/// Cells covered by a stationary vehicle at one lattice heading.
///
/// Used to validate start and goal configurations before searching.
pub fn stationary_cells(bodies: &[BodyRect], disc: &Discretizer, heading: u16) -> Vec<(i32, i32)> {
    let pose = Pose2D::new(0.0, 0.0, disc.index_to_heading(heading));
    covered_cells(bodies, disc, &[pose])
}
