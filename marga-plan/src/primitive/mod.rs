//! Motion primitives: precomputed short maneuvers on the lattice.

mod table;

pub mod store;

pub use table::PrimitiveTable;

use marga_grid::Pose2D;
use serde::{Deserialize, Serialize};

/// Identifier of a primitive within its table.
pub type PrimitiveId = u32;

/// A precomputed relative maneuver, valid from one discrete start heading.
///
/// Primitives are generated offline per vehicle model and resolution, and
/// are immutable read-only data once loaded. The swept-cell list is the
/// union of grid cells the vehicle's footprint covers while executing the
/// maneuver, expressed as offsets from the start cell; the collision
/// checker translates and probes them without any geometry at query time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionPrimitive {
    /// Identifier, unique and stable within the owning table
    pub id: PrimitiveId,
    /// Discrete heading this primitive starts from
    pub start_heading: u16,
    /// Discrete heading after executing the primitive
    pub end_heading: u16,
    /// End-cell offset from the start cell
    pub cell_delta: (i32, i32),
    /// World-frame end-pose delta (snapped to the lattice)
    pub delta: Pose2D,
    /// Traversal cost (meters-equivalent, ≥ chord length)
    pub cost: f32,
    /// Swept footprint cells as offsets from the start cell
    pub swept_cells: Vec<(i32, i32)>,
}

impl MotionPrimitive {
    /// True if this maneuver rotates without translating.
    #[inline]
    pub fn is_turn_in_place(&self) -> bool {
        self.cell_delta == (0, 0)
    }

    /// Chord length of the snapped displacement in meters.
    #[inline]
    pub fn chord_length(&self, resolution: f32) -> f32 {
        let dx = self.cell_delta.0 as f32 * resolution;
        let dy = self.cell_delta.1 as f32 * resolution;
        (dx * dx + dy * dy).sqrt()
    }
}
