//! Core types for the marga occupancy grid crate.
//!
//! This module provides the fundamental types used throughout the planner:
//! - [`CellState`]: three-state occupancy of a single grid cell
//! - [`GridCoord`] and [`WorldPoint`]: coordinate types
//! - [`Pose2D`]: vehicle pose (position + orientation)

mod cell;
pub mod math;
mod point;
mod pose;

pub use cell::CellState;
pub use math::{angle_diff, angles_approx_equal, normalize_angle};
pub use point::{GridCoord, WorldPoint};
pub use pose::Pose2D;
