//! # Marga-Grid: Occupancy Grid Foundation for the Marga Planner
//!
//! Core geometric types and the workspace occupancy grid consumed by the
//! `marga-plan` lattice planner.
//!
//! The grid is a *snapshot*: once handed to a planning request it is never
//! mutated. Map updates are the caller's responsibility and take the form of
//! a replacement snapshot between requests.
//!
//! ## Coordinate Frame
//!
//! All coordinates follow the ROS REP-103 convention:
//! - **X-forward**: Positive X is in front of the vehicle
//! - **Y-left**: Positive Y is to the left of the vehicle
//! - **Rotation**: Counter-clockwise positive
//!
//! ## Modules
//!
//! - [`core`]: Fundamental types (`WorldPoint`, `GridCoord`, `Pose2D`,
//!   `CellState`, angle math)
//! - [`grid`]: [`OccupancyGrid`] snapshot plus binary map file I/O

pub mod core;
pub mod grid;

pub use crate::core::{CellState, GridCoord, Pose2D, WorldPoint};
pub use grid::{MapFormatError, OccupancyGrid};
