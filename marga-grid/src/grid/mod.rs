//! Occupancy grid snapshot and binary map file I/O.

pub mod io;
mod occupancy;

pub use io::MapFormatError;
pub use occupancy::OccupancyGrid;
