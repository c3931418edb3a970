//! Cell state for the occupancy grid.

use serde::{Deserialize, Serialize};

/// Occupancy state of a single grid cell.
///
/// The planner applies a closed-world policy: only `Free` cells are
/// traversable. `Unknown` cells and anything outside the grid bounds are
/// treated as blocked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    /// Cell has never been observed by the mapping system
    #[default]
    Unknown = 0,

    /// Observed navigable free space
    Free = 1,

    /// Observed obstacle (wall, rack, parked vehicle, ...)
    Occupied = 2,
}

impl CellState {
    /// Can a vehicle occupy this cell?
    #[inline]
    pub fn is_free(self) -> bool {
        matches!(self, CellState::Free)
    }

    /// Is this cell blocked for planning (occupied or unobserved)?
    #[inline]
    pub fn is_blocked(self) -> bool {
        !self.is_free()
    }

    /// Convert from u8 (for deserialization). Invalid values map to Unknown.
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => CellState::Free,
            2 => CellState::Occupied,
            _ => CellState::Unknown,
        }
    }

    /// Single character representation for debugging
    pub fn as_char(self) -> char {
        match self {
            CellState::Unknown => '?',
            CellState::Free => '.',
            CellState::Occupied => '#',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_world_policy() {
        assert!(CellState::Free.is_free());
        assert!(!CellState::Occupied.is_free());
        assert!(!CellState::Unknown.is_free());
        assert!(CellState::Unknown.is_blocked());
    }

    #[test]
    fn test_from_u8_round_trip() {
        for state in [CellState::Unknown, CellState::Free, CellState::Occupied] {
            assert_eq!(CellState::from_u8(state as u8), state);
        }
        assert_eq!(CellState::from_u8(250), CellState::Unknown);
    }
}
