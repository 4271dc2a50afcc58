//! Cell states and grid coordinates.
//!
//! [`CellState`] is strictly two-valued. How a cell looks on screen is the
//! renderer's business and never leaks into this type.
//!
//! [`Coordinate`] is signed on purpose: callers (CLI input, config files,
//! pattern offsets) can express negative positions, and the grid rejects
//! them with [`GridError::OutOfBounds`] instead of wrapping.
//!
//! [`GridError::OutOfBounds`]: crate::error::GridError::OutOfBounds

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// The state of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    /// An empty cell. Every grid starts fully dead.
    #[default]
    Dead,
    /// A live cell.
    Alive,
}

impl CellState {
    /// Return `true` if the cell is alive.
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }

    /// Map a boolean onto a cell state (`true` is alive).
    pub const fn from_alive(alive: bool) -> Self {
        if alive { Self::Alive } else { Self::Dead }
    }
}

/// A `(row, col)` position on a grid.
///
/// Valid for a given grid iff `0 <= row < height` and `0 <= col < width`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Coordinate {
    /// Zero-based row index.
    pub row: i64,
    /// Zero-based column index.
    pub col: i64,
}

impl Coordinate {
    /// Create a coordinate from a row and column.
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// Shift this coordinate by a row and column delta.
    ///
    /// Saturates at the `i64` range; a saturated coordinate is always out
    /// of bounds for any real grid.
    pub const fn offset(self, d_row: i64, d_col: i64) -> Self {
        Self {
            row: self.row.saturating_add(d_row),
            col: self.col.saturating_add(d_col),
        }
    }
}

impl Add for Coordinate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.offset(rhs.row, rhs.col)
    }
}

impl From<(i64, i64)> for Coordinate {
    fn from((row, col): (i64, i64)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_dead() {
        assert_eq!(CellState::default(), CellState::Dead);
        assert!(!CellState::Dead.is_alive());
        assert!(CellState::Alive.is_alive());
    }

    #[test]
    fn from_alive_maps_booleans() {
        assert_eq!(CellState::from_alive(true), CellState::Alive);
        assert_eq!(CellState::from_alive(false), CellState::Dead);
    }

    #[test]
    fn coordinate_addition_offsets_both_axes() {
        let sum = Coordinate::new(2, 3) + Coordinate::new(-1, 4);
        assert_eq!(sum, Coordinate::new(1, 7));
    }

    #[test]
    fn coordinate_offset_saturates() {
        let edge = Coordinate::new(i64::MAX, i64::MIN).offset(1, -1);
        assert_eq!(edge, Coordinate::new(i64::MAX, i64::MIN));
    }

    #[test]
    fn coordinate_displays_as_pair() {
        assert_eq!(Coordinate::new(-1, 5).to_string(), "(-1, 5)");
    }
}
