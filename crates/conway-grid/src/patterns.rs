//! Named seed patterns.
//!
//! Each [`Pattern`] is a list of live cells relative to its top-left
//! corner. [`Pattern::apply`] places the pattern on a grid at an offset and
//! refuses to place it partially: every target cell is checked before any
//! cell is written.

use crate::cell::{CellState, Coordinate};
use crate::error::GridError;
use crate::grid::Grid;

/// A named arrangement of live cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    /// Lookup name (lowercase).
    pub name: &'static str,
    /// One-line description for listings.
    pub description: &'static str,
    /// Live cells as `(row, col)` relative to the pattern origin.
    pub cells: &'static [(i64, i64)],
}

/// All built-in patterns.
pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "blinker",
        description: "period-2 oscillator, vertical phase",
        cells: &[(0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "block",
        description: "2x2 still life",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "glider",
        description: "spaceship travelling down and to the right",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "toad",
        description: "period-2 oscillator",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "beacon",
        description: "period-2 oscillator made of two blocks",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
];

impl Pattern {
    /// Iterate over the absolute coordinates of this pattern placed at `offset`.
    pub fn coordinates(&self, offset: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        self.cells
            .iter()
            .map(move |&(row, col)| offset + Coordinate::new(row, col))
    }

    /// Set every cell of this pattern alive on `grid`, placed at `offset`.
    ///
    /// Cells already alive stay alive; cells outside the pattern are not
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for the first pattern cell that
    /// falls outside the grid. The grid is not modified in that case.
    pub fn apply(&self, grid: &mut Grid, offset: Coordinate) -> Result<(), GridError> {
        for at in self.coordinates(offset) {
            grid.get(at.row, at.col)?;
        }
        for at in self.coordinates(offset) {
            grid.set(at.row, at.col, CellState::Alive)?;
        }
        Ok(())
    }
}

/// Look up a built-in pattern by name, ignoring ASCII case.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Iterate over the names of all built-in patterns.
pub fn names() -> impl Iterator<Item = &'static str> {
    PATTERNS.iter().map(|p| p.name)
}
