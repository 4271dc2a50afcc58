//! The fixed-size simulation grid.
//!
//! A [`Grid`] is a `height x width` matrix of [`CellState`] stored
//! row-major in a flat vector, plus a generation counter. Dimensions never
//! change after construction: the storage length is always exactly
//! `height * width`, and every coordinate-accepting operation checks both
//! the lower and upper bounds before touching a cell.
//!
//! [`Grid::next_generation`] is pure. It reads the current grid and returns
//! a freshly allocated successor, so no cell update can observe another
//! update from the same tick. The caller replaces its grid with the result.

use serde::{Deserialize, Serialize};

use crate::cell::{CellState, Coordinate};
use crate::error::GridError;
use crate::rules;

/// Relative positions of the eight orthogonal and diagonal neighbors.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A bounded Game of Life grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridRepr", into = "GridRepr")]
pub struct Grid {
    /// Number of rows (always at least 1).
    height: usize,
    /// Number of columns (always at least 1).
    width: usize,
    /// Row-major cell storage of exactly `height * width` entries.
    cells: Vec<CellState>,
    /// Number of transitions applied since the initial grid.
    generation: u64,
}

impl Grid {
    /// Create a grid with every cell dead at generation 0.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either dimension is zero,
    /// does not fit the signed coordinate range, or if the cell count
    /// overflows `usize` or cannot be allocated.
    pub fn new(height: usize, width: usize) -> Result<Self, GridError> {
        let invalid = |reason| GridError::InvalidDimensions {
            height,
            width,
            reason,
        };

        if height == 0 || width == 0 {
            return Err(invalid("height and width must be at least 1"));
        }
        if i64::try_from(height).is_err() || i64::try_from(width).is_err() {
            return Err(invalid("dimension exceeds the signed coordinate range"));
        }
        let len = height
            .checked_mul(width)
            .ok_or_else(|| invalid("cell count overflows usize"))?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_err| invalid("cell count exceeds allocatable memory"))?;
        cells.resize(len, CellState::Dead);

        Ok(Self {
            height,
            width,
            cells,
            generation: 0,
        })
    }

    /// Return the number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Return the number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Return the generation counter (0 for a freshly built grid).
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Return `true` if `(row, col)` lies inside the grid.
    pub fn contains(&self, row: i64, col: i64) -> bool {
        self.index_of(row, col).is_some()
    }

    /// Read the state of a single cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the coordinate is outside the grid.
    pub fn get(&self, row: i64, col: i64) -> Result<CellState, GridError> {
        let idx = self.checked_index(row, col)?;
        self.cells
            .get(idx)
            .copied()
            .ok_or_else(|| self.out_of_bounds(row, col))
    }

    /// Set the state of a single cell.
    ///
    /// On error the grid is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the coordinate is outside the grid.
    pub fn set(&mut self, row: i64, col: i64, state: CellState) -> Result<(), GridError> {
        let idx = self.checked_index(row, col)?;
        let oob = self.out_of_bounds(row, col);
        let slot = self.cells.get_mut(idx).ok_or(oob)?;
        *slot = state;
        Ok(())
    }

    /// Count the live cells among the in-bounds neighbors of `(row, col)`.
    ///
    /// Edge and corner cells have fewer than eight candidate neighbors;
    /// positions outside the grid are skipped, not treated as dead cells.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if the center coordinate is outside
    /// the grid.
    pub fn live_neighbor_count(&self, row: i64, col: i64) -> Result<u8, GridError> {
        self.checked_index(row, col)?;
        Ok(self.count_live_neighbors(row, col))
    }

    /// Compute the next generation.
    ///
    /// Every count is taken against `self`; every write goes to a new grid.
    /// The result has the same dimensions and a generation counter one
    /// higher than `self`.
    #[must_use]
    pub fn next_generation(&self) -> Self {
        let cells = self
            .cells()
            .map(|(at, state)| rules::next_state(state, self.count_live_neighbors(at.row, at.col)))
            .collect();

        Self {
            height: self.height,
            width: self.width,
            cells,
            generation: self.generation.saturating_add(1),
        }
    }

    /// Iterate over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks_exact(self.width)
    }

    /// Iterate over every cell with its coordinate in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, CellState)> + '_ {
        (0_i64..).zip(self.rows()).flat_map(|(row, cells)| {
            (0_i64..)
                .zip(cells.iter().copied())
                .map(move |(col, state)| (Coordinate::new(row, col), state))
        })
    }

    /// Iterate over the coordinates of live cells in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.cells()
            .filter(|(_, state)| state.is_alive())
            .map(|(at, _)| at)
    }

    /// Return the number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Return `true` if no cell is alive.
    pub fn is_extinct(&self) -> bool {
        !self.cells.iter().any(|c| c.is_alive())
    }

    // -------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------

    fn index_of(&self, row: i64, col: i64) -> Option<usize> {
        let r = usize::try_from(row).ok()?;
        let c = usize::try_from(col).ok()?;
        if r >= self.height || c >= self.width {
            return None;
        }
        r.checked_mul(self.width)?.checked_add(c)
    }

    fn checked_index(&self, row: i64, col: i64) -> Result<usize, GridError> {
        self.index_of(row, col)
            .ok_or_else(|| self.out_of_bounds(row, col))
    }

    const fn out_of_bounds(&self, row: i64, col: i64) -> GridError {
        GridError::OutOfBounds {
            coordinate: Coordinate::new(row, col),
            height: self.height,
            width: self.width,
        }
    }

    fn is_alive_at(&self, row: i64, col: i64) -> bool {
        self.index_of(row, col)
            .and_then(|idx| self.cells.get(idx))
            .is_some_and(|c| c.is_alive())
    }

    fn count_live_neighbors(&self, row: i64, col: i64) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(d_row, d_col)| Some((row.checked_add(d_row)?, col.checked_add(d_col)?)))
            .filter(|&(r, c)| self.is_alive_at(r, c))
            .fold(0_u8, |count, _| count.saturating_add(1))
    }
}

/// Serialized form of a [`Grid`]: explicit dimensions plus nested rows.
///
/// Deserialization goes through [`TryFrom`] so a document whose rows do not
/// match its declared dimensions is rejected.
#[derive(Serialize, Deserialize)]
struct GridRepr {
    height: usize,
    width: usize,
    generation: u64,
    rows: Vec<Vec<CellState>>,
}

impl From<Grid> for GridRepr {
    fn from(grid: Grid) -> Self {
        let rows = grid.rows().map(<[CellState]>::to_vec).collect();
        Self {
            height: grid.height,
            width: grid.width,
            generation: grid.generation,
            rows,
        }
    }
}

impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        let mut grid = Self::new(repr.height, repr.width)?;
        let invalid = |reason| GridError::InvalidDimensions {
            height: repr.height,
            width: repr.width,
            reason,
        };

        if repr.rows.len() != repr.height {
            return Err(invalid("row count does not match height"));
        }
        if repr.rows.iter().any(|row| row.len() != repr.width) {
            return Err(invalid("row length does not match width"));
        }

        grid.cells = repr.rows.into_iter().flatten().collect();
        grid.generation = repr.generation;
        Ok(grid)
    }
}
