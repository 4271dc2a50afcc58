//! The B3/S23 transition rule.
//!
//! A dead cell with exactly three live neighbors is born. A live cell with
//! two or three live neighbors survives. Every other cell is dead in the
//! next generation.

use crate::cell::CellState;

/// Compute the next state of a cell from its current state and the number
/// of live cells among its in-bounds neighbors.
pub const fn next_state(current: CellState, live_neighbors: u8) -> CellState {
    match (current, live_neighbors) {
        (CellState::Alive, 2 | 3) | (CellState::Dead, 3) => CellState::Alive,
        _ => CellState::Dead,
    }
}
