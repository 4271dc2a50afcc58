//! Bounded grid, cell states, and the transition rule for Conway's Game of Life.
//!
//! This crate is the pure core of the simulation: it owns no I/O, no
//! clocks, and no async runtime. Everything here is synchronous and
//! deterministic.
//!
//! # Modules
//!
//! - [`cell`] -- [`CellState`] (dead or alive) and the signed [`Coordinate`]
//!   used at every coordinate-accepting boundary.
//! - [`error`] -- Error types for grid construction and coordinate access.
//! - [`grid`] -- The fixed-size [`Grid`] with bounds-checked access and the
//!   pure [`Grid::next_generation`] transition.
//! - [`patterns`] -- Named seed patterns (blinker, block, glider, ...).
//! - [`rules`] -- The B3/S23 transition rule as a standalone function.

pub mod cell;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod rules;

// Re-export primary types at crate root.
pub use cell::{CellState, Coordinate};
pub use error::GridError;
pub use grid::Grid;
pub use patterns::{PATTERNS, Pattern};
pub use rules::next_state;
