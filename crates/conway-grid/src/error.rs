//! Error types for the `conway-grid` crate.
//!
//! All fallible operations in this crate return [`GridError`] through the
//! standard [`Result`] type.

use crate::cell::Coordinate;

/// Errors that can occur during grid construction or coordinate access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A coordinate fell outside `[0, height) x [0, width)`.
    #[error("coordinate {coordinate} is out of bounds for a {height}x{width} grid")]
    OutOfBounds {
        /// The rejected coordinate.
        coordinate: Coordinate,
        /// Grid height at the time of the access.
        height: usize,
        /// Grid width at the time of the access.
        width: usize,
    },

    /// The requested grid dimensions cannot form a valid grid.
    #[error("invalid grid dimensions {height}x{width}: {reason}")]
    InvalidDimensions {
        /// Requested number of rows.
        height: usize,
        /// Requested number of columns.
        width: usize,
        /// Explanation of what is wrong with the dimensions.
        reason: &'static str,
    },
}
