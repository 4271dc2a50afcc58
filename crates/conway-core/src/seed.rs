//! Applying the configured seed to a fresh grid.

use conway_grid::{CellState, Grid, GridError, patterns};
use tracing::debug;

use crate::config::SeedConfig;

/// Errors that can occur while seeding a grid.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// The configured pattern name is not a built-in pattern.
    #[error("unknown pattern {0:?}")]
    UnknownPattern(String),

    /// A seed cell fell outside the grid.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },
}

/// Set the configured pattern and explicit cells alive on `grid`.
///
/// The pattern (if any) is placed first at `seed.offset`; explicit cells
/// are applied afterwards in order. With neither configured, the default
/// blinker cells are used.
///
/// # Errors
///
/// Returns [`SeedError::UnknownPattern`] for an unrecognised pattern name,
/// or [`SeedError::Grid`] with [`GridError::OutOfBounds`] for the first
/// cell outside the grid. Explicit cells set before the failing one remain
/// set; the caller is expected to abandon the grid.
pub fn seed_grid(grid: &mut Grid, seed: &SeedConfig) -> Result<(), SeedError> {
    if let Some(name) = seed.pattern.as_deref() {
        let pattern =
            patterns::find(name).ok_or_else(|| SeedError::UnknownPattern(name.to_owned()))?;
        pattern.apply(grid, seed.offset)?;
        debug!(
            pattern = pattern.name,
            offset = %seed.offset,
            cells = pattern.cells.len(),
            "pattern placed"
        );
    }

    let cells = seed.explicit_cells();
    for at in cells {
        grid.set(at.row, at.col, CellState::Alive)?;
    }

    debug!(
        explicit_cells = cells.len(),
        population = grid.population(),
        "grid seeded"
    );
    Ok(())
}
