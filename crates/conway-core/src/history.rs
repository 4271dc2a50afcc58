//! Bounded history of recent grid configurations for cycle detection.
//!
//! Each presented grid is reduced to a 64-bit fingerprint of its dimensions
//! and cells (the generation counter is excluded). A fingerprint match is
//! confirmed against the stored cells, and the distance between the two
//! generations is the period of the cycle: 1 for a still life, 2 for a
//! blinker, and so on.
//!
//! Only the most recent `capacity` generations are remembered, so cycles
//! longer than the capacity go unnoticed.

use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use conway_grid::{CellState, Grid};

/// One remembered generation.
#[derive(Debug, Clone)]
struct Snapshot {
    fingerprint: u64,
    generation: u64,
    height: usize,
    width: usize,
    cells: Vec<CellState>,
}

impl Snapshot {
    fn matches(&self, grid: &Grid) -> bool {
        self.height == grid.height()
            && self.width == grid.width()
            && grid.rows().flatten().eq(self.cells.iter())
    }
}

/// Ring of recent generations keyed by fingerprint.
#[derive(Debug, Clone)]
pub struct GenerationHistory {
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl GenerationHistory {
    /// Create a history remembering up to `capacity` generations.
    ///
    /// A capacity of 0 disables detection: [`record`](Self::record) always
    /// returns `None`.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record `grid` and report whether its configuration was seen before.
    ///
    /// Returns `Some(period)` if an earlier remembered generation had the
    /// same cells. The grid is not recorded in that case.
    pub fn record(&mut self, grid: &Grid) -> Option<u64> {
        if self.capacity == 0 {
            return None;
        }
        self.record_with_fingerprint(grid, fingerprint(grid))
    }

    fn record_with_fingerprint(&mut self, grid: &Grid, print: u64) -> Option<u64> {
        let generation = grid.generation();
        let seen = self
            .entries
            .iter()
            .rev()
            .find(|snap| snap.fingerprint == print && snap.matches(grid));
        if let Some(snap) = seen {
            return Some(generation.saturating_sub(snap.generation));
        }

        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Snapshot {
            fingerprint: print,
            generation,
            height: grid.height(),
            width: grid.width(),
            cells: grid.rows().flatten().copied().collect(),
        });
        None
    }

    /// Number of remembered generations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Hash the dimensions and cell states of a grid.
pub fn fingerprint(grid: &Grid) -> u64 {
    let mut hasher = DefaultHasher::new();
    grid.height().hash(&mut hasher);
    grid.width().hash(&mut hasher);
    for row in grid.rows() {
        row.hash(&mut hasher);
    }
    hasher.finish()
}
