//! Frame formatting.
//!
//! A frame is the generation number on its own line, followed by each row
//! drawn as `| a | b | c |` with a `----` border per column underneath:
//!
//! ```text
//! 0
//! | O | X | O |
//! ------------
//! | O | X | O |
//! ------------
//! ```
//!
//! With color enabled, borders and dead cells are green and live cells red.

use conway_core::config::DisplayConfig;
use conway_grid::{CellState, Grid};
use crossterm::style::{Color, Stylize};

/// Border segment drawn under each column.
const BORDER_SEGMENT: &str = "----";

/// Glyphs and colors used when drawing a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayStyle {
    /// Character drawn for a live cell.
    pub alive_glyph: char,
    /// Character drawn for a dead cell.
    pub dead_glyph: char,
    /// Emit ANSI colors.
    pub color: bool,
    /// Clear the screen before each frame.
    pub clear_screen: bool,
}

impl Default for DisplayStyle {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for DisplayStyle {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            alive_glyph: config.alive_glyph,
            dead_glyph: config.dead_glyph,
            color: config.color,
            clear_screen: config.clear_screen,
        }
    }
}

impl DisplayStyle {
    const fn glyph(&self, state: CellState) -> char {
        match state {
            CellState::Alive => self.alive_glyph,
            CellState::Dead => self.dead_glyph,
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_owned()
        }
    }
}

/// Render `grid` as a text frame, without any screen-control sequences.
pub fn format_frame(grid: &Grid, style: &DisplayStyle) -> String {
    let border = style.paint(&BORDER_SEGMENT.repeat(grid.width()), Color::Green);
    let bar = style.paint("|", Color::Green);
    let separator = style.paint(" |", Color::Green);

    let mut frame = format!("{}\n", grid.generation());
    for row in grid.rows() {
        frame.push_str(&bar);
        for &state in row {
            let color = if state.is_alive() {
                Color::Red
            } else {
                Color::Green
            };
            frame.push_str(&style.paint(&format!(" {}", style.glyph(state)), color));
            frame.push_str(&separator);
        }
        frame.push('\n');
        frame.push_str(&border);
        frame.push('\n');
    }
    frame
}
