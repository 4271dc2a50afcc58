//! Console frame sink.

use std::io::{self, Stdout, Write};

use conway_core::runner::FrameSink;
use conway_grid::Grid;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use tracing::trace;

use crate::frame::{DisplayStyle, format_frame};

/// Writes each presented grid to a text console.
#[derive(Debug)]
pub struct ConsoleRenderer<W: Write> {
    out: W,
    style: DisplayStyle,
}

impl ConsoleRenderer<Stdout> {
    /// Create a renderer writing to standard output.
    pub fn stdout(style: DisplayStyle) -> Self {
        Self::new(io::stdout(), style)
    }
}

impl<W: Write> ConsoleRenderer<W> {
    /// Create a renderer over any writer.
    pub const fn new(out: W, style: DisplayStyle) -> Self {
        Self { out, style }
    }

    /// Return the style in use.
    pub const fn style(&self) -> &DisplayStyle {
        &self.style
    }

    /// Consume the renderer and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for ConsoleRenderer<W> {
    fn present(&mut self, grid: &Grid) -> io::Result<()> {
        if self.style.clear_screen {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        let frame = format_frame(grid, &self.style);
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()?;
        trace!(generation = grid.generation(), bytes = frame.len(), "frame written");
        Ok(())
    }
}
