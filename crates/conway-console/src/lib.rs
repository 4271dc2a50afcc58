//! Colorized text-console renderer for the Life simulation.
//!
//! [`ConsoleRenderer`] implements [`FrameSink`] by writing one framed,
//! optionally colorized text block per generation, clearing the screen
//! first when configured to.
//!
//! # Modules
//!
//! - [`frame`] -- Pure frame formatting ([`format_frame`]) and the
//!   [`DisplayStyle`] glyph/color settings.
//! - [`renderer`] -- The [`ConsoleRenderer`] sink over any [`std::io::Write`].
//!
//! [`FrameSink`]: conway_core::runner::FrameSink

pub mod frame;
pub mod renderer;

pub use frame::{DisplayStyle, format_frame};
pub use renderer::ConsoleRenderer;
