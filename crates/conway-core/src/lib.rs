//! Configuration, seeding, run controls, and the generation loop for the
//! Life simulation.
//!
//! This crate sits between the pure grid logic in `conway-grid` and the
//! console front end. It knows nothing about terminals: frames leave
//! through the [`FrameSink`] trait.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `conway.yaml` into
//!   strongly-typed structs, with environment overrides.
//! - [`controls`] -- [`SimulationControls`]: stop flag, frame interval, and
//!   generation/time limits shared with a supervisor task.
//! - [`history`] -- Bounded fingerprint history for cycle detection.
//! - [`runner`] -- The async generation loop and the [`FrameSink`] trait.
//! - [`seed`] -- Applying the configured pattern and cells to a grid.
//!
//! [`FrameSink`]: runner::FrameSink
//! [`SimulationControls`]: controls::SimulationControls

pub mod config;
pub mod controls;
pub mod history;
pub mod runner;
pub mod seed;
