//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and the simulation run.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: conway_core::config::ConfigError,
    },

    /// Grid construction failed.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: conway_grid::GridError,
    },

    /// Seeding the grid failed.
    #[error("seed error: {source}")]
    Seed {
        /// The underlying seed error.
        #[from]
        source: conway_core::seed::SeedError,
    },

    /// The generation loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: conway_core::runner::RunnerError,
    },

    /// The tracing subscriber could not be installed.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the logging failure.
        message: String,
    },
}
