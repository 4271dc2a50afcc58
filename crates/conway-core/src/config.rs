//! Configuration loading and typed config structures for the Life simulation.
//!
//! The configuration lives in a YAML file (by default `conway.yaml` in the
//! working directory). This module defines strongly-typed structs that
//! mirror the YAML structure, and provides a loader that reads the file,
//! applies environment overrides, and validates the result.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the classic demo: a 3x3 grid seeded with a vertical blinker, advancing
//! every 500 ms with no stopping condition.

use std::path::Path;

use conway_grid::Coordinate;
use serde::Deserialize;

/// Environment variable overriding [`SimulationConfig::frame_interval_ms`].
pub const ENV_FRAME_INTERVAL_MS: &str = "CONWAY_FRAME_INTERVAL_MS";

/// Environment variable overriding [`SimulationConfig::max_generations`].
pub const ENV_MAX_GENERATIONS: &str = "CONWAY_MAX_GENERATIONS";

/// Environment variable overriding [`LoggingConfig::level`].
pub const ENV_LOG_LEVEL: &str = "CONWAY_LOG_LEVEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held a value that could not be parsed.
    #[error("invalid value {value:?} for environment variable {var}")]
    InvalidEnv {
        /// Name of the offending variable.
        var: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },

    /// The configuration parsed but describes an impossible setup.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LifeConfig {
    /// Grid dimensions.
    #[serde(default)]
    pub grid: GridConfig,

    /// Initial live cells.
    #[serde(default)]
    pub seed: SeedConfig,

    /// Frame pacing and stopping conditions.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Console presentation.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LifeConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `CONWAY_FRAME_INTERVAL_MS` overrides `simulation.frame_interval_ms`
    /// - `CONWAY_MAX_GENERATIONS` overrides `simulation.max_generations`
    /// - `CONWAY_LOG_LEVEL` overrides `logging.level`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if an override cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if an override cannot be parsed.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse_with_overrides(yaml, |var| std::env::var(var).ok())
    }

    /// Parse configuration from a YAML string, taking overrides from `lookup`
    /// instead of the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if an override cannot be parsed.
    pub fn parse_with_overrides<F>(yaml: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_overrides_from(lookup)?;
        Ok(config)
    }

    /// Override values from the process environment when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if a numeric override does not parse.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|var| std::env::var(var).ok())
    }

    /// Override values using an arbitrary variable lookup.
    ///
    /// `lookup` returns `Some(value)` for variables that are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if a numeric override does not parse.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_FRAME_INTERVAL_MS) {
            self.simulation.frame_interval_ms = parse_env(ENV_FRAME_INTERVAL_MS, value)?;
        }
        if let Some(value) = lookup(ENV_MAX_GENERATIONS) {
            self.simulation.max_generations = parse_env(ENV_MAX_GENERATIONS, value)?;
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = value;
        }
        Ok(())
    }

    /// Check invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a grid dimension is zero or a
    /// display glyph is a control character.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.height == 0 || self.grid.width == 0 {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "grid dimensions must be positive, got {}x{}",
                    self.grid.height, self.grid.width
                ),
            });
        }
        for glyph in [self.display.alive_glyph, self.display.dead_glyph] {
            if glyph.is_control() {
                return Err(ConfigError::Invalid {
                    reason: format!("display glyph {glyph:?} is a control character"),
                });
            }
        }
        Ok(())
    }
}

fn parse_env(var: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_err| ConfigError::InvalidEnv { var, value })
}

/// Grid dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GridConfig {
    /// Number of rows.
    #[serde(default = "default_grid_height")]
    pub height: usize,

    /// Number of columns.
    #[serde(default = "default_grid_width")]
    pub width: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            height: default_grid_height(),
            width: default_grid_width(),
        }
    }
}

/// Live cells seeded when neither a pattern nor explicit cells are configured:
/// a vertical blinker in the top-left 3x3 corner.
pub const DEFAULT_SEED_CELLS: [Coordinate; 3] = [
    Coordinate::new(0, 1),
    Coordinate::new(1, 1),
    Coordinate::new(2, 1),
];

/// Initial live cells: an optional named pattern plus explicit coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SeedConfig {
    /// Name of a built-in pattern to place first (see `conway_grid::patterns`).
    #[serde(default)]
    pub pattern: Option<String>,

    /// Top-left position at which the pattern is placed.
    #[serde(default)]
    pub offset: Coordinate,

    /// Explicit live cells, applied after the pattern. When absent, the
    /// [`DEFAULT_SEED_CELLS`] are used unless a pattern is configured.
    #[serde(default)]
    pub cells: Option<Vec<Coordinate>>,
}

impl SeedConfig {
    /// The explicit cells to set alive after the pattern.
    pub fn explicit_cells(&self) -> &[Coordinate] {
        match (&self.cells, &self.pattern) {
            (Some(cells), _) => cells,
            (None, None) => &DEFAULT_SEED_CELLS,
            (None, Some(_)) => &[],
        }
    }
}

/// Frame pacing and stopping conditions.
///
/// A value of 0 for `max_generations` or `max_real_time_seconds` means
/// unlimited. With every condition disabled the simulation runs until it
/// is interrupted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Pause between frames in milliseconds.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Stop once this generation has been presented (0 = unlimited).
    #[serde(default)]
    pub max_generations: u64,

    /// Stop after this many wall-clock seconds (0 = unlimited).
    #[serde(default)]
    pub max_real_time_seconds: u64,

    /// Stop as soon as no cell is alive.
    #[serde(default)]
    pub stop_on_extinction: bool,

    /// Stop as soon as a previously seen configuration repeats.
    #[serde(default)]
    pub stop_on_cycle: bool,

    /// Number of recent generations remembered for cycle detection.
    #[serde(default = "default_cycle_history")]
    pub cycle_history: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
            max_generations: 0,
            max_real_time_seconds: 0,
            stop_on_extinction: false,
            stop_on_cycle: false,
            cycle_history: default_cycle_history(),
        }
    }
}

/// Console presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DisplayConfig {
    /// Character drawn for a live cell.
    #[serde(default = "default_alive_glyph")]
    pub alive_glyph: char,

    /// Character drawn for a dead cell.
    #[serde(default = "default_dead_glyph")]
    pub dead_glyph: char,

    /// Whether to colorize output.
    #[serde(default = "default_true")]
    pub color: bool,

    /// Whether to clear the screen before each frame.
    #[serde(default = "default_true")]
    pub clear_screen: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            alive_glyph: default_alive_glyph(),
            dead_glyph: default_dead_glyph(),
            color: true,
            clear_screen: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error) used when
    /// `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_grid_height() -> usize {
    3
}

const fn default_grid_width() -> usize {
    3
}

const fn default_frame_interval_ms() -> u64 {
    500
}

const fn default_cycle_history() -> usize {
    16
}

const fn default_alive_glyph() -> char {
    'X'
}

const fn default_dead_glyph() -> char {
    'O'
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}
