//! Command-line arguments.
//!
//! Every option is optional; anything given on the command line overrides
//! the corresponding value from the configuration file.

use std::path::PathBuf;

use clap::Parser;
use conway_core::config::LifeConfig;
use conway_grid::Coordinate;

/// Conway's Game of Life on a bounded grid, rendered to the console.
#[derive(Debug, Parser)]
#[allow(clippy::struct_excessive_bools)]
#[command(name = "conway-engine", author, version, about)]
pub struct Cli {
    /// Path to the YAML configuration file [default: conway.yaml if present].
    #[arg(short, long, env = "CONWAY_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of grid rows.
    #[arg(long)]
    pub height: Option<usize>,

    /// Number of grid columns.
    #[arg(long)]
    pub width: Option<usize>,

    /// Initial live cell; repeat for more. Replaces the configured cells.
    #[arg(
        long = "cell",
        value_name = "ROW,COL",
        value_parser = parse_coordinate,
        allow_hyphen_values = true
    )]
    pub cells: Vec<Coordinate>,

    /// Built-in pattern to place before the explicit cells.
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Top-left position of the pattern.
    #[arg(
        long,
        value_name = "ROW,COL",
        value_parser = parse_coordinate,
        allow_hyphen_values = true
    )]
    pub offset: Option<Coordinate>,

    /// Pause between frames in milliseconds.
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Stop after presenting this generation (0 = never).
    #[arg(long, value_name = "N")]
    pub max_generations: Option<u64>,

    /// Stop after this many seconds of wall-clock time (0 = never).
    #[arg(long, value_name = "N")]
    pub max_seconds: Option<u64>,

    /// Stop when every cell is dead.
    #[arg(long)]
    pub stop_on_extinction: bool,

    /// Stop when a configuration repeats (still life or oscillator).
    #[arg(long)]
    pub stop_on_cycle: bool,

    /// Disable colors.
    #[arg(long)]
    pub no_color: bool,

    /// Do not clear the screen between frames.
    #[arg(long)]
    pub no_clear: bool,

    /// Print the built-in patterns and exit.
    #[arg(long)]
    pub list_patterns: bool,
}

impl Cli {
    /// Overlay command-line values onto a loaded configuration.
    pub fn apply(&self, config: &mut LifeConfig) {
        if let Some(height) = self.height {
            config.grid.height = height;
        }
        if let Some(width) = self.width {
            config.grid.width = width;
        }
        if let Some(pattern) = &self.pattern {
            config.seed.pattern = Some(pattern.clone());
            // A pattern on the command line starts from a clean slate
            // unless cells are given alongside it.
            config.seed.cells = None;
        }
        if let Some(offset) = self.offset {
            config.seed.offset = offset;
        }
        if !self.cells.is_empty() {
            config.seed.cells = Some(self.cells.clone());
        }
        if let Some(ms) = self.interval_ms {
            config.simulation.frame_interval_ms = ms;
        }
        if let Some(n) = self.max_generations {
            config.simulation.max_generations = n;
        }
        if let Some(n) = self.max_seconds {
            config.simulation.max_real_time_seconds = n;
        }
        if self.stop_on_extinction {
            config.simulation.stop_on_extinction = true;
        }
        if self.stop_on_cycle {
            config.simulation.stop_on_cycle = true;
        }
        if self.no_color {
            config.display.color = false;
        }
        if self.no_clear {
            config.display.clear_screen = false;
        }
    }
}

/// Parse `ROW,COL` into a [`Coordinate`]. Negative values are accepted here
/// and rejected later by the grid.
pub fn parse_coordinate(raw: &str) -> Result<Coordinate, String> {
    let (row, col) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {raw:?}"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("invalid row {row:?}: {e}"))?;
    let col = col
        .trim()
        .parse()
        .map_err(|e| format!("invalid column {col:?}: {e}"))?;
    Ok(Coordinate::new(row, col))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("conway-engine").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_coordinate_accepts_signed_pairs() {
        assert_eq!(parse_coordinate("2,3").unwrap(), Coordinate::new(2, 3));
        assert_eq!(parse_coordinate(" -1 , 0 ").unwrap(), Coordinate::new(-1, 0));
    }

    #[test]
    fn parse_coordinate_rejects_garbage() {
        assert!(parse_coordinate("2").is_err());
        assert!(parse_coordinate("a,1").is_err());
        assert!(parse_coordinate("1,").is_err());
    }

    #[test]
    fn no_arguments_leave_config_untouched() {
        let mut config = LifeConfig::default();
        parse(&[]).apply(&mut config);
        assert_eq!(config, LifeConfig::default());
    }

    #[test]
    fn dimensions_and_cells_override_config() {
        let cli = parse(&[
            "--height", "10", "--width", "12", "--cell", "0,0", "--cell", "-1,4",
        ]);
        let mut config = LifeConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.grid.height, 10);
        assert_eq!(config.grid.width, 12);
        assert_eq!(
            config.seed.explicit_cells(),
            [Coordinate::new(0, 0), Coordinate::new(-1, 4)].as_slice()
        );
    }

    #[test]
    fn pattern_clears_default_cells() {
        let cli = parse(&["--pattern", "glider", "--offset", "1,2"]);
        let mut config = LifeConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.seed.pattern.as_deref(), Some("glider"));
        assert_eq!(config.seed.offset, Coordinate::new(1, 2));
        assert!(config.seed.explicit_cells().is_empty());
    }

    #[test]
    fn pattern_with_cells_keeps_both() {
        let cli = parse(&["--pattern", "block", "--cell", "5,5"]);
        let mut config = LifeConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.seed.pattern.as_deref(), Some("block"));
        assert_eq!(config.seed.explicit_cells(), [Coordinate::new(5, 5)].as_slice());
    }

    #[test]
    fn run_flags_override_simulation_and_display() {
        let cli = parse(&[
            "--interval-ms",
            "50",
            "--max-generations",
            "9",
            "--max-seconds",
            "3",
            "--stop-on-extinction",
            "--stop-on-cycle",
            "--no-color",
            "--no-clear",
        ]);
        let mut config = LifeConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.simulation.frame_interval_ms, 50);
        assert_eq!(config.simulation.max_generations, 9);
        assert_eq!(config.simulation.max_real_time_seconds, 3);
        assert!(config.simulation.stop_on_extinction);
        assert!(config.simulation.stop_on_cycle);
        assert!(!config.display.color);
        assert!(!config.display.clear_screen);
    }

    #[test]
    fn malformed_cell_is_a_parse_error() {
        let result = Cli::try_parse_from(["conway-engine", "--cell", "three"]);
        assert!(result.is_err());
    }
}
