//! Console binary for the Life simulation.
//!
//! Loads configuration, seeds the grid, and runs the generation loop,
//! drawing every generation to the terminal until a stop condition is met.
//!
//! # Startup Sequence
//!
//! 1. Parse command-line arguments
//! 2. Load configuration from `--config` or `conway.yaml`, then apply CLI overrides
//! 3. Initialize structured logging (tracing) on stderr
//! 4. Build and seed the grid
//! 5. Create simulation controls and install the Ctrl-C handler
//! 6. Run the simulation loop
//! 7. Log the result

mod cli;
mod error;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use conway_console::{ConsoleRenderer, DisplayStyle};
use conway_core::config::{LifeConfig, LoggingConfig};
use conway_core::controls::SimulationControls;
use conway_core::runner::{self, RunOptions};
use conway_core::seed;
use conway_grid::{Grid, PATTERNS};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::EngineError;

/// Configuration file read when `--config` is not given.
const DEFAULT_CONFIG_PATH: &str = "conway.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation itself fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Parse arguments.
    let cli = Cli::parse();

    if cli.list_patterns {
        for pattern in PATTERNS {
            println!("{:<8} {}", pattern.name, pattern.description);
        }
        return Ok(());
    }

    // 2. Load configuration.
    let mut config = load_config(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate().map_err(EngineError::from)?;

    // 3. Initialize structured logging.
    init_logging(&config.logging)?;
    info!(
        height = config.grid.height,
        width = config.grid.width,
        pattern = config.seed.pattern.as_deref().unwrap_or("none"),
        seed_cells = config.seed.explicit_cells().len(),
        frame_interval_ms = config.simulation.frame_interval_ms,
        "Configuration loaded"
    );

    // 4. Build and seed the grid.
    let mut grid = Grid::new(config.grid.height, config.grid.width).map_err(EngineError::from)?;
    seed::seed_grid(&mut grid, &config.seed).map_err(EngineError::from)?;
    info!(population = grid.population(), "Grid seeded");

    // 5. Create controls and watch for Ctrl-C.
    let controls = Arc::new(SimulationControls::new(&config.simulation));
    info!(
        max_generations = controls.max_generations(),
        max_real_time_seconds = controls.max_real_time_seconds(),
        frame_interval_ms = controls.frame_interval_ms(),
        "Simulation controls initialized"
    );
    let interrupt_handle = tokio::spawn(watch_for_interrupt(Arc::clone(&controls)));

    // 6. Run the simulation loop.
    let mut renderer = ConsoleRenderer::stdout(DisplayStyle::from(&config.display));
    let options = RunOptions::from(&config.simulation);
    let result = runner::run_simulation(grid, &controls, &options, &mut renderer)
        .await
        .map_err(EngineError::from);
    interrupt_handle.abort();

    // 7. Log the result.
    let result = result?;
    runner::log_simulation_end(&result);

    Ok(())
}

/// Load configuration from `path`, or from `conway.yaml` when present.
///
/// An explicit path must exist. Without one, a missing default file falls
/// back to built-in defaults; environment overrides apply either way.
fn load_config(path: Option<&Path>) -> Result<LifeConfig, EngineError> {
    if let Some(path) = path {
        return Ok(LifeConfig::from_file(path)?);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        Ok(LifeConfig::from_file(default_path)?)
    } else {
        let mut config = LifeConfig::default();
        config.apply_env_overrides()?;
        Ok(config)
    }
}

/// Install the tracing subscriber on stderr so frames on stdout stay clean.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(config: &LoggingConfig) -> Result<(), EngineError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| EngineError::Logging {
            message: format!("invalid log level {:?}: {e}", config.level),
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| EngineError::Logging {
        message: e.to_string(),
    })
}

/// Request a stop on the first Ctrl-C.
async fn watch_for_interrupt(controls: Arc<SimulationControls>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("Interrupt received, stopping after the current frame");
            controls.request_stop();
        }
        Err(e) => {
            warn!(error = %e, "Failed to listen for Ctrl-C");
        }
    }
}
