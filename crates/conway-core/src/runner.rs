//! Generation loop with stopping conditions.
//!
//! This module provides [`run_simulation`], the async driver that owns the
//! grid for the duration of a run. Each iteration it:
//!
//! 1. Checks for a stop request and the wall-clock limit
//! 2. Presents the current grid to a [`FrameSink`]
//! 3. Checks extinction, cycle, and generation-limit conditions
//! 4. Pauses for the frame interval (cut short by a stop request)
//! 5. Replaces the grid with its successor
//!
//! With every condition disabled the loop runs until a stop is requested.

use std::io;

use conway_grid::Grid;
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::controls::{SimulationControls, SimulationEndReason};
use crate::history::GenerationHistory;

/// Errors that can occur during a simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The frame sink failed to present a grid.
    #[error("render error: {source}")]
    Render {
        /// The underlying I/O error.
        #[from]
        source: io::Error,
    },
}

/// Something that can present a grid, one frame per generation.
pub trait FrameSink {
    /// Present `grid` as the current frame.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the frame cannot be written.
    fn present(&mut self, grid: &Grid) -> io::Result<()>;
}

/// A sink that discards every frame, for headless runs and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpSink;

impl FrameSink for NoOpSink {
    fn present(&mut self, _grid: &Grid) -> io::Result<()> {
        Ok(())
    }
}

/// Per-run options that are not part of [`SimulationControls`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// End the run when no cell is alive.
    pub stop_on_extinction: bool,
    /// End the run when a configuration repeats.
    pub stop_on_cycle: bool,
    /// Generations remembered for cycle detection.
    pub cycle_history: usize,
}

impl From<&SimulationConfig> for RunOptions {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            stop_on_extinction: config.stop_on_extinction,
            stop_on_cycle: config.stop_on_cycle,
            cycle_history: config.cycle_history,
        }
    }
}

/// Result of a simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the run ended.
    pub end_reason: SimulationEndReason,
    /// The last grid held by the loop.
    pub grid: Grid,
    /// Number of frames presented to the sink.
    pub frames_rendered: u64,
}

/// Run the generation loop until a stopping condition is met.
///
/// Takes ownership of the seeded `grid`; each tick replaces it with
/// [`Grid::next_generation`], so exactly one grid is live at a time. The
/// final grid is handed back in the [`SimulationResult`].
///
/// # Errors
///
/// Returns [`RunnerError::Render`] if the sink fails to present a frame.
pub async fn run_simulation(
    mut grid: Grid,
    controls: &SimulationControls,
    options: &RunOptions,
    sink: &mut dyn FrameSink,
) -> Result<SimulationResult, RunnerError> {
    let capacity = if options.stop_on_cycle {
        options.cycle_history
    } else {
        0
    };
    let mut history = GenerationHistory::new(capacity);
    let mut frames_rendered: u64 = 0;

    info!(
        height = grid.height(),
        width = grid.width(),
        population = grid.population(),
        frame_interval_ms = controls.frame_interval_ms(),
        max_generations = controls.max_generations(),
        max_real_time_seconds = controls.max_real_time_seconds(),
        stop_on_extinction = options.stop_on_extinction,
        stop_on_cycle = options.stop_on_cycle,
        "Simulation starting"
    );

    let end_reason = loop {
        // --- Check stop request (before frame) ---
        if controls.is_stop_requested() {
            info!(generation = grid.generation(), "Stop requested");
            break SimulationEndReason::Interrupted;
        }

        // --- Check time limit (before frame) ---
        if controls.time_limit_reached() {
            info!(
                max_seconds = controls.max_real_time_seconds(),
                elapsed = controls.elapsed_seconds(),
                "Real-time limit reached"
            );
            break SimulationEndReason::MaxRealTimeReached;
        }

        // --- Present frame ---
        sink.present(&grid)?;
        frames_rendered = frames_rendered.saturating_add(1);
        debug!(
            generation = grid.generation(),
            population = grid.population(),
            "Frame presented"
        );

        // --- Check extinction ---
        if options.stop_on_extinction && grid.is_extinct() {
            info!(generation = grid.generation(), "All cells dead -- extinction");
            break SimulationEndReason::Extinction;
        }

        // --- Check cycle ---
        if let Some(period) = history.record(&grid) {
            info!(generation = grid.generation(), period, "Configuration repeated");
            break SimulationEndReason::CycleDetected { period };
        }

        // --- Check generation limit (after frame) ---
        if controls.generation_limit_reached(grid.generation()) {
            info!(
                generation = grid.generation(),
                max_generations = controls.max_generations(),
                "Generation limit reached"
            );
            break SimulationEndReason::MaxGenerationsReached;
        }

        pause(controls).await;
        grid = grid.next_generation();
    };

    Ok(SimulationResult {
        end_reason,
        grid,
        frames_rendered,
    })
}

/// Sleep for the frame interval, waking early on a stop request.
async fn pause(controls: &SimulationControls) {
    let interval = controls.frame_interval();
    if interval.is_zero() {
        // Still yield so a supervisor task on the same thread can run.
        tokio::task::yield_now().await;
        return;
    }
    tokio::select! {
        () = tokio::time::sleep(interval) => {}
        () = controls.stopped() => {}
    }
}

/// Log the outcome of a run.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        frames_rendered = result.frames_rendered,
        final_generation = result.grid.generation(),
        final_population = result.grid.population(),
        "Simulation ended"
    );

    if result.frames_rendered == 0 {
        warn!("Simulation ended with no frames rendered");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use conway_grid::{CellState, Coordinate};

    use super::*;

    /// Sink that remembers `(generation, population)` per frame.
    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<(u64, usize)>,
    }

    impl FrameSink for RecordingSink {
        fn present(&mut self, grid: &Grid) -> io::Result<()> {
            self.frames.push((grid.generation(), grid.population()));
            Ok(())
        }
    }

    fn grid_with(height: usize, width: usize, alive: &[(i64, i64)]) -> Grid {
        let mut grid = Grid::new(height, width).unwrap();
        for &(row, col) in alive {
            grid.set(row, col, CellState::Alive).unwrap();
        }
        grid
    }

    fn blinker() -> Grid {
        grid_with(3, 3, &[(0, 1), (1, 1), (2, 1)])
    }

    fn config(max_generations: u64) -> SimulationConfig {
        SimulationConfig {
            frame_interval_ms: 0,
            max_generations,
            ..SimulationConfig::default()
        }
    }

    fn options(stop_on_extinction: bool, stop_on_cycle: bool) -> RunOptions {
        RunOptions {
            stop_on_extinction,
            stop_on_cycle,
            cycle_history: 8,
        }
    }

    #[tokio::test]
    async fn bounded_by_max_generations() {
        let controls = SimulationControls::new(&config(4));
        let mut sink = RecordingSink::default();

        let result = run_simulation(blinker(), &controls, &options(false, false), &mut sink)
            .await
            .unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::MaxGenerationsReached);
        assert_eq!(result.frames_rendered, 5);
        assert_eq!(result.grid.generation(), 4);
        let generations: Vec<u64> = sink.frames.iter().map(|(g, _)| *g).collect();
        assert_eq!(generations, vec![0, 1, 2, 3, 4]);
        // Even generation: back to the vertical phase.
        let alive: Vec<Coordinate> = result.grid.alive_cells().collect();
        assert_eq!(alive, blinker().alive_cells().collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn stop_before_start_renders_nothing() {
        let controls = SimulationControls::new(&config(0));
        controls.request_stop();
        let mut sink = RecordingSink::default();

        let result = run_simulation(blinker(), &controls, &options(false, false), &mut sink)
            .await
            .unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::Interrupted);
        assert_eq!(result.frames_rendered, 0);
        assert_eq!(result.grid.generation(), 0);
        assert!(sink.frames.is_empty());
    }

    #[tokio::test]
    async fn stop_during_run_ends_after_current_frame() {
        struct StopAfter {
            controls: Arc<SimulationControls>,
            remaining: u32,
        }
        impl FrameSink for StopAfter {
            fn present(&mut self, _grid: &Grid) -> io::Result<()> {
                self.remaining = self.remaining.saturating_sub(1);
                if self.remaining == 0 {
                    self.controls.request_stop();
                }
                Ok(())
            }
        }

        let controls = Arc::new(SimulationControls::new(&config(0)));
        let mut sink = StopAfter {
            controls: Arc::clone(&controls),
            remaining: 3,
        };

        let result = run_simulation(blinker(), &controls, &options(false, false), &mut sink)
            .await
            .unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::Interrupted);
        assert_eq!(result.frames_rendered, 3);
        assert_eq!(result.grid.generation(), 3);
    }

    #[tokio::test]
    async fn stop_request_cuts_long_pause_short() {
        let slow = SimulationConfig {
            frame_interval_ms: 60_000,
            ..SimulationConfig::default()
        };
        let controls = Arc::new(SimulationControls::new(&slow));
        let stopper = {
            let controls = Arc::clone(&controls);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                controls.request_stop();
            })
        };

        let mut sink = RecordingSink::default();
        let options = options(false, false);
        let run = run_simulation(blinker(), &controls, &options, &mut sink);
        let result = tokio::time::timeout(Duration::from_secs(10), run)
            .await
            .unwrap()
            .unwrap();
        stopper.await.unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::Interrupted);
        assert_eq!(result.frames_rendered, 1);
        // The pause ends early and the successor is computed before the
        // stop check at the top of the next iteration.
        assert_eq!(result.grid.generation(), 1);
    }

    #[tokio::test]
    async fn extinction_stops_simulation() {
        let controls = SimulationControls::new(&config(0));
        let mut sink = RecordingSink::default();

        let result = run_simulation(
            grid_with(3, 3, &[(1, 1)]),
            &controls,
            &options(true, false),
            &mut sink,
        )
        .await
        .unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::Extinction);
        assert_eq!(result.frames_rendered, 2);
        assert_eq!(sink.frames, vec![(0, 1), (1, 0)]);
    }

    #[tokio::test]
    async fn extinction_ignored_when_disabled() {
        let controls = SimulationControls::new(&config(3));
        let mut sink = NoOpSink;

        let result = run_simulation(
            grid_with(3, 3, &[(1, 1)]),
            &controls,
            &options(false, false),
            &mut sink,
        )
        .await
        .unwrap();

        assert_eq!(result.end_reason, SimulationEndReason::MaxGenerationsReached);
        assert!(result.grid.is_extinct());
    }

    #[tokio::test]
    async fn still_life_is_detected_as_period_one() {
        let controls = SimulationControls::new(&config(100));
        let block = grid_with(4, 4, &[(1, 1), (1, 2), (2, 1), (2, 2)]);

        let result = run_simulation(block, &controls, &options(false, true), &mut NoOpSink)
            .await
            .unwrap();

        assert_eq!(
            result.end_reason,
            SimulationEndReason::CycleDetected { period: 1 }
        );
        assert_eq!(result.frames_rendered, 2);
    }

    #[tokio::test]
    async fn oscillator_is_detected_with_its_period() {
        let controls = SimulationControls::new(&config(100));

        let result = run_simulation(blinker(), &controls, &options(false, true), &mut NoOpSink)
            .await
            .unwrap();

        assert_eq!(
            result.end_reason,
            SimulationEndReason::CycleDetected { period: 2 }
        );
        assert_eq!(result.grid.generation(), 2);
    }

    #[tokio::test]
    async fn render_error_aborts_the_run() {
        struct BrokenPipe;
        impl FrameSink for BrokenPipe {
            fn present(&mut self, _grid: &Grid) -> io::Result<()> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
        }

        let controls = SimulationControls::new(&config(0));
        let result = run_simulation(blinker(), &controls, &options(false, false), &mut BrokenPipe).await;
        assert!(matches!(result, Err(RunnerError::Render { .. })));
    }

    #[test]
    fn run_options_follow_config() {
        let config = SimulationConfig {
            stop_on_extinction: true,
            stop_on_cycle: false,
            cycle_history: 3,
            ..SimulationConfig::default()
        };
        let options = RunOptions::from(&config);
        assert!(options.stop_on_extinction);
        assert!(!options.stop_on_cycle);
        assert_eq!(options.cycle_history, 3);
    }
}
