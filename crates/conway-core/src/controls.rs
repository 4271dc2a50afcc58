//! Run control state shared between the generation loop and its supervisor.
//!
//! The loop reads these controls before every frame. A supervisor (the
//! Ctrl-C watcher in the binary, or a test) can request a stop at any time;
//! a pending frame pause is cut short as soon as the request lands.
//!
//! # Architecture
//!
//! The stop flag is an [`AtomicBool`] paired with a [`Notify`], so the
//! struct can sit behind an [`Arc`] without locks. Limits are fixed at
//! construction.
//!
//! [`Arc`]: std::sync::Arc

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Notify;

use crate::config::SimulationConfig;

/// Reason why a simulation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEndReason {
    /// The configured `max_generations` has been presented.
    MaxGenerationsReached,
    /// The configured `max_real_time_seconds` elapsed.
    MaxRealTimeReached,
    /// A stop was requested (Ctrl-C or programmatic).
    Interrupted,
    /// No cell is alive.
    Extinction,
    /// The grid repeated a configuration seen `period` generations earlier.
    CycleDetected {
        /// Generations between the two identical configurations
        /// (1 for a still life).
        period: u64,
    },
}

/// Shared stop flag plus the fixed bounds of a run.
#[derive(Debug)]
pub struct SimulationControls {
    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Wakes a loop that is pausing between frames.
    stop_notify: Notify,

    /// Pause between frames in milliseconds.
    frame_interval_ms: u64,

    /// Wall-clock time when the controls were created.
    started_at: DateTime<Utc>,

    /// Maximum generation to present (0 = unlimited).
    max_generations: u64,

    /// Maximum wall-clock seconds (0 = unlimited).
    max_real_time_seconds: u64,
}

impl SimulationControls {
    /// Create controls from the simulation section of the configuration.
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            stop_requested: AtomicBool::new(false),
            stop_notify: Notify::new(),
            frame_interval_ms: config.frame_interval_ms,
            started_at: Utc::now(),
            max_generations: config.max_generations,
            max_real_time_seconds: config.max_real_time_seconds,
        }
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Request a clean stop and wake a pausing loop.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        self.stop_notify.notify_waiters();
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Resolve once a stop has been requested.
    ///
    /// Returns immediately if a stop is already pending.
    pub async fn stopped(&self) {
        loop {
            // Register before checking the flag so a concurrent
            // `request_stop` cannot slip between the two.
            let notified = self.stop_notify.notified();
            if self.is_stop_requested() {
                return;
            }
            notified.await;
        }
    }

    // -----------------------------------------------------------------------
    // Pacing
    // -----------------------------------------------------------------------

    /// Pause between frames in milliseconds.
    pub const fn frame_interval_ms(&self) -> u64 {
        self.frame_interval_ms
    }

    /// Pause between frames as a [`Duration`].
    pub const fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    // -----------------------------------------------------------------------
    // Boundaries
    // -----------------------------------------------------------------------

    /// Check whether the generation limit has been reached.
    ///
    /// Returns `true` if `max_generations > 0` and `generation >= max_generations`.
    pub const fn generation_limit_reached(&self, generation: u64) -> bool {
        self.max_generations > 0 && generation >= self.max_generations
    }

    /// Check whether the wall-clock time limit has been reached.
    ///
    /// Returns `true` if `max_real_time_seconds > 0` and the elapsed
    /// seconds since start reach the limit.
    pub fn time_limit_reached(&self) -> bool {
        if self.max_real_time_seconds == 0 {
            return false;
        }
        self.elapsed_seconds() >= self.max_real_time_seconds
    }

    /// Return the wall-clock start time.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Return elapsed seconds since the controls were created.
    pub fn elapsed_seconds(&self) -> u64 {
        let elapsed = Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds();
        // `num_seconds` can be negative if the system clock moves backwards.
        u64::try_from(elapsed.max(0)).unwrap_or(u64::MAX)
    }

    /// Get the configured generation limit.
    pub const fn max_generations(&self) -> u64 {
        self.max_generations
    }

    /// Get the configured real-time limit in seconds.
    pub const fn max_real_time_seconds(&self) -> u64 {
        self.max_real_time_seconds
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn unbounded() -> SimulationConfig {
        SimulationConfig {
            frame_interval_ms: 250,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn initial_state_is_running() {
        let controls = SimulationControls::new(&unbounded());
        assert!(!controls.is_stop_requested());
        assert_eq!(controls.frame_interval_ms(), 250);
        assert_eq!(controls.frame_interval(), Duration::from_millis(250));
    }

    #[test]
    fn stop_request() {
        let controls = SimulationControls::new(&unbounded());
        controls.request_stop();
        assert!(controls.is_stop_requested());
    }

    #[test]
    fn generation_limit_zero_means_unlimited() {
        let controls = SimulationControls::new(&unbounded());
        assert!(!controls.generation_limit_reached(999_999));
    }

    #[test]
    fn generation_limit_reached() {
        let config = SimulationConfig {
            max_generations: 10,
            ..SimulationConfig::default()
        };
        let controls = SimulationControls::new(&config);
        assert!(!controls.generation_limit_reached(9));
        assert!(controls.generation_limit_reached(10));
        assert!(controls.generation_limit_reached(11));
    }

    #[test]
    fn time_limit_zero_means_unlimited() {
        let controls = SimulationControls::new(&unbounded());
        assert!(!controls.time_limit_reached());
    }

    #[test]
    fn time_limit_not_reached_immediately() {
        let config = SimulationConfig {
            max_real_time_seconds: 3600,
            ..SimulationConfig::default()
        };
        let controls = SimulationControls::new(&config);
        assert!(!controls.time_limit_reached());
        assert!(controls.elapsed_seconds() < 3600);
    }

    #[tokio::test]
    async fn stopped_returns_immediately_when_already_requested() {
        let controls = SimulationControls::new(&unbounded());
        controls.request_stop();
        controls.stopped().await;
    }

    #[tokio::test]
    async fn stopped_wakes_on_later_request() {
        let controls = Arc::new(SimulationControls::new(&unbounded()));
        let waiter = {
            let controls = Arc::clone(&controls);
            tokio::spawn(async move { controls.stopped().await })
        };
        tokio::task::yield_now().await;
        controls.request_stop();

        let joined = tokio::time::timeout(Duration::from_secs(5), waiter).await;
        assert!(matches!(joined, Ok(Ok(()))));
    }
}
