//! Poll scheduler for tablebot.
//!
//! The game service never pushes anything, so an agent learns about the
//! table by asking for a snapshot over and over. This crate owns the
//! rhythm of that asking: a fixed pause after every cycle, a longer pause
//! when the server throttles us, optional jitter on the very first poll,
//! and budget monitoring for cycles that run long.
//!
//! # Integration
//!
//! The scheduler sits inside the agent's loop next to its stop signal:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         _ = stop.changed() => break,
//!         _ = scheduler.wait_for_poll() => {
//!             run_cycle().await;
//!             scheduler.record_poll_end();
//!         }
//!     }
//! }
//! ```
//!
//! The pause is measured from the *end* of a cycle, so a slow request
//! never causes the next poll to fire early.

use std::time::Duration;

use rand::Rng;
use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the poll scheduler.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Pause between the end of one cycle and the start of the next.
    pub interval: Duration,
    /// Upper bound (exclusive) of the random delay before the first poll.
    /// Zero polls immediately.
    pub initial_jitter: Duration,
    /// Fraction of `interval` (0.0–1.0) a cycle may take before a debug
    /// note is logged. Default: 0.80.
    pub budget_warn_threshold: f64,
    /// Enable cycle-time metrics.
    pub metrics_enabled: bool,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            initial_jitter: Duration::ZERO,
            budget_warn_threshold: 0.80,
            metrics_enabled: true,
        }
    }
}

impl PollConfig {
    /// Shortest interval the scheduler will accept.
    pub const MIN_INTERVAL: Duration = Duration::from_millis(100);

    /// Create a config for a specific interval with default settings.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Default::default()
        }
    }

    /// Clamp any out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`PollScheduler::new`]. Rules:
    /// - `interval` raised to [`Self::MIN_INTERVAL`].
    /// - `budget_warn_threshold` clamped to `0.0..=1.0`.
    pub fn validated(mut self) -> Self {
        if self.interval < Self::MIN_INTERVAL {
            warn!(
                interval = ?self.interval,
                min = ?Self::MIN_INTERVAL,
                "poll interval below minimum, raising"
            );
            self.interval = Self::MIN_INTERVAL;
        }
        self.budget_warn_threshold = self.budget_warn_threshold.clamp(0.0, 1.0);
        self
    }
}

// ---------------------------------------------------------------------------
// Poll info (returned to caller each poll)
// ---------------------------------------------------------------------------

/// Information about a poll that is due, returned by
/// [`PollScheduler::wait_for_poll`].
#[derive(Debug, Clone)]
pub struct PollInfo {
    /// Monotonically increasing poll number (starts at 1).
    pub poll: u64,
    /// How far past its deadline the poll fired.
    pub late_by: Duration,
    /// `true` if the wait that just ended was a back-off.
    pub after_backoff: bool,
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Runtime metrics for the poll scheduler.
///
/// Cycle times cover the work between [`PollScheduler::wait_for_poll`]
/// returning and [`PollScheduler::record_poll_end`] being called.
#[derive(Debug, Clone)]
pub struct PollMetrics {
    /// Polls fired.
    pub total_polls: u64,
    /// Back-offs requested.
    pub total_backoffs: u64,
    /// Cycles that took longer than the poll interval.
    pub total_overruns: u64,
    /// Exponential moving average of cycle time (α = 0.1).
    pub avg_cycle_time: Duration,
    /// Longest cycle observed.
    pub max_cycle_time: Duration,
    /// Last cycle time as a fraction of the interval. >1.0 means overrun.
    pub budget_utilization: f64,
}

impl Default for PollMetrics {
    fn default() -> Self {
        Self {
            total_polls: 0,
            total_backoffs: 0,
            total_overruns: 0,
            avg_cycle_time: Duration::ZERO,
            max_cycle_time: Duration::ZERO,
            budget_utilization: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Fixed-cadence poll scheduler. One per agent loop.
pub struct PollScheduler {
    config: PollConfig,
    poll_count: u64,
    /// When the next poll should fire.
    next_poll: Instant,
    /// Set by `wait_for_poll`, consumed by `record_poll_end`.
    cycle_start: Option<Instant>,
    /// Extra delay requested for the pause after the current cycle.
    pending_backoff: Option<Duration>,
    /// Whether the pause now being waited on is a back-off.
    backing_off: bool,
    metrics: PollMetrics,
}

impl PollScheduler {
    /// Create a new scheduler from config.
    ///
    /// The first poll is due immediately, delayed by a random amount in
    /// `[0, initial_jitter)` when jitter is configured.
    pub fn new(config: PollConfig) -> Self {
        let config = config.validated();

        let jitter = if config.initial_jitter.is_zero() {
            Duration::ZERO
        } else {
            let max_us = config.initial_jitter.as_micros() as u64;
            Duration::from_micros(rand::rng().random_range(0..max_us.max(1)))
        };

        debug!(
            interval = ?config.interval,
            ?jitter,
            "poll scheduler created"
        );

        Self {
            config,
            poll_count: 0,
            next_poll: Instant::now() + jitter,
            cycle_start: None,
            pending_backoff: None,
            backing_off: false,
            metrics: PollMetrics::default(),
        }
    }

    /// Create a scheduler for a specific interval with default settings.
    pub fn with_interval(interval: Duration) -> Self {
        Self::new(PollConfig::with_interval(interval))
    }

    /// Wait until the next poll is due.
    ///
    /// Cancel-safe: dropping the future before it resolves leaves the
    /// schedule untouched.
    pub async fn wait_for_poll(&mut self) -> PollInfo {
        let deadline = self.next_poll;
        time::sleep_until(deadline).await;

        let now = Instant::now();
        self.poll_count += 1;
        self.cycle_start = Some(now);
        self.metrics.total_polls += 1;

        let after_backoff = std::mem::take(&mut self.backing_off);
        let late_by = now.saturating_duration_since(deadline);

        trace!(poll = self.poll_count, after_backoff, "poll due");

        PollInfo {
            poll: self.poll_count,
            late_by,
            after_backoff,
        }
    }

    /// Ask for a longer pause after the current cycle.
    ///
    /// The pause is never shorter than the normal interval. Several
    /// requests in one cycle keep the longest.
    pub fn back_off(&mut self, delay: Duration) {
        let delay = delay.max(self.config.interval);
        self.pending_backoff = Some(match self.pending_backoff {
            Some(existing) => existing.max(delay),
            None => delay,
        });
        self.metrics.total_backoffs += 1;
        debug!(
            poll = self.poll_count,
            ?delay,
            "back-off requested"
        );
    }

    /// Record that the current cycle has finished and schedule the next
    /// poll one interval (or the pending back-off) from now.
    pub fn record_poll_end(&mut self) {
        let now = Instant::now();
        let pause = match self.pending_backoff.take() {
            Some(delay) => {
                self.backing_off = true;
                delay
            }
            None => self.config.interval,
        };
        self.next_poll = now + pause;

        let Some(start) = self.cycle_start.take() else {
            return;
        };
        let elapsed = now.saturating_duration_since(start);
        let budget = self.config.interval;
        let utilization = elapsed.as_secs_f64() / budget.as_secs_f64();
        self.metrics.budget_utilization = utilization;

        if utilization >= 1.0 {
            self.metrics.total_overruns += 1;
            warn!(
                poll = self.poll_count,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                interval_ms = budget.as_secs_f64() * 1000.0,
                "poll cycle took longer than the poll interval"
            );
        } else if utilization >= self.config.budget_warn_threshold {
            debug!(
                poll = self.poll_count,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                utilization_pct = format!("{:.1}", utilization * 100.0),
                "poll cycle approaching interval"
            );
        }

        if self.config.metrics_enabled {
            if elapsed > self.metrics.max_cycle_time {
                self.metrics.max_cycle_time = elapsed;
            }
            let alpha = 0.1;
            let prev = self.metrics.avg_cycle_time.as_secs_f64();
            let curr = elapsed.as_secs_f64();
            self.metrics.avg_cycle_time =
                Duration::from_secs_f64(prev * (1.0 - alpha) + curr * alpha);
        }
    }

    /// When the next poll will fire.
    pub fn next_poll_at(&self) -> Instant {
        self.next_poll
    }

    /// Polls fired so far.
    pub fn poll_count(&self) -> u64 {
        self.poll_count
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.config.interval
    }

    /// Snapshot of current metrics.
    pub fn metrics(&self) -> &PollMetrics {
        &self.metrics
    }
}
