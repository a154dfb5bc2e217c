//! Reporting sink for the cycle runner.
//!
//! The runner never logs directly; every event goes through a
//! [`CycleReporter`]. [`TracingReporter`] renders the log lines operators
//! grep for.

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::config::Axis;
use crate::error::MotorError;
use crate::motor::MoveTiming;

use super::stats::MotorStats;

/// Target of the wear test's own log lines.
pub const LOG_TARGET: &str = "bearing_wear";

/// Receives the events of a running wear test.
pub trait CycleReporter {
    /// A cycle is about to start.
    fn cycle_started(&mut self, cycle: u64, at: DateTime<Local>);

    /// An axis is homed and ready.
    fn axis_homed(&mut self, _axis: Axis) {}

    /// An axis finished its test.
    fn axis_tested(&mut self, axis: Axis, timing: &MoveTiming);

    /// An axis test failed and will be retried after re-homing.
    fn axis_retry(&mut self, _axis: Axis, _attempt: u8, _error: &MotorError) {}

    /// All axes finished; `stats` holds the totals after this cycle.
    fn cycle_completed(&mut self, cycle: u64, stats: &MotorStats);
}

/// `Iteration executed: 2024-05-01 09:30:00.123456`
pub fn iteration_line(at: &DateTime<Local>) -> String {
    format!("Iteration executed: {}", at.format("%Y-%m-%d %H:%M:%S%.6f"))
}

/// `Test iteration: 5`
pub fn test_iteration_line(cycle: u64) -> String {
    format!("Test iteration: {cycle}")
}

/// Per-axis timing line.
pub fn axis_line(axis: Axis, timing: &MoveTiming) -> String {
    format!(
        "Motor: {} Expected return time (ticks): {} Actual return time (ticks): {}",
        axis, timing.expected, timing.actual
    )
}

/// Aggregate revolution line, always Z, W, S.
pub fn revolutions_line(stats: &MotorStats) -> String {
    format!(
        "Motor Revolutions for Z: {}, for W: {}, for S: {}",
        stats.get(Axis::Z),
        stats.get(Axis::W),
        stats.get(Axis::S)
    )
}

/// Reporter writing through `tracing` at INFO.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl TracingReporter {
    /// Create a reporter.
    pub fn new() -> Self {
        Self
    }
}

impl CycleReporter for TracingReporter {
    fn cycle_started(&mut self, cycle: u64, at: DateTime<Local>) {
        info!(target: LOG_TARGET, "{}", iteration_line(&at));
        info!(target: LOG_TARGET, "{}", test_iteration_line(cycle));
    }

    fn axis_homed(&mut self, axis: Axis) {
        info!(target: LOG_TARGET, "Motor {} homed", axis);
    }

    fn axis_tested(&mut self, axis: Axis, timing: &MoveTiming) {
        info!(target: LOG_TARGET, "{}", axis_line(axis, timing));
    }

    fn axis_retry(&mut self, axis: Axis, attempt: u8, error: &MotorError) {
        warn!(target: LOG_TARGET, "Motor {} test failed ({}), re-homing for retry {}", axis, error, attempt);
    }

    fn cycle_completed(&mut self, _cycle: u64, stats: &MotorStats) {
        info!(target: LOG_TARGET, "{}", revolutions_line(stats));
    }
}
