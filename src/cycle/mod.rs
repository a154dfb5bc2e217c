//! Cycle module for the wear test.
//!
//! Each cycle runs [`full_scale_motor_test`] on Z, S and W in that order,
//! credits the axis' revolutions to [`MotorStats`] and reports through a
//! [`CycleReporter`].

mod axis_test;
mod reporter;
mod runner;
mod stats;

pub use axis_test::full_scale_motor_test;
pub use reporter::{
    axis_line, iteration_line, revolutions_line, test_iteration_line, CycleReporter,
    TracingReporter, LOG_TARGET,
};
pub use runner::CycleRunner;
pub use stats::MotorStats;
