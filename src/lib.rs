//! # bearing-wear
//!
//! Accelerated bearing wear test for the Z, W and S stepper axes of a
//! dispensing machine.
//!
//! ## Features
//!
//! - **Full-stroke cycles**: every axis retracts its nominal stroke, then
//!   returns 1.5 strokes toward its limit switch
//! - **Tick timing**: expected vs actual duration of every return move
//! - **Revolution accounting**: per-axis shaft revolutions for wear estimates
//! - **embedded-hal 1.0**: `OutputPin` for STEP/DIR, `InputPin` endstops, `DelayNs` timing
//! - **Simulation**: a software axis for dry runs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::atomic::AtomicBool;
//!
//! use bearing_wear::{Axis, CycleRunner, SimulatedMotor, TestConfig, TracingReporter};
//!
//! # fn main() -> bearing_wear::Result<()> {
//! let config = TestConfig::default();
//! let motors = Axis::CONSTRUCTION_ORDER
//!     .iter()
//!     .filter_map(|&axis| config.axis(axis).map(|c| SimulatedMotor::new(axis, c)))
//!     .collect::<Vec<_>>();
//!
//! let mut runner = CycleRunner::new(config, motors, TracingReporter::new(), 0)?;
//! runner.home_all()?;
//! runner.run(&AtomicBool::new(true))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
#![allow(clippy::result_large_err)]

// Core modules
pub mod config;
pub mod cycle;
pub mod error;
pub mod logging;
pub mod motion;
pub mod motor;
pub mod service;

// Re-exports for ergonomic API
pub use config::{
    load_config, parse_config, validate_config, Axis, AxisConfig, LimitSwitch, RunConfig,
    TestConfig,
};
pub use cycle::{full_scale_motor_test, CycleReporter, CycleRunner, MotorStats, TracingReporter};
pub use error::{ConfigError, Error, MotorError, Result};
pub use motion::{MotionPhase, MotionProfile};
pub use motor::{Motor, MoveTiming, SimulatedMotor, StepperAxis, StepperAxisBuilder};

// Unit types
pub use config::units::{
    Microsteps, Millimeters, MillimetersPerSec, MillimetersPerSecSquared, Revolutions, Sign,
    Steps, Ticks,
};
