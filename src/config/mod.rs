//! Configuration module for the wear test.
//!
//! Provides the per-axis parameters and run settings, either built in or
//! loaded from a TOML file.

mod axis;
mod loader;
mod mechanical;
mod system;
pub mod units;
mod validation;

pub use axis::{Axis, AxisConfig};
pub use loader::{load_config, parse_config};
pub use mechanical::MechanicalConstraints;
pub use system::{LimitSwitch, RunConfig, TestConfig};
pub use validation::validate_config;

// Re-export unit types at config level
pub use units::{
    Microsteps, Millimeters, MillimetersPerSec, MillimetersPerSecSquared, Revolutions, Sign, Steps,
    Ticks,
};
