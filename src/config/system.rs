//! Test configuration - root configuration structure.

use core::fmt;
use std::path::PathBuf;

use heapless::FnvIndexMap;
use serde::Deserialize;

use crate::error::ConfigError;

use super::axis::{Axis, AxisConfig};
use super::units::{Millimeters, MillimetersPerSec, Sign};

/// Label of the limit switch a collaborator watches to end a move early.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct LimitSwitch(heapless::String<16>);

impl LimitSwitch {
    /// Create a label (1-16 characters).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidLimitSwitch` if the label is empty or too long.
    pub fn new(label: &str) -> Result<Self, ConfigError> {
        if label.is_empty() {
            return Err(ConfigError::InvalidLimitSwitch);
        }
        heapless::String::try_from(label)
            .map(Self)
            .map_err(|_| ConfigError::InvalidLimitSwitch)
    }

    /// The label as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for LimitSwitch {
    /// The S-axis switch, shared by every axis' return move.
    fn default() -> Self {
        let mut label = heapless::String::new();
        // One character always fits in 16.
        label.push('S').ok();
        Self(label)
    }
}

impl TryFrom<String> for LimitSwitch {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl fmt::Display for LimitSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run-wide settings of the wear test.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Limit switch watched on the return move of every axis.
    #[serde(default)]
    pub limit_switch: LimitSwitch,

    /// Return move length as a multiple of the nominal stroke.
    #[serde(default = "default_overshoot")]
    pub overshoot: f32,

    /// Re-home and retry a failed axis test this many times before aborting.
    #[serde(default)]
    pub retries: u8,

    /// Shell command stopping the service that normally owns the motors.
    /// Empty disables the stop.
    #[serde(default = "default_service_stop_command")]
    pub service_stop_command: String,

    /// Log file the test appends to.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_overshoot() -> f32 {
    1.5
}

fn default_service_stop_command() -> String {
    "/etc/init.d/sauron stop".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("/data/logs/bearing_lifetime_test.log")
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            limit_switch: LimitSwitch::default(),
            overshoot: default_overshoot(),
            retries: 0,
            service_stop_command: default_service_stop_command(),
            log_file: default_log_file(),
        }
    }
}

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct TestConfig {
    /// Per-axis configurations, keyed by axis.
    #[serde(default = "default_axes")]
    pub axes: FnvIndexMap<Axis, AxisConfig, 4>,

    /// Run-wide settings.
    #[serde(default)]
    pub run: RunConfig,
}

/// The machine's axes at their accelerated-test values.
fn default_axes() -> FnvIndexMap<Axis, AxisConfig, 4> {
    let mut axes = FnvIndexMap::new();
    let defaults = [
        (Axis::Z, AxisConfig::new(Millimeters(50.0), MillimetersPerSec(25.0), Sign::Positive, 0.25)),
        (Axis::W, AxisConfig::new(Millimeters(100.0), MillimetersPerSec(200.0), Sign::Negative, 0.027777777)),
        (Axis::S, AxisConfig::new(Millimeters(30.0), MillimetersPerSec(60.0), Sign::Negative, 0.026525)),
    ];
    for (axis, config) in defaults {
        // Capacity 4 holds all three axes.
        axes.insert(axis, config).ok();
    }
    axes
}

impl TestConfig {
    /// Get an axis configuration.
    pub fn axis(&self, axis: Axis) -> Option<&AxisConfig> {
        self.axes.get(&axis)
    }

    /// List all configured axes.
    pub fn axis_names(&self) -> impl Iterator<Item = Axis> + '_ {
        self.axes.keys().copied()
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            axes: default_axes(),
            run: RunConfig::default(),
        }
    }
}
