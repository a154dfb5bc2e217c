//! Error types for the wear test.
//!
//! Provides unified error handling across configuration, motor backends and the cycle runner.

use core::fmt;

use crate::config::{Axis, LimitSwitch};

/// Result type alias using the crate's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all wear test operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor (collaborator) operation error
    Motor(MotorError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(String),
    /// File I/O error
    IoError(String),
    /// Invalid microstep value (must be power of 2: 1, 2, 4, 8, 16, 32, 64, 128, 256)
    InvalidMicrosteps(u16),
    /// Direction sign other than +1 or -1
    InvalidDirection(i64),
    /// An axis of the fixed Z/W/S set has no configuration
    MissingAxis(Axis),
    /// Full travel distance must be > 0
    InvalidTravelDistance {
        /// Offending axis
        axis: Axis,
        /// Configured value in mm
        value: f32,
    },
    /// Safe speed must be > 0
    InvalidSafeSpeed {
        /// Offending axis
        axis: Axis,
        /// Configured value in mm/s
        value: f32,
    },
    /// Revolutions per mm must be > 0
    InvalidRevolutionsPerMm {
        /// Offending axis
        axis: Axis,
        /// Configured value
        value: f64,
    },
    /// Homing distance must be > 0
    InvalidHomeDistance {
        /// Offending axis
        axis: Axis,
        /// Configured value in mm
        value: f32,
    },
    /// Max acceleration must be > 0
    InvalidMaxAcceleration {
        /// Offending axis
        axis: Axis,
        /// Configured value in mm/s²
        value: f32,
    },
    /// Overshoot factor must be >= 1
    InvalidOvershoot(f32),
    /// Limit switch label is empty or too long
    InvalidLimitSwitch,
    /// No motor handle was supplied for an axis
    MissingMotor(Axis),
    /// More than one motor handle was supplied for an axis
    DuplicateMotor(Axis),
    /// A required builder field was not set
    MissingField(&'static str),
}

/// Motor (collaborator) errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Pin operation failed
    PinError,
    /// Requested speed is not positive
    InvalidSpeed(f32),
    /// Homing move finished without reaching the home limit switch
    HomingFailed {
        /// Axis being homed
        axis: Axis,
    },
    /// A limited move ran its full length without the switch triggering
    LimitNotReached {
        /// Axis being moved
        axis: Axis,
        /// Label of the watched limit switch
        limit: LimitSwitch,
    },
    /// Unlimited move drove the carriage into its endstop
    Stalled {
        /// Axis being moved
        axis: Axis,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
            ConfigError::InvalidMicrosteps(v) => {
                write!(f, "Invalid microsteps: {}. Valid values: 1, 2, 4, 8, 16, 32, 64, 128, 256", v)
            }
            ConfigError::InvalidDirection(v) => write!(f, "Invalid direction: {}. Must be 1 or -1", v),
            ConfigError::MissingAxis(axis) => write!(f, "Axis '{}' is not configured", axis),
            ConfigError::InvalidTravelDistance { axis, value } => {
                write!(f, "Axis '{}': invalid full travel distance {} mm. Must be > 0", axis, value)
            }
            ConfigError::InvalidSafeSpeed { axis, value } => {
                write!(f, "Axis '{}': invalid safe speed {} mm/s. Must be > 0", axis, value)
            }
            ConfigError::InvalidRevolutionsPerMm { axis, value } => {
                write!(f, "Axis '{}': invalid revolutions per mm {}. Must be > 0", axis, value)
            }
            ConfigError::InvalidHomeDistance { axis, value } => {
                write!(f, "Axis '{}': invalid home distance {} mm. Must be > 0", axis, value)
            }
            ConfigError::InvalidMaxAcceleration { axis, value } => {
                write!(f, "Axis '{}': invalid max acceleration {} mm/s². Must be > 0", axis, value)
            }
            ConfigError::InvalidOvershoot(v) => write!(f, "Invalid overshoot factor: {}. Must be >= 1", v),
            ConfigError::InvalidLimitSwitch => write!(f, "Limit switch label must be 1-16 characters"),
            ConfigError::MissingMotor(axis) => write!(f, "No motor supplied for axis '{}'", axis),
            ConfigError::DuplicateMotor(axis) => write!(f, "More than one motor supplied for axis '{}'", axis),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::InvalidSpeed(v) => write!(f, "Invalid speed {} mm/s. Must be > 0", v),
            MotorError::HomingFailed { axis } => {
                write!(f, "Homing of axis '{}' did not reach the limit switch", axis)
            }
            MotorError::LimitNotReached { axis, limit } => {
                write!(f, "Axis '{}' completed its move without triggering limit '{}'", axis, limit)
            }
            MotorError::Stalled { axis } => write!(f, "Axis '{}' stalled against its endstop", axis),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl std::error::Error for Error {}

impl std::error::Error for ConfigError {}

impl std::error::Error for MotorError {}
