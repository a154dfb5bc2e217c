//! Builder pattern for StepperAxis.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::units::MillimetersPerSec;
use crate::config::{Axis, AxisConfig, MechanicalConstraints, TestConfig};
use crate::error::{ConfigError, Error, Result};

use super::driver::StepperAxis;

/// Builder for creating StepperAxis instances.
pub struct StepperAxisBuilder<STEP, DIR, ENDSTOP, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    ENDSTOP: InputPin,
    DELAY: DelayNs,
{
    axis: Option<Axis>,
    step_pin: Option<STEP>,
    dir_pin: Option<DIR>,
    endstop: Option<ENDSTOP>,
    delay: Option<DELAY>,
    constraints: Option<MechanicalConstraints>,
    home_speed: Option<MillimetersPerSec>,
    invert_direction: bool,
    endstop_active_low: bool,
}

impl<STEP, DIR, ENDSTOP, DELAY> Default for StepperAxisBuilder<STEP, DIR, ENDSTOP, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    ENDSTOP: InputPin,
    DELAY: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP, DIR, ENDSTOP, DELAY> StepperAxisBuilder<STEP, DIR, ENDSTOP, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    ENDSTOP: InputPin,
    DELAY: DelayNs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            axis: None,
            step_pin: None,
            dir_pin: None,
            endstop: None,
            delay: None,
            constraints: None,
            home_speed: None,
            invert_direction: false,
            endstop_active_low: false,
        }
    }

    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the endstop input.
    pub fn endstop(mut self, pin: ENDSTOP) -> Self {
        self.endstop = Some(pin);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the speed used for homing.
    pub fn home_speed(mut self, speed: MillimetersPerSec) -> Self {
        self.home_speed = Some(speed);
        self
    }

    /// Treat a low endstop level as triggered (normally-closed switches).
    pub fn endstop_active_low(mut self, active_low: bool) -> Self {
        self.endstop_active_low = active_low;
        self
    }

    /// Configure from an axis configuration.
    ///
    /// Homing runs at the axis' safe speed unless overridden afterwards.
    pub fn from_axis_config(mut self, axis: Axis, config: &AxisConfig) -> Self {
        self.axis = Some(axis);
        self.constraints = Some(MechanicalConstraints::from_config(config));
        self.home_speed = Some(config.safe_speed);
        self.invert_direction = config.invert_direction;
        self
    }

    /// Configure from a test configuration by axis.
    pub fn from_config(self, config: &TestConfig, axis: Axis) -> Result<Self> {
        let axis_config = config
            .axis(axis)
            .ok_or(Error::Config(ConfigError::MissingAxis(axis)))?;

        Ok(self.from_axis_config(axis, axis_config))
    }

    /// Build the StepperAxis.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<StepperAxis<STEP, DIR, ENDSTOP, DELAY>> {
        let axis = self.axis.ok_or(ConfigError::MissingField("axis"))?;
        let step_pin = self.step_pin.ok_or(ConfigError::MissingField("step_pin"))?;
        let dir_pin = self.dir_pin.ok_or(ConfigError::MissingField("dir_pin"))?;
        let endstop = self.endstop.ok_or(ConfigError::MissingField("endstop"))?;
        let delay = self.delay.ok_or(ConfigError::MissingField("delay"))?;
        let constraints = self
            .constraints
            .ok_or(ConfigError::MissingField("axis configuration"))?;
        let home_speed = self.home_speed.ok_or(ConfigError::MissingField("home_speed"))?;

        Ok(StepperAxis::new(
            axis,
            step_pin,
            dir_pin,
            endstop,
            delay,
            constraints,
            home_speed,
            self.invert_direction,
            self.endstop_active_low,
        ))
    }
}
