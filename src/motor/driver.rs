//! Stepper axis driver.
//!
//! Generic over embedded-hal 1.0 pin types. Moves are blocking: the driver
//! pulses STEP at the profile's intervals and, when asked to, samples the
//! endstop before every step.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::units::{Millimeters, MillimetersPerSec, Sign};
use crate::config::{Axis, LimitSwitch, MechanicalConstraints};
use crate::error::MotorError;
use crate::motion::{MotionExecutor, MotionProfile};

use super::position::Position;
use super::{Motor, MoveTiming};

/// STEP pulse width in microseconds.
const PULSE_WIDTH_US: u32 = 2;

/// Stepper axis driver with an endstop input.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `ENDSTOP`: limit switch input (must implement `InputPin`)
/// - `DELAY`: Delay provider (must implement `DelayNs`)
pub struct StepperAxis<STEP, DIR, ENDSTOP, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    ENDSTOP: InputPin,
    DELAY: DelayNs,
{
    axis: Axis,

    step_pin: STEP,

    /// DIR pin (high = positive travel, unless inverted).
    dir_pin: DIR,

    endstop: ENDSTOP,

    delay: DELAY,

    /// Current absolute position.
    position: Position,

    /// Current direction (cached to avoid unnecessary pin writes).
    current_direction: Option<Sign>,

    constraints: MechanicalConstraints,

    /// Speed used for homing moves.
    home_speed: MillimetersPerSec,

    invert_direction: bool,

    /// Endstop reads low when triggered.
    endstop_active_low: bool,
}

impl<STEP, DIR, ENDSTOP, DELAY> StepperAxis<STEP, DIR, ENDSTOP, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    ENDSTOP: InputPin,
    DELAY: DelayNs,
{
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        axis: Axis,
        step_pin: STEP,
        dir_pin: DIR,
        endstop: ENDSTOP,
        delay: DELAY,
        constraints: MechanicalConstraints,
        home_speed: MillimetersPerSec,
        invert_direction: bool,
        endstop_active_low: bool,
    ) -> Self {
        Self {
            axis,
            step_pin,
            dir_pin,
            endstop,
            delay,
            position: Position::new(constraints.steps_per_mm),
            current_direction: None,
            constraints,
            home_speed,
            invert_direction,
            endstop_active_low,
        }
    }

    /// Get current position in millimetres.
    #[inline]
    pub fn position_mm(&self) -> Millimeters {
        self.position.mm()
    }

    /// Whether the axis has been homed.
    #[inline]
    pub fn is_homed(&self) -> bool {
        self.position.is_homed()
    }

    /// Get the mechanical constraints.
    #[inline]
    pub fn constraints(&self) -> &MechanicalConstraints {
        &self.constraints
    }

    /// Release the pins and delay provider.
    pub fn release(self) -> (STEP, DIR, ENDSTOP, DELAY) {
        (self.step_pin, self.dir_pin, self.endstop, self.delay)
    }

    fn endstop_triggered(&mut self) -> Result<bool, MotorError> {
        let high = self.endstop.is_high().map_err(|_| MotorError::PinError)?;
        Ok(high != self.endstop_active_low)
    }

    fn set_direction(&mut self, direction: Sign) -> Result<(), MotorError> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        let pin_high = match direction {
            Sign::Positive => !self.invert_direction,
            Sign::Negative => self.invert_direction,
        };

        if pin_high {
            self.dir_pin.set_high().map_err(|_| MotorError::PinError)?;
        } else {
            self.dir_pin.set_low().map_err(|_| MotorError::PinError)?;
        }

        self.current_direction = Some(direction);
        Ok(())
    }

    fn pulse(&mut self) -> Result<(), MotorError> {
        self.step_pin.set_high().map_err(|_| MotorError::PinError)?;
        self.delay.delay_us(PULSE_WIDTH_US);
        self.step_pin.set_low().map_err(|_| MotorError::PinError)
    }

    /// Execute a move, optionally stopping at the endstop.
    fn run_move(
        &mut self,
        speed: MillimetersPerSec,
        distance: Millimeters,
        watch_endstop: bool,
    ) -> Result<MoveTiming, MotorError> {
        if !(speed.value() > 0.0) {
            return Err(MotorError::InvalidSpeed(speed.value()));
        }

        let profile = MotionProfile::trapezoidal(
            self.constraints.mm_to_steps(distance).value(),
            self.constraints.speed_to_steps(speed.value()),
            self.constraints.acceleration_steps_per_sec2,
        );
        let expected = profile.duration_ticks();
        let direction = profile.direction;

        if !profile.is_zero() {
            self.set_direction(direction)?;
        }

        let mut executor = MotionExecutor::new(profile);
        let mut triggered = false;

        while !executor.is_complete() {
            if watch_endstop && self.endstop_triggered()? {
                triggered = true;
                break;
            }

            self.pulse()?;
            self.position.move_steps(match direction {
                Sign::Positive => 1,
                Sign::Negative => -1,
            });

            let interval_ns = executor.current_interval_ns();
            executor.advance();
            self.delay
                .delay_ns(interval_ns.saturating_sub(PULSE_WIDTH_US * 1_000));
        }

        if watch_endstop && !triggered {
            triggered = self.endstop_triggered()?;
        }

        Ok(MoveTiming {
            actual: executor.elapsed_ticks(),
            expected,
            limit_triggered: triggered,
        })
    }
}

impl<STEP, DIR, ENDSTOP, DELAY> Motor for StepperAxis<STEP, DIR, ENDSTOP, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    ENDSTOP: InputPin,
    DELAY: DelayNs,
{
    fn axis(&self) -> Axis {
        self.axis
    }

    fn home(&mut self, distance: Millimeters) -> Result<(), MotorError> {
        let timing = self.run_move(self.home_speed, distance, true)?;
        if !timing.limit_triggered {
            return Err(MotorError::HomingFailed { axis: self.axis });
        }

        self.position.set_origin();
        Ok(())
    }

    fn move_by(
        &mut self,
        speed: MillimetersPerSec,
        distance: Millimeters,
        limit: Option<&LimitSwitch>,
    ) -> Result<MoveTiming, MotorError> {
        let timing = self.run_move(speed, distance, limit.is_some())?;

        match limit {
            Some(limit) if !timing.limit_triggered => Err(MotorError::LimitNotReached {
                axis: self.axis,
                limit: limit.clone(),
            }),
            _ => Ok(timing),
        }
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

    use super::*;
    use crate::config::units::{Microsteps, Ticks};
    use crate::config::AxisConfig;
    use crate::motor::StepperAxisBuilder;

    /// 2 steps/mm, 20 steps/s at 10 mm/s: every step is a 50 ms cruise step.
    fn slow_axis() -> AxisConfig {
        let mut config = AxisConfig::new(
            Millimeters(2.0),
            MillimetersPerSec(10.0),
            Sign::Positive,
            0.01,
        );
        config.microsteps = Microsteps::FULL;
        config
    }

    fn pulses(count: usize) -> Vec<Transaction> {
        (0..count)
            .flat_map(|_| [Transaction::set(State::High), Transaction::set(State::Low)])
            .collect()
    }

    #[test]
    fn test_limited_move_stops_at_endstop() {
        let mut step = PinMock::new(&pulses(2));
        let mut dir = PinMock::new(&[Transaction::set(State::High)]);
        let mut endstop = PinMock::new(&[
            Transaction::get(State::Low),
            Transaction::get(State::Low),
            Transaction::get(State::High),
        ]);

        let mut axis = StepperAxisBuilder::new()
            .from_axis_config(Axis::Z, &slow_axis())
            .step_pin(step.clone())
            .dir_pin(dir.clone())
            .endstop(endstop.clone())
            .delay(NoopDelay::new())
            .build()
            .unwrap();

        let limit = LimitSwitch::default();
        let timing = axis
            .move_by(MillimetersPerSec(10.0), Millimeters(2.0), Some(&limit))
            .unwrap();

        assert!(timing.limit_triggered);
        assert_eq!(timing.expected, Ticks(200_000));
        assert_eq!(timing.actual, Ticks(100_000));
        assert!((axis.position_mm().value() - 1.0).abs() < 1e-6);

        step.done();
        dir.done();
        endstop.done();
    }

    #[test]
    fn test_limited_move_without_trigger_fails() {
        let mut step = PinMock::new(&pulses(4));
        let mut dir = PinMock::new(&[Transaction::set(State::Low)]);
        let mut endstop = PinMock::new(&vec![Transaction::get(State::Low); 5]);

        let mut axis = StepperAxisBuilder::new()
            .from_axis_config(Axis::W, &slow_axis())
            .step_pin(step.clone())
            .dir_pin(dir.clone())
            .endstop(endstop.clone())
            .delay(NoopDelay::new())
            .build()
            .unwrap();

        let limit = LimitSwitch::default();
        let result = axis.move_by(MillimetersPerSec(10.0), Millimeters(-2.0), Some(&limit));

        assert_eq!(
            result,
            Err(MotorError::LimitNotReached {
                axis: Axis::W,
                limit
            })
        );

        step.done();
        dir.done();
        endstop.done();
    }

    #[test]
    fn test_unlimited_move_ignores_endstop() {
        let mut step = PinMock::new(&pulses(4));
        let mut dir = PinMock::new(&[Transaction::set(State::High)]);
        let mut endstop = PinMock::new(&[]);

        let mut axis = StepperAxisBuilder::new()
            .from_axis_config(Axis::S, &slow_axis())
            .step_pin(step.clone())
            .dir_pin(dir.clone())
            .endstop(endstop.clone())
            .delay(NoopDelay::new())
            .build()
            .unwrap();

        let timing = axis
            .move_by(MillimetersPerSec(10.0), Millimeters(2.0), None)
            .unwrap();

        assert!(!timing.limit_triggered);
        assert_eq!(timing.actual, timing.expected);

        step.done();
        dir.done();
        endstop.done();
    }

    #[test]
    fn test_home_sets_origin() {
        let mut step = PinMock::new(&pulses(1));
        let mut dir = PinMock::new(&[Transaction::set(State::High)]);
        let mut endstop = PinMock::new(&[
            Transaction::get(State::Low),
            Transaction::get(State::High),
        ]);

        let mut axis = StepperAxisBuilder::new()
            .from_axis_config(Axis::Z, &slow_axis())
            .step_pin(step.clone())
            .dir_pin(dir.clone())
            .endstop(endstop.clone())
            .delay(NoopDelay::new())
            .build()
            .unwrap();

        axis.home(Millimeters(250.0)).unwrap();

        assert!(axis.is_homed());
        assert_eq!(axis.position_mm(), Millimeters(0.0));

        step.done();
        dir.done();
        endstop.done();
    }

    #[test]
    fn test_invalid_speed() {
        let mut step = PinMock::new(&[]);
        let mut dir = PinMock::new(&[]);
        let mut endstop = PinMock::new(&[]);

        let mut axis = StepperAxisBuilder::new()
            .from_axis_config(Axis::Z, &slow_axis())
            .step_pin(step.clone())
            .dir_pin(dir.clone())
            .endstop(endstop.clone())
            .delay(NoopDelay::new())
            .build()
            .unwrap();

        assert_eq!(
            axis.move_by(MillimetersPerSec(0.0), Millimeters(2.0), None),
            Err(MotorError::InvalidSpeed(0.0))
        );

        step.done();
        dir.done();
        endstop.done();
    }
}
