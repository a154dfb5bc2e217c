//! Simulated axis for dry runs and tests.
//!
//! Models a carriage and the endstop it homes against. The endstop sits on the
//! axis' `direction` side: moves in that direction close the gap, moves the
//! other way open it. Timing comes from the same profile and executor as the
//! hardware driver, so ticks are directly comparable.

use std::thread;

use tracing::debug;

use crate::config::units::{Millimeters, MillimetersPerSec, Sign, Steps};
use crate::config::{Axis, AxisConfig, LimitSwitch, MechanicalConstraints};
use crate::error::MotorError;
use crate::motion::{MotionExecutor, MotionProfile};

use super::position::Position;
use super::{Motor, MoveTiming};

/// A software axis implementing [`Motor`].
#[derive(Debug, Clone)]
pub struct SimulatedMotor {
    axis: Axis,
    constraints: MechanicalConstraints,
    /// Direction of travel that approaches the endstop.
    toward_endstop: Sign,
    home_speed: MillimetersPerSec,
    /// Steps between the carriage and the endstop.
    gap: u64,
    position: Position,
    /// Sleep for the simulated duration of every move.
    realtime: bool,
}

impl SimulatedMotor {
    /// Create a simulated axis one full stroke away from its endstop.
    pub fn new(axis: Axis, config: &AxisConfig) -> Self {
        let constraints = MechanicalConstraints::from_config(config);
        let gap = constraints
            .mm_to_steps(config.full_travel_distance)
            .value()
            .unsigned_abs();

        Self {
            axis,
            position: Position::new(constraints.steps_per_mm),
            constraints,
            toward_endstop: config.direction,
            home_speed: config.safe_speed,
            gap,
            realtime: false,
        }
    }

    /// Place the carriage `distance` away from the endstop.
    pub fn with_gap(mut self, distance: Millimeters) -> Self {
        self.gap = self.constraints.mm_to_steps(distance).value().unsigned_abs();
        self
    }

    /// Pace moves in real time.
    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    /// Distance between the carriage and the endstop.
    pub fn gap(&self) -> Millimeters {
        self.constraints.steps_to_mm(Steps(self.gap as i64))
    }

    /// Whether the axis has been homed.
    pub fn is_homed(&self) -> bool {
        self.position.is_homed()
    }

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
        let total = u64::from(profile.total_steps);
        let toward = !profile.is_zero() && direction == self.toward_endstop;

        let mut executor = MotionExecutor::new(profile);
        let mut triggered = false;

        if !toward {
            run_steps(&mut executor, total);
            self.gap += total;
        } else if watch_endstop {
            let executed = run_steps(&mut executor, total.min(self.gap));
            triggered = executed == self.gap;
            self.gap -= executed;
        } else if total > self.gap {
            let executed = run_steps(&mut executor, self.gap);
            self.track(direction, executed);
            self.gap = 0;
            return Err(MotorError::Stalled { axis: self.axis });
        } else {
            run_steps(&mut executor, total);
            self.gap -= total;
        }

        self.track(direction, u64::from(executor.current_step()));

        let timing = MoveTiming {
            actual: executor.elapsed_ticks(),
            expected,
            limit_triggered: triggered,
        };

        debug!(
            axis = %self.axis,
            distance = distance.value(),
            actual = timing.actual.value(),
            expected = timing.expected.value(),
            triggered,
            "simulated move"
        );

        if self.realtime {
            thread::sleep(timing.actual.as_duration());
        }

        Ok(timing)
    }

    fn track(&mut self, direction: Sign, steps: u64) {
        let steps = steps as i64;
        self.position.move_steps(match direction {
            Sign::Positive => steps,
            Sign::Negative => -steps,
        });
    }
}

/// Advance the executor by at most `steps`; returns the steps executed.
fn run_steps(executor: &mut MotionExecutor, steps: u64) -> u64 {
    let mut executed = 0;
    while executed < steps && !executor.is_complete() {
        executor.advance();
        executed += 1;
    }
    executed
}

impl Motor for SimulatedMotor {
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
