//! The two-move endurance test run on every axis each cycle.

use crate::config::units::{Millimeters, MillimetersPerSec, Sign};
use crate::config::LimitSwitch;
use crate::error::MotorError;
use crate::motor::{Motor, MoveTiming};

/// Exercise one axis over its full stroke.
///
/// 1. Retract `distance` away from the limit switch, unwatched.
/// 2. Return `overshoot * distance` toward it, watching `limit`.
///
/// The overshoot guarantees the switch is reached, so the return move ends
/// on the switch. Only the return move's timing is reported; the retract
/// timing is discarded. Errors propagate unchanged.
pub fn full_scale_motor_test<M: Motor + ?Sized>(
    motor: &mut M,
    speed: MillimetersPerSec,
    distance: Millimeters,
    direction: Sign,
    limit: &LimitSwitch,
    overshoot: f32,
) -> Result<MoveTiming, MotorError> {
    motor.move_by(speed, -direction * distance, None)?;
    motor.move_by(speed, direction * distance * overshoot, Some(limit))
}
