//! Motor module for the wear test.
//!
//! [`Motor`] is the seam between the test loop and whatever moves the axes.
//! Two backends implement it: [`StepperAxis`], an embedded-hal 1.0 STEP/DIR
//! driver with an endstop input, and [`SimulatedMotor`], a software axis used
//! for dry runs and tests.

mod builder;
mod driver;
mod position;
mod simulated;

pub use builder::StepperAxisBuilder;
pub use driver::StepperAxis;
pub use position::Position;
pub use simulated::SimulatedMotor;

use crate::config::units::{Millimeters, MillimetersPerSec, Ticks};
use crate::config::{Axis, LimitSwitch};
use crate::error::MotorError;

/// Timing of one completed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveTiming {
    /// Duration of the steps actually executed.
    pub actual: Ticks,
    /// Duration of the full commanded move.
    pub expected: Ticks,
    /// Whether the watched limit switch ended the move.
    pub limit_triggered: bool,
}

/// A blocking motion collaborator for one axis.
pub trait Motor {
    /// Axis this motor drives.
    fn axis(&self) -> Axis;

    /// Drive toward the home switch by at most `distance` and set the origin there.
    ///
    /// # Errors
    ///
    /// `MotorError::HomingFailed` if the switch is never reached.
    fn home(&mut self, distance: Millimeters) -> Result<(), MotorError>;

    /// Move by a signed distance at `speed`.
    ///
    /// With `limit` set, the named switch is watched and ends the move early;
    /// a move that completes without triggering it fails with
    /// `MotorError::LimitNotReached`.
    fn move_by(
        &mut self,
        speed: MillimetersPerSec,
        distance: Millimeters,
        limit: Option<&LimitSwitch>,
    ) -> Result<MoveTiming, MotorError>;
}
