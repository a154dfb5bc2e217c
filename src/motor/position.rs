//! Position tracking for stepper axes.
//!
//! Absolute position in steps relative to the home switch, with mm conversions.

use crate::config::units::{Millimeters, Steps};

/// Axis position tracker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Position {
    /// Current position in steps (from the homed origin)
    steps: Steps,
    /// Steps per millimetre for conversions
    steps_per_mm: f32,
    /// Whether the origin has been established by homing
    homed: bool,
}

impl Position {
    /// Create an unhomed position tracker.
    #[inline]
    pub fn new(steps_per_mm: f32) -> Self {
        Self {
            steps: Steps::default(),
            steps_per_mm,
            homed: false,
        }
    }

    /// Get current position in steps.
    #[inline]
    pub fn steps(&self) -> Steps {
        self.steps
    }

    /// Get current position in millimetres.
    #[inline]
    pub fn mm(&self) -> Millimeters {
        self.steps.to_mm(self.steps_per_mm)
    }

    /// Whether the origin has been set by homing.
    #[inline]
    pub fn is_homed(&self) -> bool {
        self.homed
    }

    /// Move by a signed number of steps.
    #[inline]
    pub fn move_steps(&mut self, delta: i64) {
        self.steps = Steps(self.steps.0 + delta);
    }

    /// Set current position as the homed origin.
    #[inline]
    pub fn set_origin(&mut self) {
        self.steps = Steps::default();
        self.homed = true;
    }
}
