//! Motion profile calculation.
//!
//! Symmetric trapezoidal profiles in the step domain. The same profile gives
//! both the step intervals a driver sleeps for and the expected duration of a
//! move in ticks.

use crate::config::units::{Sign, Ticks};

/// Current phase of motion execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPhase {
    /// Accelerating from rest toward cruise velocity.
    Accelerating,
    /// Moving at constant cruise velocity.
    Cruising,
    /// Decelerating from cruise velocity to rest.
    Decelerating,
    /// Motion complete.
    Complete,
}

/// Computed motion profile for a move.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionProfile {
    /// Total steps to move (absolute value).
    pub total_steps: u32,

    /// Direction of motion.
    pub direction: Sign,

    /// Steps in acceleration phase.
    pub accel_steps: u32,

    /// Steps in cruise phase (constant velocity).
    pub cruise_steps: u32,

    /// Steps in deceleration phase.
    pub decel_steps: u32,

    /// Step interval (nanoseconds) at the start of acceleration.
    pub initial_interval_ns: u32,

    /// Step interval (nanoseconds) at cruise velocity.
    pub cruise_interval_ns: u32,
}

impl MotionProfile {
    /// Create a symmetric trapezoidal motion profile.
    ///
    /// # Arguments
    ///
    /// * `total_steps` - Signed step count (sign selects the direction)
    /// * `cruise_velocity` - Cruise velocity in steps/sec
    /// * `acceleration` - Ramp rate in steps/sec², used for both ramps
    pub fn trapezoidal(total_steps: i64, cruise_velocity: f32, acceleration: f32) -> Self {
        let direction = if total_steps < 0 { Sign::Negative } else { Sign::Positive };
        let steps = u32::try_from(total_steps.unsigned_abs()).unwrap_or(u32::MAX);

        if steps == 0 || cruise_velocity <= 0.0 || acceleration <= 0.0 {
            return Self::zero();
        }

        // Ramp length to reach cruise: d = v² / 2a
        let ramp_distance = cruise_velocity * cruise_velocity / (2.0 * acceleration);

        let (accel_steps, cruise_steps, decel_steps) = if 2.0 * ramp_distance >= steps as f32 {
            // Triangle profile: cruise velocity is never reached
            let accel_steps = steps / 2;
            (accel_steps, 0, steps - accel_steps)
        } else {
            let ramp_steps = ramp_distance as u32;
            (ramp_steps, steps - 2 * ramp_steps, ramp_steps)
        };

        // First step from rest, never slower than the cruise step
        let initial_velocity = (2.0 * acceleration).sqrt().min(cruise_velocity);
        let initial_interval_ns = (1_000_000_000.0 / initial_velocity) as u32;
        let cruise_interval_ns = (1_000_000_000.0 / cruise_velocity) as u32;

        Self {
            total_steps: steps,
            direction,
            accel_steps,
            cruise_steps,
            decel_steps,
            initial_interval_ns,
            cruise_interval_ns,
        }
    }

    /// Create a zero-length profile (no motion).
    pub fn zero() -> Self {
        Self {
            total_steps: 0,
            direction: Sign::Positive,
            accel_steps: 0,
            cruise_steps: 0,
            decel_steps: 0,
            initial_interval_ns: u32::MAX,
            cruise_interval_ns: u32::MAX,
        }
    }

    /// Check if this is a zero-length profile.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.total_steps == 0
    }

    /// Get the phase at a given step number.
    pub fn phase_at(&self, step: u32) -> MotionPhase {
        if step >= self.total_steps {
            MotionPhase::Complete
        } else if step < self.accel_steps {
            MotionPhase::Accelerating
        } else if step < self.accel_steps + self.cruise_steps {
            MotionPhase::Cruising
        } else {
            MotionPhase::Decelerating
        }
    }

    /// Step interval for a given step number.
    ///
    /// Ramps interpolate linearly between the initial and cruise intervals.
    pub fn interval_at(&self, step: u32) -> u32 {
        let slowest = self.initial_interval_ns as f32;
        let fastest = self.cruise_interval_ns as f32;

        match self.phase_at(step) {
            MotionPhase::Complete => u32::MAX,
            MotionPhase::Cruising => self.cruise_interval_ns,
            MotionPhase::Accelerating => {
                let progress = step as f32 / self.accel_steps.max(1) as f32;
                (slowest - (slowest - fastest) * progress) as u32
            }
            MotionPhase::Decelerating => {
                let decel_step = step - self.accel_steps - self.cruise_steps;
                let progress = (decel_step + 1) as f32 / self.decel_steps.max(1) as f32;
                (fastest + (slowest - fastest) * progress) as u32
            }
        }
    }

    /// Total commanded duration of the move in nanoseconds.
    pub fn duration_ns(&self) -> u64 {
        (0..self.total_steps)
            .map(|step| u64::from(self.interval_at(step)))
            .sum()
    }

    /// Total commanded duration of the move in ticks.
    pub fn duration_ticks(&self) -> Ticks {
        Ticks::from_nanos(self.duration_ns())
    }
}
