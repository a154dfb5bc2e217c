//! Motion execution - step sequencing and elapsed time accounting.

use crate::config::units::Ticks;

use super::profile::{MotionPhase, MotionProfile};

/// Runtime state during motion execution.
///
/// Every executed step is charged its profile interval, so a move that runs
/// to completion reports exactly [`MotionProfile::duration_ticks`].
#[derive(Debug, Clone)]
pub struct MotionExecutor {
    /// The computed profile being executed.
    profile: MotionProfile,

    /// Steps executed so far.
    current_step: u32,

    /// Interval (ns) charged for the next step.
    current_interval_ns: u32,

    /// Current phase of motion.
    phase: MotionPhase,

    /// Sum of the intervals of all executed steps.
    elapsed_ns: u64,
}

impl MotionExecutor {
    /// Create a new executor for a motion profile.
    pub fn new(profile: MotionProfile) -> Self {
        let phase = profile.phase_at(0);
        let current_interval_ns = profile.interval_at(0);

        Self {
            profile,
            current_step: 0,
            current_interval_ns,
            phase,
            elapsed_ns: 0,
        }
    }

    /// Check if motion is complete.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.phase == MotionPhase::Complete
    }

    /// Get the number of executed steps.
    #[inline]
    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    /// Get steps remaining.
    #[inline]
    pub fn steps_remaining(&self) -> u32 {
        self.profile.total_steps.saturating_sub(self.current_step)
    }

    /// Get the current phase.
    #[inline]
    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// Interval (ns) of the step about to be executed.
    #[inline]
    pub fn current_interval_ns(&self) -> u32 {
        self.current_interval_ns
    }

    /// Time spent on the executed steps.
    #[inline]
    pub fn elapsed_ticks(&self) -> Ticks {
        Ticks::from_nanos(self.elapsed_ns)
    }

    /// Account for one executed step.
    ///
    /// Returns `true` while further steps remain.
    pub fn advance(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }

        self.elapsed_ns += u64::from(self.current_interval_ns);
        self.current_step += 1;
        self.phase = self.profile.phase_at(self.current_step);
        self.current_interval_ns = self.profile.interval_at(self.current_step);

        !self.is_complete()
    }
}
