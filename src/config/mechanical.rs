//! Mechanical constraints derived from axis configuration.

use super::axis::AxisConfig;
use super::units::{Millimeters, Steps};

/// Derived step-domain parameters of an axis.
///
/// Computed once when a motor backend is built and used for all motion planning.
#[derive(Debug, Clone, PartialEq)]
pub struct MechanicalConstraints {
    /// Microstepped steps per motor revolution.
    pub steps_per_revolution: u32,

    /// Steps per millimetre of travel.
    pub steps_per_mm: f32,

    /// Ramp acceleration in steps per second squared.
    pub acceleration_steps_per_sec2: f32,
}

impl MechanicalConstraints {
    /// Compute mechanical constraints from axis configuration.
    pub fn from_config(config: &AxisConfig) -> Self {
        let steps_per_revolution =
            u32::from(config.steps_per_revolution) * u32::from(config.microsteps.value());
        let steps_per_mm = config.steps_per_mm();

        Self {
            steps_per_revolution,
            steps_per_mm,
            acceleration_steps_per_sec2: config.max_acceleration.value() * steps_per_mm,
        }
    }

    /// Convert millimetres to signed steps.
    #[inline]
    pub fn mm_to_steps(&self, mm: Millimeters) -> Steps {
        Steps::from_mm(mm, self.steps_per_mm)
    }

    /// Convert steps to millimetres.
    #[inline]
    pub fn steps_to_mm(&self, steps: Steps) -> Millimeters {
        steps.to_mm(self.steps_per_mm)
    }

    /// Convert mm/s to steps/s.
    #[inline]
    pub fn speed_to_steps(&self, mm_per_sec: f32) -> f32 {
        mm_per_sec * self.steps_per_mm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{MillimetersPerSec, Sign};

    fn make_test_config() -> AxisConfig {
        // Z axis: 200 * 16 steps/rev, 0.25 rev/mm
        AxisConfig::new(Millimeters(50.0), MillimetersPerSec(25.0), Sign::Positive, 0.25)
    }

    #[test]
    fn test_steps_per_revolution() {
        let constraints = MechanicalConstraints::from_config(&make_test_config());
        assert_eq!(constraints.steps_per_revolution, 3200);
    }

    #[test]
    fn test_steps_per_mm() {
        let constraints = MechanicalConstraints::from_config(&make_test_config());
        // 3200 * 0.25 = 800
        assert!((constraints.steps_per_mm - 800.0).abs() < 0.01);
        assert_eq!(constraints.mm_to_steps(Millimeters(-50.0)), Steps(-40_000));
    }

    #[test]
    fn test_speed_conversion() {
        let constraints = MechanicalConstraints::from_config(&make_test_config());
        // 25 mm/s * 800 steps/mm = 20000 steps/s
        assert!((constraints.speed_to_steps(25.0) - 20_000.0).abs() < 1.0);
    }
}
