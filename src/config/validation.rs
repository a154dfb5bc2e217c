//! Configuration validation.

use crate::error::{ConfigError, Result};

use super::{Axis, AxisConfig, TestConfig};

/// Validate a test configuration.
///
/// Checks:
/// - Every axis of the fixed Z/W/S set is configured
/// - Travel distance, safe speed, revolutions per mm, home distance and
///   acceleration are positive
/// - The overshoot factor is at least 1
pub fn validate_config(config: &TestConfig) -> Result<()> {
    for axis in Axis::REPORT_ORDER {
        let axis_config = config.axis(axis).ok_or(ConfigError::MissingAxis(axis))?;
        validate_axis(axis, axis_config)?;
    }

    // NaN fails this check as well
    if !(config.run.overshoot >= 1.0) {
        return Err(ConfigError::InvalidOvershoot(config.run.overshoot).into());
    }

    Ok(())
}

fn validate_axis(axis: Axis, config: &AxisConfig) -> Result<()> {
    let travel = config.full_travel_distance.value();
    if !(travel > 0.0) {
        return Err(ConfigError::InvalidTravelDistance { axis, value: travel }.into());
    }

    let speed = config.safe_speed.value();
    if !(speed > 0.0) {
        return Err(ConfigError::InvalidSafeSpeed { axis, value: speed }.into());
    }

    // Also the mm-to-steps ratio: zero would turn every move into a no-op
    if !(config.revolutions_per_mm > 0.0) {
        return Err(ConfigError::InvalidRevolutionsPerMm {
            axis,
            value: config.revolutions_per_mm,
        }
        .into());
    }

    let home = config.home_distance.value();
    if !(home > 0.0) {
        return Err(ConfigError::InvalidHomeDistance { axis, value: home }.into());
    }

    let accel = config.max_acceleration.value();
    if !(accel > 0.0) {
        return Err(ConfigError::InvalidMaxAcceleration { axis, value: accel }.into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{Millimeters, MillimetersPerSec, MillimetersPerSecSquared};
    use crate::error::Error;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&TestConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_travel_distance() {
        let mut config = TestConfig::default();
        config.axes.get_mut(&Axis::W).unwrap().full_travel_distance = Millimeters(0.0);

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidTravelDistance { axis: Axis::W, .. }))
        ));
    }

    #[test]
    fn test_invalid_safe_speed() {
        let mut config = TestConfig::default();
        config.axes.get_mut(&Axis::S).unwrap().safe_speed = MillimetersPerSec(-1.0);

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidSafeSpeed { axis: Axis::S, .. }))
        ));
    }

    #[test]
    fn test_nan_safe_speed_rejected() {
        let mut config = TestConfig::default();
        config.axes.get_mut(&Axis::Z).unwrap().safe_speed = MillimetersPerSec(f32::NAN);

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidSafeSpeed { axis: Axis::Z, .. }))
        ));
    }

    #[test]
    fn test_zero_revolutions_per_mm_rejected() {
        let mut config = TestConfig::default();
        config.axes.get_mut(&Axis::Z).unwrap().revolutions_per_mm = 0.0;

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidRevolutionsPerMm { axis: Axis::Z, .. }))
        ));
    }

    #[test]
    fn test_negative_revolutions_per_mm_rejected() {
        let mut config = TestConfig::default();
        config.axes.get_mut(&Axis::W).unwrap().revolutions_per_mm = -0.1;

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidRevolutionsPerMm { axis: Axis::W, .. }))
        ));
    }

    #[test]
    fn test_invalid_home_distance() {
        let mut config = TestConfig::default();
        config.axes.get_mut(&Axis::S).unwrap().home_distance = Millimeters(0.0);

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidHomeDistance { axis: Axis::S, .. }))
        ));
    }

    #[test]
    fn test_invalid_max_acceleration() {
        let mut config = TestConfig::default();
        config.axes.get_mut(&Axis::W).unwrap().max_acceleration =
            MillimetersPerSecSquared(f32::NAN);

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidMaxAcceleration { axis: Axis::W, .. }))
        ));
    }

    #[test]
    fn test_nan_overshoot_rejected() {
        let mut config = TestConfig::default();
        config.run.overshoot = f32::NAN;

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidOvershoot(_)))
        ));
    }

    #[test]
    fn test_missing_axis() {
        let mut config = TestConfig::default();
        config.axes.remove(&Axis::Z);

        assert_eq!(
            validate_config(&config),
            Err(Error::Config(ConfigError::MissingAxis(Axis::Z)))
        );
    }

    #[test]
    fn test_overshoot_below_one() {
        let mut config = TestConfig::default();
        config.run.overshoot = 0.9;

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::InvalidOvershoot(_)))
        ));
    }
}
