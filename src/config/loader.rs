//! Configuration loading from files.

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Result};

use super::TestConfig;

/// Load configuration from a TOML file.
///
/// A file without an `[axes]` table keeps the built-in axes, and one without
/// `[run]` keeps the built-in run settings. An `[axes]` table replaces the
/// built-in axes as a whole, so it must configure Z, W and S.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use bearing_wear::load_config;
///
/// let config = load_config("/etc/bearing-wear.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TestConfig> {
    let content = fs::read_to_string(path.as_ref())
        .map_err(|e| ConfigError::IoError(format!("{}: {}", path.as_ref().display(), e)))?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<TestConfig> {
    let config: TestConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.message().to_string()))?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{Microsteps, Millimeters, Sign};
    use crate::config::Axis;
    use crate::error::Error;

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.axis_names().count(), 3);
        assert_eq!(config.run.overshoot, 1.5);
        assert_eq!(config.run.limit_switch.as_str(), "S");
    }

    #[test]
    fn test_parse_full_axes() {
        let toml = r#"
[axes.Z]
full_travel_distance_mm = 205.0
safe_mmps = 20.0
direction = 1
revolutions_per_mm = 0.25

[axes.W]
full_travel_distance_mm = 100.0
safe_mmps = 200.0
direction = -1
revolutions_per_mm = 0.027777777
microsteps = 8

[axes.S]
full_travel_distance_mm = 30.0
safe_mmps = 20.0
direction = -1
revolutions_per_mm = 0.026525
home_distance_mm = 120.0

[run]
retries = 2
service_stop_command = ""
"#;

        let config = parse_config(toml).unwrap();
        let z = config.axis(Axis::Z).unwrap();
        assert_eq!(z.full_travel_distance, Millimeters(205.0));
        assert_eq!(z.direction, Sign::Positive);
        assert_eq!(config.axis(Axis::W).unwrap().microsteps, Microsteps::EIGHTH);
        assert_eq!(config.axis(Axis::S).unwrap().home_move(), Millimeters(-120.0));
        assert_eq!(config.run.retries, 2);
        assert!(config.run.service_stop_command.is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_direction() {
        let toml = r#"
[axes.Z]
full_travel_distance_mm = 50.0
safe_mmps = 25.0
direction = 2
revolutions_per_mm = 0.25
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_partial_axes_fail_validation() {
        let toml = r#"
[axes.Z]
full_travel_distance_mm = 50.0
safe_mmps = 25.0
direction = 1
revolutions_per_mm = 0.25
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::MissingAxis(_)))
        ));
    }

    #[test]
    fn test_zero_revolutions_per_mm_rejected_at_load() {
        let toml = r#"
[axes.Z]
full_travel_distance_mm = 50.0
safe_mmps = 25.0
direction = 1
revolutions_per_mm = 0.0

[axes.W]
full_travel_distance_mm = 100.0
safe_mmps = 200.0
direction = -1
revolutions_per_mm = 0.027777777

[axes.S]
full_travel_distance_mm = 30.0
safe_mmps = 60.0
direction = -1
revolutions_per_mm = 0.026525
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::InvalidRevolutionsPerMm { axis: Axis::Z, .. }))
        ));
    }
}
