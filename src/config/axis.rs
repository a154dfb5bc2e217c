//! Axis identity and per-axis configuration.

use core::fmt;

use serde::Deserialize;

use super::units::{
    Microsteps, Millimeters, MillimetersPerSec, MillimetersPerSecSquared, Revolutions, Sign,
};

/// One of the three motor channels under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum Axis {
    /// Vertical dispense axis.
    Z,
    /// W axis.
    W,
    /// S axis.
    S,
}

impl Axis {
    /// Order in which motors are constructed and homed.
    pub const CONSTRUCTION_ORDER: [Axis; 3] = [Axis::Z, Axis::S, Axis::W];

    /// Order in which axes are exercised within a cycle.
    pub const CYCLE_ORDER: [Axis; 3] = [Axis::Z, Axis::S, Axis::W];

    /// Order of the fields in the aggregate revolution report.
    ///
    /// Differs from [`Axis::CYCLE_ORDER`]; the report reads from the stats map,
    /// never from the processing order.
    pub const REPORT_ORDER: [Axis; 3] = [Axis::Z, Axis::W, Axis::S];

    /// Single-letter axis name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Axis::Z => "Z",
            Axis::W => "W",
            Axis::S => "S",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static physical and motion parameters of one axis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AxisConfig {
    /// Nominal stroke exercised every cycle.
    #[serde(rename = "full_travel_distance_mm")]
    pub full_travel_distance: Millimeters,

    /// Speed used for every test move.
    #[serde(rename = "safe_mmps")]
    pub safe_speed: MillimetersPerSec,

    /// Which way is "toward the limit switch" (+1 or -1).
    pub direction: Sign,

    /// Motor shaft revolutions per millimetre of travel.
    pub revolutions_per_mm: f64,

    /// Distance commanded when homing, toward the limit switch.
    #[serde(default = "default_home_distance", rename = "home_distance_mm")]
    pub home_distance: Millimeters,

    /// Base steps per revolution (typically 200 for 1.8° motors).
    #[serde(default = "default_steps_per_revolution")]
    pub steps_per_revolution: u16,

    /// Microstep setting.
    #[serde(default)]
    pub microsteps: Microsteps,

    /// Acceleration used for the ramps of every move.
    #[serde(default = "default_max_acceleration", rename = "max_acceleration_mm_per_sec2")]
    pub max_acceleration: MillimetersPerSecSquared,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,
}

fn default_home_distance() -> Millimeters {
    Millimeters(250.0)
}

fn default_steps_per_revolution() -> u16 {
    200
}

fn default_max_acceleration() -> MillimetersPerSecSquared {
    MillimetersPerSecSquared(500.0)
}

impl AxisConfig {
    /// Create a configuration with the hardware fields at their defaults.
    pub fn new(
        full_travel_distance: Millimeters,
        safe_speed: MillimetersPerSec,
        direction: Sign,
        revolutions_per_mm: f64,
    ) -> Self {
        Self {
            full_travel_distance,
            safe_speed,
            direction,
            revolutions_per_mm,
            home_distance: default_home_distance(),
            steps_per_revolution: default_steps_per_revolution(),
            microsteps: Microsteps::default(),
            max_acceleration: default_max_acceleration(),
            invert_direction: false,
        }
    }

    /// Revolutions credited to the accumulator per completed test.
    ///
    /// Two nominal strokes (retract + return); the overshoot of the second
    /// move is deliberately not counted.
    pub fn revolutions_per_cycle(&self) -> Revolutions {
        Revolutions(2.0 * f64::from(self.full_travel_distance.0) * self.revolutions_per_mm)
    }

    /// Signed homing move: `direction * home_distance`.
    pub fn home_move(&self) -> Millimeters {
        self.direction * self.home_distance
    }

    /// Steps per millimetre of travel.
    pub fn steps_per_mm(&self) -> f32 {
        (f64::from(self.steps_per_revolution)
            * f64::from(self.microsteps.value())
            * self.revolutions_per_mm) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z_axis() -> AxisConfig {
        AxisConfig::new(Millimeters(50.0), MillimetersPerSec(25.0), Sign::Positive, 0.25)
    }

    #[test]
    fn test_revolutions_per_cycle() {
        assert_eq!(z_axis().revolutions_per_cycle(), Revolutions(25.0));
    }

    #[test]
    fn test_home_move_follows_direction() {
        let mut config = z_axis();
        assert_eq!(config.home_move(), Millimeters(250.0));

        config.direction = Sign::Negative;
        assert_eq!(config.home_move(), Millimeters(-250.0));
    }

    #[test]
    fn test_steps_per_mm() {
        // 200 * 16 * 0.25 = 800
        assert!((z_axis().steps_per_mm() - 800.0).abs() < 1e-3);
    }

    #[test]
    fn test_orders() {
        assert_eq!(Axis::CYCLE_ORDER, [Axis::Z, Axis::S, Axis::W]);
        assert_eq!(Axis::REPORT_ORDER, [Axis::Z, Axis::W, Axis::S]);
    }
}
