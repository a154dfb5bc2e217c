//! Per-axis revolution accumulator.

use heapless::FnvIndexMap;

use crate::config::units::Revolutions;
use crate::config::Axis;

/// Accumulated shaft revolutions per axis since process start.
///
/// Holds exactly the Z, W and S keys, all starting at zero. Counts only
/// grow and are never persisted.
#[derive(Debug, Clone)]
pub struct MotorStats {
    revolutions: FnvIndexMap<Axis, Revolutions, 4>,
}

impl MotorStats {
    /// Create a zeroed accumulator.
    pub fn new() -> Self {
        let mut revolutions = FnvIndexMap::new();
        for axis in Axis::REPORT_ORDER {
            // Capacity 4 holds all three axes.
            revolutions.insert(axis, Revolutions::ZERO).ok();
        }
        Self { revolutions }
    }

    /// Credit `delta` to `axis`.
    #[inline]
    pub fn record(&mut self, axis: Axis, delta: Revolutions) {
        if let Some(total) = self.revolutions.get_mut(&axis) {
            *total += delta;
        }
    }

    /// Revolutions accumulated by `axis`.
    #[inline]
    pub fn get(&self, axis: Axis) -> Revolutions {
        self.revolutions.get(&axis).copied().unwrap_or(Revolutions::ZERO)
    }

    /// Totals in report order (Z, W, S).
    pub fn iter(&self) -> impl Iterator<Item = (Axis, Revolutions)> + '_ {
        Axis::REPORT_ORDER.into_iter().map(|axis| (axis, self.get(axis)))
    }
}

impl Default for MotorStats {
    fn default() -> Self {
        Self::new()
    }
}
