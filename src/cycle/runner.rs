//! Cycle runner: homing, the per-axis tests, stats and reporting.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Local;
use heapless::FnvIndexMap;
use tracing::debug;

use crate::config::{validate_config, Axis, AxisConfig, TestConfig};
use crate::error::{ConfigError, Result};
use crate::motor::{Motor, MoveTiming};

use super::axis_test::full_scale_motor_test;
use super::reporter::CycleReporter;
use super::stats::MotorStats;

/// Drives the wear test over the three axes.
///
/// Owns one motor per axis, the revolution accumulator and the cycle counter.
/// Everything runs sequentially on the caller's thread.
pub struct CycleRunner<M: Motor, R: CycleReporter> {
    config: TestConfig,
    motors: FnvIndexMap<Axis, M, 4>,
    reporter: R,
    stats: MotorStats,
    cycle_number: u64,
}

impl<M: Motor, R: CycleReporter> CycleRunner<M, R> {
    /// Create a runner starting at `initial_cycle`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid, or unless `motors` holds exactly
    /// one motor for each of Z, W and S.
    pub fn new(
        config: TestConfig,
        motors: impl IntoIterator<Item = M>,
        reporter: R,
        initial_cycle: u64,
    ) -> Result<Self> {
        validate_config(&config)?;

        let mut by_axis = FnvIndexMap::new();
        for motor in motors {
            let axis = motor.axis();
            if by_axis.contains_key(&axis) {
                return Err(ConfigError::DuplicateMotor(axis).into());
            }
            by_axis
                .insert(axis, motor)
                .map_err(|_| ConfigError::DuplicateMotor(axis))?;
        }

        for axis in Axis::CONSTRUCTION_ORDER {
            if !by_axis.contains_key(&axis) {
                return Err(ConfigError::MissingMotor(axis).into());
            }
        }

        Ok(Self {
            config,
            motors: by_axis,
            reporter,
            stats: MotorStats::new(),
            cycle_number: initial_cycle,
        })
    }

    /// Number of the next cycle to run.
    #[inline]
    pub fn cycle_number(&self) -> u64 {
        self.cycle_number
    }

    /// Revolutions accumulated so far.
    #[inline]
    pub fn stats(&self) -> &MotorStats {
        &self.stats
    }

    /// The reporting sink.
    #[inline]
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// The motor driving `axis`.
    pub fn motor(&self, axis: Axis) -> Option<&M> {
        self.motors.get(&axis)
    }

    /// Home every axis in construction order (Z, S, W).
    ///
    /// Each axis moves `direction * home_distance` toward its limit switch.
    pub fn home_all(&mut self) -> Result<()> {
        for axis in Axis::CONSTRUCTION_ORDER {
            let home = axis_config(&self.config, axis)?.home_move();
            debug!(axis = %axis, distance = home.value(), "homing");

            motor_for(&mut self.motors, axis)?.home(home)?;
            self.reporter.axis_homed(axis);
        }
        Ok(())
    }

    /// Run one full cycle over Z, S, W and advance the cycle counter.
    ///
    /// Stats are credited per axis as soon as its test succeeds; a failing
    /// axis aborts the cycle without advancing the counter.
    pub fn run_cycle(&mut self) -> Result<()> {
        self.reporter.cycle_started(self.cycle_number, Local::now());

        for axis in Axis::CYCLE_ORDER {
            let timing = self.test_axis(axis)?;
            let delta = axis_config(&self.config, axis)?.revolutions_per_cycle();
            self.stats.record(axis, delta);
            self.reporter.axis_tested(axis, &timing);
        }

        self.reporter.cycle_completed(self.cycle_number, &self.stats);
        self.cycle_number += 1;
        Ok(())
    }

    /// Run `count` cycles.
    pub fn run_cycles(&mut self, count: u64) -> Result<()> {
        for _ in 0..count {
            self.run_cycle()?;
        }
        Ok(())
    }

    /// Run cycles until `running` is cleared; returns the cycles completed.
    ///
    /// The flag is checked between cycles, so a cycle in progress always
    /// finishes.
    pub fn run(&mut self, running: &AtomicBool) -> Result<u64> {
        let mut completed = 0;
        while running.load(Ordering::SeqCst) {
            self.run_cycle()?;
            completed += 1;
        }
        Ok(completed)
    }

    /// Test one axis, re-homing and retrying per `run.retries`.
    fn test_axis(&mut self, axis: Axis) -> Result<MoveTiming> {
        let config = axis_config(&self.config, axis)?;
        let run = &self.config.run;
        let motor = motor_for(&mut self.motors, axis)?;

        let mut attempt = 0;
        loop {
            let result = full_scale_motor_test(
                motor,
                config.safe_speed,
                config.full_travel_distance,
                config.direction,
                &run.limit_switch,
                run.overshoot,
            );

            match result {
                Ok(timing) => return Ok(timing),
                Err(e) if attempt < run.retries => {
                    attempt += 1;
                    self.reporter.axis_retry(axis, attempt, &e);
                    motor.home(config.home_move())?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

fn axis_config(config: &TestConfig, axis: Axis) -> core::result::Result<&AxisConfig, ConfigError> {
    config.axis(axis).ok_or(ConfigError::MissingAxis(axis))
}

fn motor_for<M>(
    motors: &mut FnvIndexMap<Axis, M, 4>,
    axis: Axis,
) -> core::result::Result<&mut M, ConfigError> {
    motors.get_mut(&axis).ok_or(ConfigError::MissingMotor(axis))
}
