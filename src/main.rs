//! # bearing-wear
//!
//! Runs the accelerated wear test until interrupted.
//!
//! Startup: stop the service that normally owns the motors, home Z, S and W,
//! then cycle forever. Ctrl-C ends the run after the current cycle.

use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bearing_wear::{
    load_config, logging, service, Axis, ConfigError, CycleRunner, SimulatedMotor, TestConfig,
    TracingReporter,
};
use clap::Parser;
use tracing::{error, info};

/// Accelerated bearing wear test for the Z, W and S axes
#[derive(Parser, Debug)]
#[command(name = "bearing-wear")]
#[command(version)]
#[command(about = "Cycles the Z, W and S axes over their full stroke and logs wear statistics")]
struct Args {
    /// Initial cycle number.
    #[arg(long = "i", visible_alias = "initial-cycle", value_name = "N", default_value_t = 0)]
    initial_cycle: u64,

    /// TOML file overriding the built-in axis and run settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file to append to (overrides `run.log_file`).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Skip stopping the conflicting service.
    #[arg(long)]
    no_service_stop: bool,

    /// Run simulated moves without real-time pacing.
    #[arg(long)]
    fast: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("FATAL: {e}");
                process::exit(1);
            }
        },
        None => TestConfig::default(),
    };

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(|| config.run.log_file.clone());
    if let Err(e) = logging::init(&log_file, args.verbose) {
        eprintln!("FATAL: cannot log to {}: {e}", log_file.display());
        process::exit(1);
    }

    info!("bearing-wear v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args, config) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("bearing-wear shutdown complete");
}

fn run(args: &Args, config: TestConfig) -> Result<(), Box<dyn std::error::Error>> {
    if args.no_service_stop {
        info!("Service stop skipped");
    } else {
        service::stop_service(&config.run.service_stop_command);
    }

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    let motors = Axis::CONSTRUCTION_ORDER
        .iter()
        .map(|&axis| {
            let axis_config = config.axis(axis).ok_or(ConfigError::MissingAxis(axis))?;
            Ok(SimulatedMotor::new(axis, axis_config).with_realtime(!args.fast))
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    let mut runner = CycleRunner::new(config, motors, TracingReporter::new(), args.initial_cycle)?;

    runner.home_all()?;
    info!("All axes homed, starting at cycle {}", runner.cycle_number());

    let completed = runner.run(&running)?;
    info!(
        "Stopped after {} cycles, next cycle {}",
        completed,
        runner.cycle_number()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_cycle_defaults_to_zero() {
        let args = Args::try_parse_from(["bearing-wear"]).unwrap();
        assert_eq!(args.initial_cycle, 0);
        assert!(args.config.is_none());
        assert!(!args.fast);
    }

    #[test]
    fn test_initial_cycle_flag_and_alias() {
        let args = Args::try_parse_from(["bearing-wear", "--i", "5"]).unwrap();
        assert_eq!(args.initial_cycle, 5);

        let args = Args::try_parse_from(["bearing-wear", "--initial-cycle", "5"]).unwrap();
        assert_eq!(args.initial_cycle, 5);
    }

    #[test]
    fn test_negative_initial_cycle_rejected() {
        assert!(Args::try_parse_from(["bearing-wear", "--i", "-1"]).is_err());
    }
}
