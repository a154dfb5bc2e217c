//! Stopping the service that normally owns the motors.

use std::process::Command;

use tracing::{debug, info, warn};

/// Outcome of a service stop attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStop {
    /// No command configured.
    Disabled,
    /// The command ran and exited successfully.
    Stopped,
    /// The command could not be run or exited with an error.
    Failed,
}

/// Run `command` through `sh -c`, best effort.
///
/// The exit status is never fatal: a service that is already stopped makes
/// most init scripts exit non-zero. Failures are logged as warnings.
pub fn stop_service(command: &str) -> ServiceStop {
    let command = command.trim();
    if command.is_empty() {
        debug!("Service stop disabled");
        return ServiceStop::Disabled;
    }

    info!("Stopping conflicting service: {command}");
    match Command::new("sh").arg("-c").arg(command).status() {
        Ok(status) if status.success() => ServiceStop::Stopped,
        Ok(status) => {
            warn!("Service stop command '{command}' exited with {status}");
            ServiceStop::Failed
        }
        Err(e) => {
            warn!("Failed to run service stop command '{command}': {e}");
            ServiceStop::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_is_disabled() {
        assert_eq!(stop_service(""), ServiceStop::Disabled);
        assert_eq!(stop_service("   "), ServiceStop::Disabled);
    }

    #[test]
    fn test_successful_command() {
        assert_eq!(stop_service("true"), ServiceStop::Stopped);
    }

    #[test]
    fn test_failing_command_is_not_fatal() {
        assert_eq!(stop_service("exit 3"), ServiceStop::Failed);
    }
}
