//! File logging for the wear test.
//!
//! Every event becomes one line appended to the log file:
//!
//! ```text
//! 2024-05-01 09:30:00,123 bearing_wear INFO     Test iteration: 5
//! ```

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// `<timestamp> <target> <level> <message>` with the target padded to 12
/// and the level to 8 columns.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{} {:<12} {:<8} ",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            meta.target(),
            meta.level().to_string(),
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Build a subscriber appending to `path`, creating parent directories.
///
/// INFO and above by default, DEBUG with `verbose`; `RUST_LOG` adds
/// directives on top.
pub fn file_subscriber(path: &Path, verbose: bool) -> io::Result<impl Subscriber + Send + Sync> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .event_format(LineFormat)
        .finish())
}

/// Install the file subscriber as the global default.
pub fn init(path: &Path, verbose: bool) -> io::Result<()> {
    let subscriber = file_subscriber(path, verbose)?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, info, warn};

    #[test]
    fn test_lines_appended_in_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("wear.log");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "previous run\n").unwrap();

        let subscriber = file_subscriber(&path, false).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            info!(target: "bearing_wear", "Test iteration: {}", 5);
            warn!(target: "svc", "stop failed");
            debug!(target: "bearing_wear", "hidden");
        });

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "previous run");
        assert!(lines[1].ends_with(" bearing_wear INFO     Test iteration: 5"));
        assert!(lines[2].ends_with(" svc          WARN     stop failed"));
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("wear.log");

        let subscriber = file_subscriber(&path, true).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            debug!(target: "bearing_wear", "visible");
        });

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("DEBUG    visible"));
    }
}
