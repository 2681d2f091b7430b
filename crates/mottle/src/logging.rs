#![forbid(unsafe_code)]

//! Subscriber setup.
//!
//! The filter comes from `MOTTLE_LOG` (EnvFilter syntax, default `warn`).
//! The viewer owns the terminal, so it only logs when `--log-file` is
//! given; export mode logs to stderr unless a file is given.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "MOTTLE_LOG";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    File(&'a Path),
    Stderr,
    Off,
}

/// Pick the log target for a run.
pub fn target<'a>(log_file: Option<&'a Path>, exporting: bool) -> LogTarget<'a> {
    match (log_file, exporting) {
        (Some(path), _) => LogTarget::File(path),
        (None, true) => LogTarget::Stderr,
        (None, false) => LogTarget::Off,
    }
}

/// Install the global subscriber. A subscriber that is already set is left
/// in place.
pub fn init(target: LogTarget<'_>) -> std::io::Result<()> {
    let filter = || EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    match target {
        LogTarget::Off => {}
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
        }
        LogTarget::File(path) => {
            let file = File::create(path)?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_selection() {
        let path = Path::new("run.log");
        assert_eq!(target(Some(path), false), LogTarget::File(path));
        assert_eq!(target(Some(path), true), LogTarget::File(path));
        assert_eq!(target(None, true), LogTarget::Stderr);
        assert_eq!(target(None, false), LogTarget::Off);
    }
}
