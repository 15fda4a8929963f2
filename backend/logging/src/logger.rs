//! Structured Logger
//!
//! Wraps `tracing` to provide console output, optional JSON file rotation
//! (NDJSON), and environment-based level control.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Base name of the rolling log file (`expertdesk.log.YYYY-MM-DD`).
pub const LOG_FILE_NAME: &str = "expertdesk.log";

/// Build the level filter. `RUST_LOG` wins over the configured level.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize the global structured logger.
///
/// Console output always goes to stderr so stdout stays clean for answers.
/// When `log_dir` is set, a daily-rolling JSON file is written there too.
pub fn init_logger(log_dir: Option<&Path>, level: &str) -> Result<()> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true);

    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
            let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_NAME);
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file_appender)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    // Already-initialized is not an error (tests, repeated init).
    let _ = tracing_subscriber::registry()
        .with(build_filter(level))
        .with(console_layer)
        .with(file_layer)
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_log_dir() {
        let dir = std::env::temp_dir().join(format!("expertdesk-log-{}", std::process::id()));
        init_logger(Some(&dir), "debug").unwrap();
        assert!(dir.is_dir());
        // A second init must not fail.
        init_logger(None, "info").unwrap();
        let _ = std::fs::remove_dir_all(&dir);
    }
}
