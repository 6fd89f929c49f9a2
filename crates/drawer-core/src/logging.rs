//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable that overrides the log filter
pub const LOG_ENV_VAR: &str = "DRAWER_LOG";

const DEFAULT_FILTER: &str =
    "app_drawer=info,drawer_core=info,drawer_probe=info,drawer_app=info,warn";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/app-drawer/logs/`, never to the
/// terminal: the terminal belongs to the fuzzy selector while it runs.
/// Log level is controlled by the `DRAWER_LOG` environment variable.
///
/// # Examples
/// ```bash
/// DRAWER_LOG=debug drawer
/// DRAWER_LOG=drawer_probe=trace drawer --list
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "drawer.log");

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("App Drawer starting (pid {})", std::process::id());
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("app-drawer").join("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_lives_under_app_directory() {
        let dir = get_log_directory().unwrap();
        assert!(dir.ends_with("app-drawer/logs"));
    }

    #[test]
    fn test_default_filter_parses() {
        let _ = EnvFilter::new(DEFAULT_FILTER);
        assert!(DEFAULT_FILTER.contains("drawer_probe=info"));
    }
}
