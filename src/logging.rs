//! Logging setup

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use hello_xr_config::LoggingConfig;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILE: &str = "hello-xr.log";

/// Where log output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Pick the log target.
///
/// The interactive UI owns the terminal, so logs go to a file there even
/// when none is configured.
pub fn log_target(config: &LoggingConfig, interactive: bool) -> LogTarget {
    match &config.file {
        Some(path) => LogTarget::File(path.clone()),
        None if interactive => LogTarget::File(std::env::temp_dir().join(DEFAULT_LOG_FILE)),
        None => LogTarget::Stderr,
    }
}

/// Build the filter: `RUST_LOG` wins over the configured level
pub fn env_filter(level: &str) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).with_context(|| format!("Invalid log level '{}'", level)),
    }
}

fn open_log(path: &Path) -> anyhow::Result<std::fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Install the global subscriber
pub fn init(config: &LoggingConfig, interactive: bool) -> anyhow::Result<LogTarget> {
    let filter = env_filter(&config.level)?;
    let target = log_target(config, interactive);

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match &target {
        LogTarget::File(path) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(open_log(path)?))
            .try_init(),
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_log_target() {
        let mut config = LoggingConfig::default();
        assert_eq!(log_target(&config, false), LogTarget::Stderr);
        assert!(matches!(log_target(&config, true), LogTarget::File(p) if p.ends_with(DEFAULT_LOG_FILE)));

        config.file = Some(PathBuf::from("/tmp/custom.log"));
        assert_eq!(log_target(&config, false), LogTarget::File(PathBuf::from("/tmp/custom.log")));
    }

    #[test]
    #[serial]
    fn test_env_filter_rejects_bad_level() {
        std::env::remove_var("RUST_LOG");
        assert!(env_filter("info").is_ok());
        assert!(env_filter("hello_xr_app=debug,warn").is_ok());
        assert!(env_filter("not a level!!").is_err());
    }

    #[test]
    fn test_open_log_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.log");
        open_log(&path).unwrap();
        assert!(path.is_file());
    }
}
