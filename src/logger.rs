//! log4rs setup: an application log and a separate audit log.
//!
//! Request audit lines (target `patient_visits::audit`) are routed to
//! `audit.log` only; everything else goes to `app.log` and, for the server,
//! to stderr as well.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::errors::ServiceError;
use crate::query::telemetry::AUDIT_TARGET;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const ROLL_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const DEFAULT_RETENTION: usize = 7;

fn log_err(e: impl std::fmt::Display) -> ServiceError {
    ServiceError::Logging(e.to_string())
}

/// Map a level name to a filter; unknown names fall back to `info`.
#[must_use]
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    match level.unwrap_or("info").to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn rolling(base: &Path, stem: &str, keep: u32) -> Result<RollingFileAppender, ServiceError> {
    let roller = FixedWindowRoller::builder()
        .build(&format!("{}", base.join(format!("{stem}.{{}}.log")).display()), keep)
        .map_err(log_err)?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE_BYTES)), Box::new(roller));
    RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(base.join(format!("{stem}.log")), Box::new(policy))
        .map_err(log_err)
}

/// Build (without installing) the logging configuration.
///
/// # Errors
/// Returns an error if the log directory or appenders cannot be created.
pub fn build_config(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<usize>,
    console: bool,
) -> Result<Config, ServiceError> {
    let base = dir.map_or_else(|| PathBuf::from("."), PathBuf::from);
    std::fs::create_dir_all(&base)?;
    let keep = u32::try_from(retention.unwrap_or(DEFAULT_RETENTION)).unwrap_or(u32::MAX);
    let lvl = parse_level(level);

    let mut builder = Config::builder()
        .appender(Appender::builder().build("app", Box::new(rolling(&base, "app", keep)?)))
        .appender(Appender::builder().build("audit", Box::new(rolling(&base, "audit", keep)?)))
        .logger(Logger::builder().appender("audit").additive(false).build(AUDIT_TARGET, lvl));
    let mut root = Root::builder().appender("app");
    if console {
        let stderr = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .target(Target::Stderr)
            .build();
        builder = builder.appender(Appender::builder().build("console", Box::new(stderr)));
        root = root.appender("console");
    }
    builder.build(root.build(lvl)).map_err(log_err)
}

/// Install logging for the process.
///
/// # Errors
/// Returns an error if the configuration cannot be built or a logger is already installed.
pub fn configure_logging(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<usize>,
    console: bool,
) -> Result<(), ServiceError> {
    let config = build_config(dir, level, retention, console)?;
    log4rs::init_config(config).map_err(log_err)?;
    Ok(())
}

/// Initializes the logging system from a log4rs YAML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn init_path(path: &Path) -> Result<(), ServiceError> {
    log4rs::init_file(path, log4rs::config::Deserializers::default()).map_err(log_err)
}

/// Set up logging from the resolved configuration.
///
/// # Errors
/// Returns an error if logging cannot be installed.
pub fn configure_from(cfg: &AppConfig, console: bool) -> Result<(), ServiceError> {
    match &cfg.log_config {
        Some(path) => init_path(path),
        None => configure_logging(
            cfg.log_dir.as_deref(),
            cfg.log_level.as_deref(),
            cfg.log_retention,
            console,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names() {
        assert_eq!(parse_level(None), LevelFilter::Info);
        assert_eq!(parse_level(Some("DEBUG")), LevelFilter::Debug);
        assert_eq!(parse_level(Some("warn")), LevelFilter::Warn);
        assert_eq!(parse_level(Some("verbose")), LevelFilter::Info);
    }

    #[test]
    fn builds_app_and_audit_files() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        let config = build_config(Some(&logs), Some("debug"), Some(3), true).unwrap();
        assert_eq!(config.appenders().len(), 3);
        assert!(logs.join("app.log").exists());
        assert!(logs.join("audit.log").exists());
    }
}
