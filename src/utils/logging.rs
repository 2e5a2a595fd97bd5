use std::path::Path;

use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;

use crate::errors::{AppError, AppResult};

pub const LOG_PREFIX: &str = "rtimeclock";

/// Route `tracing` events to a daily rolling file in `log_dir`.
///
/// The level comes from `log_level`, then `RUST_LOG`, then `info`. Terminal
/// output stays reserved for user-facing messages.
pub fn enable_logging(log_dir: &Path, log_level: Option<LevelFilter>) -> AppResult<()> {
    std::fs::create_dir_all(log_dir)?;

    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(7)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| AppError::Other(format!("cannot open log directory: {e}")))?;

    let level = log_level
        .map(|v| v.to_string())
        .unwrap_or_else(|| std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()));

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(format!(
            "{}={level}",
            env!("CARGO_PKG_NAME").replace("-", "_"),
        )))
        .with_ansi(false)
        .with_writer(appender)
        .try_init()
        .map_err(|e| AppError::Other(format!("cannot install logger: {e}")))
}
