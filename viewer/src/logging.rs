//! Logging initialisation
//!
//! Structured logging through `tracing`: a human readable stdout layer, plus
//! a JSON-lines file layer when `CPF_LOG_DIR` is set.

use chrono::Local;
use cpf_common::{config::get_env, ViewerError, ViewerResult};
use std::{
    fs::{self, File, OpenOptions},
    io::{self, Error},
    path::{Path, PathBuf},
    sync::OnceLock,
};
use tracing_appender::{non_blocking, non_blocking::WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Log file base name (JSON Lines)
pub const LOG_FILE_BASE: &str = "cpf-viewer.jsonl";

const LOG_DIR_ENV: &str = "CPF_LOG_DIR";
const LOG_LEVEL_ENV: &str = "CPF_LOG_LEVEL";
const ALT_LEVEL_ENV: &str = "RUST_LOG";
const DEFAULT_LEVEL: &str = "info";

static LOGGER_GUARD: OnceLock<Result<LoggerGuard, io::Error>> = OnceLock::new();

struct LoggerGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialise logging. Safe to call more than once; only the first call
/// installs the subscriber, and its failure is reported by every call.
pub fn init() -> ViewerResult<()> {
    match LOGGER_GUARD.get_or_init(configure_logger) {
        Ok(_) => Ok(()),
        Err(err) => Err(ViewerError::Logging(err.to_string())),
    }
}

/// Directory for the JSON log file, if file logging is enabled.
pub fn log_dir() -> Option<PathBuf> {
    get_env(LOG_DIR_ENV).map(PathBuf::from)
}

/// Today's log file inside `dir`.
pub fn log_file_path(dir: &Path) -> PathBuf {
    let today = Local::now().format("%Y-%m-%d");
    dir.join(format!("{LOG_FILE_BASE}.{today}"))
}

/// Create `dir` if needed and open today's log file for appending.
fn open_log_file(dir: &Path) -> io::Result<(File, PathBuf)> {
    let with_path = |path: &Path, err: io::Error| {
        io::Error::new(err.kind(), format!("{}: {err}", path.display()))
    };

    fs::create_dir_all(dir).map_err(|err| with_path(dir, err))?;
    let log_path = log_file_path(dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|err| with_path(&log_path, err))?;
    Ok((file, log_path))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .or_else(|_| EnvFilter::try_from_env(ALT_LEVEL_ENV))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

fn configure_logger() -> io::Result<LoggerGuard> {
    let stdout_layer = fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false);

    let (file_layer, file_guard, log_path) = match log_dir() {
        Some(dir) => {
            let (file, log_path) = open_log_file(&dir)?;
            let (file_writer, file_guard) = non_blocking(file);

            let layer = fmt::layer()
                .json()
                .with_writer(file_writer)
                .with_current_span(false)
                .with_span_list(false)
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .boxed();
            (Some(layer), Some(file_guard), Some(log_path))
        }
        None => (None, None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(Error::other)?;

    match log_path {
        Some(path) => tracing::info!(path = %path.display(), "Logging initialized"),
        None => tracing::debug!("Logging initialized (stdout only)"),
    }

    Ok(LoggerGuard {
        _file_guard: file_guard,
    })
}
