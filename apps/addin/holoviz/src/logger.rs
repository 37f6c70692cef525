//! Logging for the holoviz add-in.
//!
//! Provides dual output (stdout with colors + file) with thread-safe initialization.
//! Panel server workers log through the same dispatch from their own threads.

use crate::error::AddinError;

use common::ErrorLocation;

use std::fmt::{Arguments, Display};
use std::io::stdout;
use std::panic::Location;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::current;
use std::time::SystemTime;

use fern::{Dispatch, FormatCallback};
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, Record, info, warn};

/// Thread-safe initialization guard.
static INIT_LOGGER_ONCE: Once = Once::new();

/// Tracks if logger initialization was already attempted.
static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

pub const LOG_FILE_NAME: &str = "holoviz.log";

const LOGGER_INITIALIZED_MESSAGE_PREFIX: &str = "Logger initialized with level: ";

const LOGGER_ALREADY_INITIALIZED_MESSAGE: &str = "Logger already initialized";

#[cfg(debug_assertions)]
const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

#[cfg(not(debug_assertions))]
const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Initialize the logger, writing to stdout and `{log_dir}/holoviz.log`.
///
/// Safe to call more than once: later calls log a warning and return Ok.
///
/// # Errors
///
/// Returns [`AddinError::Addin`] if the log file cannot be created or another
/// logger is already installed in the process.
pub fn initialize(log_dir: &Path) -> Result<(), AddinError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("{LOGGER_ALREADY_INITIALIZED_MESSAGE}");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = initialize_internal(log_dir);
        if result.is_ok() {
            info!("{LOGGER_INITIALIZED_MESSAGE_PREFIX}{LOG_LEVEL:?}");
        }
    });

    result
}

#[track_caller]
fn initialize_internal(log_dir: &Path) -> Result<(), AddinError> {
    let log_file_path = log_dir.join(LOG_FILE_NAME);

    let colors = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    let log_file = fern::log_file(&log_file_path).map_err(|e| AddinError::Addin {
        message: format!("Failed to create log file {}: {e}", log_file_path.display()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    Dispatch::new()
        .level(LOG_LEVEL)
        .chain(
            Dispatch::new()
                .format(move |out, message, record| {
                    write_line(out, colors.color(record.level()), message, record)
                })
                .chain(stdout()),
        )
        .chain(
            Dispatch::new()
                .format(|out, message, record| write_line(out, record.level(), message, record))
                .chain(log_file),
        )
        .apply()
        .map_err(|e| AddinError::Addin {
            message: format!("Failed to initialize logger: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(())
}

/// `[time - LEVEL] [thread] message [file:line]`
///
/// The thread name tells panel server workers apart from the host's thread.
fn write_line(
    out: FormatCallback<'_>,
    level: impl Display,
    message: &Arguments<'_>,
    record: &Record<'_>,
) {
    let thread = current();
    out.finish(format_args!(
        "[{} - {}] [{}] {} [{}:{}]",
        format_rfc3339(SystemTime::now()),
        level,
        thread.name().unwrap_or("unnamed"),
        message,
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
    ))
}
