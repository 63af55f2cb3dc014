//! File logging for terminal apps.
//!
//! A full-screen UI owns stdout, so log lines go to a file instead. The
//! subscriber is only installed when [`LOG_PATH_ENV`] names a file; the
//! filter comes from `RUST_LOG` and defaults to `info`.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log file path.
pub const LOG_PATH_ENV: &str = "FIELDCRAFT_LOG";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("could not open log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not install log subscriber: {0}")]
    Subscriber(String),
}

/// Open `path` for appending, creating it if needed.
///
/// ```no_run
/// use fieldcraft::logging::log_to_file;
/// use std::io::Write;
///
/// let mut f = log_to_file("debug.log").unwrap();
/// writeln!(f, "debug message").unwrap();
/// ```
pub fn log_to_file(path: impl AsRef<Path>) -> Result<File, std::io::Error> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}

/// Install a `tracing` subscriber that writes to `path`.
pub fn init_file_logging(path: impl AsRef<Path>) -> Result<(), LoggingError> {
    let file = log_to_file(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| LoggingError::Subscriber(err.to_string()))
}

/// Install file logging if [`LOG_PATH_ENV`] is set.
///
/// Returns whether a subscriber was installed.
pub fn init_from_env() -> Result<bool, LoggingError> {
    match std::env::var_os(LOG_PATH_ENV) {
        Some(path) if !path.is_empty() => init_file_logging(path).map(|()| true),
        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn log_to_file_appends() {
        let path = std::env::temp_dir().join(format!("fieldcraft-log-{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        writeln!(log_to_file(&path).unwrap(), "first").unwrap();
        writeln!(log_to_file(&path).unwrap(), "second").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let path = std::env::temp_dir()
            .join("fieldcraft-no-such-dir")
            .join("x.log");
        let err = init_file_logging(path).unwrap_err();
        assert!(matches!(err, LoggingError::Io(_)));
    }
}
