use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors raised by the log viewer.
///
/// Only `FileNotYetPresent` and `EmptyOrUnparsable` are expected during normal
/// operation; both are retried before they become fatal. Everything else
/// propagates straight to `main`.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("no log file found at {path} after {timeout:?}")]
    FileNotYetPresent { path: PathBuf, timeout: Duration },

    #[error("log file {0} contains no readable data")]
    EmptyOrUnparsable(PathBuf),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("display error: {0}")]
    Gui(String),
}

pub type LogResult<T> = Result<T, LogError>;
