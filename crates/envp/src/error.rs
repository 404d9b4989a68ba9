//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for every way a present environment value can be invalid.
//! - Define error variants for dotenv hydration failures.
//!
//! Does NOT handle:
//! - Deciding whether an error terminates the process (see `fatal.rs`).
//!
//! Invariants:
//! - Validation errors carry the key and the raw value so the diagnostic is actionable.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while hydrating or reading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("${key}={value:?} | Error: {message}")]
    Parse {
        key: String,
        value: String,
        message: String,
    },

    #[error("${key}={value} | Error: Outside of range: {min} <= {value} <= {max}")]
    OutOfRange {
        key: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("${key}={value:?} | Error: Read env var value not allowed. Must be one of: {allowed:?}")]
    NotAllowed {
        key: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("Unknown log level: {0:?}")]
    UnknownLogLevel(String),

    /// Failed to parse a dotenv file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse {} at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading",
        .path.display()
    )]
    DotenvParse { path: PathBuf, error_index: usize },

    /// Failed to read a dotenv file due to an I/O error.
    #[error("Failed to read {}: {kind}", .path.display())]
    DotenvIo { path: PathBuf, kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load {}. Hint: set DOTENV_DISABLED=1 to skip .env loading", .path.display())]
    DotenvUnknown { path: PathBuf },

    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),
}

impl ConfigError {
    /// Map a dotenvy error for `path` without carrying over any file content.
    pub(crate) fn from_dotenv(path: PathBuf, err: dotenvy::Error) -> Self {
        match err {
            dotenvy::Error::LineParse(_, error_index) => {
                ConfigError::DotenvParse { path, error_index }
            }
            dotenvy::Error::Io(io_err) => ConfigError::DotenvIo {
                path,
                kind: io_err.kind(),
            },
            _ => ConfigError::DotenvUnknown { path },
        }
    }

    /// The environment key this error is about, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::Parse { key, .. }
            | ConfigError::OutOfRange { key, .. }
            | ConfigError::NotAllowed { key, .. } => Some(key.as_str()),
            _ => None,
        }
    }
}
