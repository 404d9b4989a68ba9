//! Log verbosity levels selectable from the environment.
//!
//! Responsibilities:
//! - Parse the literal level names accepted in the log-level variable.
//! - Map each level onto a `tracing` level filter.
//!
//! Invariants:
//! - Levels are cumulative: each level enables everything the previous one does.
//! - Names are matched exactly (lowercase); anything else is unknown.

use std::fmt;
use std::str::FromStr;

use tracing::level_filters::LevelFilter;

use crate::error::ConfigError;

/// Verbosity, ordered from silent to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    None,
    Fatal,
    Panic,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// All levels from least to most verbose.
    pub const ALL: [LogLevel; 8] = [
        LogLevel::None,
        LogLevel::Fatal,
        LogLevel::Panic,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::None => "none",
            LogLevel::Fatal => "fatal",
            LogLevel::Panic => "panic",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Whether a message of `severity` is emitted at this level.
    ///
    /// `None` is not a message severity; it is never enabled.
    pub fn enables(self, severity: LogLevel) -> bool {
        severity != LogLevel::None && severity <= self
    }

    /// The closest `tracing` filter.
    ///
    /// `tracing` has no fatal or panic severity, so those collapse onto `ERROR`.
    pub const fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::None => LevelFilter::OFF,
            LogLevel::Fatal | LogLevel::Panic | LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownLogLevel(s.to_string()))
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        level.to_level_filter()
    }
}
