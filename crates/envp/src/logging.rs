//! Log sinks for configuration resolution.
//!
//! Responsibilities:
//! - Define the `LogSink` capability the accessors log through.
//! - Provide the production sink backed by `tracing`, with a level that can be
//!   changed at runtime.
//! - Provide an in-memory sink for asserting on log output.
//!
//! Does NOT handle:
//! - Choosing the level from the environment (see accessor.rs).
//! - Formatting of resolved values (callers pass finished messages).
//!
//! Invariants:
//! - A sink only emits messages its current level enables.
//! - `init_logging()` installs the global subscriber at most once.
//! - `global_sink()` installs the stderr subscriber itself when no global
//!   subscriber exists, so process-level diagnostics are never dropped.

use std::io::IsTerminal;
use std::sync::{Mutex, OnceLock, PoisonError, RwLock};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{Registry, fmt, prelude::*, reload};

use crate::error::ConfigError;
use crate::level::LogLevel;

/// Leveled logger used by the accessors.
#[cfg_attr(test, mockall::automock)]
pub trait LogSink {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    /// Log an unrecoverable configuration error. Does not terminate.
    ///
    /// Level `none` suppresses this message too, even though the caller
    /// usually exits right after.
    fn fatal(&self, message: &str);
    fn set_level(&self, level: LogLevel);
    fn level(&self) -> LogLevel;
}

impl<T: LogSink + ?Sized> LogSink for &T {
    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn warn(&self, message: &str) {
        (**self).warn(message)
    }

    fn fatal(&self, message: &str) {
        (**self).fatal(message)
    }

    fn set_level(&self, level: LogLevel) {
        (**self).set_level(level)
    }

    fn level(&self) -> LogLevel {
        (**self).level()
    }
}

type LevelHandle = reload::Handle<LevelFilter, Registry>;

/// Sink that emits `tracing` events.
///
/// When created by [`init_logging`], changing the level also reconfigures the
/// global subscriber's filter, so libraries logging through `tracing` follow it.
pub struct TracingSink {
    handle: Option<LevelHandle>,
    level: RwLock<LogLevel>,
}

impl TracingSink {
    /// A sink that is not tied to an installed subscriber.
    ///
    /// Events go to whatever subscriber is current; `set_level` only changes
    /// what this sink emits.
    pub fn detached() -> Self {
        Self {
            handle: None,
            level: RwLock::new(LogLevel::default()),
        }
    }

    fn enabled(&self, severity: LogLevel) -> bool {
        self.level().enables(severity)
    }
}

impl std::fmt::Debug for TracingSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TracingSink")
            .field("level", &self.level())
            .field("reloadable", &self.handle.is_some())
            .finish()
    }
}

impl LogSink for TracingSink {
    fn info(&self, message: &str) {
        if self.enabled(LogLevel::Info) {
            tracing::info!("{message}");
        }
    }

    fn warn(&self, message: &str) {
        if self.enabled(LogLevel::Warn) {
            tracing::warn!("{message}");
        }
    }

    fn fatal(&self, message: &str) {
        if self.enabled(LogLevel::Fatal) {
            tracing::error!(fatal = true, "{message}");
        }
    }

    fn set_level(&self, level: LogLevel) {
        *self.level.write().unwrap_or_else(PoisonError::into_inner) = level;
        if let Some(handle) = &self.handle {
            if let Err(e) = handle.reload(level.to_level_filter()) {
                tracing::warn!(error = %e, "failed to reload log level filter");
            }
        }
    }

    fn level(&self) -> LogLevel {
        *self.level.read().unwrap_or_else(PoisonError::into_inner)
    }
}

static INSTALLED: OnceLock<TracingSink> = OnceLock::new();
static DETACHED: OnceLock<TracingSink> = OnceLock::new();

/// Install a stderr `fmt` subscriber with a reloadable level filter.
///
/// # Errors
///
/// Returns `ConfigError::LoggingInit` if a global subscriber is already set.
pub fn init_logging(initial: LogLevel) -> Result<&'static TracingSink, ConfigError> {
    let (filter, handle) = reload::Layer::new(initial.to_level_filter());
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .try_init()
        .map_err(|e| ConfigError::LoggingInit(e.to_string()))?;

    let sink = TracingSink {
        handle: Some(handle),
        level: RwLock::new(initial),
    };
    INSTALLED
        .set(sink)
        .map_err(|_| ConfigError::LoggingInit("logging already initialized".to_string()))?;
    INSTALLED
        .get()
        .ok_or_else(|| ConfigError::LoggingInit("logging sink missing".to_string()))
}

/// The process-wide sink.
///
/// Returns the sink installed by [`init_logging`]. If no global subscriber has
/// been set yet, installs one at the default level first. A detached sink is
/// returned only when some other subscriber already owns the process.
pub fn global_sink() -> &'static TracingSink {
    if let Some(sink) = INSTALLED.get() {
        return sink;
    }
    if !tracing::dispatcher::has_been_set() {
        if let Ok(sink) = init_logging(LogLevel::default()) {
            return sink;
        }
    }
    // Lost an install race, or a foreign subscriber is set.
    INSTALLED
        .get()
        .unwrap_or_else(|| DETACHED.get_or_init(TracingSink::detached))
}

/// Sink that records messages in memory.
#[derive(Debug)]
pub struct MemorySink {
    records: Mutex<Vec<(LogLevel, String)>>,
    level: Mutex<LogLevel>,
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySink {
    pub fn new() -> Self {
        Self::with_level(LogLevel::default())
    }

    pub fn with_level(level: LogLevel) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            level: Mutex::new(level),
        }
    }

    /// Every recorded message with its severity, oldest first.
    pub fn records(&self) -> Vec<(LogLevel, String)> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded messages of exactly `severity`.
    pub fn messages(&self, severity: LogLevel) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|(level, _)| *level == severity)
            .map(|(_, message)| message)
            .collect()
    }

    /// Whether any recorded message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.records()
            .iter()
            .any(|(_, message)| message.contains(needle))
    }

    fn record(&self, severity: LogLevel, message: &str) {
        if self.level().enables(severity) {
            self.records
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((severity, message.to_string()));
        }
    }
}

impl LogSink for MemorySink {
    fn info(&self, message: &str) {
        self.record(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.record(LogLevel::Warn, message);
    }

    fn fatal(&self, message: &str) {
        self.record(LogLevel::Fatal, message);
    }

    fn set_level(&self, level: LogLevel) {
        *self.level.lock().unwrap_or_else(PoisonError::into_inner) = level;
    }

    fn level(&self) -> LogLevel {
        *self.level.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_filters_by_level() {
        let sink = MemorySink::with_level(LogLevel::Warn);
        sink.info("hidden");
        sink.warn("shown");
        sink.fatal("also shown");

        assert_eq!(
            sink.records(),
            vec![
                (LogLevel::Warn, "shown".to_string()),
                (LogLevel::Fatal, "also shown".to_string()),
            ]
        );
        assert!(!sink.contains("hidden"));
    }

    #[test]
    fn test_memory_sink_none_records_nothing() {
        let sink = MemorySink::with_level(LogLevel::None);
        sink.fatal("boom");
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_memory_sink_set_level() {
        let sink = MemorySink::new();
        assert_eq!(sink.level(), LogLevel::Info);
        sink.set_level(LogLevel::Trace);
        assert_eq!(sink.level(), LogLevel::Trace);
        assert_eq!(sink.messages(LogLevel::Info), Vec::<String>::new());
    }

    #[test]
    fn test_detached_tracing_sink_tracks_level() {
        let sink = TracingSink::detached();
        assert_eq!(sink.level(), LogLevel::Info);
        sink.set_level(LogLevel::Error);
        assert_eq!(sink.level(), LogLevel::Error);
        assert!(!sink.enabled(LogLevel::Warn));
        assert!(sink.enabled(LogLevel::Fatal));
        // Events go to whichever subscriber is current, if any.
        sink.info("ignored");
        sink.fatal("emitted");
    }

    #[test]
    fn test_global_sink_is_backed_by_a_subscriber() {
        let _sink = global_sink();
        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn test_reference_forwards_to_sink() {
        let sink = MemorySink::new();
        let by_ref: &dyn LogSink = &sink;
        LogSink::warn(&by_ref, "through a reference");
        assert_eq!(sink.messages(LogLevel::Warn), vec!["through a reference"]);
    }
}
