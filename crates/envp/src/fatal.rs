//! Fail-fast handling of invalid configuration.
//!
//! Accessors return `Result`; this module is the one place that turns an
//! error into process termination. The diagnostic goes to the log sink first.

use crate::constants::FATAL_EXIT_CODE;
use crate::error::ConfigError;
use crate::logging::LogSink;

/// Unwrap `result`, or log its error through `sink` and exit with status 1.
pub fn exit_on_error<T, L: LogSink + ?Sized>(result: Result<T, ConfigError>, sink: &L) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            sink.fatal(&err.to_string());
            std::process::exit(FATAL_EXIT_CODE)
        }
    }
}

/// Method form of [`exit_on_error`].
pub trait OrExit<T> {
    fn or_exit<L: LogSink + ?Sized>(self, sink: &L) -> T;
}

impl<T> OrExit<T> for Result<T, ConfigError> {
    fn or_exit<L: LogSink + ?Sized>(self, sink: &L) -> T {
        exit_on_error(self, sink)
    }
}
