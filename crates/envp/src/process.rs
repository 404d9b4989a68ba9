//! Process-level entry points.
//!
//! Each function reads the real process environment, logs through the global
//! `tracing` sink, and terminates the process on invalid values. Use
//! `EnvReader` directly to get `Result`s instead.

use std::path::Path;

use secrecy::SecretString;

use crate::accessor::EnvReader;
use crate::dotenv::{HydrationReport, load_env_files_in};
use crate::fatal::OrExit;
use crate::level::LogLevel;
use crate::logging::{TracingSink, global_sink};
use crate::source::ProcessEnv;

fn process_reader() -> EnvReader<ProcessEnv, &'static TracingSink> {
    EnvReader::new(ProcessEnv, global_sink())
}

/// Hydrate the process environment from the `.env*` files in the working directory.
pub fn load_env_from_env_files(environment_name: &str) -> HydrationReport {
    load_env_files_in(Path::new("."), environment_name)
}

pub fn get_env_string(key: &str, default: &str) -> String {
    process_reader().string(key, default)
}

/// Like [`get_env_string`], but only the last two characters are logged.
pub fn get_env_password(key: &str, default: &str) -> SecretString {
    process_reader().password(key, default)
}

/// Exits the process if the value is not one of `allowed`.
pub fn get_env_string_from<A: AsRef<str>>(key: &str, default: &str, allowed: &[A]) -> String {
    let reader = process_reader();
    reader
        .string_from(key, default, allowed)
        .or_exit(reader.sink())
}

/// Exits the process if the value is not a float in `[min, max]`.
pub fn get_env_float(key: &str, default: f64, min: f64, max: f64) -> f64 {
    let reader = process_reader();
    reader.float(key, default, min, max).or_exit(reader.sink())
}

/// Exits the process if the value is not an integer in `[min, max]`.
pub fn get_env_int(key: &str, default: i64, min: i64, max: i64) -> i64 {
    let reader = process_reader();
    reader.int(key, default, min, max).or_exit(reader.sink())
}

/// Exits the process if the value is not a recognized boolean.
pub fn get_env_bool(key: &str, default: bool) -> bool {
    let reader = process_reader();
    reader.bool(key, default).or_exit(reader.sink())
}

/// Set the global log level from `key`; unknown values only warn.
pub fn set_log_level_from_env(key: &str) -> Option<LogLevel> {
    process_reader().set_log_level(key)
}
