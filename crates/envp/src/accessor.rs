//! Typed accessors over an environment source.
//!
//! Responsibilities:
//! - Resolve a key to a string, password, allowed value, float, integer or bool.
//! - Fall back to the caller's default when the key is absent, with a warning.
//! - Log every resolved value, redacting passwords.
//! - Select the log level from the environment.
//!
//! Does NOT handle:
//! - Terminating the process on invalid values (see fatal.rs).
//! - Writing to the environment (see dotenv.rs).
//!
//! Invariants:
//! - The default is returned only when the key is absent; a present but invalid
//!   value is always an error.
//! - Defaults are not validated against the requested constraints.
//! - Range bounds are inclusive.

use std::fmt::Display;
use std::str::FromStr;

use secrecy::SecretString;

use crate::constants::{
    DEFAULT_LOG_LEVEL, REDACTION_MASK, REDACTION_MIN_LEN, REDACTION_VISIBLE_CHARS,
};
use crate::error::ConfigError;
use crate::level::LogLevel;
use crate::logging::LogSink;
use crate::source::EnvSource;

/// Resolves typed configuration values from `S`, logging through `L`.
#[derive(Debug, Clone)]
pub struct EnvReader<S, L> {
    source: S,
    sink: L,
}

impl<S: EnvSource, L: LogSink> EnvReader<S, L> {
    pub fn new(source: S, sink: L) -> Self {
        Self { source, sink }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &L {
        &self.sink
    }

    /// Read `key` as-is.
    pub fn string(&self, key: &str, default: &str) -> String {
        match self.source.lookup(key) {
            Some(value) => {
                self.sink.info(&format!("${key}={value:?}"));
                value
            }
            None => self.fallback(key, &format!("{default:?}"), default.to_string()),
        }
    }

    /// Read `key` as a secret, logging only its last two characters.
    pub fn password(&self, key: &str, default: &str) -> SecretString {
        match self.source.lookup(key) {
            Some(value) => {
                self.sink.info(&format!("${key}={:?}", redact(&value)));
                SecretString::new(value.into())
            }
            None => {
                let value = self.fallback(key, &format!("{default:?}"), default.to_string());
                SecretString::new(value.into())
            }
        }
    }

    /// Read `key`, which must exactly match one of `allowed`.
    pub fn string_from<A: AsRef<str>>(
        &self,
        key: &str,
        default: &str,
        allowed: &[A],
    ) -> Result<String, ConfigError> {
        let Some(value) = self.source.lookup(key) else {
            return Ok(self.fallback(key, &format!("{default:?}"), default.to_string()));
        };

        if allowed.iter().any(|candidate| candidate.as_ref() == value) {
            self.sink.info(&format!("${key}={value:?}"));
            Ok(value)
        } else {
            Err(ConfigError::NotAllowed {
                key: key.to_string(),
                value,
                allowed: allowed.iter().map(|a| a.as_ref().to_string()).collect(),
            })
        }
    }

    /// Read `key` as a 64-bit float within `[min, max]`.
    pub fn float(&self, key: &str, default: f64, min: f64, max: f64) -> Result<f64, ConfigError> {
        self.number(key, default, min, max)
    }

    /// Read `key` as a 64-bit signed integer within `[min, max]`.
    pub fn int(&self, key: &str, default: i64, min: i64, max: i64) -> Result<i64, ConfigError> {
        self.number(key, default, min, max)
    }

    /// Read `key` as a boolean (`true/false/t/f/1/0`, any case).
    pub fn bool(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        let Some(raw) = self.source.lookup(key) else {
            return Ok(self.fallback(key, &default.to_string(), default));
        };

        let value = parse_bool(&raw).ok_or_else(|| ConfigError::Parse {
            key: key.to_string(),
            value: raw.clone(),
            message: format!("invalid boolean {raw:?}"),
        })?;
        self.sink.info(&format!("${key}={value}"));
        Ok(value)
    }

    /// Set the sink's level from `key` (default `info`).
    ///
    /// Unknown values are reported as a warning and leave the level unchanged.
    /// Returns the level that was applied, if any.
    pub fn set_log_level(&self, key: &str) -> Option<LogLevel> {
        let raw = self.string(key, DEFAULT_LOG_LEVEL);
        match raw.parse::<LogLevel>() {
            Ok(level) => {
                self.sink.set_level(level);
                Some(level)
            }
            Err(_) => {
                self.sink.warn(&format!(
                    "loglevel of value={raw} does not exist. Leaving default."
                ));
                None
            }
        }
    }

    fn number<T>(&self, key: &str, default: T, min: T, max: T) -> Result<T, ConfigError>
    where
        T: FromStr + PartialOrd + Display,
        T::Err: Display,
    {
        let Some(raw) = self.source.lookup(key) else {
            return Ok(self.fallback(key, &default.to_string(), default));
        };

        let value: T = raw.parse().map_err(|e: T::Err| ConfigError::Parse {
            key: key.to_string(),
            value: raw.clone(),
            message: e.to_string(),
        })?;

        // NaN fails both comparisons and is rejected.
        if !(min <= value && value <= max) {
            return Err(ConfigError::OutOfRange {
                key: key.to_string(),
                value: value.to_string(),
                min: min.to_string(),
                max: max.to_string(),
            });
        }

        self.sink.info(&format!("${key}={value}"));
        Ok(value)
    }

    fn fallback<T>(&self, key: &str, shown: &str, default: T) -> T {
        self.sink.warn(&format!(
            "${key}={shown} (env var not found, using fallback)"
        ));
        default
    }
}

/// Mask a secret for logging: `****` plus its last two characters when it is
/// longer than three characters, otherwise just `****`.
pub fn redact(value: &str) -> String {
    let len = value.chars().count();
    if len > REDACTION_MIN_LEN {
        let tail: String = value.chars().skip(len - REDACTION_VISIBLE_CHARS).collect();
        format!("{REDACTION_MASK}{tail}")
    } else {
        REDACTION_MASK.to_string()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}
