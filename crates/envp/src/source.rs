//! Sources of raw configuration text.
//!
//! Responsibilities:
//! - Abstract "lookup key → optional text" so accessors can run against the
//!   real process environment or an injected map.
//!
//! Does NOT handle:
//! - Parsing or validation (see accessor.rs).
//! - Writing variables; only dotenv hydration writes to the process environment.
//!
//! Invariants:
//! - A variable set to the empty string is present, not absent.
//! - Lookups never mutate the source.

use std::collections::BTreeMap;

/// Read-only lookup of configuration values by key.
pub trait EnvSource {
    /// Return the raw value for `key`, or `None` if it is not set.
    fn lookup(&self, key: &str) -> Option<String>;
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

/// The operating system environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        // Non-UTF-8 values are still "present"; keep them visible in lossy form
        // so validation reports them instead of silently using the default.
        std::env::var_os(key).map(|value| match value.into_string() {
            Ok(s) => s,
            Err(raw) => raw.to_string_lossy().into_owned(),
        })
    }
}

/// An in-memory snapshot of key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSource {
    vars: BTreeMap<String, String>,
}

impl MapSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a variable.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Add or replace a variable in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Remove a variable, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
