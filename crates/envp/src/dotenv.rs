//! Dotenv hydration of the process environment.
//!
//! Responsibilities:
//! - Compute the layered list of `.env*` files for an environment name.
//! - Load each file that exists without overriding variables already set.
//! - Enforce the `DOTENV_DISABLED` gate for hermetic test runs.
//!
//! Does NOT handle:
//! - Parsing the dotenv format (delegated to `dotenvy`).
//! - Reading typed values (see accessor.rs).
//!
//! Invariants / Assumptions:
//! - Earlier files win over later ones; the process environment wins over all files.
//! - Missing files are silently skipped.
//! - Malformed or unreadable files are reported and skipped; later files still load.
//! - Files are looked up in exactly one directory, never in its parents.
//! - Reported errors never contain line contents from the files.

use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_ENVIRONMENT, DOTENV_DISABLED_VAR, DOTENV_FILE, LOCAL_SUFFIX, TEST_ENVIRONMENT,
};
use crate::error::ConfigError;

/// Outcome of one hydration pass.
#[derive(Debug, Default)]
pub struct HydrationReport {
    /// Set when `DOTENV_DISABLED` suppressed loading.
    pub disabled: bool,
    /// Files that were loaded, in load order.
    pub loaded: Vec<PathBuf>,
    /// Files that exist but could not be loaded.
    pub failed: Vec<(PathBuf, ConfigError)>,
}

impl HydrationReport {
    /// True if no existing file failed to load.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// The dotenv files for `environment_name`, highest precedence first.
///
/// An empty name means `development`. `.env.local` is left out for `test`.
pub fn candidate_files(environment_name: &str) -> Vec<PathBuf> {
    let env = if environment_name.is_empty() {
        DEFAULT_ENVIRONMENT
    } else {
        environment_name
    };

    let mut files = vec![PathBuf::from(format!("{DOTENV_FILE}.{env}.{LOCAL_SUFFIX}"))];
    if env != TEST_ENVIRONMENT {
        files.push(PathBuf::from(format!("{DOTENV_FILE}.{LOCAL_SUFFIX}")));
    }
    files.push(PathBuf::from(format!("{DOTENV_FILE}.{env}")));
    files.push(PathBuf::from(DOTENV_FILE));
    files
}

/// Check if dotenv loading is disabled via environment variable.
pub fn dotenv_disabled() -> bool {
    matches!(
        std::env::var(DOTENV_DISABLED_VAR).ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// Load the candidate files for `environment_name` from `dir`.
///
/// Never fails: problems with individual files are logged and collected in
/// the returned report.
pub fn load_env_files_in(dir: impl AsRef<Path>, environment_name: &str) -> HydrationReport {
    let mut report = HydrationReport::default();
    if dotenv_disabled() {
        tracing::debug!("dotenv loading disabled via {DOTENV_DISABLED_VAR}");
        report.disabled = true;
        return report;
    }

    for file in candidate_files(environment_name) {
        let path = dir.as_ref().join(file);
        match dotenvy::from_path(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "loaded env file");
                report.loaded.push(path);
            }
            Err(e) if is_not_found(&e) => {
                tracing::trace!(path = %path.display(), "env file not present");
            }
            Err(e) => {
                let err = ConfigError::from_dotenv(path.clone(), e);
                tracing::warn!(error = %err, "skipping env file");
                report.failed.push((path, err));
            }
        }
    }

    report
}

fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}
