//! Centralized constants for the envp workspace.
//!
//! Shared by the library and the CLI so that environment names, defaults and
//! exit statuses are defined in one place.

// =============================================================================
// Environment Names
// =============================================================================

/// Environment name used when the caller passes an empty name.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Environment name for which `.env.local` is never loaded.
///
/// Test runs must be reproducible across machines, so developer-local
/// overrides are skipped.
pub const TEST_ENVIRONMENT: &str = "test";

// =============================================================================
// Dotenv Files
// =============================================================================

/// Base dotenv file name; every candidate file is derived from it.
pub const DOTENV_FILE: &str = ".env";

/// Suffix marking developer-local, uncommitted dotenv files.
pub const LOCAL_SUFFIX: &str = "local";

/// Setting this variable to `1` or `true` disables dotenv hydration entirely.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";

// =============================================================================
// Logging
// =============================================================================

/// Level applied when the log-level variable is absent.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Conventional variable name for the log level.
pub const DEFAULT_LOG_LEVEL_VAR: &str = "LOG_LEVEL";

/// Prefix written in place of a password when logging it.
pub const REDACTION_MASK: &str = "****";

/// Number of trailing password characters revealed in logs.
pub const REDACTION_VISIBLE_CHARS: usize = 2;

/// Passwords this short or shorter are logged as the bare mask.
pub const REDACTION_MIN_LEN: usize = 3;

// =============================================================================
// Process
// =============================================================================

/// Exit status used when configuration is invalid.
pub const FATAL_EXIT_CODE: i32 = 1;
