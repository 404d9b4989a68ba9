//! Shared test utilities for envp CLI integration tests.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper are hermetic by default.
//! - Variables the CLI reads implicitly are cleared so the host cannot leak in.

use assert_cmd::Command;

/// Returns a hermetic `envp` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `APP_ENV` and `LOG_LEVEL` are cleared.
pub fn envp_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envp");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    cmd.env_remove("APP_ENV").env_remove("LOG_LEVEL");

    cmd
}

/// Returns a command that loads `.env*` files from `dir`.
#[allow(dead_code)]
pub fn envp_cmd_in(dir: &std::path::Path) -> Command {
    let mut cmd = envp_cmd();
    cmd.current_dir(dir);
    cmd.env_remove("DOTENV_DISABLED");
    cmd
}
