//! Environment configuration helpers.
//!
//! This crate hydrates the process environment from layered `.env` files and
//! resolves typed configuration values from it, logging every resolution and
//! failing fast on invalid input.
//!
//! ```rust,no_run
//! use envp::{get_env_int, get_env_string, load_env_from_env_files, set_log_level_from_env};
//!
//! load_env_from_env_files("production");
//! set_log_level_from_env("LOG_LEVEL");
//! let host = get_env_string("HOST", "127.0.0.1");
//! let port = get_env_int("PORT", 8080, 1, 65535);
//! ```

pub mod accessor;
pub mod constants;
pub mod dotenv;
mod error;
pub mod fatal;
pub mod level;
pub mod logging;
mod process;
pub mod source;

pub use accessor::{EnvReader, redact};
pub use dotenv::{HydrationReport, candidate_files, load_env_files_in};
pub use error::ConfigError;
pub use fatal::{OrExit, exit_on_error};
pub use level::LogLevel;
pub use logging::{LogSink, MemorySink, TracingSink, global_sink, init_logging};
pub use process::{
    get_env_bool, get_env_float, get_env_int, get_env_password, get_env_string,
    get_env_string_from, load_env_from_env_files, set_log_level_from_env,
};
pub use source::{EnvSource, MapSource, ProcessEnv};
