//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Resolve the environment name from `--env` or `APP_ENV`.
//!
//! Non-responsibilities:
//! - Does not resolve values (see `dispatch` module).

use clap::{ArgAction, Parser, Subcommand};
use envp::constants::DEFAULT_LOG_LEVEL_VAR;

#[derive(Parser)]
#[command(name = "envp")]
#[command(about = "Resolve validated configuration values from the environment and .env files", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  envp --env production int PORT --min 1 --max 65535 --default 8080\n  envp one-of MODE --allowed dev,prod --default dev\n  envp password DB_PASSWORD\n  envp --env test files\n"
)]
pub struct Cli {
    /// Environment name selecting which .env files to load (default: development)
    #[arg(short, long = "env", global = true, env = "APP_ENV")]
    pub environment: Option<String>,

    /// Variable holding the log level (none, fatal, panic, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = DEFAULT_LOG_LEVEL_VAR)]
    pub log_level_var: String,

    /// Do not load any .env files
    #[arg(long, global = true)]
    pub no_dotenv: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn environment(&self) -> &str {
        self.environment.as_deref().unwrap_or_default()
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Print a string value
    Get {
        key: String,
        #[arg(long, default_value = "")]
        default: String,
    },

    /// Print a secret value; only its last two characters are logged
    Password {
        key: String,
        #[arg(long, default_value = "")]
        default: String,
    },

    /// Print a value that must be one of the allowed values
    OneOf {
        key: String,
        /// Comma-separated allowed values (case-sensitive)
        #[arg(long, value_delimiter = ',', required = true)]
        allowed: Vec<String>,
        #[arg(long, default_value = "")]
        default: String,
    },

    /// Print an integer within [min, max]
    Int {
        key: String,
        #[arg(long, allow_hyphen_values = true)]
        min: i64,
        #[arg(long, allow_hyphen_values = true)]
        max: i64,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        default: i64,
    },

    /// Print a float within [min, max]
    Float {
        key: String,
        #[arg(long, allow_hyphen_values = true)]
        min: f64,
        #[arg(long, allow_hyphen_values = true)]
        max: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        default: f64,
    },

    /// Print a boolean (true/false/t/f/1/0)
    Bool {
        key: String,
        #[arg(long, default_value_t = false, action = ArgAction::Set)]
        default: bool,
    },

    /// Print the .env files that would be loaded, highest precedence first
    Files,
}
