//! envp - resolve validated configuration values from the command line.
//!
//! Responsibilities:
//! - Hydrate the environment from `.env*` files for the selected environment.
//! - Apply the log level from the environment.
//! - Resolve one value and print it to stdout.
//!
//! Does NOT handle:
//! - Parsing or validation rules (see the `envp` library).
//!
//! Invariants:
//! - Logs go to stderr; stdout carries only the resolved value.
//! - Invalid configuration terminates with exit status 1 after logging the diagnostic.
//! - `.env` loading happens after CLI parsing because `--env` selects the files.

mod args;
mod dispatch;

use std::io::Write;

use anyhow::Context;
use args::Cli;
use clap::Parser;
use dispatch::run_command;
use envp::{EnvReader, LogLevel, OrExit, ProcessEnv, init_logging, load_env_from_env_files};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(envp::constants::FATAL_EXIT_CODE);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let sink = init_logging(LogLevel::default()).context("Failed to initialize logging")?;

    if !cli.no_dotenv {
        load_env_from_env_files(cli.environment());
    }

    let reader = EnvReader::new(ProcessEnv, sink);
    reader.set_log_level(&cli.log_level_var);

    let output = run_command(&cli.command, cli.environment(), &reader).or_exit(sink);

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}").context("Failed to write output")?;
    Ok(())
}
