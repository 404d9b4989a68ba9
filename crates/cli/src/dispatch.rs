//! Command dispatch logic.
//!
//! Resolves the requested value and renders it for stdout. Errors are returned
//! to `main`, which decides to terminate.

use envp::{ConfigError, EnvReader, EnvSource, LogSink, candidate_files};
use secrecy::ExposeSecret;

use crate::args::Commands;

pub fn run_command<S: EnvSource, L: LogSink>(
    command: &Commands,
    environment: &str,
    reader: &EnvReader<S, L>,
) -> Result<String, ConfigError> {
    let output = match command {
        Commands::Get { key, default } => reader.string(key, default),
        Commands::Password { key, default } => {
            reader.password(key, default).expose_secret().to_string()
        }
        Commands::OneOf {
            key,
            allowed,
            default,
        } => reader.string_from(key, default, allowed)?,
        Commands::Int {
            key,
            min,
            max,
            default,
        } => reader.int(key, *default, *min, *max)?.to_string(),
        Commands::Float {
            key,
            min,
            max,
            default,
        } => reader.float(key, *default, *min, *max)?.to_string(),
        Commands::Bool { key, default } => reader.bool(key, *default)?.to_string(),
        Commands::Files => candidate_files(environment)
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use envp::{MapSource, MemorySink};

    fn reader(vars: &[(&str, &str)]) -> EnvReader<MapSource, MemorySink> {
        EnvReader::new(vars.iter().copied().collect(), MemorySink::new())
    }

    #[test]
    fn test_renders_each_type() {
        let r = reader(&[("S", "text"), ("I", "42"), ("F", "0.5"), ("B", "T"), ("P", "pw1234")]);

        let get = Commands::Get {
            key: "S".into(),
            default: String::new(),
        };
        assert_eq!(run_command(&get, "", &r).unwrap(), "text");

        let int = Commands::Int {
            key: "I".into(),
            min: 0,
            max: 100,
            default: 0,
        };
        assert_eq!(run_command(&int, "", &r).unwrap(), "42");

        let float = Commands::Float {
            key: "F".into(),
            min: 0.0,
            max: 1.0,
            default: 0.0,
        };
        assert_eq!(run_command(&float, "", &r).unwrap(), "0.5");

        let boolean = Commands::Bool {
            key: "B".into(),
            default: false,
        };
        assert_eq!(run_command(&boolean, "", &r).unwrap(), "true");

        let password = Commands::Password {
            key: "P".into(),
            default: String::new(),
        };
        assert_eq!(run_command(&password, "", &r).unwrap(), "pw1234");
        assert!(!r.sink().contains("pw1234"));
    }

    #[test]
    fn test_propagates_validation_error() {
        let r = reader(&[("MODE", "qa")]);
        let cmd = Commands::OneOf {
            key: "MODE".into(),
            allowed: vec!["dev".into(), "prod".into()],
            default: "dev".into(),
        };
        assert!(matches!(
            run_command(&cmd, "", &r),
            Err(ConfigError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_files_lists_candidates() {
        let r = reader(&[]);
        assert_eq!(
            run_command(&Commands::Files, "test", &r).unwrap(),
            ".env.test.local\n.env.test\n.env"
        );
    }
}
