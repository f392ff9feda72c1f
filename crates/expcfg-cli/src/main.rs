use std::path::PathBuf;

use expcfg_core::{usage, Action, ArgError, Invocation, ParserSettings};
use tracing_subscriber::EnvFilter;

const SETTINGS_ENV: &str = "EXPCFG_SETTINGS";

/// What one command line prints and the status it exits with.
#[derive(Debug, Default, PartialEq, Eq)]
struct Outcome {
    stdout: String,
    stderr: String,
    code: i32,
}

impl Outcome {
    fn success(stdout: String) -> Self {
        Self {
            stdout,
            ..Self::default()
        }
    }

    fn failure(stderr: String) -> Self {
        Self {
            stderr,
            code: 1,
            ..Self::default()
        }
    }
}

fn load_settings() -> anyhow::Result<ParserSettings> {
    match std::env::var_os(SETTINGS_ENV) {
        Some(path) => {
            let path = PathBuf::from(path);
            tracing::debug!(path = %path.display(), "Loading parser settings");
            Ok(ParserSettings::from_file(&path)?)
        }
        None => Ok(ParserSettings::default()),
    }
}

fn dispatch(argv: &[String], settings: &ParserSettings) -> anyhow::Result<Outcome> {
    let program_name = argv.first().map(String::as_str).unwrap_or("expcfg");

    let invocation = match Invocation::from_argv(argv, settings) {
        Ok(invocation) => invocation,
        Err(ArgError::Usage(reason)) => {
            return Ok(Outcome::failure(format!(
                "error: {reason}\n\n{}",
                usage(program_name)
            )))
        }
        Err(e) => return Ok(Outcome::failure(format!("error: {e}\n"))),
    };

    let outcome = match &invocation.action {
        Action::ShowUsage | Action::Help(None) => Outcome::success(usage(program_name)),
        Action::Help(Some(command)) => match settings.describe_command(command) {
            Some(description) => Outcome::success(format!("{command}\n\n  {description}\n")),
            None => Outcome::failure(format!("error: unknown command '{command}'\n")),
        },
        Action::Run | Action::Command(_) => {
            Outcome::success(format!("{}\n", serde_json::to_string_pretty(&invocation)?))
        }
    };
    Ok(outcome)
}

fn main() -> anyhow::Result<()> {
    // stdout carries the JSON result, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<String> = std::env::args().collect();
    let settings = load_settings()?;
    let outcome = dispatch(&argv, &settings)?;

    print!("{}", outcome.stdout);
    eprint!("{}", outcome.stderr);
    if outcome.code != 0 {
        std::process::exit(outcome.code);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(line: &str, settings: &ParserSettings) -> Outcome {
        let argv: Vec<String> = std::iter::once("expcfg")
            .chain(line.split_whitespace())
            .map(String::from)
            .collect();
        dispatch(&argv, settings).unwrap()
    }

    #[test]
    fn usage_error_prints_reason_and_usage() {
        let outcome = run("run with", &ParserSettings::default());
        assert_eq!(outcome.code, 1);
        assert!(outcome.stdout.is_empty());
        assert!(outcome
            .stderr
            .starts_with("error: with requires at least one UPDATE\n\n"));
        assert!(outcome.stderr.contains(&usage("expcfg")));
    }

    #[test]
    fn help_flag_and_help_word_print_usage() {
        let settings = ParserSettings::default();
        for line in ["-h", "--help", "help"] {
            let outcome = run(line, &settings);
            assert_eq!(outcome, Outcome::success(usage("expcfg")), "{line}");
        }
    }

    #[test]
    fn help_command_prints_description() {
        let outcome = run("help print_config", &ParserSettings::default());
        assert_eq!(outcome.code, 0);
        assert_eq!(
            outcome.stdout,
            "print_config\n\n  Print the updated configuration and exit.\n"
        );
    }

    #[test]
    fn help_unknown_command_fails() {
        let outcome = run("help evaluate", &ParserSettings::default());
        assert_eq!(
            outcome,
            Outcome::failure("error: unknown command 'evaluate'\n".to_string())
        );
    }

    #[test]
    fn strict_value_error_exits_without_usage() {
        let settings = ParserSettings {
            strict_parsing: true,
            ..ParserSettings::default()
        };
        let outcome = run("run with name=bob", &settings);
        assert_eq!(outcome.code, 1);
        assert!(!outcome.stderr.contains("Usage:"));
    }

    #[test]
    fn run_prints_invocation_json() {
        let outcome = run("evaluate with a=18 -m results", &ParserSettings::default());
        assert_eq!(outcome.code, 0);
        let json: serde_json::Value = serde_json::from_str(&outcome.stdout).unwrap();
        assert_eq!(json["config_updates"], serde_json::json!({"a": 18}));
        assert_eq!(json["mongo"]["db_name"], "results");
        assert_eq!(json["args"]["COMMAND"], "evaluate");
    }

    #[test]
    fn overflowing_float_survives_json_output() {
        let outcome = run("run with x=1e400", &ParserSettings::default());
        let json: serde_json::Value = serde_json::from_str(&outcome.stdout).unwrap();
        assert_eq!(json["config_updates"]["x"], "1e400");
    }
}
