use clap::{Arg, ArgAction, ArgMatches};
use serde::Serialize;
use std::ffi::OsString;

use crate::error::{ArgError, ArgResult};

/// Result of tokenizing one command line. Serializes to a mapping that
/// always carries all seven slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedArgs {
    #[serde(rename = "--help")]
    pub help_flag: bool,
    #[serde(rename = "--mongo_db")]
    pub mongo_db: Option<String>,
    #[serde(rename = "COMMAND")]
    pub command: Option<String>,
    #[serde(rename = "UPDATE")]
    pub update: Vec<String>,
    pub help: bool,
    pub run: bool,
    #[serde(rename = "with")]
    pub with_updates: bool,
}

impl ParsedArgs {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn usage(program_name: &str) -> String {
    format!(
        "Usage:
  {program_name} [run] [with UPDATE...] [-m DB]
  {program_name} help [COMMAND]
  {program_name} (-h | --help)
  {program_name} COMMAND [with UPDATE...] [-m DB]

Options:
  -h --help             Print this help message and exit.
  -m DB --mongo_db=DB   Add a MongoDB observer. DB is [host:port:]db_name.

Arguments:
  COMMAND   Name of a command to run instead of the main function.
  UPDATE    Configuration assignments of the form foo.bar=17.
"
    )
}

fn command_line() -> clap::Command {
    clap::Command::new("expcfg")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("mongo_db")
                .short('m')
                .long("mongo_db")
                .value_name("DB")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("help")
                .short('h')
                .long("help")
                .action(ArgAction::SetTrue),
        )
        .arg(Arg::new("words").value_name("WORD").action(ArgAction::Append))
}

fn clap_reason(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string()
}

/// Tokenize `argv` (program name first) against the usage grammar.
pub fn parse_args<I, T>(argv: I) -> ArgResult<ParsedArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command_line()
        .try_get_matches_from(argv)
        .map_err(|e| ArgError::Usage(clap_reason(&e)))?;
    let parsed = classify(&matches)?;
    tracing::debug!(?parsed, "Parsed command line");
    Ok(parsed)
}

fn classify(matches: &ArgMatches) -> ArgResult<ParsedArgs> {
    let words: Vec<&str> = matches
        .get_many::<String>("words")
        .map(|values| values.map(String::as_str).collect())
        .unwrap_or_default();
    let mut parsed = ParsedArgs {
        mongo_db: matches.get_one::<String>("mongo_db").cloned(),
        ..ParsedArgs::default()
    };

    if matches.get_flag("help") {
        if !words.is_empty() || parsed.mongo_db.is_some() {
            return Err(ArgError::Usage("--help must be given on its own".into()));
        }
        parsed.help_flag = true;
        return Ok(parsed);
    }

    let mut rest = words.as_slice();
    match rest.first().copied() {
        Some("help") => {
            if parsed.mongo_db.is_some() {
                return Err(ArgError::Usage("help does not accept --mongo_db".into()));
            }
            if rest.len() > 2 {
                return Err(ArgError::Usage(format!(
                    "unexpected argument '{}' after help",
                    rest[2]
                )));
            }
            parsed.help = true;
            parsed.command = rest.get(1).map(|s| s.to_string());
            return Ok(parsed);
        }
        Some("run") => {
            parsed.run = true;
            rest = &rest[1..];
        }
        Some("with") | None => {}
        Some(command) => {
            parsed.command = Some(command.to_string());
            rest = &rest[1..];
        }
    }

    match rest.split_first() {
        None => {}
        Some((&"with", updates)) => {
            if updates.is_empty() {
                return Err(ArgError::Usage("with requires at least one UPDATE".into()));
            }
            parsed.with_updates = true;
            parsed.update = updates.iter().map(|s| s.to_string()).collect();
        }
        Some((unexpected, _)) => {
            return Err(ArgError::Usage(format!(
                "unexpected argument '{unexpected}'"
            )));
        }
    }
    Ok(parsed)
}
