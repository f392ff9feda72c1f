use serde::Serialize;
use std::ffi::OsString;

use crate::args::{parse_args, ParsedArgs};
use crate::config::ParserSettings;
use crate::convert::ValueConverter;
use crate::error::ArgResult;
use crate::mongo::MongoTarget;
use crate::updates::{split_update_list, ConfigUpdates};

/// What the caller should do with a parsed command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "command", rename_all = "snake_case")]
pub enum Action {
    ShowUsage,
    Help(Option<String>),
    Run,
    Command(String),
}

/// A fully resolved command line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invocation {
    pub action: Action,
    pub args: ParsedArgs,
    pub config_updates: ConfigUpdates,
    pub named_configs: Vec<String>,
    pub mongo: Option<MongoTarget>,
}

impl Invocation {
    pub fn from_argv<I, T>(argv: I, settings: &ParserSettings) -> ArgResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = parse_args(argv)?;
        let converter = ValueConverter::new(settings.strict_parsing);
        let updates = split_update_list(&args.update, converter)?;
        let mongo = args
            .mongo_db
            .as_deref()
            .map(|db| MongoTarget::parse(db, &settings.mongo));

        let action = if args.help_flag {
            Action::ShowUsage
        } else if args.help {
            Action::Help(args.command.clone())
        } else if let Some(command) = &args.command {
            Action::Command(command.clone())
        } else {
            Action::Run
        };
        tracing::debug!(?action, mongo = mongo.is_some(), "Resolved invocation");

        Ok(Self {
            action,
            args,
            config_updates: updates.config_updates,
            named_configs: updates.named_configs,
            mongo,
        })
    }
}
