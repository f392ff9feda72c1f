use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ArgError, ArgResult};

pub const DEFAULT_HOST_PORT: &str = "localhost:27017";
pub const DEFAULT_DB_NAME: &str = "sacred";

/// Top-level settings file structure. Every field is optional in YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserSettings {
    #[serde(default)]
    pub mongo: MongoDefaults,
    /// Reject update values that only match the raw-string fallback.
    #[serde(default)]
    pub strict_parsing: bool,
    /// Known commands and their one-line descriptions, shown by `help COMMAND`.
    #[serde(default = "default_commands")]
    pub commands: BTreeMap<String, String>,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            mongo: MongoDefaults::default(),
            strict_parsing: false,
            commands: default_commands(),
        }
    }
}

/// Values substituted for the omitted parts of a `-m` argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MongoDefaults {
    #[serde(default = "default_host_port")]
    pub host_port: String,
    #[serde(default = "default_db_name")]
    pub db_name: String,
}

impl Default for MongoDefaults {
    fn default() -> Self {
        Self {
            host_port: default_host_port(),
            db_name: default_db_name(),
        }
    }
}

fn default_host_port() -> String {
    DEFAULT_HOST_PORT.to_string()
}

fn default_db_name() -> String {
    DEFAULT_DB_NAME.to_string()
}

fn default_commands() -> BTreeMap<String, String> {
    BTreeMap::from([(
        "print_config".to_string(),
        "Print the updated configuration and exit.".to_string(),
    )])
}

impl ParserSettings {
    pub fn from_file(path: &Path) -> ArgResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ArgError::Settings(format!("Cannot read {}: {e}", path.display())))?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ArgResult<Self> {
        serde_yaml::from_str(content).map_err(|e| ArgError::Settings(format!("Invalid YAML: {e}")))
    }

    pub fn describe_command(&self, name: &str) -> Option<&str> {
        self.commands.get(name).map(String::as_str)
    }
}
