use serde::{Deserialize, Serialize};

use crate::config::MongoDefaults;

/// Where a MongoDB observer should write: a `host:port` pair and a database name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MongoTarget {
    pub host_port: String,
    pub db_name: String,
}

impl MongoTarget {
    /// Parse a `[host:port:]db_name` or `host:port` argument.
    ///
    /// No colon means the whole string is a database name; one colon means it
    /// is a `host:port` pair. With two or more colons, the first two segments
    /// are the `host:port` and the rest is the database name. Nothing is
    /// validated beyond the split.
    pub fn parse(arg: &str, defaults: &MongoDefaults) -> Self {
        let mut parts = arg.splitn(3, ':');
        let (host_port, db_name) = match (parts.next(), parts.next(), parts.next()) {
            (Some(host), Some(port), Some(db)) => (format!("{host}:{port}"), db.to_string()),
            (Some(_), Some(_), None) => (arg.to_string(), defaults.db_name.clone()),
            _ => (defaults.host_port.clone(), arg.to_string()),
        };
        tracing::trace!(arg, %host_port, %db_name, "Parsed mongo_db argument");
        Self { host_port, db_name }
    }

    pub fn url(&self) -> String {
        format!("mongodb://{}", self.host_port)
    }
}

/// Split a `-m` argument using the built-in defaults.
pub fn parse_mongo_db_arg(arg: &str) -> (String, String) {
    parse_mongo_db_arg_with(arg, &MongoDefaults::default())
}

pub fn parse_mongo_db_arg_with(arg: &str, defaults: &MongoDefaults) -> (String, String) {
    let target = MongoTarget::parse(arg, defaults);
    (target.host_port, target.db_name)
}
