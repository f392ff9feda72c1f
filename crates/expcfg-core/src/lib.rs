pub mod args;
pub mod config;
pub mod convert;
pub mod error;
pub mod invocation;
pub mod mongo;
pub mod updates;
pub mod value;

pub use args::{parse_args, usage, ParsedArgs};
pub use config::{MongoDefaults, ParserSettings};
pub use convert::{convert_value, ValueConverter};
pub use error::{ArgError, ArgResult};
pub use invocation::{Action, Invocation};
pub use mongo::{parse_mongo_db_arg, parse_mongo_db_arg_with, MongoTarget};
pub use updates::{get_config_updates, split_update_list, ConfigUpdates, UpdateSet};
pub use value::ConfigValue;
