use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    #[error("Invalid command line: {0}")]
    Usage(String),

    #[error("Update '{0}' is not of the form key=value")]
    MissingAssignment(String),

    #[error("Invalid config key '{0}'")]
    InvalidKey(String),

    #[error("Cannot set '{path}': a parent key already holds a non-mapping value")]
    PathConflict { path: String },

    #[error("Cannot parse value '{0}' (strict parsing is enabled)")]
    UnparsableValue(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl ArgError {
    /// Whether the caller should respond by printing the usage text.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

pub type ArgResult<T> = Result<T, ArgError>;
