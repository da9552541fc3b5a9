use std::fmt;

/// Configuration errors are unrecoverable at the point of use: an unknown
/// attribute key, a missing page element or a map engine that cannot start
/// must fail loudly instead of leaving a blank legend or a dead control
/// behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownAttribute(String),
    MissingElement(String),
    EngineUnavailable(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAttribute(key) => write!(f, "unregistered coloring attribute `{key}`"),
            Self::MissingElement(id) => write!(f, "required page element `#{id}` is missing"),
            Self::EngineUnavailable(reason) => write!(f, "map engine failed to start: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}
