use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ConfigErrorKind {
    InvalidFormat(String),
    InvalidValue(String, String),
    UnknownKey(String),
    ValidationError(String),
}

impl fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigErrorKind::InvalidFormat(msg) => write!(f, "Invalid config format: {}", msg),
            ConfigErrorKind::InvalidValue(key, msg) => {
                write!(f, "Invalid value for '{}': {}", key, msg)
            }
            ConfigErrorKind::UnknownKey(key) => write!(f, "Unknown config key: {}", key),
            ConfigErrorKind::ValidationError(msg) => write!(f, "Validation failed: {}", msg),
        }
    }
}

#[derive(Debug)]
pub enum SpriteError {
    Io(io::Error),
    Parse(String),
    Config(ConfigErrorKind),
    /// The candidate scan could not complete; no partial results are returned.
    Scan { path: PathBuf, reason: String },
    Import { path: PathBuf, reason: String },
    Other(String),
}

impl fmt::Display for SpriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpriteError::Io(err) => write!(f, "{}", err),
            SpriteError::Parse(msg) => write!(f, "{}", msg),
            SpriteError::Config(kind) => write!(f, "{}", kind),
            SpriteError::Scan { path, reason } => {
                write!(f, "Failed to scan {}\n{}", path.display(), reason)
            }
            SpriteError::Import { path, reason } => {
                write!(f, "Failed to update import settings of {}\n{}", path.display(), reason)
            }
            SpriteError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SpriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpriteError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SpriteError {
    fn from(err: io::Error) -> Self {
        SpriteError::Io(err)
    }
}

impl From<toml::de::Error> for SpriteError {
    fn from(err: toml::de::Error) -> Self {
        SpriteError::Config(ConfigErrorKind::InvalidFormat(err.to_string()))
    }
}

impl From<toml::ser::Error> for SpriteError {
    fn from(err: toml::ser::Error) -> Self {
        SpriteError::Config(ConfigErrorKind::InvalidFormat(err.to_string()))
    }
}

impl From<serde_json::Error> for SpriteError {
    fn from(err: serde_json::Error) -> Self {
        SpriteError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SpriteError>;
