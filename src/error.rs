//! Error types
//!
//! Two fatal classes: configuration mistakes (mismatched collection inputs,
//! bad tuning values) and missing image assets. Game over is not an error.

use std::fmt;

/// Programming/configuration errors, reported at call time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Two parallel inputs disagree in length
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// Key already present in a keyed collection
    DuplicateKey(String),
    /// Index access on a keyed collection or key access on an indexed one
    AccessMode { expected: &'static str },
    /// `reindex_by_keys` called on a collection that is already keyed
    AlreadyKeyed,
    /// No entry at the given index/key
    MissingEntry(String),
    /// Tuning value out of its accepted range
    InvalidTuning(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LengthMismatch {
                what,
                expected,
                found,
            } => write!(
                f,
                "number of {} does not match: expected {} (or 1), found {}",
                what, expected, found
            ),
            ConfigError::DuplicateKey(key) => write!(f, "duplicate key: {}", key),
            ConfigError::AccessMode { expected } => {
                write!(f, "wrong access mode: collection is {}", expected)
            }
            ConfigError::AlreadyKeyed => write!(f, "collection is already keyed"),
            ConfigError::MissingEntry(slot) => write!(f, "no entry at {}", slot),
            ConfigError::InvalidTuning(msg) => write!(f, "invalid tuning: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Crate-level error
#[derive(Debug)]
pub enum GameError {
    /// Collection or tuning misconfiguration
    Config(ConfigError),
    /// Image asset could not be loaded
    ResourceLoad { id: String, reason: String },
    /// I/O failure reading a tuning file
    Io(String),
    /// Malformed tuning JSON
    Parse(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Config(e) => write!(f, "configuration error: {}", e),
            GameError::ResourceLoad { id, reason } => {
                write!(f, "failed to load image '{}': {}", id, reason)
            }
            GameError::Io(msg) => write!(f, "I/O error: {}", msg),
            GameError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for GameError {
    fn from(e: ConfigError) -> Self {
        GameError::Config(e)
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Parse(e.to_string())
    }
}
