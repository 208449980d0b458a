//! Error types for the console library

use thiserror::Error;

use crate::models::RecordId;

/// Result type alias using the console's error type
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Failures of a console operation.
///
/// `Validation` never reaches the network. Every other variant comes from a remote call
/// and is converted into a notification at the operation boundary.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Server returned {status}: {message}")]
    Transport { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Record {0} not found")]
    NotFound(RecordId),

    #[error("Unexpected response format: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Edit(#[from] EditError),
}

impl ConsoleError {
    /// True for the not-found class (deleted or never existing record)
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConsoleError::NotFound(_))
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        ConsoleError::Format(err.to_string())
    }
}

/// Invalid transitions of a per-record edit session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Record {0} is already being edited")]
    AlreadyEditing(RecordId),

    #[error("Record {0} has no open edit session")]
    NoSession(RecordId),

    #[error("Record {0} is saving and cannot change right now")]
    Busy(RecordId),

    #[error("Record {0} is not displayed")]
    UnknownRecord(RecordId),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid server URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
