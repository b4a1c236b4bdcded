//! Error types for gridsync core.

use gridsync_engine::engine::EngineError;
use thiserror::Error;

use crate::remote::RemoteError;

/// Errors that can occur while talking to the remote spreadsheet service.
#[derive(Error, Debug)]
pub enum GridsyncError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Index out of range: {0}")]
    IndexOutOfRange(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Ambiguous lookup: {0}")]
    AmbiguousLookup(String),

    #[error("Remote quota still exhausted after retrying: {0}")]
    RemoteTransient(RemoteError),

    #[error("Remote error: {0}")]
    RemoteFatal(RemoteError),

    #[error("Unexpected response from remote service: {0}")]
    UnexpectedResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error in {path}: {message}")]
    Config { path: String, message: String },
}

impl From<EngineError> for GridsyncError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidArgument(msg) => GridsyncError::InvalidArgument(msg),
            EngineError::IndexOutOfRange(msg) => GridsyncError::IndexOutOfRange(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, GridsyncError>;
