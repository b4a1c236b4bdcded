//! Errors raised by the pure grid model.

use thiserror::Error;

/// Errors detected locally, before anything is sent to the remote service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Index out of range: {0}")]
    IndexOutOfRange(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
