//! Remote protocol surface.
//!
//! [`Operation`] names every call the client makes and fixes whether it counts
//! as a read or a write. A [`Transport`] turns an operation plus its JSON
//! parameters into a response body; [`HttpTransport`] is the production one.

mod http;

pub use http::HttpTransport;

use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::fmt;
use thiserror::Error;

use crate::quota::RequestKind;

/// Calls understood by the remote service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Spreadsheet and sheet metadata.
    GetMetadata,
    /// Metadata mutations (`requests` list).
    BatchUpdate,
    GetValues,
    UpdateValues,
    CopySheet,
    CreateSpreadsheet,
    DriveExport,
    DriveDelete,
    DriveUpdate,
    DriveList,
    DriveCreate,
}

impl Operation {
    pub fn kind(self) -> RequestKind {
        match self {
            Operation::GetMetadata
            | Operation::GetValues
            | Operation::DriveExport
            | Operation::DriveList => RequestKind::Read,
            Operation::BatchUpdate
            | Operation::UpdateValues
            | Operation::CopySheet
            | Operation::CreateSpreadsheet
            | Operation::DriveDelete
            | Operation::DriveUpdate
            | Operation::DriveCreate => RequestKind::Write,
        }
    }

    /// True for file-level calls served by the drive scope.
    pub fn uses_drive(self) -> bool {
        matches!(
            self,
            Operation::DriveExport
                | Operation::DriveDelete
                | Operation::DriveUpdate
                | Operation::DriveList
                | Operation::DriveCreate
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::GetMetadata => "get",
            Operation::BatchUpdate => "batchUpdate",
            Operation::GetValues => "values.get",
            Operation::UpdateValues => "values.update",
            Operation::CopySheet => "sheets.copyTo",
            Operation::CreateSpreadsheet => "create",
            Operation::DriveExport => "drive.export",
            Operation::DriveDelete => "drive.delete",
            Operation::DriveUpdate => "drive.update",
            Operation::DriveList => "drive.list",
            Operation::DriveCreate => "drive.create",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An error reported by the remote service (or by the network under it).
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{status} ({code}): {message}")]
pub struct RemoteError {
    /// HTTP status code; 0 when no response was received.
    pub code: u16,
    /// Canonical status name, e.g. `RESOURCE_EXHAUSTED`.
    pub status: String,
    pub message: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}

impl RemoteError {
    pub const QUOTA_EXHAUSTED: &'static str = "RESOURCE_EXHAUSTED";
    pub const TRANSPORT: &'static str = "TRANSPORT";

    pub fn new(code: u16, status: impl Into<String>, message: impl Into<String>) -> Self {
        RemoteError {
            code,
            status: status.into(),
            message: message.into(),
        }
    }

    pub fn quota_exhausted(message: impl Into<String>) -> Self {
        RemoteError::new(429, Self::QUOTA_EXHAUSTED, message)
    }

    /// Failure below the protocol: no usable response.
    pub fn transport(message: impl Into<String>) -> Self {
        RemoteError::new(0, Self::TRANSPORT, message)
    }

    /// Decode a `{"error": {"code", "status", "message"}}` body.
    pub fn from_body(http_status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorEnvelope>(body) {
            Ok(envelope) => RemoteError {
                code: if envelope.error.code == 0 {
                    http_status
                } else {
                    envelope.error.code
                },
                status: envelope.error.status,
                message: envelope.error.message,
            },
            Err(_) => RemoteError::new(
                http_status,
                "UNKNOWN",
                String::from_utf8_lossy(body).into_owned(),
            ),
        }
    }

    pub fn is_quota_exhausted(&self) -> bool {
        self.status == Self::QUOTA_EXHAUSTED
    }
}

/// Executes one remote operation and returns the raw response body.
pub trait Transport: Send + Sync {
    fn call(&self, operation: Operation, params: &JsonValue) -> Result<Vec<u8>, RemoteError>;
}
