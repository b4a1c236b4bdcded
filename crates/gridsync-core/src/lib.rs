//! gridsync-core - stateful client for a remote spreadsheet service.
//!
//! Every remote call goes through one [`Dispatcher`], which paces itself with a
//! [`QuotaLimiter`] and retries quota exhaustion with linear backoff. The
//! [`Spreadsheet`] and [`Sheet`] handles keep a local, sparse copy of each grid
//! consistent with the remote store.

pub mod clock;
pub mod config;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod quota;
pub mod remote;

#[cfg(test)]
pub(crate) mod test_support;

pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use dispatch::{Dispatcher, RetryPolicy};
pub use document::{Client, ExportFormat, Sheet, SheetKey, SheetSlice, Spreadsheet, SpreadsheetListing};
pub use error::{GridsyncError, Result};
pub use quota::{QuotaConfig, QuotaLimiter, RequestKind};
pub use remote::{HttpTransport, Operation, RemoteError, Transport};

pub use gridsync_engine::engine::{Address, CellRef, CellValue, Column, GridProperties, TabColor};
