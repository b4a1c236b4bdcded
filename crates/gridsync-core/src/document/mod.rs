//! Spreadsheet and sheet handles kept in step with the remote store.

mod client;
mod export;
mod props;
mod sheet;
mod sheet_ops;
mod spreadsheet;
pub(crate) mod wire;

pub use client::{Client, SpreadsheetListing};
pub use export::ExportFormat;
pub use sheet::Sheet;
pub use spreadsheet::{SheetKey, SheetSlice, Spreadsheet};
