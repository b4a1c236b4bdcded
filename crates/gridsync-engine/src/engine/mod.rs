//! Grid model API.
//!
//! Pure, I/O-free building blocks shared by the remote client:
//!
//! - [`CellRef`], [`Address`], [`Column`] - 1-based addressing and A1 notation
//! - [`CellValue`] - string cell values and input coercion
//! - [`GridCache`], [`GridProperties`] - sparse cell store and sheet dimensions
//! - [`A1Range`], [`MajorDimension`] - value-range addressing
//! - [`TabColor`] - sheet tab color
//! - [`parse_spreadsheet_id`] - identifier/URL parsing

mod cell;
mod cell_ref;
mod color;
mod column;
mod error;
mod grid;
mod id;
mod range;

pub use cell::CellValue;
pub use cell_ref::{Address, CellRef, column_letters, column_number, format_address, parse_address};
pub use color::TabColor;
pub use column::Column;
pub use error::{EngineError, Result};
pub use grid::{
    DEFAULT_COLUMN_COUNT, DEFAULT_ROW_COUNT, GridCache, GridProperties, render_column,
    render_columns, render_row, render_rows,
};
pub use id::{SPREADSHEET_URL_PREFIX, parse_spreadsheet_id, spreadsheet_url};
pub use range::{A1Range, MajorDimension, quote_sheet_title};
