//! Value-range addressing: `<sheetTitle>!<startCell>:<endCell>`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::cell_ref::CellRef;
use super::error::{EngineError, Result};

/// Whether a bulk value transfer is organized row-first or column-first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MajorDimension {
    #[default]
    Rows,
    Columns,
}

/// A rectangular range on a named sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct A1Range {
    pub sheet_title: String,
    pub start: CellRef,
    pub end: CellRef,
}

impl A1Range {
    pub fn new(sheet_title: impl Into<String>, start: CellRef, end: CellRef) -> A1Range {
        A1Range {
            sheet_title: sheet_title.into(),
            start,
            end,
        }
    }

    /// Single-cell range.
    pub fn cell(sheet_title: impl Into<String>, cell: CellRef) -> A1Range {
        A1Range::new(sheet_title, cell, cell)
    }

    /// The whole `column_count` x `row_count` grid starting at A1.
    pub fn grid(sheet_title: impl Into<String>, column_count: usize, row_count: usize) -> Result<A1Range> {
        Ok(A1Range::new(
            sheet_title,
            CellRef::new(1, 1)?,
            CellRef::new(column_count, row_count)?,
        ))
    }

    pub fn parse(input: &str) -> Result<A1Range> {
        let invalid = || {
            EngineError::InvalidArgument(format!(
                "expected a range like 'Sheet1'!A1:B2, not {:?}",
                input
            ))
        };

        let (title, cells) = if let Some(rest) = input.strip_prefix('\'') {
            let mut title = String::new();
            let mut chars = rest.char_indices().peekable();
            let mut close = None;
            while let Some((i, c)) = chars.next() {
                if c == '\'' {
                    if matches!(chars.peek(), Some((_, '\''))) {
                        title.push('\'');
                        chars.next();
                        continue;
                    }
                    close = Some(i);
                    break;
                }
                title.push(c);
            }
            let close = close.ok_or_else(invalid)?;
            let cells = rest[close + 1..].strip_prefix('!').ok_or_else(invalid)?;
            (title, cells)
        } else {
            let (title, cells) = input.split_once('!').ok_or_else(invalid)?;
            (title.to_string(), cells)
        };

        let (start, end) = match cells.split_once(':') {
            Some((start, end)) => (start, end),
            None => (cells, cells),
        };
        let start = CellRef::parse(start).map_err(|_| invalid())?;
        let end = CellRef::parse(end).map_err(|_| invalid())?;
        Ok(A1Range::new(title, start, end))
    }
}

/// Quote a sheet title for use in a range, doubling embedded single quotes.
pub fn quote_sheet_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

impl fmt::Display for A1Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}!{}:{}",
            quote_sheet_title(&self.sheet_title),
            self.start,
            self.end
        )
    }
}
