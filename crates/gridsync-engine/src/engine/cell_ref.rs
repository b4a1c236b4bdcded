//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A1", "B2", "AA100") and 1-based column/row coordinates. Column letters
//! use bijective base-26 numbering: there is no zero digit, so 26 is "Z" and 27
//! is "AA".
//!
//! # Examples
//!
//! ```
//! use gridsync_engine::engine::CellRef;
//!
//! let cell: CellRef = "B3".parse().unwrap();
//! assert_eq!(cell.col(), 2);
//! assert_eq!(cell.row(), 3);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use super::error::{EngineError, Result};

fn a1_re() -> &'static Regex {
    static A1_RE: OnceLock<Regex> = OnceLock::new();
    A1_RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$").expect("A1 pattern must compile")
    })
}

/// A reference to a cell by 1-based column and row.
///
/// Both coordinates are at least 1; there is no zero or negative addressing.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    col: usize,
    row: usize,
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> Result<CellRef> {
        if col < 1 || row < 1 {
            return Err(EngineError::IndexOutOfRange(format!(
                "column {}, row {} does not exist; columns and rows are 1-based and negative indices are not supported",
                col, row
            )));
        }
        Ok(CellRef { col, row })
    }

    /// Callers guarantee both coordinates are at least 1.
    pub(crate) fn from_coords(col: usize, row: usize) -> CellRef {
        debug_assert!(col >= 1 && row >= 1);
        CellRef { col, row }
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Parse a cell reference from A1 notation (e.g., "A1", "b2", "AA10").
    pub fn parse(name: &str) -> Result<CellRef> {
        let invalid = || {
            EngineError::InvalidArgument(format!(
                "expected a grid cell like 'A1', not {:?}",
                name
            ))
        };
        let caps = a1_re().captures(name).ok_or_else(invalid)?;
        let col = column_number(&caps["letters"]).map_err(|_| invalid())?;
        let row = caps["numbers"].parse::<usize>().map_err(|_| invalid())?;
        if row < 1 {
            return Err(invalid());
        }
        Ok(CellRef { col, row })
    }
}

impl std::str::FromStr for CellRef {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", letters_of(self.col), self.row)
    }
}

fn letters_of(column: usize) -> String {
    let mut letters = Vec::new();
    let mut n = column;
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Convert a 1-based column number to letters (1 -> "A", 26 -> "Z", 27 -> "AA").
pub fn column_letters(column: usize) -> Result<String> {
    if column < 1 {
        return Err(EngineError::InvalidArgument(format!(
            "column number must be at least 1, not {}",
            column
        )));
    }
    Ok(letters_of(column))
}

/// Convert column letters to a 1-based column number ("A" -> 1, "AA" -> 27).
/// Letters are case-insensitive.
pub fn column_number(letters: &str) -> Result<usize> {
    if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(EngineError::InvalidArgument(format!(
            "column letters must be a non-empty run of letters, not {:?}",
            letters
        )));
    }

    let mut acc = 0usize;
    for b in letters.to_ascii_uppercase().bytes() {
        let digit = (b - b'A') as usize + 1;
        acc = acc
            .checked_mul(26)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(|| {
                EngineError::InvalidArgument(format!("column {:?} is too large", letters))
            })?;
    }
    Ok(acc)
}

/// Split an A1 address into its 1-based (column, row) pair.
pub fn parse_address(address: &str) -> Result<(usize, usize)> {
    let cell = CellRef::parse(address)?;
    Ok((cell.col, cell.row))
}

/// Format a 1-based (column, row) pair as an A1 address.
pub fn format_address(col: usize, row: usize) -> Result<String> {
    if col < 1 || row < 1 {
        return Err(EngineError::InvalidArgument(format!(
            "column and row must both be at least 1, not ({}, {})",
            col, row
        )));
    }
    Ok(format!("{}{}", letters_of(col), row))
}

/// A cell address given either as coordinates or as an A1 label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Address {
    Coordinates(usize, usize),
    Label(String),
}

impl Address {
    /// Resolve either representation to a validated [`CellRef`].
    pub fn normalize(&self) -> Result<CellRef> {
        match self {
            Address::Coordinates(col, row) => CellRef::new(*col, *row),
            Address::Label(label) => CellRef::parse(label),
        }
    }
}

impl From<(usize, usize)> for Address {
    fn from((col, row): (usize, usize)) -> Self {
        Address::Coordinates(col, row)
    }
}

impl From<&str> for Address {
    fn from(label: &str) -> Self {
        Address::Label(label.to_string())
    }
}

impl From<String> for Address {
    fn from(label: String) -> Self {
        Address::Label(label)
    }
}

impl From<CellRef> for Address {
    fn from(cell: CellRef) -> Self {
        Address::Coordinates(cell.col, cell.row)
    }
}
