//! Sparse grid storage and dimension metadata.
//!
//! - [`GridCache`] - sparse, 1-indexed cell store (backed by `DashMap`)
//! - [`GridProperties`] - row/column counts, frozen counts and display flags
//! - [`render_rows`] / [`render_columns`] - dense views over the sparse store

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::cell::CellValue;
use super::cell_ref::CellRef;
use super::error::{EngineError, Result};
use super::range::MajorDimension;

/// Row count the remote service gives a new sheet.
pub const DEFAULT_ROW_COUNT: usize = 1000;
/// Column count the remote service gives a new sheet.
pub const DEFAULT_COLUMN_COUNT: usize = 26;

/// Sparse cell storage. Only non-empty cells are materialized.
#[derive(Debug, Default)]
pub struct GridCache {
    cells: DashMap<CellRef, String>,
}

impl GridCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value at `cell`, or the empty string when nothing is stored there.
    pub fn get(&self, cell: &CellRef) -> String {
        self.cells
            .get(cell)
            .map(|v| v.value().clone())
            .unwrap_or_default()
    }

    /// Store `value` at `cell`; an empty value removes the cell.
    pub fn set(&self, cell: CellRef, value: CellValue) {
        if value.is_empty() {
            self.cells.remove(&cell);
        } else {
            self.cells.insert(cell, value.into_string());
        }
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        self.cells.contains_key(cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&self) {
        self.cells.clear();
    }

    /// Materialized cells in (row, column) order.
    pub fn cells(&self) -> Vec<(CellRef, String)> {
        let mut out: Vec<(CellRef, String)> = self
            .cells
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        out.sort_by_key(|(cell, _)| (cell.row(), cell.col()));
        out
    }

    /// Drop every cell outside the first `column_count` columns and `row_count` rows.
    pub fn retain_within(&self, column_count: usize, row_count: usize) {
        self.cells
            .retain(|cell, _| cell.col() <= column_count && cell.row() <= row_count);
    }

    /// True if any stored value contains `needle`.
    pub fn any_contains(&self, needle: &str) -> bool {
        self.cells.iter().any(|entry| entry.value().contains(needle))
    }

    /// Replace the whole store with a value range read from the top-left cell.
    pub fn load(&self, major: MajorDimension, values: &[Vec<CellValue>]) {
        self.cells.clear();
        for (outer, line) in values.iter().enumerate() {
            for (inner, value) in line.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                let (col, row) = match major {
                    MajorDimension::Rows => (inner + 1, outer + 1),
                    MajorDimension::Columns => (outer + 1, inner + 1),
                };
                self.cells
                    .insert(CellRef::from_coords(col, row), value.as_str().to_string());
            }
        }
    }
}

/// Dense rows `rows` (1-based, half-open) each `column_count` wide.
pub fn render_rows(cache: &GridCache, rows: Range<usize>, column_count: usize) -> Vec<Vec<String>> {
    rows.map(|row| render_row(cache, row, column_count))
        .collect()
}

/// Dense columns `columns` (1-based, half-open) each `row_count` tall.
pub fn render_columns(
    cache: &GridCache,
    columns: Range<usize>,
    row_count: usize,
) -> Vec<Vec<String>> {
    columns
        .map(|col| render_column(cache, col, row_count))
        .collect()
}

pub fn render_row(cache: &GridCache, row: usize, column_count: usize) -> Vec<String> {
    (1..=column_count)
        .map(|col| cache.get(&CellRef::from_coords(col, row)))
        .collect()
}

pub fn render_column(cache: &GridCache, col: usize, row_count: usize) -> Vec<String> {
    (1..=row_count)
        .map(|row| cache.get(&CellRef::from_coords(col, row)))
        .collect()
}

/// Dimension and display metadata of one sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridProperties {
    pub row_count: usize,
    pub column_count: usize,
    pub frozen_row_count: usize,
    pub frozen_column_count: usize,
    pub hide_gridlines: bool,
    pub row_group_control_after: bool,
    pub column_group_control_after: bool,
}

impl Default for GridProperties {
    fn default() -> Self {
        GridProperties {
            row_count: DEFAULT_ROW_COUNT,
            column_count: DEFAULT_COLUMN_COUNT,
            frozen_row_count: 0,
            frozen_column_count: 0,
            hide_gridlines: false,
            row_group_control_after: false,
            column_group_control_after: false,
        }
    }
}

impl GridProperties {
    /// Check counts are positive and at least one row and column stay unfrozen.
    pub fn validate(&self) -> Result<()> {
        if self.row_count < 1 {
            return Err(EngineError::InvalidArgument(
                "row count must be at least 1".to_string(),
            ));
        }
        if self.column_count < 1 {
            return Err(EngineError::InvalidArgument(
                "column count must be at least 1".to_string(),
            ));
        }
        if self.frozen_row_count >= self.row_count {
            return Err(EngineError::InvalidArgument(format!(
                "cannot freeze all rows ({} frozen of {})",
                self.frozen_row_count, self.row_count
            )));
        }
        if self.frozen_column_count >= self.column_count {
            return Err(EngineError::InvalidArgument(format!(
                "cannot freeze all columns ({} frozen of {})",
                self.frozen_column_count, self.column_count
            )));
        }
        Ok(())
    }
}
