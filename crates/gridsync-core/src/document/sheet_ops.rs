//! Write side of the grid protocol.
//!
//! Every write first enlarges the remote grid when it reaches past the current
//! bounds, then sends the values, then patches the local cache with exactly
//! what was sent. The cache is not re-read after a write.

use gridsync_engine::engine::{A1Range, Address, CellRef, CellValue, Column, MajorDimension};
use log::debug;
use serde_json::json;

use super::sheet::Sheet;
use super::spreadsheet::Spreadsheet;
use super::wire::{self, SheetProperties};
use crate::error::{GridsyncError, Result};
use crate::remote::Operation;

impl Sheet {
    /// Set the grid size. `None` keeps the current value; passing `None` for
    /// both, or the current size, sends nothing.
    ///
    /// Cells outside the new bounds are dropped from the cache.
    pub fn resize(&self, columns: Option<usize>, rows: Option<usize>) -> Result<()> {
        if columns.is_none() && rows.is_none() {
            return Ok(());
        }
        let current = self.grid_properties();
        let columns = columns.unwrap_or(current.column_count);
        let rows = rows.unwrap_or(current.row_count);
        if columns == current.column_count && rows == current.row_count {
            return Ok(());
        }

        let mut target = current;
        target.column_count = columns;
        target.row_count = rows;
        target.validate()?;

        let request = wire::update_sheet_properties(
            self.id(),
            json!({ "gridProperties": { "rowCount": rows, "columnCount": columns } }),
            "gridProperties.rowCount,gridProperties.columnCount",
        );
        self.dispatcher().execute(
            Operation::BatchUpdate,
            &wire::batch_params(self.spreadsheet_id(), vec![request]),
        )?;

        {
            let mut state = self.inner.state.write();
            state.grid.column_count = columns;
            state.grid.row_count = rows;
        }
        self.inner.cells.retain_within(columns, rows);
        debug!(
            "resized sheet {} from {}x{} to {}x{}",
            self.id(),
            current.column_count,
            current.row_count,
            columns,
            rows
        );
        Ok(())
    }

    /// Grow (never shrink) the grid so `column` x `row` is inside it.
    pub(crate) fn enlarge_if_needed(&self, column: usize, row: usize) -> Result<()> {
        let grid = self.grid_properties();
        self.resize(
            Some(column.max(grid.column_count)),
            Some(row.max(grid.row_count)),
        )
    }

    /// Write one cell. An empty value deletes the cell from the cache.
    pub fn update(&self, address: impl Into<Address>, value: impl Into<CellValue>) -> Result<()> {
        let cell = address.into().normalize()?;
        let value = value.into();
        self.enlarge_if_needed(cell.col(), cell.row())?;

        let range = A1Range::cell(self.title(), cell);
        self.write_values(&range, MajorDimension::Rows, &[vec![value.clone()]])?;
        self.inner.cells.set(cell, value);
        Ok(())
    }

    /// Overwrite row `row`. Short input is padded with empty cells to the
    /// column count; longer input widens the sheet.
    pub fn update_row<I>(&self, row: usize, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<CellValue>,
    {
        if row < 1 {
            return Err(GridsyncError::IndexOutOfRange(
                "rows are 1-based; there is no row 0".to_string(),
            ));
        }
        let mut values: Vec<CellValue> = values.into_iter().map(Into::into).collect();
        let width = values.len().max(self.column_count());
        values.resize(width, CellValue::empty());
        self.enlarge_if_needed(width, row)?;

        let range = A1Range::new(self.title(), CellRef::new(1, row)?, CellRef::new(width, row)?);
        self.write_values(&range, MajorDimension::Rows, std::slice::from_ref(&values))?;
        for (i, value) in values.into_iter().enumerate() {
            self.inner.cells.set(CellRef::new(i + 1, row)?, value);
        }
        Ok(())
    }

    /// Overwrite one column, padding to the row count.
    pub fn update_column<I>(&self, column: impl Into<Column>, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<CellValue>,
    {
        let col = column.into().resolve()?;
        let mut values: Vec<CellValue> = values.into_iter().map(Into::into).collect();
        let height = values.len().max(self.row_count());
        values.resize(height, CellValue::empty());
        self.enlarge_if_needed(col, height)?;

        let range = A1Range::new(self.title(), CellRef::new(col, 1)?, CellRef::new(col, height)?);
        self.write_values(&range, MajorDimension::Columns, std::slice::from_ref(&values))?;
        for (i, value) in values.into_iter().enumerate() {
            self.inner.cells.set(CellRef::new(col, i + 1)?, value);
        }
        Ok(())
    }

    /// Overwrite every row from `start_row` to the bottom of the sheet.
    ///
    /// Rows are padded to the widest of the input and the column count, and
    /// missing rows up to the last row of the sheet are written empty, so the
    /// write is one rectangle.
    pub fn update_rows<R, I>(&self, rows: R, start_row: usize) -> Result<()>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator,
        I::Item: Into<CellValue>,
    {
        if start_row < 1 {
            return Err(GridsyncError::InvalidArgument(format!(
                "start row is 1-based and must be at least 1, not {}",
                start_row
            )));
        }
        let rows = collect_lines(rows);
        let lines = pad_rectangle(
            rows,
            self.column_count(),
            (self.row_count() + 1).saturating_sub(start_row),
        );
        let Some(first) = lines.first() else {
            return Ok(());
        };
        let (width, height) = (first.len(), lines.len());
        let end_row = start_row.checked_add(height - 1).ok_or_else(|| {
            GridsyncError::InvalidArgument(format!(
                "{} rows starting at row {} run past the largest row number",
                height, start_row
            ))
        })?;
        self.enlarge_if_needed(width, end_row)?;

        let range = A1Range::new(
            self.title(),
            CellRef::new(1, start_row)?,
            CellRef::new(width, end_row)?,
        );
        self.write_values(&range, MajorDimension::Rows, &lines)?;
        for (r, line) in lines.into_iter().enumerate() {
            for (c, value) in line.into_iter().enumerate() {
                self.inner.cells.set(CellRef::new(c + 1, start_row + r)?, value);
            }
        }
        Ok(())
    }

    /// Column-major counterpart of [`Sheet::update_rows`].
    pub fn update_columns<C, I>(&self, columns: C, start_column: usize) -> Result<()>
    where
        C: IntoIterator<Item = I>,
        I: IntoIterator,
        I::Item: Into<CellValue>,
    {
        if start_column < 1 {
            return Err(GridsyncError::InvalidArgument(format!(
                "start column is 1-based and must be at least 1, not {}",
                start_column
            )));
        }
        let columns = collect_lines(columns);
        let lines = pad_rectangle(
            columns,
            self.row_count(),
            (self.column_count() + 1).saturating_sub(start_column),
        );
        let Some(first) = lines.first() else {
            return Ok(());
        };
        let (height, width) = (first.len(), lines.len());
        let end_column = start_column.checked_add(width - 1).ok_or_else(|| {
            GridsyncError::InvalidArgument(format!(
                "{} columns starting at column {} run past the largest column number",
                width, start_column
            ))
        })?;
        self.enlarge_if_needed(end_column, height)?;

        let range = A1Range::new(
            self.title(),
            CellRef::new(start_column, 1)?,
            CellRef::new(end_column, height)?,
        );
        self.write_values(&range, MajorDimension::Columns, &lines)?;
        for (c, line) in lines.into_iter().enumerate() {
            for (r, value) in line.into_iter().enumerate() {
                self.inner.cells.set(CellRef::new(start_column + c, r + 1)?, value);
            }
        }
        Ok(())
    }

    /// Blank the whole grid remotely and empty the cache.
    pub fn clear(&self) -> Result<()> {
        let grid = self.grid_properties();
        let range = A1Range::grid(self.title(), grid.column_count, grid.row_count)?;
        let blank = vec![vec![CellValue::empty(); grid.column_count]; grid.row_count];
        self.write_values(&range, MajorDimension::Rows, &blank)?;
        self.inner.cells.clear();
        Ok(())
    }

    /// Copy this sheet into `destination` and return the new sheet there.
    ///
    /// The destination is refreshed since its sheet list changed.
    pub fn copy_to(&self, destination: &mut Spreadsheet) -> Result<Sheet> {
        let body = self.dispatcher().execute(
            Operation::CopySheet,
            &json!({
                "spreadsheetId": self.spreadsheet_id(),
                "sheetId": self.id(),
                "body": { "destinationSpreadsheetId": destination.id() },
            }),
        )?;
        let copied: SheetProperties = wire::decode(Operation::CopySheet, body)?;
        destination.refresh()?;
        destination.sheet_by_id(copied.sheet_id).ok_or_else(|| {
            GridsyncError::UnexpectedResponse(format!(
                "copied sheet {} is missing from spreadsheet {}",
                copied.sheet_id,
                destination.id()
            ))
        })
    }

    fn write_values(
        &self,
        range: &A1Range,
        major: MajorDimension,
        values: &[Vec<CellValue>],
    ) -> Result<()> {
        self.dispatcher().execute(
            Operation::UpdateValues,
            &wire::update_values_params(self.spreadsheet_id(), range, major, values),
        )?;
        Ok(())
    }
}

fn collect_lines<R, I>(lines: R) -> Vec<Vec<CellValue>>
where
    R: IntoIterator<Item = I>,
    I: IntoIterator,
    I::Item: Into<CellValue>,
{
    lines
        .into_iter()
        .map(|line| line.into_iter().map(Into::into).collect())
        .collect()
}

/// Pad every line to the longest of the lines and `min_len`, then add blank
/// lines until there are at least `min_lines`.
fn pad_rectangle(mut lines: Vec<Vec<CellValue>>, min_len: usize, min_lines: usize) -> Vec<Vec<CellValue>> {
    let len = lines.iter().map(Vec::len).max().unwrap_or(0).max(min_len);
    for line in &mut lines {
        line.resize(len, CellValue::empty());
    }
    if lines.len() < min_lines {
        lines.resize(min_lines, vec![CellValue::empty(); len]);
    }
    lines
}
