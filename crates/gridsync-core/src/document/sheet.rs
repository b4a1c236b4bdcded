//! Sheet handles and the read side of the grid protocol.

use gridsync_engine::engine::{
    A1Range, Address, Column, GridCache, GridProperties, MajorDimension, TabColor, render_column,
    render_columns, render_row, render_rows,
};
use log::debug;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

use super::wire::{self, GRID_SHEET_TYPE, SheetProperties, SpreadsheetMetadata, ValueRange};
use crate::dispatch::Dispatcher;
use crate::error::{GridsyncError, Result};
use crate::remote::Operation;

/// Remote-owned metadata of one sheet.
#[derive(Clone, Debug)]
pub(crate) struct SheetState {
    pub title: String,
    pub index: usize,
    pub sheet_type: String,
    pub grid: GridProperties,
    pub hidden: bool,
    pub right_to_left: bool,
    pub tab_color: Option<TabColor>,
}

impl From<&SheetProperties> for SheetState {
    fn from(props: &SheetProperties) -> Self {
        SheetState {
            title: props.title.clone(),
            index: props.index,
            sheet_type: props.sheet_type.clone(),
            grid: props.grid_properties,
            hidden: props.hidden,
            right_to_left: props.right_to_left,
            tab_color: props.tab_color,
        }
    }
}

pub(crate) struct SheetInner {
    pub id: i64,
    pub spreadsheet_id: String,
    pub dispatcher: Arc<Dispatcher>,
    pub state: RwLock<SheetState>,
    pub cells: GridCache,
}

/// One grid within a spreadsheet.
///
/// `Sheet` is a cheap, shared handle: clones refer to the same sheet, and a
/// handle captured before [`Spreadsheet::refresh`](super::Spreadsheet::refresh)
/// is the very object found in the refreshed sheet list when the sheet still
/// exists remotely. A handle kept after its sheet left the spreadsheet keeps
/// its cache but may report a stale index.
#[derive(Clone)]
pub struct Sheet {
    pub(crate) inner: Arc<SheetInner>,
}

impl Sheet {
    pub(crate) fn from_properties(
        dispatcher: Arc<Dispatcher>,
        spreadsheet_id: &str,
        props: &SheetProperties,
    ) -> Sheet {
        Sheet {
            inner: Arc::new(SheetInner {
                id: props.sheet_id,
                spreadsheet_id: spreadsheet_id.to_string(),
                dispatcher,
                state: RwLock::new(SheetState::from(props)),
                cells: GridCache::new(),
            }),
        }
    }

    pub(crate) fn apply_properties(&self, props: &SheetProperties) {
        *self.inner.state.write() = SheetState::from(props);
    }

    /// True when both handles are the same object, not merely the same id.
    pub fn ptr_eq(a: &Sheet, b: &Sheet) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    pub fn id(&self) -> i64 {
        self.inner.id
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.inner.spreadsheet_id
    }

    pub fn title(&self) -> String {
        self.inner.state.read().title.clone()
    }

    /// Position within the spreadsheet as of the last refresh.
    pub fn index(&self) -> usize {
        self.inner.state.read().index
    }

    pub fn sheet_type(&self) -> String {
        self.inner.state.read().sheet_type.clone()
    }

    pub fn hidden(&self) -> bool {
        self.inner.state.read().hidden
    }

    pub fn right_to_left(&self) -> bool {
        self.inner.state.read().right_to_left
    }

    pub fn tab_color(&self) -> Option<TabColor> {
        self.inner.state.read().tab_color
    }

    pub fn grid_properties(&self) -> GridProperties {
        self.inner.state.read().grid
    }

    pub fn row_count(&self) -> usize {
        self.grid_properties().row_count
    }

    pub fn column_count(&self) -> usize {
        self.grid_properties().column_count
    }

    pub fn frozen_row_count(&self) -> usize {
        self.grid_properties().frozen_row_count
    }

    pub fn frozen_column_count(&self) -> usize {
        self.grid_properties().frozen_column_count
    }

    pub fn hide_gridlines(&self) -> bool {
        self.grid_properties().hide_gridlines
    }

    pub fn row_group_control_after(&self) -> bool {
        self.grid_properties().row_group_control_after
    }

    pub fn column_group_control_after(&self) -> bool {
        self.grid_properties().column_group_control_after
    }

    /// The local sparse copy of the grid.
    pub fn cache(&self) -> &GridCache {
        &self.inner.cells
    }

    pub(crate) fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    /// Re-read this sheet's metadata and values.
    pub fn refresh(&self) -> Result<()> {
        self.refresh_properties()?;
        self.refresh_data()
    }

    pub(crate) fn refresh_properties(&self) -> Result<()> {
        let body = self.dispatcher().execute(
            Operation::GetMetadata,
            &wire::metadata_params(self.spreadsheet_id()),
        )?;
        let meta: SpreadsheetMetadata = wire::decode(Operation::GetMetadata, body)?;
        let entry = meta
            .sheets
            .iter()
            .find(|entry| entry.properties.sheet_id == self.id())
            .ok_or_else(|| {
                GridsyncError::NotFound(format!(
                    "sheet {} no longer exists in spreadsheet {}",
                    self.id(),
                    self.spreadsheet_id()
                ))
            })?;
        self.apply_properties(&entry.properties);
        Ok(())
    }

    /// Replace the cache with the remote values of the whole grid.
    pub(crate) fn refresh_data(&self) -> Result<()> {
        let state = self.inner.state.read().clone();
        if state.sheet_type != GRID_SHEET_TYPE {
            self.inner.cells.clear();
            return Ok(());
        }

        let range = A1Range::grid(&state.title, state.grid.column_count, state.grid.row_count)?;
        let body = self.dispatcher().execute(
            Operation::GetValues,
            &wire::get_values_params(self.spreadsheet_id(), &range, MajorDimension::Rows),
        )?;
        let values: ValueRange = wire::decode(Operation::GetValues, body)?;
        self.inner
            .cells
            .load(values.major_dimension, &values.cell_values());
        debug!(
            "loaded {} cells from {}",
            self.inner.cells.len(),
            range
        );
        Ok(())
    }

    /// Value at `address`; cells outside the populated area read as empty.
    pub fn get(&self, address: impl Into<Address>) -> Result<String> {
        let cell = address.into().normalize()?;
        Ok(self.inner.cells.get(&cell))
    }

    /// Row `row`, padded to the column count.
    pub fn get_row(&self, row: usize) -> Result<Vec<String>> {
        if row < 1 {
            return Err(GridsyncError::IndexOutOfRange(
                "rows are 1-based; there is no row 0".to_string(),
            ));
        }
        Ok(render_row(&self.inner.cells, row, self.column_count()))
    }

    /// Rows `start` up to but not including `stop` (default: every row).
    /// A `stop` past the last row is clamped to the row count.
    pub fn get_rows(&self, start: usize, stop: Option<usize>) -> Result<Vec<Vec<String>>> {
        let stop = check_span("row", start, stop, self.row_count())?;
        Ok(render_rows(&self.inner.cells, start..stop, self.column_count()))
    }

    pub fn get_column(&self, column: impl Into<Column>) -> Result<Vec<String>> {
        let col = column.into().resolve()?;
        Ok(render_column(&self.inner.cells, col, self.row_count()))
    }

    /// Columns `start` up to but not including `stop` (default: every column),
    /// clamped to the column count.
    pub fn get_columns(
        &self,
        start: impl Into<Column>,
        stop: Option<Column>,
    ) -> Result<Vec<Vec<String>>> {
        let start = start.into().resolve().map_err(|_| {
            GridsyncError::InvalidArgument("start column must be at least 1".to_string())
        })?;
        let stop = stop.map(|c| c.resolve()).transpose().map_err(|_| {
            GridsyncError::InvalidArgument("stop column must be at least 1".to_string())
        })?;
        let stop = check_span("column", start, stop, self.column_count())?;
        Ok(render_columns(&self.inner.cells, start..stop, self.row_count()))
    }

    /// Every row of the grid.
    pub fn rows(&self) -> Vec<Vec<String>> {
        render_rows(&self.inner.cells, 1..self.row_count() + 1, self.column_count())
    }

    /// Every column of the grid.
    pub fn columns(&self) -> Vec<Vec<String>> {
        render_columns(&self.inner.cells, 1..self.column_count() + 1, self.row_count())
    }

    /// True if any cell contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.inner.cells.any_contains(needle)
    }
}

fn check_span(what: &str, start: usize, stop: Option<usize>, count: usize) -> Result<usize> {
    if start < 1 {
        return Err(GridsyncError::InvalidArgument(format!(
            "start {} must be at least 1, not {}",
            what, start
        )));
    }
    match stop {
        Some(0) => Err(GridsyncError::InvalidArgument(format!(
            "stop {} must be at least 1, not 0",
            what
        ))),
        // Spans end at the last row or column of the grid.
        Some(stop) => Ok(stop.min(count.saturating_add(1)).max(start)),
        None => Ok(count.saturating_add(1)),
    }
}

/// Sheets compare by spreadsheet id and sheet id. Sheet ids are only unique
/// within one spreadsheet.
impl PartialEq for Sheet {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id() && self.spreadsheet_id() == other.spreadsheet_id()
    }
}

impl Eq for Sheet {}

impl fmt::Debug for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("Sheet")
            .field("id", &self.inner.id)
            .field("title", &state.title)
            .field("index", &state.index)
            .field("grid", &state.grid)
            .finish()
    }
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.read();
        write!(
            f,
            "{:?} (id {}, {} columns x {} rows)",
            state.title, self.inner.id, state.grid.column_count, state.grid.row_count
        )
    }
}
