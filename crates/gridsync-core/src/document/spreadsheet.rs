//! Spreadsheets and sheet-list reconciliation.

use gridsync_engine::engine::{DEFAULT_COLUMN_COUNT, DEFAULT_ROW_COUNT, spreadsheet_url};
use log::debug;
use serde_json::json;
use std::fmt;
use std::sync::Arc;

use super::export::ExportFormat;
use super::sheet::Sheet;
use super::wire::{self, BatchUpdateResponse, SpreadsheetMetadata};
use crate::dispatch::Dispatcher;
use crate::error::{GridsyncError, Result};
use crate::remote::Operation;

/// Selects one sheet: a position (negative counts from the end) or a title.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SheetKey {
    Index(isize),
    Title(String),
}

impl From<isize> for SheetKey {
    fn from(index: isize) -> Self {
        SheetKey::Index(index)
    }
}

impl From<i32> for SheetKey {
    fn from(index: i32) -> Self {
        SheetKey::Index(index as isize)
    }
}

impl From<usize> for SheetKey {
    fn from(index: usize) -> Self {
        SheetKey::Index(index as isize)
    }
}

impl From<&str> for SheetKey {
    fn from(title: &str) -> Self {
        SheetKey::Title(title.to_string())
    }
}

impl From<String> for SheetKey {
    fn from(title: String) -> Self {
        SheetKey::Title(title)
    }
}

/// A `start:stop:step` selection over the sheet list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetSlice {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: isize,
}

impl SheetSlice {
    pub fn new(start: Option<isize>, stop: Option<isize>) -> Self {
        SheetSlice {
            start,
            stop,
            step: 1,
        }
    }

    pub fn all() -> Self {
        SheetSlice::new(None, None)
    }

    pub fn with_step(mut self, step: isize) -> Self {
        self.step = step;
        self
    }

    /// Positions selected from a list of `len`, with negative bounds counted
    /// from the end and clamped like sequence slicing.
    fn positions(&self, len: usize) -> Result<Vec<usize>> {
        let step = self.nonzero_step()?;
        let len = len as isize;
        let clamp = |bound: isize, low: isize, high: isize| {
            let bound = if bound < 0 { bound + len } else { bound };
            bound.clamp(low, high)
        };
        let (start, stop) = if step > 0 {
            (
                self.start.map_or(0, |s| clamp(s, 0, len)),
                self.stop.map_or(len, |s| clamp(s, 0, len)),
            )
        } else {
            (
                self.start.map_or(len - 1, |s| clamp(s, -1, len - 1)),
                self.stop.map_or(-1, |s| clamp(s, -1, len - 1)),
            )
        };
        Ok(stepped(start, stop, step)
            .map(|i| i as usize)
            .collect())
    }

    /// Positions a deletion touches. Negative bounds select nothing.
    fn deletion_positions(&self, len: usize) -> Result<Vec<usize>> {
        let step = self.nonzero_step()?;
        let start = self.start.unwrap_or(0);
        let stop = self.stop.unwrap_or(len as isize);
        if start < 0 || stop < 0 {
            return Ok(Vec::new());
        }
        Ok(stepped(start, stop, step)
            .filter(|&i| i >= 0 && (i as usize) < len)
            .map(|i| i as usize)
            .collect())
    }

    fn nonzero_step(&self) -> Result<isize> {
        if self.step == 0 {
            return Err(GridsyncError::InvalidArgument(
                "slice step cannot be zero".to_string(),
            ));
        }
        Ok(self.step)
    }
}

fn stepped(start: isize, stop: isize, step: isize) -> impl Iterator<Item = isize> {
    let mut next = start;
    std::iter::from_fn(move || {
        let more = if step > 0 { next < stop } else { next > stop };
        if !more {
            return None;
        }
        let current = next;
        next += step;
        Some(current)
    })
}

/// A remote spreadsheet and its ordered list of sheets.
pub struct Spreadsheet {
    id: String,
    title: String,
    dispatcher: Arc<Dispatcher>,
    sheets: Vec<Sheet>,
}

impl Spreadsheet {
    /// Wrap an existing spreadsheet id and load every sheet.
    pub fn load(dispatcher: Arc<Dispatcher>, id: &str) -> Result<Spreadsheet> {
        let mut spreadsheet = Spreadsheet {
            id: id.to_string(),
            title: String::new(),
            dispatcher,
            sheets: Vec::new(),
        };
        spreadsheet.refresh()?;
        Ok(spreadsheet)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn url(&self) -> String {
        spreadsheet_url(&self.id)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_titles(&self) -> Vec<String> {
        self.sheets.iter().map(Sheet::title).collect()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sheet> {
        self.sheets.iter()
    }

    /// Re-read the sheet list and reconcile it with the local one.
    ///
    /// Sheets gone remotely are dropped, sheets still present keep their
    /// `Sheet` object (refreshed in place) and new sheets get fresh objects.
    /// The list is ordered as the remote lists it and replaced in one step.
    pub fn refresh(&mut self) -> Result<()> {
        let body = self
            .dispatcher
            .execute(Operation::GetMetadata, &wire::metadata_params(&self.id))?;
        let meta: SpreadsheetMetadata = wire::decode(Operation::GetMetadata, body)?;

        let mut reused = 0;
        let mut next = Vec::with_capacity(meta.sheets.len());
        for entry in &meta.sheets {
            let props = &entry.properties;
            let sheet = match self.sheet_by_id(props.sheet_id) {
                Some(existing) => {
                    existing.apply_properties(props);
                    reused += 1;
                    existing
                }
                None => Sheet::from_properties(self.dispatcher.clone(), &self.id, props),
            };
            sheet.refresh_data()?;
            next.push(sheet);
        }

        debug!(
            "refreshed spreadsheet {}: {} sheets ({} kept, {} new, {} dropped)",
            self.id,
            next.len(),
            reused,
            next.len() - reused,
            self.sheets.len().saturating_sub(reused)
        );
        self.title = meta.properties.title;
        self.sheets = next;
        Ok(())
    }

    pub(crate) fn sheet_by_id(&self, id: i64) -> Option<Sheet> {
        self.sheets.iter().find(|s| s.id() == id).cloned()
    }

    /// Look up a sheet by position or title.
    pub fn sheet(&self, key: impl Into<SheetKey>) -> Result<Sheet> {
        let position = self.position(&key.into())?;
        Ok(self.sheets[position].clone())
    }

    pub fn slice(&self, slice: SheetSlice) -> Result<Vec<Sheet>> {
        Ok(slice
            .positions(self.sheets.len())?
            .into_iter()
            .map(|i| self.sheets[i].clone())
            .collect())
    }

    fn position(&self, key: &SheetKey) -> Result<usize> {
        match key {
            SheetKey::Title(title) => self
                .sheets
                .iter()
                .position(|s| s.title() == *title)
                .ok_or_else(|| {
                    GridsyncError::NotFound(format!(
                        "no sheet titled {:?}; titles are {:?}",
                        title,
                        self.sheet_titles()
                    ))
                }),
            SheetKey::Index(index) => self.normalize_index(*index).ok_or_else(|| {
                GridsyncError::IndexOutOfRange(format!(
                    "sheet index {} is out of range ({} to {})",
                    index,
                    -(self.sheets.len() as isize),
                    self.sheets.len() as isize - 1
                ))
            }),
        }
    }

    fn normalize_index(&self, index: isize) -> Option<usize> {
        let len = self.sheets.len() as isize;
        let index = if index < 0 { index + len } else { index };
        (0..len).contains(&index).then_some(index as usize)
    }

    pub fn set_title(&mut self, title: &str) -> Result<()> {
        let request = json!({
            "updateSpreadsheetProperties": {
                "properties": { "title": title },
                "fields": "title",
            }
        });
        self.dispatcher.execute(
            Operation::BatchUpdate,
            &wire::batch_params(&self.id, vec![request]),
        )?;
        self.title = title.to_string();
        Ok(())
    }

    /// Add a default-sized sheet; see [`Spreadsheet::create_sheet_with_size`].
    pub fn create_sheet(&mut self, title: &str, index: Option<usize>) -> Result<Sheet> {
        self.create_sheet_with_size(title, index, DEFAULT_COLUMN_COUNT, DEFAULT_ROW_COUNT)
    }

    /// Add a sheet at `index` (default: last), refresh, then resize it.
    ///
    /// An empty title lets the remote service pick one. Creation and resize
    /// are separate requests; if the resize fails the new sheet stays at its
    /// default size.
    pub fn create_sheet_with_size(
        &mut self,
        title: &str,
        index: Option<usize>,
        columns: usize,
        rows: usize,
    ) -> Result<Sheet> {
        if columns < 1 || rows < 1 {
            return Err(GridsyncError::InvalidArgument(format!(
                "a sheet needs at least one row and column, not {}x{}",
                columns, rows
            )));
        }
        let index = index.unwrap_or(self.sheets.len());
        if index > self.sheets.len() {
            return Err(GridsyncError::IndexOutOfRange(format!(
                "cannot insert a sheet at {} in a spreadsheet of {}",
                index,
                self.sheets.len()
            )));
        }

        let mut properties = json!({ "index": index });
        if !title.is_empty() {
            properties["title"] = json!(title);
        }
        let body = self.dispatcher.execute(
            Operation::BatchUpdate,
            &wire::batch_params(&self.id, vec![json!({ "addSheet": { "properties": properties } })]),
        )?;
        let response: BatchUpdateResponse = wire::decode(Operation::BatchUpdate, body)?;
        self.refresh()?;

        let sheet = match response.added_sheet_id().and_then(|id| self.sheet_by_id(id)) {
            Some(sheet) => sheet,
            None => self.sheet(index)?,
        };
        sheet.resize(Some(columns), Some(rows))?;
        Ok(sheet)
    }

    /// Move a sheet so it ends up at `to` (negative counts from the end), then
    /// refresh every position.
    pub fn move_sheet(&mut self, key: impl Into<SheetKey>, to: isize) -> Result<()> {
        let from = self.position(&key.into())?;
        let to = self.normalize_index(to).ok_or_else(|| {
            GridsyncError::InvalidOperation(format!(
                "cannot move a sheet to {} in a spreadsheet of {}",
                to,
                self.sheets.len()
            ))
        })?;
        if to == from {
            return Ok(());
        }

        // The remote index counts positions before the sheet is taken out.
        let remote_index = if to > from { to + 1 } else { to };
        let sheet = &self.sheets[from];
        let request =
            wire::update_sheet_properties(sheet.id(), json!({ "index": remote_index }), "index");
        self.dispatcher.execute(
            Operation::BatchUpdate,
            &wire::batch_params(&self.id, vec![request]),
        )?;
        self.refresh()
    }

    /// Delete one sheet. The last remaining sheet cannot be deleted.
    pub fn delete_sheet(&mut self, key: impl Into<SheetKey>) -> Result<()> {
        let position = self.position(&key.into())?;
        self.delete_positions(&[position])
    }

    /// Delete the selected sheets. A negative start or stop deletes nothing;
    /// a selection covering every sheet is refused.
    pub fn delete_slice(&mut self, slice: SheetSlice) -> Result<()> {
        let positions = slice.deletion_positions(self.sheets.len())?;
        if positions.is_empty() {
            return Ok(());
        }
        self.delete_positions(&positions)
    }

    fn delete_positions(&mut self, positions: &[usize]) -> Result<()> {
        let mut ids: Vec<i64> = positions.iter().map(|&i| self.sheets[i].id()).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.len() >= self.sheets.len() {
            return Err(GridsyncError::InvalidOperation(
                "cannot delete every sheet; a spreadsheet keeps at least one".to_string(),
            ));
        }

        let requests = ids
            .iter()
            .map(|id| json!({ "deleteSheet": { "sheetId": id } }))
            .collect();
        self.dispatcher
            .execute(Operation::BatchUpdate, &wire::batch_params(&self.id, requests))?;
        self.refresh()
    }

    /// Move the spreadsheet to the trash, or delete it outright.
    pub fn delete(&self, permanent: bool) -> Result<()> {
        if permanent {
            self.dispatcher
                .execute(Operation::DriveDelete, &json!({ "fileId": self.id }))?;
        } else {
            self.dispatcher.execute(
                Operation::DriveUpdate,
                &json!({ "fileId": self.id, "body": { "trashed": true } }),
            )?;
        }
        Ok(())
    }

    /// Export the document in `format` and return the file contents.
    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>> {
        self.dispatcher.execute_raw(
            Operation::DriveExport,
            &json!({ "fileId": self.id, "mimeType": format.mime_type() }),
        )
    }
}

impl<'a> IntoIterator for &'a Spreadsheet {
    type Item = &'a Sheet;
    type IntoIter = std::slice::Iter<'a, Sheet>;

    fn into_iter(self) -> Self::IntoIter {
        self.sheets.iter()
    }
}

/// Spreadsheets compare by remote id.
impl PartialEq for Spreadsheet {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Spreadsheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spreadsheet")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("sheets", &self.sheets)
            .finish()
    }
}

impl fmt::Display for Spreadsheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({} sheets)", self.title, self.sheets.len())
    }
}
