//! Sheet metadata writes: title, tab color and grid properties.
//!
//! Grid-property setters are read-modify-write: they re-fetch the remote grid
//! metadata first so a dimension changed by another client is not clobbered,
//! then send every grid field in one request. The two steps are not atomic.

use gridsync_engine::engine::{GridProperties, TabColor};
use serde_json::json;

use super::sheet::Sheet;
use super::wire;
use crate::error::{GridsyncError, Result};
use crate::remote::Operation;

impl Sheet {
    pub fn set_title(&self, title: &str) -> Result<()> {
        if title.is_empty() {
            return Err(GridsyncError::InvalidArgument(
                "sheet title cannot be empty".to_string(),
            ));
        }
        self.send_properties(json!({ "title": title }), "title")?;
        self.inner.state.write().title = title.to_string();
        Ok(())
    }

    /// Set or (with `None`) clear the tab color.
    pub fn set_tab_color(&self, color: Option<TabColor>) -> Result<()> {
        if let Some(color) = &color {
            color.validate()?;
        }
        self.send_properties(json!({ "tabColor": color }), "tabColor")?;
        self.inner.state.write().tab_color = color;
        Ok(())
    }

    /// Re-read this sheet's metadata and return its current grid properties.
    pub fn refresh_dimensions(&self) -> Result<GridProperties> {
        self.refresh_properties()?;
        Ok(self.grid_properties())
    }

    /// Write every grid property at once.
    pub fn set_dimensions(&self, grid: GridProperties) -> Result<()> {
        grid.validate()?;
        self.send_properties(json!({ "gridProperties": grid }), "gridProperties")?;
        self.inner.state.write().grid = grid;
        self.inner
            .cells
            .retain_within(grid.column_count, grid.row_count);
        Ok(())
    }

    pub fn set_row_count(&self, rows: usize) -> Result<()> {
        self.modify_grid(|grid| grid.row_count = rows)
    }

    pub fn set_column_count(&self, columns: usize) -> Result<()> {
        self.modify_grid(|grid| grid.column_count = columns)
    }

    /// Freeze the first `rows` rows; 0 unfreezes.
    pub fn set_frozen_row_count(&self, rows: usize) -> Result<()> {
        self.modify_grid(|grid| grid.frozen_row_count = rows)
    }

    pub fn set_frozen_column_count(&self, columns: usize) -> Result<()> {
        self.modify_grid(|grid| grid.frozen_column_count = columns)
    }

    pub fn set_hide_gridlines(&self, hide: bool) -> Result<()> {
        self.modify_grid(|grid| grid.hide_gridlines = hide)
    }

    pub fn set_row_group_control_after(&self, after: bool) -> Result<()> {
        self.modify_grid(|grid| grid.row_group_control_after = after)
    }

    pub fn set_column_group_control_after(&self, after: bool) -> Result<()> {
        self.modify_grid(|grid| grid.column_group_control_after = after)
    }

    // Checked against local state before any request, then again against the
    // re-fetched state.
    fn modify_grid(&self, change: impl Fn(&mut GridProperties)) -> Result<()> {
        let mut local = self.grid_properties();
        change(&mut local);
        local.validate()?;

        let mut fresh = self.refresh_dimensions()?;
        change(&mut fresh);
        self.set_dimensions(fresh)
    }

    fn send_properties(&self, properties: serde_json::Value, fields: &str) -> Result<()> {
        let request = wire::update_sheet_properties(self.id(), properties, fields);
        self.dispatcher().execute(
            Operation::BatchUpdate,
            &wire::batch_params(self.spreadsheet_id(), vec![request]),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Spreadsheet;
    use crate::test_support::{FakeRemote, fake_dispatcher};
    use std::sync::Arc;

    fn sheet() -> (Arc<FakeRemote>, Sheet) {
        let (remote, _clock, dispatcher) = fake_dispatcher();
        remote.create_spreadsheet_with_id("doc", "Budget");
        let spreadsheet = Spreadsheet::load(dispatcher, "doc").unwrap();
        (remote, spreadsheet.sheet(0).unwrap())
    }

    #[test]
    fn test_set_title_round_trips() {
        let (remote, sheet) = sheet();
        sheet.set_title("Ledger").unwrap();
        assert_eq!(sheet.title(), "Ledger");
        assert_eq!(remote.sheet_titles("doc"), vec!["Ledger"]);
        assert!(sheet.set_title("").is_err());
    }

    #[test]
    fn test_tab_color_set_and_clear() {
        let (_remote, sheet) = sheet();
        let red = TabColor::rgb(1.0, 0.0, 0.0).unwrap();
        sheet.set_tab_color(Some(red)).unwrap();
        assert_eq!(sheet.tab_color(), Some(red));
        sheet.refresh().unwrap();
        assert_eq!(sheet.tab_color(), Some(red));
        sheet.set_tab_color(None).unwrap();
        sheet.refresh().unwrap();
        assert_eq!(sheet.tab_color(), None);
    }

    #[test]
    fn test_setter_refreshes_before_writing() {
        let (remote, sheet) = sheet();
        // Another client shrinks the sheet.
        remote.set_grid_directly(
            "doc",
            "Sheet1",
            GridProperties {
                row_count: 40,
                ..GridProperties::default()
            },
        );
        sheet.set_column_count(10).unwrap();

        let grid = remote.grid("doc", "Sheet1");
        assert_eq!(grid.column_count, 10);
        assert_eq!(grid.row_count, 40);
        assert_eq!(sheet.row_count(), 40);
    }

    #[test]
    fn test_frozen_invariant_checked_before_any_request() {
        let (remote, sheet) = sheet();
        remote.clear_calls();
        assert!(matches!(
            sheet.set_frozen_row_count(1000),
            Err(GridsyncError::InvalidArgument(_))
        ));
        assert!(matches!(
            sheet.set_row_count(0),
            Err(GridsyncError::InvalidArgument(_))
        ));
        assert!(remote.calls().is_empty());
    }

    #[test]
    fn test_freeze_and_unfreeze() {
        let (remote, sheet) = sheet();
        sheet.set_frozen_row_count(2).unwrap();
        sheet.set_frozen_column_count(1).unwrap();
        assert_eq!(remote.grid("doc", "Sheet1").frozen_row_count, 2);
        assert!(matches!(
            sheet.set_row_count(2),
            Err(GridsyncError::InvalidArgument(_))
        ));
        sheet.set_frozen_row_count(0).unwrap();
        assert_eq!(sheet.frozen_row_count(), 0);
        assert_eq!(sheet.frozen_column_count(), 1);
    }

    #[test]
    fn test_flags() {
        let (remote, sheet) = sheet();
        sheet.set_hide_gridlines(true).unwrap();
        sheet.set_row_group_control_after(true).unwrap();
        sheet.set_column_group_control_after(true).unwrap();
        let grid = remote.grid("doc", "Sheet1");
        assert!(grid.hide_gridlines && grid.row_group_control_after && grid.column_group_control_after);
        assert!(sheet.hide_gridlines());
    }
}
