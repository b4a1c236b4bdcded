//! In-memory stand-ins for the wall clock and the remote service.

use gridsync_engine::engine::{A1Range, CellValue, GridProperties, MajorDimension, TabColor};
use parking_lot::Mutex;
use serde_json::{Value as JsonValue, json};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::clock::Clock;
use crate::dispatch::Dispatcher;
use crate::quota::{QuotaConfig, QuotaLimiter};
use crate::remote::{Operation, RemoteError, Transport};

/// Clock whose sleeps advance time instantly.
pub struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    /// Move time forward without recording a sleep.
    pub fn advance(&self, by: Duration) {
        *self.offset.lock() += by;
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }

    pub fn total_slept(&self) -> Duration {
        self.sleeps.lock().iter().sum()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
        self.advance(duration);
    }
}

struct FakeSheet {
    id: i64,
    title: String,
    grid: GridProperties,
    tab_color: Option<TabColor>,
    cells: BTreeMap<(usize, usize), String>,
}

impl FakeSheet {
    fn new(id: i64, title: &str) -> Self {
        FakeSheet {
            id,
            title: title.to_string(),
            grid: GridProperties::default(),
            tab_color: None,
            cells: BTreeMap::new(),
        }
    }

    fn properties(&self, index: usize) -> JsonValue {
        let mut props = json!({
            "sheetId": self.id,
            "title": self.title,
            "index": index,
            "sheetType": "GRID",
            "gridProperties": self.grid,
        });
        if let Some(color) = self.tab_color {
            props["tabColor"] = json!(color);
        }
        props
    }

    fn prune(&mut self) {
        let (rows, cols) = (self.grid.row_count, self.grid.column_count);
        self.cells.retain(|&(row, col), _| row <= rows && col <= cols);
    }
}

struct FakeSpreadsheet {
    title: String,
    sheets: Vec<FakeSheet>,
    trashed: bool,
    parents: Vec<String>,
}

impl FakeSpreadsheet {
    fn metadata(&self, id: &str) -> JsonValue {
        let sheets: Vec<JsonValue> = self
            .sheets
            .iter()
            .enumerate()
            .map(|(i, s)| json!({ "properties": s.properties(i) }))
            .collect();
        json!({
            "spreadsheetId": id,
            "properties": { "title": self.title },
            "sheets": sheets,
        })
    }

    fn position(&self, sheet_id: i64) -> Result<usize, RemoteError> {
        self.sheets
            .iter()
            .position(|s| s.id == sheet_id)
            .ok_or_else(|| bad_request(format!("No sheet with id: {}", sheet_id)))
    }

    fn by_title(&mut self, title: &str) -> Result<&mut FakeSheet, RemoteError> {
        self.sheets
            .iter_mut()
            .find(|s| s.title == title)
            .ok_or_else(|| bad_request(format!("Unable to parse range: {}", title)))
    }

    fn check_title_free(&self, title: &str, except: Option<i64>) -> Result<(), RemoteError> {
        if self
            .sheets
            .iter()
            .any(|s| s.title == title && Some(s.id) != except)
        {
            return Err(bad_request(format!(
                "A sheet with the name \"{}\" already exists.",
                title
            )));
        }
        Ok(())
    }
}

#[derive(Default)]
struct FakeState {
    spreadsheets: BTreeMap<String, FakeSpreadsheet>,
    next_sheet_id: i64,
    next_file: usize,
    failures: VecDeque<RemoteError>,
    calls: Vec<(Operation, JsonValue)>,
    page_size: Option<usize>,
}

/// Minimal in-memory model of the remote spreadsheet and drive services.
///
/// Values writes outside the grid are rejected the way the real service
/// rejects them, so callers that forget to enlarge first fail loudly.
#[derive(Default)]
pub struct FakeRemote {
    state: Mutex<FakeState>,
}

impl FakeRemote {
    pub fn new() -> Self {
        let remote = FakeRemote::default();
        remote.state.lock().next_sheet_id = 100;
        remote
    }

    /// Spreadsheet with one default `Sheet1` (id 0, 26 x 1000).
    pub fn create_spreadsheet_with_id(&self, id: &str, title: &str) {
        self.state.lock().spreadsheets.insert(
            id.to_string(),
            FakeSpreadsheet {
                title: title.to_string(),
                sheets: vec![FakeSheet::new(0, "Sheet1")],
                trashed: false,
                parents: Vec::new(),
            },
        );
    }

    /// Add a sheet behind the client's back; returns its id.
    pub fn add_sheet_directly(&self, spreadsheet_id: &str, title: &str) -> i64 {
        let mut state = self.state.lock();
        let id = state.next_sheet_id;
        state.next_sheet_id += 1;
        let doc = state
            .spreadsheets
            .get_mut(spreadsheet_id)
            .expect("unknown spreadsheet");
        doc.sheets.push(FakeSheet::new(id, title));
        id
    }

    pub fn remove_sheet_directly(&self, spreadsheet_id: &str, sheet_id: i64) {
        let mut state = self.state.lock();
        let doc = state
            .spreadsheets
            .get_mut(spreadsheet_id)
            .expect("unknown spreadsheet");
        doc.sheets.retain(|s| s.id != sheet_id);
    }

    /// Reverse the sheet order behind the client's back.
    pub fn reverse_sheets_directly(&self, spreadsheet_id: &str) {
        let mut state = self.state.lock();
        let doc = state
            .spreadsheets
            .get_mut(spreadsheet_id)
            .expect("unknown spreadsheet");
        doc.sheets.reverse();
    }

    pub fn set_cell_directly(&self, spreadsheet_id: &str, sheet: &str, col: usize, row: usize, value: &str) {
        let mut state = self.state.lock();
        let doc = state
            .spreadsheets
            .get_mut(spreadsheet_id)
            .expect("unknown spreadsheet");
        let sheet = doc.by_title(sheet).expect("unknown sheet");
        sheet.cells.insert((row, col), value.to_string());
    }

    pub fn set_grid_directly(&self, spreadsheet_id: &str, sheet: &str, grid: GridProperties) {
        let mut state = self.state.lock();
        let doc = state
            .spreadsheets
            .get_mut(spreadsheet_id)
            .expect("unknown spreadsheet");
        let sheet = doc.by_title(sheet).expect("unknown sheet");
        sheet.grid = grid;
        sheet.prune();
    }

    pub fn cell(&self, spreadsheet_id: &str, sheet: &str, col: usize, row: usize) -> String {
        let mut state = self.state.lock();
        let doc = state
            .spreadsheets
            .get_mut(spreadsheet_id)
            .expect("unknown spreadsheet");
        let sheet = doc.by_title(sheet).expect("unknown sheet");
        sheet.cells.get(&(row, col)).cloned().unwrap_or_default()
    }

    pub fn grid(&self, spreadsheet_id: &str, sheet: &str) -> GridProperties {
        let mut state = self.state.lock();
        let doc = state
            .spreadsheets
            .get_mut(spreadsheet_id)
            .expect("unknown spreadsheet");
        doc.by_title(sheet).expect("unknown sheet").grid
    }

    pub fn sheet_titles(&self, spreadsheet_id: &str) -> Vec<String> {
        let state = self.state.lock();
        state.spreadsheets[spreadsheet_id]
            .sheets
            .iter()
            .map(|s| s.title.clone())
            .collect()
    }

    pub fn title(&self, spreadsheet_id: &str) -> String {
        self.state.lock().spreadsheets[spreadsheet_id].title.clone()
    }

    pub fn exists(&self, spreadsheet_id: &str) -> bool {
        self.state.lock().spreadsheets.contains_key(spreadsheet_id)
    }

    pub fn is_trashed(&self, spreadsheet_id: &str) -> bool {
        self.state.lock().spreadsheets[spreadsheet_id].trashed
    }

    pub fn parents(&self, spreadsheet_id: &str) -> Vec<String> {
        self.state.lock().spreadsheets[spreadsheet_id].parents.clone()
    }

    pub fn spreadsheet_ids(&self) -> Vec<String> {
        self.state.lock().spreadsheets.keys().cloned().collect()
    }

    /// Fail the next call with `err` instead of serving it.
    pub fn fail_next(&self, err: RemoteError) {
        self.state.lock().failures.push_back(err);
    }

    pub fn set_page_size(&self, size: usize) {
        self.state.lock().page_size = Some(size);
    }

    pub fn call_count(&self, operation: Operation) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|(op, _)| *op == operation)
            .count()
    }

    pub fn calls(&self) -> Vec<(Operation, JsonValue)> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    fn serve(state: &mut FakeState, operation: Operation, params: &JsonValue) -> Result<JsonValue, RemoteError> {
        match operation {
            Operation::GetMetadata => {
                let id = str_param(params, "spreadsheetId")?;
                Ok(doc(state, id)?.metadata(id))
            }
            Operation::GetValues => {
                let id = str_param(params, "spreadsheetId")?;
                let range = parse_range(str_param(params, "range")?)?;
                let major: MajorDimension = params
                    .get("majorDimension")
                    .map(|m| serde_json::from_value(m.clone()))
                    .transpose()
                    .map_err(|e| bad_request(e.to_string()))?
                    .unwrap_or_default();
                let sheet = doc_mut(state, id)?.by_title(&range.sheet_title)?;
                check_bounds(sheet, &range)?;
                Ok(read_values(sheet, &range, major))
            }
            Operation::UpdateValues => {
                let id = str_param(params, "spreadsheetId")?;
                let range = parse_range(str_param(params, "range")?)?;
                let body = params.get("body").cloned().unwrap_or(JsonValue::Null);
                let major: MajorDimension = body
                    .get("majorDimension")
                    .map(|m| serde_json::from_value(m.clone()))
                    .transpose()
                    .map_err(|e| bad_request(e.to_string()))?
                    .unwrap_or_default();
                let values: Vec<Vec<JsonValue>> = body
                    .get("values")
                    .map(|v| serde_json::from_value(v.clone()))
                    .transpose()
                    .map_err(|e| bad_request(e.to_string()))?
                    .unwrap_or_default();
                let sheet = doc_mut(state, id)?.by_title(&range.sheet_title)?;
                check_bounds(sheet, &range)?;
                write_values(sheet, &range, major, &values)?;
                Ok(json!({ "updatedRange": range.to_string() }))
            }
            Operation::BatchUpdate => {
                let id = str_param(params, "spreadsheetId")?.to_string();
                let requests = params
                    .pointer("/body/requests")
                    .and_then(JsonValue::as_array)
                    .cloned()
                    .unwrap_or_default();
                let mut replies = Vec::new();
                for request in &requests {
                    replies.push(batch_request(state, &id, request)?);
                }
                Ok(json!({ "spreadsheetId": id, "replies": replies }))
            }
            Operation::CopySheet => {
                let id = str_param(params, "spreadsheetId")?;
                let sheet_id = params
                    .get("sheetId")
                    .and_then(JsonValue::as_i64)
                    .ok_or_else(|| bad_request("missing sheetId"))?;
                let dest = params
                    .pointer("/body/destinationSpreadsheetId")
                    .and_then(JsonValue::as_str)
                    .ok_or_else(|| bad_request("missing destinationSpreadsheetId"))?
                    .to_string();
                let source = doc(state, id)?;
                let original = &source.sheets[source.position(sheet_id)?];
                let (title, grid, tab_color, cells) = (
                    original.title.clone(),
                    original.grid,
                    original.tab_color,
                    original.cells.clone(),
                );
                let new_id = state.next_sheet_id;
                state.next_sheet_id += 1;
                let target = doc_mut(state, &dest)?;
                let mut copy_title = format!("Copy of {}", title);
                let mut n = 2;
                while target.check_title_free(&copy_title, None).is_err() {
                    copy_title = format!("Copy of {} {}", title, n);
                    n += 1;
                }
                let mut copy = FakeSheet::new(new_id, &copy_title);
                copy.grid = grid;
                copy.tab_color = tab_color;
                copy.cells = cells;
                target.sheets.push(copy);
                let index = target.sheets.len() - 1;
                Ok(target.sheets[index].properties(index))
            }
            Operation::CreateSpreadsheet => {
                let title = params
                    .pointer("/body/properties/title")
                    .and_then(JsonValue::as_str)
                    .unwrap_or("Untitled spreadsheet")
                    .to_string();
                let id = new_file_id(state);
                let created = FakeSpreadsheet {
                    title,
                    sheets: vec![FakeSheet::new(0, "Sheet1")],
                    trashed: false,
                    parents: Vec::new(),
                };
                let metadata = created.metadata(&id);
                state.spreadsheets.insert(id, created);
                Ok(metadata)
            }
            Operation::DriveCreate => {
                let name = params
                    .pointer("/body/name")
                    .and_then(JsonValue::as_str)
                    .unwrap_or("Untitled spreadsheet")
                    .to_string();
                let parents: Vec<String> = params
                    .pointer("/body/parents")
                    .map(|p| serde_json::from_value(p.clone()))
                    .transpose()
                    .map_err(|e| bad_request(e.to_string()))?
                    .unwrap_or_default();
                let id = new_file_id(state);
                state.spreadsheets.insert(
                    id.clone(),
                    FakeSpreadsheet {
                        title: name,
                        sheets: vec![FakeSheet::new(0, "Sheet1")],
                        trashed: false,
                        parents,
                    },
                );
                Ok(json!({ "id": id }))
            }
            Operation::DriveList => {
                let offset: usize = match params.get("pageToken").and_then(JsonValue::as_str) {
                    Some(token) => token.parse().map_err(|_| bad_request("bad page token"))?,
                    None => 0,
                };
                let page_size = state.page_size.unwrap_or(100);
                let live: Vec<JsonValue> = state
                    .spreadsheets
                    .iter()
                    .filter(|(_, doc)| !doc.trashed)
                    .map(|(id, doc)| json!({ "id": id, "name": doc.title }))
                    .collect();
                let page: Vec<JsonValue> = live.iter().skip(offset).take(page_size).cloned().collect();
                let mut body = json!({ "files": page });
                if offset + page_size < live.len() {
                    body["nextPageToken"] = json!((offset + page_size).to_string());
                }
                Ok(body)
            }
            Operation::DriveDelete => {
                let id = str_param(params, "fileId")?;
                state
                    .spreadsheets
                    .remove(id)
                    .ok_or_else(|| not_found(id))?;
                Ok(JsonValue::Null)
            }
            Operation::DriveUpdate => {
                let id = str_param(params, "fileId")?.to_string();
                let body = params.get("body").cloned().unwrap_or(JsonValue::Null);
                let doc = doc_mut(state, &id)?;
                if let Some(trashed) = body.get("trashed").and_then(JsonValue::as_bool) {
                    doc.trashed = trashed;
                }
                if let Some(name) = body.get("name").and_then(JsonValue::as_str) {
                    doc.title = name.to_string();
                }
                Ok(json!({ "id": id, "name": doc.title }))
            }
            Operation::DriveExport => unreachable!("served as raw bytes"),
        }
    }

    fn export(state: &FakeState, params: &JsonValue) -> Result<Vec<u8>, RemoteError> {
        let id = str_param(params, "fileId")?;
        let mime = str_param(params, "mimeType")?;
        let doc = doc(state, id)?;
        if mime != "text/csv" {
            return Ok(format!("{} export of {}", mime, id).into_bytes());
        }
        let sheet = &doc.sheets[0];
        let mut out = String::new();
        let max_row = sheet.cells.keys().map(|&(r, _)| r).max().unwrap_or(0);
        let max_col = sheet.cells.keys().map(|&(_, c)| c).max().unwrap_or(0);
        for row in 1..=max_row {
            let line: Vec<String> = (1..=max_col)
                .map(|col| sheet.cells.get(&(row, col)).cloned().unwrap_or_default())
                .collect();
            out.push_str(&line.join(","));
            out.push_str("\r\n");
        }
        Ok(out.into_bytes())
    }
}

impl Transport for FakeRemote {
    fn call(&self, operation: Operation, params: &JsonValue) -> Result<Vec<u8>, RemoteError> {
        let mut state = self.state.lock();
        state.calls.push((operation, params.clone()));
        if let Some(err) = state.failures.pop_front() {
            return Err(err);
        }
        if operation == Operation::DriveExport {
            return FakeRemote::export(&state, params);
        }
        let body = FakeRemote::serve(&mut state, operation, params)?;
        if body.is_null() {
            return Ok(Vec::new());
        }
        Ok(body.to_string().into_bytes())
    }
}

/// Fake remote plus a dispatcher over it that never really sleeps.
pub fn fake_dispatcher() -> (Arc<FakeRemote>, Arc<ManualClock>, Arc<Dispatcher>) {
    let remote = Arc::new(FakeRemote::new());
    let clock = Arc::new(ManualClock::new());
    let limiter = Arc::new(QuotaLimiter::with_clock(QuotaConfig::default(), clock.clone()));
    let dispatcher = Dispatcher::new(remote.clone())
        .with_limiter(limiter)
        .with_clock(clock.clone());
    (remote, clock, Arc::new(dispatcher))
}

fn batch_request(state: &mut FakeState, id: &str, request: &JsonValue) -> Result<JsonValue, RemoteError> {
    if let Some(update) = request.get("updateSheetProperties") {
        let props = update.get("properties").cloned().unwrap_or(JsonValue::Null);
        let sheet_id = props
            .get("sheetId")
            .and_then(JsonValue::as_i64)
            .ok_or_else(|| bad_request("missing sheetId"))?;
        let doc = doc_mut(state, id)?;
        let pos = doc.position(sheet_id)?;
        if let Some(title) = props.get("title").and_then(JsonValue::as_str) {
            doc.check_title_free(title, Some(sheet_id))?;
            doc.sheets[pos].title = title.to_string();
        }
        if let Some(color) = props.get("tabColor") {
            let color: Option<TabColor> =
                serde_json::from_value(color.clone()).map_err(|e| bad_request(e.to_string()))?;
            doc.sheets[pos].tab_color = color;
        }
        if let Some(grid) = props.get("gridProperties") {
            let mut merged = serde_json::to_value(doc.sheets[pos].grid)
                .map_err(|e| bad_request(e.to_string()))?;
            if let (Some(target), Some(source)) = (merged.as_object_mut(), grid.as_object()) {
                for (k, v) in source {
                    target.insert(k.clone(), v.clone());
                }
            }
            let grid: GridProperties =
                serde_json::from_value(merged).map_err(|e| bad_request(e.to_string()))?;
            if grid.validate().is_err() {
                return Err(bad_request("invalid grid properties"));
            }
            doc.sheets[pos].grid = grid;
            doc.sheets[pos].prune();
        }
        if let Some(index) = props.get("index").and_then(JsonValue::as_u64) {
            let index = index as usize;
            let sheet = doc.sheets.remove(pos);
            // The requested index counts positions before the sheet is removed.
            let target = if index > pos { index - 1 } else { index };
            let target = target.min(doc.sheets.len());
            doc.sheets.insert(target, sheet);
        }
        return Ok(json!({}));
    }

    if let Some(add) = request.get("addSheet") {
        let sheet_id = state.next_sheet_id;
        state.next_sheet_id += 1;
        let doc = doc_mut(state, id)?;
        let props = add.get("properties").cloned().unwrap_or(JsonValue::Null);
        let title = match props.get("title").and_then(JsonValue::as_str) {
            Some(title) => title.to_string(),
            None => {
                let mut n = doc.sheets.len() + 1;
                while doc.check_title_free(&format!("Sheet{}", n), None).is_err() {
                    n += 1;
                }
                format!("Sheet{}", n)
            }
        };
        doc.check_title_free(&title, None)?;
        let index = props
            .get("index")
            .and_then(JsonValue::as_u64)
            .map(|i| (i as usize).min(doc.sheets.len()))
            .unwrap_or(doc.sheets.len());
        doc.sheets.insert(index, FakeSheet::new(sheet_id, &title));
        return Ok(json!({ "addSheet": { "properties": doc.sheets[index].properties(index) } }));
    }

    if let Some(delete) = request.get("deleteSheet") {
        let sheet_id = delete
            .get("sheetId")
            .and_then(JsonValue::as_i64)
            .ok_or_else(|| bad_request("missing sheetId"))?;
        let doc = doc_mut(state, id)?;
        let pos = doc.position(sheet_id)?;
        if doc.sheets.len() == 1 {
            return Err(bad_request("You can't remove all the sheets in a document."));
        }
        doc.sheets.remove(pos);
        return Ok(json!({}));
    }

    if let Some(update) = request.get("updateSpreadsheetProperties") {
        let doc = doc_mut(state, id)?;
        if let Some(title) = update.pointer("/properties/title").and_then(JsonValue::as_str) {
            doc.title = title.to_string();
        }
        return Ok(json!({}));
    }

    Err(bad_request(format!("unsupported request {}", request)))
}

fn read_values(sheet: &FakeSheet, range: &A1Range, major: MajorDimension) -> JsonValue {
    let (outer, inner) = match major {
        MajorDimension::Rows => (
            range.start.row()..=range.end.row(),
            range.start.col()..=range.end.col(),
        ),
        MajorDimension::Columns => (
            range.start.col()..=range.end.col(),
            range.start.row()..=range.end.row(),
        ),
    };
    let mut lines: Vec<Vec<String>> = outer
        .map(|o| {
            let mut line: Vec<String> = inner
                .clone()
                .map(|i| {
                    let key = match major {
                        MajorDimension::Rows => (o, i),
                        MajorDimension::Columns => (i, o),
                    };
                    sheet.cells.get(&key).cloned().unwrap_or_default()
                })
                .collect();
            while line.last().is_some_and(String::is_empty) {
                line.pop();
            }
            line
        })
        .collect();
    while lines.last().is_some_and(Vec::is_empty) {
        lines.pop();
    }

    let mut body = json!({ "range": range.to_string(), "majorDimension": major });
    if !lines.is_empty() {
        body["values"] = json!(lines);
    }
    body
}

fn write_values(
    sheet: &mut FakeSheet,
    range: &A1Range,
    major: MajorDimension,
    values: &[Vec<JsonValue>],
) -> Result<(), RemoteError> {
    for (o, line) in values.iter().enumerate() {
        for (i, value) in line.iter().enumerate() {
            let (col, row) = match major {
                MajorDimension::Rows => (range.start.col() + i, range.start.row() + o),
                MajorDimension::Columns => (range.start.col() + o, range.start.row() + i),
            };
            if col > range.end.col() || row > range.end.row() {
                return Err(bad_request("Requested writing within range, but tried to write outside it"));
            }
            let value = CellValue::from_json(value);
            if value.is_empty() {
                sheet.cells.remove(&(row, col));
            } else {
                sheet.cells.insert((row, col), value.into_string());
            }
        }
    }
    Ok(())
}

fn check_bounds(sheet: &FakeSheet, range: &A1Range) -> Result<(), RemoteError> {
    if range.end.row() > sheet.grid.row_count || range.end.col() > sheet.grid.column_count {
        return Err(bad_request(format!(
            "Range ({}) exceeds grid limits. Max rows: {}, max columns: {}",
            range, sheet.grid.row_count, sheet.grid.column_count
        )));
    }
    Ok(())
}

fn parse_range(raw: &str) -> Result<A1Range, RemoteError> {
    A1Range::parse(raw).map_err(|e| bad_request(e.to_string()))
}

fn new_file_id(state: &mut FakeState) -> String {
    state.next_file += 1;
    format!("file-{:04}", state.next_file)
}

fn doc<'a>(state: &'a FakeState, id: &str) -> Result<&'a FakeSpreadsheet, RemoteError> {
    state.spreadsheets.get(id).ok_or_else(|| not_found(id))
}

fn doc_mut<'a>(state: &'a mut FakeState, id: &str) -> Result<&'a mut FakeSpreadsheet, RemoteError> {
    state.spreadsheets.get_mut(id).ok_or_else(|| not_found(id))
}

fn str_param<'a>(params: &'a JsonValue, key: &str) -> Result<&'a str, RemoteError> {
    params
        .get(key)
        .and_then(JsonValue::as_str)
        .ok_or_else(|| bad_request(format!("missing {}", key)))
}

fn bad_request(message: impl Into<String>) -> RemoteError {
    RemoteError::new(400, "INVALID_ARGUMENT", message)
}

fn not_found(id: &str) -> RemoteError {
    RemoteError::new(404, "NOT_FOUND", format!("Requested entity was not found: {}", id))
}
