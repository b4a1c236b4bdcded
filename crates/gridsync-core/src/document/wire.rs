//! JSON shapes exchanged with the remote service.

use gridsync_engine::engine::{A1Range, CellValue, GridProperties, MajorDimension, TabColor};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value as JsonValue, json};

use crate::error::{GridsyncError, Result};
use crate::remote::Operation;

pub(crate) const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SpreadsheetMetadata {
    pub spreadsheet_id: String,
    #[serde(default)]
    pub properties: SpreadsheetProperties,
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SpreadsheetProperties {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SheetEntry {
    pub properties: SheetProperties,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SheetProperties {
    pub sheet_id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub index: usize,
    #[serde(default = "grid_sheet_type")]
    pub sheet_type: String,
    #[serde(default)]
    pub grid_properties: GridProperties,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub right_to_left: bool,
    #[serde(default)]
    pub tab_color: Option<TabColor>,
}

pub(crate) const GRID_SHEET_TYPE: &str = "GRID";

fn grid_sheet_type() -> String {
    GRID_SHEET_TYPE.to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ValueRange {
    #[serde(default)]
    pub major_dimension: MajorDimension,
    #[serde(default)]
    pub values: Vec<Vec<JsonValue>>,
}

impl ValueRange {
    pub fn cell_values(&self) -> Vec<Vec<CellValue>> {
        self.values
            .iter()
            .map(|line| line.iter().map(CellValue::from_json).collect())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileList {
    #[serde(default)]
    pub files: Vec<FileEntry>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileEntry {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedFile {
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BatchUpdateResponse {
    #[serde(default)]
    pub replies: Vec<JsonValue>,
}

impl BatchUpdateResponse {
    /// Sheet id assigned by the first `addSheet` reply, if any.
    pub fn added_sheet_id(&self) -> Option<i64> {
        self.replies
            .iter()
            .find_map(|reply| reply.pointer("/addSheet/properties/sheetId"))
            .and_then(JsonValue::as_i64)
    }
}

/// Deserialize a response body, naming the operation on failure.
pub(crate) fn decode<T: DeserializeOwned>(operation: Operation, body: JsonValue) -> Result<T> {
    serde_json::from_value(body).map_err(|e| {
        GridsyncError::UnexpectedResponse(format!("{} response: {}", operation, e))
    })
}

pub(crate) fn metadata_params(spreadsheet_id: &str) -> JsonValue {
    json!({ "spreadsheetId": spreadsheet_id })
}

pub(crate) fn batch_params(spreadsheet_id: &str, requests: Vec<JsonValue>) -> JsonValue {
    json!({
        "spreadsheetId": spreadsheet_id,
        "body": { "requests": requests },
    })
}

/// An `updateSheetProperties` request touching only `fields`.
pub(crate) fn update_sheet_properties(sheet_id: i64, mut properties: JsonValue, fields: &str) -> JsonValue {
    properties["sheetId"] = json!(sheet_id);
    json!({
        "updateSheetProperties": {
            "properties": properties,
            "fields": fields,
        }
    })
}

pub(crate) fn get_values_params(spreadsheet_id: &str, range: &A1Range, major: MajorDimension) -> JsonValue {
    json!({
        "spreadsheetId": spreadsheet_id,
        "range": range.to_string(),
        "majorDimension": major,
    })
}

pub(crate) fn update_values_params(
    spreadsheet_id: &str,
    range: &A1Range,
    major: MajorDimension,
    values: &[Vec<CellValue>],
) -> JsonValue {
    let range = range.to_string();
    json!({
        "spreadsheetId": spreadsheet_id,
        "range": range,
        "valueInputOption": "USER_ENTERED",
        "body": {
            "range": range,
            "majorDimension": major,
            "values": values,
        },
    })
}
