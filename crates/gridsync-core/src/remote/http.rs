//! REST transport over HTTPS.

use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value as JsonValue;
use url::Url;

use super::{Operation, RemoteError, Transport};
use crate::error::{GridsyncError, Result};

const SHEETS_ENDPOINT: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const DRIVE_ENDPOINT: &str = "https://www.googleapis.com/drive/v3/files";

/// Transport holding one bearer token per scope (sheets and drive).
pub struct HttpTransport {
    client: Client,
    sheets_token: String,
    drive_token: String,
    sheets_base: Url,
    drive_base: Url,
}

impl HttpTransport {
    pub fn new(sheets_token: impl Into<String>, drive_token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("gridsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GridsyncError::RemoteFatal(RemoteError::transport(e.to_string())))?;
        Ok(HttpTransport {
            client,
            sheets_token: sheets_token.into(),
            drive_token: drive_token.into(),
            sheets_base: parse_base(SHEETS_ENDPOINT)?,
            drive_base: parse_base(DRIVE_ENDPOINT)?,
        })
    }

    /// Point the transport at other base URLs (e.g. a local emulator).
    pub fn with_endpoints(mut self, sheets: &str, drive: &str) -> Result<Self> {
        self.sheets_base = parse_base(sheets)?;
        self.drive_base = parse_base(drive)?;
        Ok(self)
    }

    fn request(
        &self,
        operation: Operation,
        params: &JsonValue,
    ) -> std::result::Result<RequestBuilder, RemoteError> {
        let builder = match operation {
            Operation::GetMetadata => {
                let id = param(params, "spreadsheetId")?;
                let mut builder = self.sheets(Method::GET, &[id])?;
                if let Some(fields) = optional(params, "fields") {
                    builder = builder.query(&[("fields", fields)]);
                }
                builder
            }
            Operation::BatchUpdate => {
                let id = param(params, "spreadsheetId")?;
                self.sheets(Method::POST, &[&format!("{}:batchUpdate", id)])?
                    .json(body(params))
            }
            Operation::GetValues => {
                let id = param(params, "spreadsheetId")?;
                let range = param(params, "range")?;
                let mut builder = self.sheets(Method::GET, &[id, "values", range])?;
                if let Some(major) = optional(params, "majorDimension") {
                    builder = builder.query(&[("majorDimension", major)]);
                }
                builder
            }
            Operation::UpdateValues => {
                let id = param(params, "spreadsheetId")?;
                let range = param(params, "range")?;
                let input = optional(params, "valueInputOption").unwrap_or("USER_ENTERED");
                self.sheets(Method::PUT, &[id, "values", range])?
                    .query(&[("valueInputOption", input)])
                    .json(body(params))
            }
            Operation::CopySheet => {
                let id = param(params, "spreadsheetId")?;
                let sheet_id = params
                    .get("sheetId")
                    .and_then(JsonValue::as_i64)
                    .ok_or_else(|| missing("sheetId"))?;
                self.sheets(Method::POST, &[id, "sheets", &format!("{}:copyTo", sheet_id)])?
                    .json(body(params))
            }
            Operation::CreateSpreadsheet => self.sheets(Method::POST, &[])?.json(body(params)),
            Operation::DriveExport => {
                let id = param(params, "fileId")?;
                let mime = param(params, "mimeType")?;
                self.drive(Method::GET, &[id, "export"])?
                    .query(&[("mimeType", mime)])
            }
            Operation::DriveDelete => {
                let id = param(params, "fileId")?;
                self.drive(Method::DELETE, &[id])?
            }
            Operation::DriveUpdate => {
                let id = param(params, "fileId")?;
                self.drive(Method::PATCH, &[id])?.json(body(params))
            }
            Operation::DriveList => {
                let mut query: Vec<(&str, &str)> = Vec::new();
                for key in ["q", "spaces", "fields", "pageToken"] {
                    if let Some(value) = optional(params, key) {
                        query.push((key, value));
                    }
                }
                self.drive(Method::GET, &[])?.query(&query)
            }
            Operation::DriveCreate => {
                let mut builder = self.drive(Method::POST, &[])?;
                if let Some(fields) = optional(params, "fields") {
                    builder = builder.query(&[("fields", fields)]);
                }
                builder.json(body(params))
            }
        };
        Ok(builder)
    }

    fn sheets(&self, method: Method, segments: &[&str]) -> std::result::Result<RequestBuilder, RemoteError> {
        let url = endpoint(&self.sheets_base, segments)?;
        Ok(self
            .client
            .request(method, url)
            .bearer_auth(&self.sheets_token))
    }

    fn drive(&self, method: Method, segments: &[&str]) -> std::result::Result<RequestBuilder, RemoteError> {
        let url = endpoint(&self.drive_base, segments)?;
        Ok(self
            .client
            .request(method, url)
            .bearer_auth(&self.drive_token))
    }
}

impl Transport for HttpTransport {
    fn call(&self, operation: Operation, params: &JsonValue) -> std::result::Result<Vec<u8>, RemoteError> {
        let response = self
            .request(operation, params)?
            .send()
            .map_err(|e| RemoteError::transport(e.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .map_err(|e| RemoteError::transport(e.to_string()))?;
        if status.is_success() {
            Ok(bytes.to_vec())
        } else {
            Err(RemoteError::from_body(status.as_u16(), &bytes))
        }
    }
}

fn parse_base(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| GridsyncError::InvalidArgument(format!("bad endpoint {}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(GridsyncError::InvalidArgument(format!(
            "endpoint {} cannot be a base URL",
            raw
        )));
    }
    Ok(url)
}

/// Append percent-encoded path segments to a base URL.
fn endpoint(base: &Url, segments: &[&str]) -> std::result::Result<Url, RemoteError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| RemoteError::transport(format!("{} cannot be a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn param<'a>(params: &'a JsonValue, key: &str) -> std::result::Result<&'a str, RemoteError> {
    optional(params, key).ok_or_else(|| missing(key))
}

fn optional<'a>(params: &'a JsonValue, key: &str) -> Option<&'a str> {
    params.get(key).and_then(JsonValue::as_str)
}

fn body(params: &JsonValue) -> &JsonValue {
    params.get("body").unwrap_or(&JsonValue::Null)
}

fn missing(key: &str) -> RemoteError {
    RemoteError::new(0, "INVALID_ARGUMENT", format!("missing request parameter {:?}", key))
}
