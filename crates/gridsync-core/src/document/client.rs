//! Entry point: opening, creating and listing spreadsheets.

use gridsync_engine::engine::parse_spreadsheet_id;
use log::debug;
use serde_json::json;
use std::sync::Arc;

use super::spreadsheet::Spreadsheet;
use super::wire::{self, CreatedFile, FileList, SPREADSHEET_MIME_TYPE, SpreadsheetMetadata};
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::{GridsyncError, Result};
use crate::quota::QuotaLimiter;
use crate::remote::{HttpTransport, Operation, Transport};

const DEFAULT_TITLE: &str = "Untitled spreadsheet";

/// One entry of [`Client::list_spreadsheets`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpreadsheetListing {
    pub id: String,
    pub name: String,
}

/// Handle on the remote service shared by every spreadsheet it opens.
#[derive(Clone)]
pub struct Client {
    dispatcher: Arc<Dispatcher>,
}

impl Client {
    pub fn new(transport: Arc<dyn Transport>) -> Client {
        Client::with_dispatcher(Arc::new(Dispatcher::new(transport)))
    }

    pub fn with_dispatcher(dispatcher: Arc<Dispatcher>) -> Client {
        Client { dispatcher }
    }

    /// HTTP client using the tokens named in `config`.
    ///
    /// The quota settings are applied to the process-wide limiter.
    pub fn from_config(config: &Config) -> Result<Client> {
        let sheets_token = token_from_env(&config.auth.sheets_token_env)?;
        let drive_token = token_from_env(&config.auth.drive_token_env)?;
        let transport = HttpTransport::new(sheets_token, drive_token)?;

        let limiter = QuotaLimiter::shared();
        limiter.configure(config.quota_config());
        let dispatcher = Dispatcher::new(Arc::new(transport))
            .with_limiter(limiter)
            .with_retry(config.retry_policy());
        Ok(Client::with_dispatcher(Arc::new(dispatcher)))
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Open a spreadsheet by id, document URL or exact title.
    ///
    /// Input that does not parse as an id, or an id the service does not
    /// know, is looked up as a title among the accessible spreadsheets.
    pub fn open(&self, key: &str) -> Result<Spreadsheet> {
        if let Ok(id) = parse_spreadsheet_id(key) {
            match Spreadsheet::load(self.dispatcher.clone(), &id) {
                Ok(spreadsheet) => return Ok(spreadsheet),
                Err(GridsyncError::RemoteFatal(err)) if matches!(err.code, 400 | 403 | 404) => {
                    debug!("{:?} is not an accessible id ({}); trying it as a title", key, err);
                }
                Err(err) => return Err(err),
            }
        }
        self.open_by_title(key)
    }

    pub fn open_by_id(&self, id: &str) -> Result<Spreadsheet> {
        Spreadsheet::load(self.dispatcher.clone(), id)
    }

    /// Open the single spreadsheet titled `title`.
    pub fn open_by_title(&self, title: &str) -> Result<Spreadsheet> {
        let matches: Vec<SpreadsheetListing> = self
            .list_spreadsheets()?
            .into_iter()
            .filter(|listing| listing.name == title)
            .collect();
        match matches.as_slice() {
            [] => Err(GridsyncError::NotFound(format!(
                "no spreadsheet with id, url or title {:?}",
                title
            ))),
            [only] => self.open_by_id(&only.id),
            _ => Err(GridsyncError::AmbiguousLookup(format!(
                "{} spreadsheets are titled {:?}; use the id or url instead",
                matches.len(),
                title
            ))),
        }
    }

    /// Create a spreadsheet (default title "Untitled spreadsheet").
    pub fn create_spreadsheet(&self, title: Option<&str>) -> Result<Spreadsheet> {
        let title = title.unwrap_or(DEFAULT_TITLE);
        let body = self.dispatcher.execute(
            Operation::CreateSpreadsheet,
            &json!({ "body": { "properties": { "title": title } } }),
        )?;
        let created: SpreadsheetMetadata = wire::decode(Operation::CreateSpreadsheet, body)?;
        self.open_by_id(&created.spreadsheet_id)
    }

    /// Create an empty spreadsheet inside the drive folder `folder_id`.
    pub fn create_in_folder(&self, title: &str, folder_id: &str) -> Result<Spreadsheet> {
        let body = self.dispatcher.execute(
            Operation::DriveCreate,
            &json!({
                "fields": "id",
                "body": {
                    "name": title,
                    "mimeType": SPREADSHEET_MIME_TYPE,
                    "parents": [folder_id],
                },
            }),
        )?;
        let created: CreatedFile = wire::decode(Operation::DriveCreate, body)?;
        self.open_by_id(&created.id)
    }

    /// Every spreadsheet the credentials can see, following pagination.
    pub fn list_spreadsheets(&self) -> Result<Vec<SpreadsheetListing>> {
        let mut listings = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut params = json!({
                "q": format!("mimeType='{}'", SPREADSHEET_MIME_TYPE),
                "spaces": "drive",
                "fields": "nextPageToken, files(id, name)",
            });
            if let Some(token) = &page_token {
                params["pageToken"] = json!(token);
            }
            let body = self.dispatcher.execute(Operation::DriveList, &params)?;
            let page: FileList = wire::decode(Operation::DriveList, body)?;
            listings.extend(page.files.into_iter().map(|file| SpreadsheetListing {
                id: file.id,
                name: file.name,
            }));
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        Ok(listings)
    }
}

fn token_from_env(var: &str) -> Result<String> {
    match std::env::var(var) {
        Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(GridsyncError::InvalidArgument(format!(
            "no access token: set the {} environment variable",
            var
        ))),
    }
}
