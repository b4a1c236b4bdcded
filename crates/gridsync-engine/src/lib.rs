//! gridsync_engine - grid model for the remote spreadsheet client.

pub mod engine;
