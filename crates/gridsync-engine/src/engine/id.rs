//! Spreadsheet identifiers and document URLs.

use regex::Regex;
use std::sync::OnceLock;

use super::error::{EngineError, Result};

/// Prefix of every spreadsheet document URL.
pub const SPREADSHEET_URL_PREFIX: &str = "https://docs.google.com/spreadsheets/d/";

fn id_re() -> &'static Regex {
    static ID_RE: OnceLock<Regex> = OnceLock::new();
    ID_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("id pattern must compile"))
}

/// Extract a spreadsheet id from a bare id or a full document URL.
///
/// For URLs the id runs from the end of the prefix up to the next `/`.
pub fn parse_spreadsheet_id(input: &str) -> Result<String> {
    let candidate = match input.strip_prefix(SPREADSHEET_URL_PREFIX) {
        Some(rest) => rest.split('/').next().unwrap_or_default(),
        None => input,
    };

    if !id_re().is_match(candidate) {
        return Err(EngineError::InvalidArgument(format!(
            "expected an alphanumeric spreadsheet id or a full URL, not {:?}",
            input
        )));
    }
    Ok(candidate.to_string())
}

/// Document URL for a spreadsheet id.
pub fn spreadsheet_url(id: &str) -> String {
    format!("{}{}/", SPREADSHEET_URL_PREFIX, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_url() {
        assert_eq!(
            parse_spreadsheet_id(
                "https://docs.google.com/spreadsheets/d/10tRbpHZYkfRecHyRHRjBLdQYoq5QWNBqZmH9tt4Tjng/edit#gid=0"
            )
            .unwrap(),
            "10tRbpHZYkfRecHyRHRjBLdQYoq5QWNBqZmH9tt4Tjng"
        );
        assert_eq!(
            parse_spreadsheet_id("https://docs.google.com/spreadsheets/d/abc_-123").unwrap(),
            "abc_-123"
        );
    }

    #[test]
    fn test_bare_id_passes_through() {
        assert_eq!(parse_spreadsheet_id("abc-DEF_123").unwrap(), "abc-DEF_123");
    }

    #[test]
    fn test_rejects_other_input() {
        for bad in [
            "",
            "https://docs.google.com/spread sheets/d/10tRbpHZYkfRecHyRHRjBLdQYoq5QWNBqZmH9tt4Tjng/edit",
            "https://google.com",
            "My Budget",
            "https://docs.google.com/spreadsheets/d//edit",
        ] {
            assert!(parse_spreadsheet_id(bad).is_err(), "{:?}", bad);
        }
    }

    #[test]
    fn test_url_round_trip() {
        let url = spreadsheet_url("abc123");
        assert_eq!(url, "https://docs.google.com/spreadsheets/d/abc123/");
        assert_eq!(parse_spreadsheet_id(&url).unwrap(), "abc123");
    }
}
