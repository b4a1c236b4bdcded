use std::fmt;
use std::str::FromStr;

use crate::error::GridsyncError;

/// File formats a spreadsheet can be exported as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Ods,
    Pdf,
    /// Zipped HTML, one page per sheet.
    Html,
    Tsv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 6] = [
        ExportFormat::Csv,
        ExportFormat::Xlsx,
        ExportFormat::Ods,
        ExportFormat::Pdf,
        ExportFormat::Html,
        ExportFormat::Tsv,
    ];

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Ods => "application/x-vnd.oasis.opendocument.spreadsheet",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Html => "application/zip",
            ExportFormat::Tsv => "text/tab-separated-values",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Ods => "ods",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Html => "zip",
            ExportFormat::Tsv => "tsv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = GridsyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "ods" => Ok(ExportFormat::Ods),
            "pdf" => Ok(ExportFormat::Pdf),
            "html" | "zip" => Ok(ExportFormat::Html),
            "tsv" => Ok(ExportFormat::Tsv),
            other => Err(GridsyncError::InvalidArgument(format!(
                "unknown export format {:?} (expected csv, xlsx, ods, pdf, html or tsv)",
                other
            ))),
        }
    }
}
