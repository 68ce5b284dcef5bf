//! Error types for workbook sources and sinks.

use thiserror::Error;

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while reading or writing workbooks
#[derive(Debug, Error)]
pub enum DataError {
    /// Input path does not reference an existing file
    #[error("File not found: {0}")]
    NotFound(String),

    /// Failed to open workbook
    #[error("Failed to open workbook: {0}")]
    WorkbookOpen(String),

    /// Sheet not found in workbook
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Failed to decode a sheet
    #[error("Failed to decode sheet: {0}")]
    Decode(String),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// XLSX writer error
    #[error("Failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// Cell position beyond what the output format can hold
    #[error("Cell index out of range: {0}")]
    IndexOutOfRange(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Check whether this is the missing-input error
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound(_))
    }
}

impl From<calamine::Error> for DataError {
    fn from(err: calamine::Error) -> Self {
        DataError::Decode(err.to_string())
    }
}
