//! CSV data source: a delimited text file read as a one-sheet workbook.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use sheetfold_core::{MemoryGrid, SheetSource};

use crate::converter::CellConverter;
use crate::error::{DataError, Result};

/// Name of the single sheet a CSV file exposes
pub const CSV_SHEET_NAME: &str = "data";

/// Options for CSV parsing
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Whether to trim whitespace from fields
    pub trim: bool,
    /// Whether rows may have different field counts
    pub flexible: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            trim: true,
            flexible: true,
        }
    }
}

impl CsvOptions {
    /// Create options for tab-separated values (TSV)
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Default::default()
        }
    }

    /// Create options for semicolon-separated values (common in European locales)
    pub fn semicolon() -> Self {
        Self {
            delimiter: b';',
            ..Default::default()
        }
    }
}

/// CSV file data source
pub struct CsvSource {
    /// Path to the CSV file
    path: String,
    /// Parsing options
    options: CsvOptions,
}

impl CsvSource {
    /// Create a new CSV source from a file path
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_options(path, CsvOptions::default())
    }

    /// Create a new CSV source with custom options
    pub fn with_options(path: impl AsRef<Path>, options: CsvOptions) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        if !path.is_file() {
            return Err(DataError::NotFound(path_str));
        }

        Ok(Self {
            path: path_str,
            options,
        })
    }

    /// Read all records as a grid
    pub fn read_grid(&self) -> Result<MemoryGrid> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .has_headers(false)
            .trim(if self.options.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .flexible(self.options.flexible)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(CellConverter::from_field).collect());
        }

        Ok(MemoryGrid::from_rows(rows))
    }
}

impl SheetSource for CsvSource {
    type Grid = MemoryGrid;
    type Error = DataError;

    fn sheet_names(&self) -> Vec<String> {
        vec![CSV_SHEET_NAME.to_string()]
    }

    fn sheet_by_name(&mut self, name: &str) -> Result<MemoryGrid> {
        if name != CSV_SHEET_NAME {
            return Err(DataError::SheetNotFound(name.to_string()));
        }
        self.read_grid()
    }

    fn release(&mut self, _name: &str) {}

    fn release_all(&mut self) {}
}
