//! # sheetfold-data
//!
//! Workbook sources and sinks for sheetfold: read every sheet of an Excel,
//! ODS or CSV file, fold them with `sheetfold-core`, and write the merged
//! table to a new `.xlsx` workbook.
//!
//! ## Features
//!
//! - **Excel Support**: Read `.xlsx`, `.xlsm`, `.xlsb`, `.xls` and `.ods`
//!   using `calamine`, one sheet at a time
//! - **CSV Support**: Read delimited text as a one-sheet workbook
//! - **XLSX Output**: Write the merged matrix with `rust_xlsxwriter`
//!
//! ## Example
//!
//! ```rust,ignore
//! use sheetfold_data::MergeEngine;
//!
//! let engine = MergeEngine::new();
//!
//! // Sum every sheet cell by cell
//! engine.accumulate_positional("monthly.xlsx", "total.xlsx")?;
//!
//! // Group rows by their leading key, keeping a one-row header
//! engine.accumulate_grouped("monthly.xlsx", "by_item.xlsx", 1)?;
//! ```

pub mod converter;
pub mod error;
pub mod sources;
pub mod writer;

use std::path::Path;

use sheetfold_core::{accumulate_grouped, accumulate_positional, write_matrix, Matrix, SheetSource};
use tracing::info;

// Re-exports
pub use converter::CellConverter;
pub use error::{DataError, Result};
pub use sources::{CsvOptions, CsvSource, ExcelSource, WorkbookGrid, WorkbookSource};
pub use writer::{normalize_output_path, XlsxMatrixWriter, DEFAULT_SHEET_NAME};

/// Options shared by both merge entry points
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Name of the output worksheet
    pub sheet_name: String,
    /// Parsing options for `.csv`/`.tsv` inputs
    pub csv: CsvOptions,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            csv: CsvOptions::default(),
        }
    }
}

/// Outcome of one merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    /// Sheets read from the input
    pub sheets: usize,
    /// Rows in the merged table
    pub rows: usize,
    /// Cells written to the output
    pub cells_written: usize,
}

/// Merge engine: open, fold, write
#[derive(Debug, Clone, Default)]
pub struct MergeEngine {
    options: MergeOptions,
}

impl MergeEngine {
    /// Create an engine with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom options
    pub fn with_options(options: MergeOptions) -> Self {
        Self { options }
    }

    /// Combine cells at the same position across all sheets of `input`
    /// and write the result to `output`.
    ///
    /// Fails with [`DataError::NotFound`] before any sheet is read (and
    /// before any output exists) when `input` is not a file.
    pub fn accumulate_positional(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<MergeSummary> {
        let mut source = WorkbookSource::open(input.as_ref(), &self.options.csv)?;
        let sheets = source.sheet_names().len();

        let matrix = accumulate_positional(source.sheets())?;

        self.write(&matrix, output.as_ref(), sheets)
    }

    /// Combine rows sharing a leading key across all sheets of `input` and
    /// write the result to `output`. The first `skip_rows` rows of every
    /// sheet are combined by position instead.
    pub fn accumulate_grouped(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        skip_rows: usize,
    ) -> Result<MergeSummary> {
        let mut source = WorkbookSource::open(input.as_ref(), &self.options.csv)?;
        let sheets = source.sheet_names().len();

        let matrix = accumulate_grouped(source.sheets(), skip_rows)?;

        self.write(&matrix, output.as_ref(), sheets)
    }

    /// Sheet names of `input`, in workbook order
    pub fn list_sheets(&self, input: impl AsRef<Path>) -> Result<Vec<String>> {
        let source = WorkbookSource::open(input.as_ref(), &self.options.csv)?;
        Ok(source.sheet_names())
    }

    fn write(&self, matrix: &Matrix, output: &Path, sheets: usize) -> Result<MergeSummary> {
        let writer = XlsxMatrixWriter::create(output, &self.options.sheet_name)?;
        let cells_written = write_matrix(matrix, writer)?;

        info!(
            output = %output.display(),
            sheets,
            rows = matrix.len(),
            cells = cells_written,
            "merged table written"
        );

        Ok(MergeSummary {
            sheets,
            rows: matrix.len(),
            cells_written,
        })
    }
}
