//! XLSX matrix writer using rust_xlsxwriter.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Workbook, Worksheet};
use sheetfold_core::{CellValue, MatrixWriter};
use tracing::info;

use crate::error::{DataError, Result};

/// Excel worksheet maximum row count.
pub const MAX_ROWS: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const MAX_COLUMNS: usize = 16_384;
/// Default name of the single output worksheet.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Writes a matrix into a new single-sheet workbook.
///
/// The workbook is buffered in memory; nothing touches the disk until
/// [`MatrixWriter::close`] saves it.
pub struct XlsxMatrixWriter {
    path: PathBuf,
    workbook: Workbook,
    worksheet: Worksheet,
}

impl XlsxMatrixWriter {
    /// Create a writer for `path` with one worksheet named `sheet_name`.
    pub fn create(path: impl AsRef<Path>, sheet_name: &str) -> Result<Self> {
        let mut worksheet = Worksheet::new();
        worksheet.set_name(sheet_name)?;

        Ok(Self {
            path: path.as_ref().to_path_buf(),
            workbook: Workbook::new(),
            worksheet,
        })
    }
}

impl MatrixWriter for XlsxMatrixWriter {
    type Error = DataError;

    fn write_cell(&mut self, row: usize, column: usize, value: &CellValue) -> Result<()> {
        let (row, col) = (cast_row_num(row)?, cast_col_num(column)?);
        match value {
            CellValue::Absent => {}
            CellValue::Number(n) => {
                self.worksheet.write_number(row, col, *n)?;
            }
            CellValue::Text(s) => {
                self.worksheet.write_string(row, col, s)?;
            }
            CellValue::Bool(b) => {
                self.worksheet.write_boolean(row, col, *b)?;
            }
        }
        Ok(())
    }

    fn close(self) -> Result<()> {
        let Self {
            path,
            mut workbook,
            worksheet,
        } = self;
        workbook.push_worksheet(worksheet);
        workbook.save(&path)?;
        info!(path = %path.display(), "workbook saved");
        Ok(())
    }
}

/// Give an output path the `.xlsx` extension.
///
/// `.xlsx` paths are kept, `.xls` paths gain an `x`, anything else gets
/// `.xlsx` appended.
pub fn normalize_output_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let lowered = path.to_string_lossy().to_ascii_lowercase();
    if lowered.ends_with(".xlsx") {
        return path.to_path_buf();
    }

    let mut normalized = path.as_os_str().to_owned();
    if lowered.ends_with(".xls") {
        normalized.push("x");
    } else {
        normalized.push(".xlsx");
    }
    PathBuf::from(normalized)
}

fn cast_row_num(value: usize) -> Result<u32> {
    if value >= MAX_ROWS {
        return Err(DataError::IndexOutOfRange(format!(
            "row {} exceeds the {} row limit",
            value, MAX_ROWS
        )));
    }
    Ok(value as u32)
}

fn cast_col_num(value: usize) -> Result<u16> {
    if value >= MAX_COLUMNS {
        return Err(DataError::IndexOutOfRange(format!(
            "column {} exceeds the {} column limit",
            value, MAX_COLUMNS
        )));
    }
    Ok(value as u16)
}
