//! Excel/ODS workbook source using calamine.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use sheetfold_core::{CellValue, SheetGrid, SheetSource};
use tracing::debug;

use crate::converter::CellConverter;
use crate::error::{DataError, Result};

/// Excel workbook source (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`)
pub struct ExcelSource {
    /// Path to the workbook
    path: String,
    /// Open decoder; `None` once released
    workbook: Option<Sheets<BufReader<File>>>,
    /// Sheet names cache
    sheet_names: Vec<String>,
}

impl ExcelSource {
    /// Open a workbook from a file path
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        if !path.is_file() {
            return Err(DataError::NotFound(path_str));
        }

        let workbook = open_workbook_auto(path)
            .map_err(|e| DataError::WorkbookOpen(format!("{}: {}", path_str, e)))?;
        let sheet_names = workbook.sheet_names().to_vec();

        Ok(Self {
            path: path_str,
            workbook: Some(workbook),
            sheet_names,
        })
    }

}

impl SheetSource for ExcelSource {
    type Grid = ExcelGrid;
    type Error = DataError;

    fn sheet_names(&self) -> Vec<String> {
        self.sheet_names.clone()
    }

    fn sheet_by_name(&mut self, name: &str) -> Result<ExcelGrid> {
        if !self.sheet_names.iter().any(|n| n == name) {
            return Err(DataError::SheetNotFound(name.to_string()));
        }

        let workbook = self.workbook.as_mut().ok_or_else(|| {
            DataError::WorkbookOpen(format!("{}: workbook already released", self.path))
        })?;

        let range = workbook
            .worksheet_range(name)
            .map_err(|e| DataError::Decode(format!("{}: {}", name, e)))?;

        Ok(ExcelGrid::new(range))
    }

    fn release(&mut self, name: &str) {
        // xlsx/xlsm/xlsb decode sheets on demand and the range is owned by the
        // grid. xls and ods hold every decoded sheet until `release_all`.
        debug!(sheet = name, "sheet released");
    }

    fn release_all(&mut self) {
        if self.workbook.take().is_some() {
            debug!(path = %self.path, "workbook released");
        }
    }
}

/// One decoded worksheet, addressed by absolute position.
///
/// Leading empty rows and columns count towards the grid's size, so row 0
/// is always the sheet's first row even when the used range starts lower.
pub struct ExcelGrid {
    range: Range<Data>,
    rows: usize,
    columns: usize,
}

impl ExcelGrid {
    /// Wrap a decoded range
    pub fn new(range: Range<Data>) -> Self {
        let (rows, columns) = range
            .end()
            .map(|(row, col)| (row as usize + 1, col as usize + 1))
            .unwrap_or((0, 0));
        Self {
            range,
            rows,
            columns,
        }
    }
}

impl SheetGrid for ExcelGrid {
    fn row_count(&self) -> usize {
        self.rows
    }

    fn column_count(&self) -> usize {
        self.columns
    }

    fn cell_value(&self, row: usize, column: usize) -> CellValue {
        if row >= self.rows || column >= self.columns {
            return CellValue::Absent;
        }
        self.range
            .get_value((row as u32, column as u32))
            .map(CellConverter::from_data)
            .unwrap_or_default()
    }
}
