//! Workbook source implementations.
//!
//! This module contains adapters for the supported input formats. Both
//! implement [`SheetSource`]; [`WorkbookSource`] picks one by extension.

pub mod csv;
pub mod excel;

pub use self::csv::{CsvOptions, CsvSource, CSV_SHEET_NAME};
pub use self::excel::{ExcelGrid, ExcelSource};

use std::path::Path;

use sheetfold_core::{CellValue, MemoryGrid, SheetGrid, SheetSource};

use crate::error::{DataError, Result};

/// Any supported workbook, opened for sheet-by-sheet reading
pub enum WorkbookSource {
    /// Spreadsheet decoded by calamine
    Excel(ExcelSource),
    /// Delimited text file
    Csv(CsvSource),
}

impl WorkbookSource {
    /// Open `path`, choosing the decoder from its extension.
    ///
    /// `.csv` and `.tsv` are read as text; everything else goes to calamine.
    /// Fails with [`DataError::NotFound`] before any decoding when the path
    /// is not an existing file.
    pub fn open(path: impl AsRef<Path>, csv_options: &CsvOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DataError::NotFound(path.display().to_string()));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(WorkbookSource::Csv(CsvSource::with_options(
                path,
                csv_options.clone(),
            )?)),
            Some("tsv") => Ok(WorkbookSource::Csv(CsvSource::with_options(
                path,
                CsvOptions {
                    trim: csv_options.trim,
                    ..CsvOptions::tsv()
                },
            )?)),
            _ => Ok(WorkbookSource::Excel(ExcelSource::new(path)?)),
        }
    }
}

impl SheetSource for WorkbookSource {
    type Grid = WorkbookGrid;
    type Error = DataError;

    fn sheet_names(&self) -> Vec<String> {
        match self {
            WorkbookSource::Excel(source) => source.sheet_names(),
            WorkbookSource::Csv(source) => source.sheet_names(),
        }
    }

    fn sheet_by_name(&mut self, name: &str) -> Result<WorkbookGrid> {
        match self {
            WorkbookSource::Excel(source) => source.sheet_by_name(name).map(WorkbookGrid::Excel),
            WorkbookSource::Csv(source) => source.sheet_by_name(name).map(WorkbookGrid::Memory),
        }
    }

    fn release(&mut self, name: &str) {
        match self {
            WorkbookSource::Excel(source) => source.release(name),
            WorkbookSource::Csv(source) => source.release(name),
        }
    }

    fn release_all(&mut self) {
        match self {
            WorkbookSource::Excel(source) => source.release_all(),
            WorkbookSource::Csv(source) => source.release_all(),
        }
    }
}

/// Grid yielded by [`WorkbookSource`]
pub enum WorkbookGrid {
    /// Decoded worksheet
    Excel(ExcelGrid),
    /// Fully parsed text sheet
    Memory(MemoryGrid),
}

impl SheetGrid for WorkbookGrid {
    fn row_count(&self) -> usize {
        match self {
            WorkbookGrid::Excel(grid) => grid.row_count(),
            WorkbookGrid::Memory(grid) => grid.row_count(),
        }
    }

    fn column_count(&self) -> usize {
        match self {
            WorkbookGrid::Excel(grid) => grid.column_count(),
            WorkbookGrid::Memory(grid) => grid.column_count(),
        }
    }

    fn cell_value(&self, row: usize, column: usize) -> CellValue {
        match self {
            WorkbookGrid::Excel(grid) => grid.cell_value(row, column),
            WorkbookGrid::Memory(grid) => grid.cell_value(row, column),
        }
    }
}
