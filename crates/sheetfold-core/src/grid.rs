//! Sheet grids and the sources that produce them.
//!
//! A [`SheetSource`] is a workbook opened by some decoder. Its sheets are
//! consumed one at a time through [`SheetIter`], which releases each sheet
//! before loading the next and releases the workbook once every sheet has
//! been yielded. Peak memory is one sheet plus the matrix being built.

use crate::value::CellValue;

/// Read-only 0-indexed view of one sheet's cells.
pub trait SheetGrid {
    /// Number of rows to scan
    fn row_count(&self) -> usize;

    /// Number of columns to scan in every row
    fn column_count(&self) -> usize;

    /// Raw read at `(row, column)`. Reads outside the data are absent.
    fn cell_value(&self, row: usize, column: usize) -> CellValue;
}

/// An opened workbook exposing its sheets by name.
pub trait SheetSource {
    /// Grid type yielded for each sheet
    type Grid: SheetGrid;
    /// Decode error type
    type Error;

    /// Sheet identifiers in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Decode one sheet
    fn sheet_by_name(&mut self, name: &str) -> Result<Self::Grid, Self::Error>;

    /// Drop whatever the source holds for one sheet
    fn release(&mut self, name: &str);

    /// Drop all workbook-level resources
    fn release_all(&mut self);

    /// Iterate the sheets in order, releasing each after use
    fn sheets(&mut self) -> SheetIter<'_, Self>
    where
        Self: Sized,
    {
        SheetIter::new(self)
    }
}

/// Ordered, releasing iterator over a source's sheets.
pub struct SheetIter<'a, S: SheetSource> {
    source: &'a mut S,
    names: std::vec::IntoIter<String>,
    current: Option<String>,
    done: bool,
}

impl<'a, S: SheetSource> SheetIter<'a, S> {
    /// Start iterating `source` from its first sheet
    pub fn new(source: &'a mut S) -> Self {
        let names = source.sheet_names().into_iter();
        Self {
            source,
            names,
            current: None,
            done: false,
        }
    }
}

impl<S: SheetSource> Iterator for SheetIter<'_, S> {
    type Item = Result<S::Grid, S::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Some(previous) = self.current.take() {
            self.source.release(&previous);
        }

        match self.names.next() {
            Some(name) => {
                let grid = self.source.sheet_by_name(&name);
                self.current = Some(name);
                Some(grid)
            }
            None => {
                self.source.release_all();
                self.done = true;
                None
            }
        }
    }
}

/// In-memory grid, rectangular by its widest row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryGrid {
    rows: Vec<Vec<CellValue>>,
    columns: usize,
}

impl MemoryGrid {
    /// Build a grid from rows; shorter rows read as absent past their end.
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, columns }
    }
}

impl SheetGrid for MemoryGrid {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.columns
    }

    fn cell_value(&self, row: usize, column: usize) -> CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .cloned()
            .unwrap_or_default()
    }
}

impl<G: SheetGrid + ?Sized> SheetGrid for &G {
    fn row_count(&self) -> usize {
        (**self).row_count()
    }

    fn column_count(&self) -> usize {
        (**self).column_count()
    }

    fn cell_value(&self, row: usize, column: usize) -> CellValue {
        (**self).cell_value(row, column)
    }
}
