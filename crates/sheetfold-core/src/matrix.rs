//! The output matrix and the writer boundary it is handed to.

use crate::rule::combine;
use crate::value::CellValue;

/// One output row; grows, never shrinks.
pub type Row = Vec<CellValue>;

/// Ordered rows of cell values built in memory by an accumulator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matrix {
    rows: Vec<Row>,
}

impl Matrix {
    /// Create an empty matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// All rows, in output order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the matrix has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `(row, column)`; `None` outside the written area.
    pub fn get(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Number of present (non-absent) cells
    pub fn present_cells(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|value| !value.is_absent())
            .count()
    }

    /// Mutable access to `row`, appending empty rows until it exists.
    pub fn row_mut(&mut self, row: usize) -> &mut Row {
        if row >= self.rows.len() {
            self.rows.resize_with(row + 1, Vec::new);
        }
        &mut self.rows[row]
    }

    /// Apply the accumulation rule at `(row, column)`.
    pub fn fold(&mut self, row: usize, column: usize, value: CellValue) {
        combine(self.row_mut(row), column, value);
    }

    /// Append a finished row
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Consume the matrix, returning its rows
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl From<Vec<Row>> for Matrix {
    fn from(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

/// Destination for a finished matrix, e.g. a new workbook on disk.
pub trait MatrixWriter {
    /// Error raised by the destination format
    type Error;

    /// Write one cell. Only called for present values.
    fn write_cell(
        &mut self,
        row: usize,
        column: usize,
        value: &CellValue,
    ) -> Result<(), Self::Error>;

    /// Finalise and persist the output
    fn close(self) -> Result<(), Self::Error>
    where
        Self: Sized;
}

/// Emit every present cell of `matrix` into `writer`, then close it.
///
/// Absent cells are skipped rather than written as blanks. Returns the
/// number of cells written.
pub fn write_matrix<W: MatrixWriter>(matrix: &Matrix, mut writer: W) -> Result<usize, W::Error> {
    let mut written = 0;
    for (row_idx, row) in matrix.rows().iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            if value.is_absent() {
                continue;
            }
            writer.write_cell(row_idx, col_idx, value)?;
            written += 1;
        }
    }
    writer.close()?;
    Ok(written)
}
