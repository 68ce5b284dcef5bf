//! sheetfold-core - fold the sheets of a workbook into one table
//!
//! Core library for sheetfold. Two strategies combine the cells of every
//! sheet into a single in-memory [`Matrix`]:
//!
//! - **Positional**: cells at the same (row, column) are combined.
//! - **Row-grouped**: rows are identified by their first present cell (the
//!   key) and combined relative to it, wherever they sit in each sheet.
//!
//! Both use the same [`combine`] rule: numbers sum, any other present value
//! replaces what was there, absent never overwrites.
//!
//! # Example
//!
//! ```
//! use sheetfold_core::{accumulate_grouped, CellValue, MemoryGrid};
//!
//! let january = MemoryGrid::from_rows(vec![vec![
//!     CellValue::text("Total"),
//!     CellValue::Number(1.0),
//!     CellValue::Number(2.0),
//! ]]);
//! let february = MemoryGrid::from_rows(vec![vec![
//!     CellValue::text("Total"),
//!     CellValue::Number(3.0),
//!     CellValue::Absent,
//! ]]);
//!
//! let matrix = accumulate_grouped::<_, _, std::convert::Infallible>(
//!     vec![Ok(january), Ok(february)],
//!     0,
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     matrix.rows()[0],
//!     vec![CellValue::text("Total"), CellValue::Number(4.0), CellValue::Number(2.0)]
//! );
//! ```

pub mod grid;
pub mod grouped;
pub mod matrix;
pub mod positional;
pub mod rule;
pub mod value;

// Re-export main types and functions
pub use grid::{MemoryGrid, SheetGrid, SheetIter, SheetSource};
pub use grouped::{accumulate_grouped, GroupedAccumulator, GroupedRowEntry, GroupedRows};
pub use matrix::{write_matrix, Matrix, MatrixWriter, Row};
pub use positional::{accumulate_positional, fold_positional};
pub use rule::combine;
pub use value::{normalize, CellValue, GroupKey};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }
}
