//! Positional accumulation: cells at the same (row, column) across all
//! sheets are combined.

use tracing::info;

use crate::grid::SheetGrid;
use crate::matrix::Matrix;
use crate::value::normalize;

/// Fold every sheet into one matrix by absolute position.
///
/// Sheets are consumed in iteration order. The result spans the largest row
/// count seen and, per row, the largest column count. The first decode
/// error stops the fold and is returned unchanged.
pub fn accumulate_positional<I, G, E>(sheets: I) -> Result<Matrix, E>
where
    I: IntoIterator<Item = Result<G, E>>,
    G: SheetGrid,
{
    let mut matrix = Matrix::new();
    for (sheet_index, sheet) in sheets.into_iter().enumerate() {
        let grid = sheet?;
        fold_positional(&mut matrix, &grid);
        info!(
            sheet = sheet_index,
            rows = grid.row_count(),
            columns = grid.column_count(),
            "folded sheet by position"
        );
    }
    Ok(matrix)
}

/// Fold one grid into `matrix` in row-major order.
pub fn fold_positional<G: SheetGrid>(matrix: &mut Matrix, grid: &G) {
    for row in 0..grid.row_count() {
        for column in 0..grid.column_count() {
            matrix.fold(row, column, normalize(grid.cell_value(row, column)));
        }
    }
}
