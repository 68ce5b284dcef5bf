//! Row-grouped accumulation.
//!
//! Past the first `skip_rows` rows, every row is identified by its key: the
//! first present cell when scanning left to right. Rows sharing a key are
//! combined cell by cell relative to the key column, whatever their
//! absolute position in each sheet.
//!
//! The first `skip_rows` rows (the untouched prefix) are folded by absolute
//! position instead. Blank rows that follow a key's row in the first sheet
//! are counted and reproduced after that key's row in the output.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::grid::SheetGrid;
use crate::matrix::{Matrix, Row};
use crate::rule::combine;
use crate::value::{normalize, CellValue, GroupKey};

/// Accumulated data for one key.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedRowEntry {
    /// The key value as first observed
    pub key: CellValue,
    /// Column where the key was first observed
    pub key_column: usize,
    /// Payload, indexed by offset from `key_column + 1`
    pub values: Vec<CellValue>,
    /// Blank rows seen after this key's row in the first sheet
    pub blank_rows_after: usize,
}

impl GroupedRowEntry {
    fn new(key: CellValue, key_column: usize) -> Self {
        Self {
            key,
            key_column,
            values: Vec::new(),
            blank_rows_after: 0,
        }
    }

    /// Output row: `key_column` absent cells, the key, then the payload.
    pub fn to_row(&self) -> Row {
        let mut row = Vec::with_capacity(self.key_column + 1 + self.values.len());
        row.resize(self.key_column, CellValue::Absent);
        row.push(self.key.clone());
        row.extend(self.values.iter().cloned());
        row
    }
}

/// Insertion-ordered association from key to entry.
///
/// Entries live in a vector in first-seen order; a hash index maps each key
/// to its position. `last_inserted` is the target for blank-row tallies.
#[derive(Debug, Default)]
pub struct GroupedRows {
    entries: Vec<GroupedRowEntry>,
    index: HashMap<GroupKey, usize>,
    last_inserted: Option<usize>,
}

impl GroupedRows {
    /// Create an empty association
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no key has been seen
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order
    pub fn entries(&self) -> &[GroupedRowEntry] {
        &self.entries
    }

    /// Entry for `key`, if it has been seen
    pub fn get(&self, key: &CellValue) -> Option<&GroupedRowEntry> {
        let key = GroupKey::from_value(key)?;
        self.index.get(&key).map(|&slot| &self.entries[slot])
    }

    /// Position of the entry for `key`, creating it at `column` if unseen.
    fn find_or_insert(&mut self, key: GroupKey, value: CellValue, column: usize) -> usize {
        if let Some(&slot) = self.index.get(&key) {
            return slot;
        }
        let slot = self.entries.len();
        debug!(key = %value, column, "new row key");
        self.entries.push(GroupedRowEntry::new(value, column));
        self.index.insert(key, slot);
        self.last_inserted = Some(slot);
        slot
    }

    /// Fold a cell of a keyed row into the entry at `slot`.
    fn fold_payload(&mut self, slot: usize, column: usize, value: CellValue) {
        let entry = &mut self.entries[slot];
        match column.checked_sub(entry.key_column + 1) {
            Some(offset) => combine(&mut entry.values, offset, value),
            None => {
                if !value.is_absent() {
                    debug!(
                        key = %entry.key,
                        column,
                        key_column = entry.key_column,
                        "cell left of the first key column dropped"
                    );
                }
            }
        }
    }

    /// Count one blank row after the most recently inserted key.
    ///
    /// Returns `false` when no key exists yet.
    fn tally_blank_row(&mut self) -> bool {
        match self.last_inserted {
            Some(slot) => {
                self.entries[slot].blank_rows_after += 1;
                true
            }
            None => false,
        }
    }

    fn into_entries(self) -> Vec<GroupedRowEntry> {
        self.entries
    }
}

/// Per-row scan state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowScan {
    ScanningForKey,
    KeyFound(usize),
}

/// Stateful row-grouped accumulator; feed it sheets in order.
#[derive(Debug, Default)]
pub struct GroupedAccumulator {
    skip_rows: usize,
    untouched: Matrix,
    groups: GroupedRows,
    sheets_folded: usize,
}

impl GroupedAccumulator {
    /// Create an accumulator whose first `skip_rows` rows are folded by
    /// position.
    pub fn new(skip_rows: usize) -> Self {
        Self {
            skip_rows,
            ..Self::default()
        }
    }

    /// Groups accumulated so far
    pub fn groups(&self) -> &GroupedRows {
        &self.groups
    }

    /// Fold the next sheet.
    pub fn fold_sheet<G: SheetGrid>(&mut self, grid: &G) {
        let first_sheet = self.sheets_folded == 0;
        for row in 0..grid.row_count() {
            self.fold_row(grid, row, first_sheet);
        }
        self.sheets_folded += 1;
    }

    fn fold_row<G: SheetGrid>(&mut self, grid: &G, row: usize, first_sheet: bool) {
        let mut state = RowScan::ScanningForKey;
        let mut left_intact = false;

        for column in 0..grid.column_count() {
            let value = normalize(grid.cell_value(row, column));

            if row < self.skip_rows {
                self.untouched.fold(row, column, value);
                left_intact = true;
                continue;
            }

            match state {
                RowScan::ScanningForKey => {
                    if let Some(key) = GroupKey::from_value(&value) {
                        state = RowScan::KeyFound(self.groups.find_or_insert(key, value, column));
                    }
                }
                RowScan::KeyFound(slot) => self.groups.fold_payload(slot, column, value),
            }
        }

        // Gap rows are only taken from the first sheet.
        if first_sheet && !left_intact && state == RowScan::ScanningForKey {
            if self.groups.tally_blank_row() {
                debug!(row, "blank row tallied");
            } else {
                debug!(row, "blank row before any key dropped");
            }
        }
    }

    /// Assemble the output: the untouched prefix, then one row per key in
    /// first-seen order, each followed by its tallied blank rows.
    pub fn finish(self) -> Matrix {
        let mut matrix = self.untouched;
        for entry in self.groups.into_entries() {
            matrix.push_row(entry.to_row());
            for _ in 0..entry.blank_rows_after {
                matrix.push_row(Vec::new());
            }
        }
        matrix
    }
}

/// Fold every sheet by row key, keeping the first `skip_rows` rows intact.
///
/// `skip_rows` applies to every sheet. The first decode error stops the
/// fold and is returned unchanged.
pub fn accumulate_grouped<I, G, E>(sheets: I, skip_rows: usize) -> Result<Matrix, E>
where
    I: IntoIterator<Item = Result<G, E>>,
    G: SheetGrid,
{
    let mut accumulator = GroupedAccumulator::new(skip_rows);
    for (sheet_index, sheet) in sheets.into_iter().enumerate() {
        let grid = sheet?;
        accumulator.fold_sheet(&grid);
        info!(
            sheet = sheet_index,
            rows = grid.row_count(),
            keys = accumulator.groups().len(),
            "folded sheet by row key"
        );
    }
    Ok(accumulator.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MemoryGrid;

    fn n(value: f64) -> CellValue {
        CellValue::Number(value)
    }

    fn t(value: &str) -> CellValue {
        CellValue::text(value)
    }

    const A: CellValue = CellValue::Absent;

    fn grid(rows: Vec<Vec<CellValue>>) -> MemoryGrid {
        MemoryGrid::from_rows(rows)
    }

    #[test]
    fn test_same_key_sums_relative_to_key() {
        let first = grid(vec![vec![t("Total"), n(1.0), n(2.0)]]);
        let second = grid(vec![vec![t("Total"), n(3.0), A]]);

        let mut acc = GroupedAccumulator::new(0);
        acc.fold_sheet(&first);
        acc.fold_sheet(&second);

        let entry = acc.groups().get(&t("Total")).unwrap();
        assert_eq!(entry.key_column, 0);
        assert_eq!(entry.values, vec![n(4.0), n(2.0)]);
    }

    #[test]
    fn test_keys_match_regardless_of_row_position() {
        let first = grid(vec![vec![t("a"), n(1.0)], vec![t("b"), n(2.0)]]);
        let second = grid(vec![vec![t("b"), n(20.0)], vec![t("a"), n(10.0)]]);

        let mut acc = GroupedAccumulator::new(0);
        acc.fold_sheet(&first);
        acc.fold_sheet(&second);

        assert_eq!(
            acc.finish().into_rows(),
            vec![vec![t("a"), n(11.0)], vec![t("b"), n(22.0)]]
        );
    }

    #[test]
    fn test_key_column_is_preserved() {
        let sheet = grid(vec![vec![A, A, t("k"), n(5.0)]]);

        let mut acc = GroupedAccumulator::new(0);
        acc.fold_sheet(&sheet);

        assert_eq!(acc.finish().into_rows(), vec![vec![A, A, t("k"), n(5.0)]]);
    }

    #[test]
    fn test_key_further_right_grows_payload_with_gaps() {
        let first = grid(vec![vec![t("k")]]);
        let second = grid(vec![vec![A, A, t("k"), n(5.0)]]);

        let mut acc = GroupedAccumulator::new(0);
        acc.fold_sheet(&first);
        acc.fold_sheet(&second);

        let entry = acc.groups().get(&t("k")).unwrap();
        assert_eq!(entry.key_column, 0);
        assert_eq!(entry.values, vec![A, A, n(5.0)]);
    }

    #[test]
    fn test_cells_left_of_first_key_column_are_dropped() {
        let first = grid(vec![vec![A, A, t("k"), n(1.0)]]);
        let second = grid(vec![vec![t("k"), n(7.0), n(2.0), n(3.0)]]);

        let mut acc = GroupedAccumulator::new(0);
        acc.fold_sheet(&first);
        acc.fold_sheet(&second);

        let entry = acc.groups().get(&t("k")).unwrap();
        assert_eq!(entry.values, vec![n(4.0)]);
    }

    #[test]
    fn test_untouched_prefix_is_positional() {
        let first = grid(vec![vec![t("Name"), t("Q1")], vec![t("x"), n(1.0)]]);
        let second = grid(vec![vec![t("Name"), t("Q2")], vec![t("x"), n(2.0)]]);

        let matrix = accumulate_grouped::<_, _, String>(vec![Ok(first), Ok(second)], 1).unwrap();

        assert_eq!(
            matrix.into_rows(),
            vec![vec![t("Name"), t("Q2")], vec![t("x"), n(3.0)]]
        );
    }

    #[test]
    fn test_blank_rows_follow_their_key() {
        let sheet = grid(vec![
            vec![t("a"), n(1.0)],
            vec![A, A],
            vec![A, A],
            vec![t("b"), n(2.0)],
            vec![A, A],
        ]);

        let matrix = accumulate_grouped::<_, _, String>(vec![Ok(sheet)], 0).unwrap();

        assert_eq!(
            matrix.into_rows(),
            vec![
                vec![t("a"), n(1.0)],
                vec![],
                vec![],
                vec![t("b"), n(2.0)],
                vec![],
            ]
        );
    }

    #[test]
    fn test_blank_rows_only_counted_in_first_sheet() {
        let first = grid(vec![vec![t("a"), n(1.0)], vec![t("b"), n(2.0)]]);
        let second = grid(vec![vec![t("a"), n(1.0)], vec![A, A], vec![t("b"), n(2.0)]]);

        let matrix =
            accumulate_grouped::<_, _, String>(vec![Ok(first), Ok(second)], 0).unwrap();

        assert_eq!(
            matrix.into_rows(),
            vec![vec![t("a"), n(2.0)], vec![t("b"), n(4.0)]]
        );
    }

    #[test]
    fn test_blank_rows_before_any_key_are_dropped() {
        let sheet = grid(vec![vec![A, A], vec![t("a"), n(1.0)]]);

        let mut acc = GroupedAccumulator::new(0);
        acc.fold_sheet(&sheet);

        assert_eq!(acc.groups().entries()[0].blank_rows_after, 0);
        assert_eq!(acc.finish().into_rows(), vec![vec![t("a"), n(1.0)]]);
    }

    #[test]
    fn test_blank_rows_inside_prefix_are_not_tallied() {
        let sheet = grid(vec![vec![A, A], vec![t("a"), n(1.0)], vec![A, A]]);

        let matrix = accumulate_grouped::<_, _, String>(vec![Ok(sheet)], 1).unwrap();

        assert_eq!(
            matrix.into_rows(),
            vec![vec![A, A], vec![t("a"), n(1.0)], vec![]]
        );
    }

    #[test]
    fn test_new_key_in_later_sheet_goes_last() {
        let first = grid(vec![vec![t("a"), n(1.0)]]);
        let second = grid(vec![vec![t("z"), n(5.0)], vec![t("a"), n(1.0)]]);

        let matrix =
            accumulate_grouped::<_, _, String>(vec![Ok(first), Ok(second)], 0).unwrap();

        assert_eq!(
            matrix.into_rows(),
            vec![vec![t("a"), n(2.0)], vec![t("z"), n(5.0)]]
        );
    }

    #[test]
    fn test_blank_row_tally_targets_latest_inserted_key() {
        // "a" is seen again after "b" was inserted; the gap belongs to "b".
        let sheet = grid(vec![
            vec![t("a"), n(1.0)],
            vec![t("b"), n(2.0)],
            vec![t("a"), n(3.0)],
            vec![A, A],
        ]);

        let mut acc = GroupedAccumulator::new(0);
        acc.fold_sheet(&sheet);

        assert_eq!(acc.groups().get(&t("a")).unwrap().blank_rows_after, 0);
        assert_eq!(acc.groups().get(&t("b")).unwrap().blank_rows_after, 1);
    }

    #[test]
    fn test_numeric_keys() {
        let first = grid(vec![vec![n(2024.0), n(1.0)]]);
        let second = grid(vec![vec![n(2024.0), n(2.0)]]);

        let matrix =
            accumulate_grouped::<_, _, String>(vec![Ok(first), Ok(second)], 0).unwrap();

        assert_eq!(matrix.into_rows(), vec![vec![n(2024.0), n(3.0)]]);
    }

    #[test]
    fn test_decode_error_propagates() {
        let first = grid(vec![vec![t("a"), n(1.0)]]);
        let result = accumulate_grouped(vec![Ok(first), Err("truncated file")], 0);
        assert_eq!(result, Err("truncated file"));
    }

    #[test]
    fn test_entry_to_row() {
        let entry = GroupedRowEntry {
            key: t("k"),
            key_column: 1,
            values: vec![A, n(1.0)],
            blank_rows_after: 3,
        };
        assert_eq!(entry.to_row(), vec![A, t("k"), A, n(1.0)]);
    }
}
