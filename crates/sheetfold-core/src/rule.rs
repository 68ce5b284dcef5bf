//! The accumulation rule: the single source of merge semantics.

use crate::value::CellValue;

/// Fold `incoming` into `slot` at `index`.
///
/// - `index` at (or past) the end: grow with absent cells, then append
/// - existing value absent: replace it
/// - both numeric: store the sum
/// - incoming present: last non-absent value wins
/// - incoming absent: leave the slot unchanged
///
/// Order-sensitive: which text value survives, and the order in which
/// floats are summed, follow the order of calls.
pub fn combine(slot: &mut Vec<CellValue>, index: usize, incoming: CellValue) {
    if index >= slot.len() {
        slot.resize(index, CellValue::Absent);
        slot.push(incoming);
        return;
    }

    let existing = &mut slot[index];
    match (existing.as_number(), incoming.as_number()) {
        _ if existing.is_absent() => *existing = incoming,
        (Some(a), Some(b)) => *existing = CellValue::Number(a + b),
        _ if !incoming.is_absent() => *existing = incoming,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_at_end() {
        let mut slot = vec![CellValue::Number(1.0)];
        combine(&mut slot, 1, CellValue::Absent);
        assert_eq!(slot, vec![CellValue::Number(1.0), CellValue::Absent]);
    }

    #[test]
    fn test_grow_with_absent_gaps() {
        let mut slot = Vec::new();
        combine(&mut slot, 2, CellValue::text("x"));
        assert_eq!(
            slot,
            vec![CellValue::Absent, CellValue::Absent, CellValue::text("x")]
        );
    }

    #[test]
    fn test_absent_slot_is_replaced() {
        let mut slot = vec![CellValue::Absent];
        combine(&mut slot, 0, CellValue::Number(3.0));
        assert_eq!(slot[0], CellValue::Number(3.0));
    }

    #[test]
    fn test_numbers_sum() {
        let mut slot = vec![CellValue::Number(1.5)];
        combine(&mut slot, 0, CellValue::Number(2.5));
        assert_eq!(slot[0], CellValue::Number(4.0));
    }

    #[test]
    fn test_last_present_value_wins() {
        let mut slot = vec![CellValue::Number(1.0)];
        combine(&mut slot, 0, CellValue::text("n/a"));
        assert_eq!(slot[0], CellValue::text("n/a"));

        combine(&mut slot, 0, CellValue::Number(7.0));
        assert_eq!(slot[0], CellValue::Number(7.0));

        combine(&mut slot, 0, CellValue::Bool(true));
        assert_eq!(slot[0], CellValue::Bool(true));
    }

    #[test]
    fn test_absent_never_overwrites() {
        let mut slot = vec![CellValue::text("keep"), CellValue::Number(2.0)];
        combine(&mut slot, 0, CellValue::Absent);
        combine(&mut slot, 1, CellValue::Absent);
        assert_eq!(slot, vec![CellValue::text("keep"), CellValue::Number(2.0)]);
    }

    #[test]
    fn test_only_target_slot_changes() {
        let mut slot = vec![
            CellValue::Number(1.0),
            CellValue::Number(2.0),
            CellValue::Number(3.0),
        ];
        combine(&mut slot, 1, CellValue::Number(10.0));
        assert_eq!(
            slot,
            vec![
                CellValue::Number(1.0),
                CellValue::Number(12.0),
                CellValue::Number(3.0)
            ]
        );
    }
}
