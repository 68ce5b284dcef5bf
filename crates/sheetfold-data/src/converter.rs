//! Cell converter - maps decoder cells onto [`CellValue`].

use calamine::Data;
use sheetfold_core::CellValue;

/// Converts raw decoder cells to core cell values
pub struct CellConverter;

impl CellConverter {
    /// Convert a calamine cell.
    ///
    /// Every number becomes a float. Dates, ISO strings and error codes are
    /// carried as text so they are never summed.
    pub fn from_data(cell: &Data) -> CellValue {
        match cell {
            Data::Empty => CellValue::Absent,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::Error(e) => CellValue::Text(e.to_string()),
            Data::DateTime(dt) => CellValue::Text(dt.to_string()),
            Data::DateTimeIso(s) => CellValue::Text(s.clone()),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
        }
    }

    /// Convert a CSV field: finite numbers become floats, the rest text.
    pub fn from_field(field: &str) -> CellValue {
        match field.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(field.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn test_from_data_scalars() {
        assert_eq!(CellConverter::from_data(&Data::Empty), CellValue::Absent);
        assert_eq!(
            CellConverter::from_data(&Data::String("hello".to_string())),
            CellValue::text("hello")
        );
        assert_eq!(CellConverter::from_data(&Data::Int(42)), CellValue::Number(42.0));
        assert_eq!(CellConverter::from_data(&Data::Float(3.5)), CellValue::Number(3.5));
        assert_eq!(CellConverter::from_data(&Data::Bool(true)), CellValue::Bool(true));
    }

    #[test]
    fn test_from_data_empty_string_is_left_to_normalizer() {
        assert_eq!(
            CellConverter::from_data(&Data::String(String::new())),
            CellValue::text("")
        );
    }

    #[test]
    fn test_from_data_error_is_text() {
        let value = CellConverter::from_data(&Data::Error(CellErrorType::Div0));
        assert_eq!(value, CellValue::text("#DIV/0!"));
    }

    #[test]
    fn test_from_data_iso_strings_are_text() {
        assert_eq!(
            CellConverter::from_data(&Data::DateTimeIso("2024-01-31".to_string())),
            CellValue::text("2024-01-31")
        );
        assert_eq!(
            CellConverter::from_data(&Data::DurationIso("PT1H".to_string())),
            CellValue::text("PT1H")
        );
    }

    #[test]
    fn test_from_field() {
        assert_eq!(CellConverter::from_field("12"), CellValue::Number(12.0));
        assert_eq!(CellConverter::from_field("-0.25"), CellValue::Number(-0.25));
        assert_eq!(CellConverter::from_field("Total"), CellValue::text("Total"));
        assert_eq!(CellConverter::from_field(""), CellValue::text(""));
        assert_eq!(CellConverter::from_field("NaN"), CellValue::text("NaN"));
        assert_eq!(CellConverter::from_field("inf"), CellValue::text("inf"));
    }
}
