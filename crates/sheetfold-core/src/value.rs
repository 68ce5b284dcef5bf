//! Cell values and the normaliser applied to every raw read.

use std::fmt;

/// Canonical value of one cell as it flows through the accumulators.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No value: never written, or an empty string read from the source
    #[default]
    Absent,
    /// Floating point number, the only variant that sums
    Number(f64),
    /// Text, including dates and error codes rendered as text
    Text(String),
    /// Boolean scalar
    Bool(bool),
}

impl CellValue {
    /// Shorthand for a text value.
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Check whether this is the absent value
    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }

    /// Numeric payload, if any
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Absent => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Normalise a raw read: an empty string becomes absent, anything else
/// passes through unchanged.
pub fn normalize(raw: CellValue) -> CellValue {
    match raw {
        CellValue::Text(s) if s.is_empty() => CellValue::Absent,
        other => other,
    }
}

/// Hashable identity of a present cell, used to group rows by key.
///
/// Numbers compare by value (`-0.0` and `0.0` are one key); a boolean key
/// never matches a numeric one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Number(u64),
    Text(String),
    Bool(bool),
}

impl GroupKey {
    /// Key for `value`, or `None` when the value is absent.
    pub fn from_value(value: &CellValue) -> Option<Self> {
        match value {
            CellValue::Absent => None,
            CellValue::Number(n) => Some(GroupKey::Number(canonical_bits(*n))),
            CellValue::Text(s) => Some(GroupKey::Text(s.clone())),
            CellValue::Bool(b) => Some(GroupKey::Bool(*b)),
        }
    }
}

fn canonical_bits(n: f64) -> u64 {
    if n == 0.0 {
        0.0f64.to_bits()
    } else if n.is_nan() {
        f64::NAN.to_bits()
    } else {
        n.to_bits()
    }
}
