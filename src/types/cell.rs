use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell's value: either a number or text.
///
/// Serialized untagged so a dataset round-trips as plain JSON
/// (`"abc"` / `42`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// An empty text cell.
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Coerce raw user/clipboard text into a cell value.
    ///
    /// Non-empty text that parses as a finite number becomes [`CellValue::Number`];
    /// anything else is stored verbatim (including surrounding whitespace).
    pub fn coerce(raw: &str) -> Self {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            if let Ok(n) = trimmed.parse::<f64>() {
                if n.is_finite() {
                    return Self::Number(n);
                }
            }
        }
        Self::Text(raw.to_string())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::empty()
    }
}

/// Text form used by the edit buffer and the clipboard.
///
/// Integral numbers print without a fractional part (`42`, not `42.0`), so
/// the text coerces back to the same number.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(CellValue::coerce("42"), CellValue::Number(42.0));
        assert_eq!(CellValue::coerce("-1.5e3"), CellValue::Number(-1500.0));
        assert_eq!(CellValue::coerce(" 7 "), CellValue::Number(7.0));
    }

    #[test]
    fn test_coerce_keeps_text() {
        assert_eq!(CellValue::coerce(""), CellValue::empty());
        assert_eq!(CellValue::coerce("   "), CellValue::Text("   ".into()));
        assert_eq!(CellValue::coerce("12abc"), CellValue::Text("12abc".into()));
        // Non-finite parses stay text
        assert_eq!(CellValue::coerce("NaN"), CellValue::Text("NaN".into()));
        assert_eq!(CellValue::coerce("inf"), CellValue::Text("inf".into()));
    }

    #[test]
    fn test_display_round_trips() {
        for raw in ["42", "0.1", "-3.25", "1000000"] {
            let value = CellValue::coerce(raw);
            assert_eq!(CellValue::coerce(&value.to_string()), value);
        }
        assert_eq!(CellValue::Number(42.0).to_string(), "42");
    }

    #[test]
    fn test_untagged_json() {
        let values: Vec<CellValue> = serde_json::from_str(r#"["a", 1.5, ""]"#).unwrap();
        assert_eq!(values[0], CellValue::Text("a".into()));
        assert_eq!(values[1].as_number(), Some(1.5));
        assert!(values[2].is_empty());
    }
}
