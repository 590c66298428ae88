use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::CellValue;

/// One table row, keyed by column label.
pub type Row = HashMap<String, CellValue>;

/// The table data behind the grid.
///
/// Rows are keyed by label rather than position, so two columns sharing a
/// label share their cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset from positional rows, labelling columns `"1".."n"`.
    ///
    /// Short rows are padded with empty cells.
    pub fn from_positional(values: Vec<Vec<CellValue>>) -> Self {
        let width = values.iter().map(Vec::len).max().unwrap_or(0);
        let columns: Vec<String> = (1..=width).map(|n| n.to_string()).collect();
        let rows = values
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::empty());
                columns.iter().cloned().zip(row).collect()
            })
            .collect();
        Self { columns, rows }
    }

    /// Fill in an empty cell for every label a row is missing.
    pub fn backfill(&mut self) {
        for row in &mut self.rows {
            for label in &self.columns {
                row.entry(label.clone()).or_default();
            }
        }
    }

    pub fn value(&self, row: usize, col: usize) -> Option<&CellValue> {
        let label = self.columns.get(col)?;
        self.rows.get(row)?.get(label)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_from_positional_pads_short_rows() {
        let ds = Dataset::from_positional(vec![
            vec!["a".into(), "b".into()],
            vec![CellValue::Number(1.0)],
        ]);
        assert_eq!(ds.columns, vec!["1", "2"]);
        assert_eq!(ds.value(1, 0), Some(&CellValue::Number(1.0)));
        assert_eq!(ds.value(1, 1), Some(&CellValue::empty()));
    }

    #[test]
    fn test_backfill() {
        let mut ds: Dataset =
            serde_json::from_str(r#"{"columns": ["x", "y"], "rows": [{"x": 3}]}"#).unwrap();
        ds.backfill();
        assert_eq!(ds.rows[0].get("y"), Some(&CellValue::empty()));
        assert_eq!(ds.rows[0].get("x"), Some(&CellValue::Number(3.0)));
    }
}
