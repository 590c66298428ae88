//! Table data and clamped growth.
//!
//! `GridModel` is the only owner of the [`Dataset`]. Every cell write goes
//! through [`GridModel::set_cell`] so numeric coercion applies uniformly to
//! typed entry, paste and fill. Growth past the configured bounds is clamped
//! silently: paste and fill routinely overshoot, and an error there would
//! abort the whole operation.

use crate::config::EditorConfig;
use crate::types::{CellValue, Dataset, Row};

/// Hard and initial size limits of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub max_rows: u32,
    pub max_cols: u32,
    pub default_rows: u32,
    pub default_cols: u32,
    /// Upper limit on rows created by a blank grid
    pub init_row_cap: u32,
}

impl GridBounds {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            max_rows: config.max_rows,
            max_cols: config.max_cols,
            default_rows: config.default_rows,
            default_cols: config.default_cols,
            init_row_cap: config.init_row_cap,
        }
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

#[derive(Debug, Clone)]
pub struct GridModel {
    dataset: Dataset,
    bounds: GridBounds,
}

/// Positional label of a column: `"1"` for column 0.
pub fn positional_label(col: u32) -> String {
    (u64::from(col) + 1).to_string()
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl GridModel {
    /// Empty grid (no rows, no columns).
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            dataset: Dataset::default(),
            bounds,
        }
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    pub fn row_count(&self) -> u32 {
        to_u32(self.dataset.rows.len())
    }

    pub fn col_count(&self) -> u32 {
        to_u32(self.dataset.columns.len())
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.rows.is_empty() || self.dataset.columns.is_empty()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn columns(&self) -> &[String] {
        &self.dataset.columns
    }

    /// Number of rows needed to fill a viewport of the given height.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rows_for_viewport(height: f32, row_height: f32) -> u32 {
        if !(height.is_finite() && row_height > 0.0) || height <= 0.0 {
            return 0;
        }
        // Bounded by the f32 -> u32 saturating cast
        (height / row_height).floor() as u32
    }

    /// Replace the dataset with a blank grid.
    ///
    /// `rows` is the viewport-derived row count: raised to `default_rows`,
    /// then capped at `init_row_cap` and `max_rows`.
    pub fn init_blank(&mut self, rows: u32, cols: u32) {
        let rows = rows
            .max(self.bounds.default_rows)
            .min(self.bounds.init_row_cap)
            .min(self.bounds.max_rows);
        let cols = cols.min(self.bounds.max_cols);
        let columns: Vec<String> = (0..cols).map(positional_label).collect();
        let blank: Row = columns
            .iter()
            .map(|label| (label.clone(), CellValue::empty()))
            .collect();
        self.dataset = Dataset {
            rows: vec![blank; rows as usize],
            columns,
        };
        log::debug!("initialized blank grid {rows}x{cols}");
    }

    /// Install a dataset from the host, applying the same invariants as paste:
    /// columns and rows beyond the bounds are dropped and missing cells are
    /// backfilled.
    pub fn set_dataset(&mut self, mut dataset: Dataset) {
        let (rows, cols) = (dataset.rows.len(), dataset.columns.len());
        dataset.columns.truncate(self.bounds.max_cols as usize);
        dataset.rows.truncate(self.bounds.max_rows as usize);
        if dataset.rows.len() < rows || dataset.columns.len() < cols {
            log::debug!(
                "dataset {rows}x{cols} clamped to {}x{}",
                dataset.rows.len(),
                dataset.columns.len()
            );
        }
        dataset.backfill();
        self.dataset = dataset;
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.dataset.value(row as usize, col as usize)
    }

    /// Text of a cell, empty for out-of-range coordinates.
    pub fn cell_text(&self, row: u32, col: u32) -> String {
        self.cell(row, col).map(ToString::to_string).unwrap_or_default()
    }

    /// Write a cell, coercing numeric text. Returns false (and writes
    /// nothing) for out-of-range coordinates.
    pub fn set_cell(&mut self, row: u32, col: u32, raw: &str) -> bool {
        let Some(label) = self.dataset.columns.get(col as usize) else {
            return false;
        };
        let Some(cells) = self.dataset.rows.get_mut(row as usize) else {
            return false;
        };
        cells.insert(label.clone(), CellValue::coerce(raw));
        true
    }

    /// Rename a column, rekeying every row.
    ///
    /// An empty label falls back to the positional one. If `label` is
    /// already used by another column, that column's cells are overwritten
    /// by this column's.
    pub fn rename_column(&mut self, col: u32, label: &str) {
        let Some(old) = self.dataset.columns.get(col as usize).cloned() else {
            return;
        };
        let new = if label.is_empty() {
            positional_label(col)
        } else {
            label.to_string()
        };
        if new == old {
            return;
        }
        let old_still_used = self
            .dataset
            .columns
            .iter()
            .enumerate()
            .any(|(i, l)| i != col as usize && *l == old);
        if self
            .dataset
            .columns
            .iter()
            .enumerate()
            .any(|(i, l)| i != col as usize && *l == new)
        {
            log::debug!("column rename {old:?} -> {new:?} collides with an existing column");
        }
        for row in &mut self.dataset.rows {
            let value = if old_still_used {
                row.get(&old).cloned()
            } else {
                row.remove(&old)
            };
            row.insert(new.clone(), value.unwrap_or_default());
        }
        if let Some(slot) = self.dataset.columns.get_mut(col as usize) {
            *slot = new;
        }
    }

    /// First positional label at or after `col` that no column uses yet.
    fn free_label(&self, col: u32) -> String {
        let mut n = col;
        loop {
            let label = positional_label(n);
            if !self.dataset.columns.contains(&label) {
                return label;
            }
            n = n.saturating_add(1);
        }
    }

    /// Append up to `n` columns of empty cells. Returns how many were added.
    ///
    /// A new column takes its positional label unless a renamed column
    /// already holds it; then the next unused one.
    pub fn add_columns(&mut self, n: u32) -> u32 {
        let room = self.bounds.max_cols.saturating_sub(self.col_count());
        let added = n.min(room);
        for _ in 0..added {
            let label = self.free_label(self.col_count());
            for row in &mut self.dataset.rows {
                row.insert(label.clone(), CellValue::empty());
            }
            self.dataset.columns.push(label);
        }
        if added < n {
            log::debug!("add_columns({n}) clamped to {added} at maxCols");
        }
        added
    }

    /// Append up to `n` rows. Returns how many were added.
    pub fn add_rows(&mut self, n: u32) -> u32 {
        let room = self.bounds.max_rows.saturating_sub(self.row_count());
        let added = n.min(room);
        let blank: Row = self
            .dataset
            .columns
            .iter()
            .map(|label| (label.clone(), CellValue::empty()))
            .collect();
        self.dataset
            .rows
            .extend(std::iter::repeat(blank).take(added as usize));
        if added < n {
            log::debug!("add_rows({n}) clamped to {added} at maxRows");
        }
        added
    }

    /// Grow to at least `rows` x `cols`, clamped to the bounds. Returns true
    /// if anything was added.
    pub fn ensure_capacity(&mut self, rows: u32, cols: u32) -> bool {
        let added_cols = self.add_columns(cols.saturating_sub(self.col_count()));
        let added_rows = self.add_rows(rows.saturating_sub(self.row_count()));
        added_cols > 0 || added_rows > 0
    }
}

impl Default for GridModel {
    fn default() -> Self {
        Self::new(GridBounds::default())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;

    fn small_bounds() -> GridBounds {
        GridBounds {
            max_rows: 30,
            max_cols: 12,
            default_rows: 5,
            default_cols: 4,
            init_row_cap: 50,
        }
    }

    #[test]
    fn test_init_blank_labels_and_cells() {
        let mut grid = GridModel::default();
        grid.init_blank(25, 3);
        assert_eq!(grid.columns(), ["1", "2", "3"]);
        assert_eq!(grid.row_count(), 25);
        assert_eq!(grid.cell(24, 2), Some(&CellValue::empty()));
    }

    #[test]
    fn test_add_columns_skips_label_taken_by_rename() {
        let mut grid = GridModel::default();
        grid.init_blank(20, 3);
        grid.set_cell(0, 0, "keep");
        grid.rename_column(0, "4");

        assert_eq!(grid.add_columns(1), 1);
        assert_eq!(grid.columns(), ["4", "2", "3", "5"]);
        assert_eq!(grid.cell_text(0, 3), "");
        grid.set_cell(0, 3, "new");
        assert_eq!(grid.cell_text(0, 0), "keep");
    }

    #[test]
    fn test_init_blank_row_clamps() {
        let mut grid = GridModel::default();
        grid.init_blank(3, 2);
        assert_eq!(grid.row_count(), 20, "raised to default_rows");
        grid.init_blank(500, 2);
        assert_eq!(grid.row_count(), 50, "capped at init cap");

        let mut tight = GridModel::new(small_bounds());
        tight.init_blank(45, 40);
        assert_eq!(tight.row_count(), 30);
        assert_eq!(tight.col_count(), 12);
    }

    #[test]
    fn test_rows_for_viewport() {
        assert_eq!(GridModel::rows_for_viewport(600.0, 24.0), 25);
        assert_eq!(GridModel::rows_for_viewport(-5.0, 24.0), 0);
        assert_eq!(GridModel::rows_for_viewport(f32::NAN, 24.0), 0);
    }

    #[test]
    fn test_set_cell_coerces() {
        let mut grid = GridModel::default();
        grid.init_blank(20, 2);
        assert!(grid.set_cell(0, 0, "42"));
        assert!(grid.set_cell(0, 1, "forty-two"));
        assert_eq!(grid.cell(0, 0), Some(&CellValue::Number(42.0)));
        assert_eq!(grid.cell_text(0, 1), "forty-two");
        assert!(!grid.set_cell(99, 0, "x"));
        assert_eq!(grid.cell_text(99, 0), "");
    }

    #[test]
    fn test_add_rows_and_columns_clamp() {
        let mut grid = GridModel::new(small_bounds());
        grid.init_blank(5, 10);
        assert_eq!(grid.add_columns(5), 2);
        assert_eq!(grid.col_count(), 12);
        assert_eq!(grid.add_columns(1), 0);
        assert_eq!(grid.add_rows(100), 25);
        assert_eq!(grid.row_count(), 30);
        // New columns were backfilled on the old rows
        assert_eq!(grid.cell(0, 11), Some(&CellValue::empty()));
        assert_eq!(grid.columns()[11], "12");
    }

    #[test]
    fn test_ensure_capacity_is_noop_when_large_enough() {
        let mut grid = GridModel::default();
        grid.init_blank(20, 5);
        assert!(!grid.ensure_capacity(10, 3));
        assert_eq!((grid.row_count(), grid.col_count()), (20, 5));
        assert!(grid.ensure_capacity(22, 7));
        assert_eq!((grid.row_count(), grid.col_count()), (22, 7));
    }

    #[test]
    fn test_rename_rekeys_rows() {
        let mut grid = GridModel::default();
        grid.init_blank(20, 3);
        grid.set_cell(0, 1, "7");
        grid.rename_column(1, "dose");
        assert_eq!(grid.columns()[1], "dose");
        assert_eq!(grid.cell(0, 1), Some(&CellValue::Number(7.0)));
        assert!(grid.dataset().rows[0].get("2").is_none());
    }

    #[test]
    fn test_rename_to_same_label_keeps_values() {
        let mut grid = GridModel::default();
        grid.init_blank(20, 3);
        grid.set_cell(4, 2, "abc");
        grid.rename_column(2, "3");
        assert_eq!(grid.cell_text(4, 2), "abc");
    }

    #[test]
    fn test_rename_empty_falls_back_to_position() {
        let mut grid = GridModel::default();
        grid.init_blank(20, 3);
        grid.rename_column(0, "time");
        grid.rename_column(0, "");
        assert_eq!(grid.columns()[0], "1");
    }

    #[test]
    fn test_rename_collision_overwrites() {
        let mut grid = GridModel::default();
        grid.init_blank(20, 2);
        grid.set_cell(0, 0, "left");
        grid.set_cell(0, 1, "right");
        grid.rename_column(1, "1");
        // Both columns now read the renamed column's data
        assert_eq!(grid.cell_text(0, 0), "right");
        assert_eq!(grid.cell_text(0, 1), "right");
    }

    #[test]
    fn test_set_dataset_clamps_and_backfills() {
        let mut grid = GridModel::new(small_bounds());
        let mut ds = Dataset::from_positional(vec![vec!["a".into(); 20]; 40]);
        ds.rows[0].remove("1");
        grid.set_dataset(ds);
        assert_eq!(grid.row_count(), 30);
        assert_eq!(grid.col_count(), 12);
        assert_eq!(grid.cell(0, 0), Some(&CellValue::empty()));
        assert_eq!(grid.cell_text(1, 0), "a");
    }
}
