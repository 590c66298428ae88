//! Editor configuration.
//!
//! Every field has a default so hosts only need to pass what they change,
//! either as JSON ([`EditorConfig::from_json`]) or as a JS object through the
//! wasm binding.

use serde::{Deserialize, Serialize};

use crate::error::{FiggridError, Result};

/// Hard ceiling for both rows and columns.
pub const HARD_LIMIT: u32 = 32767;

/// Configuration for grid bounds, geometry, clipboard delimiters and zoom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum number of rows the grid may grow to
    pub max_rows: u32,
    /// Maximum number of columns the grid may grow to
    pub max_cols: u32,
    /// Minimum row count of a blank grid
    pub default_rows: u32,
    /// Column count of a blank grid
    pub default_cols: u32,
    /// Upper limit on rows created by a blank grid, independent of `max_rows`
    pub init_row_cap: u32,
    /// Fixed row height in pixels
    pub row_height: f32,
    /// Width of columns without an override, in pixels
    pub default_col_width: f32,
    /// Narrowest width a column resize may produce
    pub min_col_width: f32,
    /// Width of the row header strip
    pub row_header_width: f32,
    /// Height of the column header strip
    pub col_header_height: f32,
    /// Side length of the fill handle hit area
    pub fill_handle_size: f32,
    /// Lower zoom clamp for the canvas+ruler surface
    pub zoom_min: f64,
    /// Upper zoom clamp for the canvas+ruler surface
    pub zoom_max: f64,
    /// Base of the multiplicative zoom step (`zoom *= base^delta`)
    pub zoom_base: f64,
    /// Ruler drag multiplier while the fine-adjust modifier is held
    pub fine_pan_factor: f64,
    /// Delimiter between values of a clipboard row
    pub horizontal_delimiter: char,
    /// Fallback delimiter used when a pasted line has no horizontal delimiter
    pub secondary_delimiter: char,
    /// Display toggle for the persistent table view. Paste without a
    /// selection ignores it and always treats the first line as data.
    pub first_row_is_header: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_rows: HARD_LIMIT,
            max_cols: HARD_LIMIT,
            default_rows: 20,
            default_cols: 10,
            init_row_cap: 50,
            row_height: 24.0,
            default_col_width: 100.0,
            min_col_width: 30.0,
            row_header_width: 40.0,
            col_header_height: 24.0,
            fill_handle_size: 8.0,
            zoom_min: 0.1,
            zoom_max: 5.0,
            zoom_base: 0.999,
            fine_pan_factor: 0.1,
            horizontal_delimiter: '\t',
            secondary_delimiter: ',',
            first_row_is_header: false,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON configuration and validate it.
    ///
    /// # Errors
    /// Returns [`FiggridError::Json`] for malformed JSON and
    /// [`FiggridError::Config`] for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the grid and the view transform rely on.
    ///
    /// # Errors
    /// Returns [`FiggridError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.max_rows == 0 || self.max_rows > HARD_LIMIT {
            return Err(FiggridError::Config(format!(
                "maxRows must be in 1..={HARD_LIMIT}, got {}",
                self.max_rows
            )));
        }
        if self.max_cols == 0 || self.max_cols > HARD_LIMIT {
            return Err(FiggridError::Config(format!(
                "maxCols must be in 1..={HARD_LIMIT}, got {}",
                self.max_cols
            )));
        }
        let sizes = [
            ("rowHeight", self.row_height),
            ("defaultColWidth", self.default_col_width),
            ("minColWidth", self.min_col_width),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(FiggridError::Config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.zoom_min > 0.0 && self.zoom_min < self.zoom_max) {
            return Err(FiggridError::Config(format!(
                "zoom range [{}, {}] is empty",
                self.zoom_min, self.zoom_max
            )));
        }
        if !(self.zoom_base > 0.0 && self.zoom_base < 1.0) {
            return Err(FiggridError::Config(format!(
                "zoomBase must be in (0, 1), got {}",
                self.zoom_base
            )));
        }
        if self.horizontal_delimiter == self.secondary_delimiter {
            return Err(FiggridError::Config(
                "clipboard delimiters must differ".to_string(),
            ));
        }
        Ok(())
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

    #[test]
    fn test_defaults_are_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_rows, 32767);
        assert_eq!(config.init_row_cap, 50);
        assert_eq!(config.min_col_width, 30.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(r#"{"maxRows": 100, "rowHeight": 30}"#).unwrap();
        assert_eq!(config.max_rows, 100);
        assert_eq!(config.row_height, 30.0);
        assert_eq!(config.max_cols, HARD_LIMIT);
        assert_eq!(config.horizontal_delimiter, '\t');
    }

    #[test]
    fn test_rejects_bounds_above_hard_limit() {
        let err = EditorConfig::from_json(r#"{"maxCols": 40000}"#).unwrap_err();
        assert!(matches!(err, FiggridError::Config(_)));
    }

    #[test]
    fn test_rejects_inverted_zoom_range() {
        let err = EditorConfig::from_json(r#"{"zoomMin": 2.0, "zoomMax": 1.0}"#).unwrap_err();
        assert!(err.to_string().contains("zoom range"));
    }

    #[test]
    fn test_malformed_json() {
        let err = EditorConfig::from_json("{maxRows").unwrap_err();
        assert!(matches!(err, FiggridError::Json(_)));
    }
}
