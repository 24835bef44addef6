//! Layout constants, loadable from a JSON file.
//!
//! Every field has a default, so a config file only needs to name the
//! values it overrides:
//!
//! ```
//! use image_board::EditorConfig;
//!
//! let config = EditorConfig::from_json_str(r#"{ "reference_height": 240 }"#).unwrap();
//! assert_eq!(config.reference_height, 240.0);
//! assert_eq!(config.removed_per_row, 6);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Height of a displayed image when no resize gesture overrides it.
    pub reference_height: f32,
    /// Gap on every side of a displayed image when margins are enabled.
    pub margin_gap: f32,
    /// Hairline border width when borders are enabled.
    pub border_width: f32,
    /// Added to `pointer - origin` while resizing.
    pub drag_padding: f32,
    /// Floor for dragged dimensions.
    pub min_drag_size: f32,
    pub removed_width_percent: f32,
    /// Removed thumbnails are `container_width * removed_height_ratio` tall.
    pub removed_height_ratio: f32,
    pub removed_gap_percent: f32,
    pub removed_bottom_margin: f32,
    /// Every n-th removed thumbnail ends its row and drops its right margin.
    pub removed_per_row: usize,
    /// Lightness (percent) of the first displayed image's shade.
    pub max_lightness: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            reference_height: 300.0,
            margin_gap: 6.0,
            border_width: 1.0,
            drag_padding: 5.0,
            min_drag_size: 0.0,
            removed_width_percent: 15.0,
            removed_height_ratio: 0.15,
            removed_gap_percent: 2.0,
            removed_bottom_margin: 16.0,
            removed_per_row: 6,
            max_lightness: 90.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::debug!("loaded layout config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("reference_height", self.reference_height),
            ("margin_gap", self.margin_gap),
            ("border_width", self.border_width),
            ("drag_padding", self.drag_padding),
            ("min_drag_size", self.min_drag_size),
            ("removed_width_percent", self.removed_width_percent),
            ("removed_height_ratio", self.removed_height_ratio),
            ("removed_gap_percent", self.removed_gap_percent),
            ("removed_bottom_margin", self.removed_bottom_margin),
        ];
        for (field, value) in sizes {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid(
                    field,
                    format!("expected a finite non-negative number, got {value}"),
                ));
            }
        }
        if self.removed_per_row == 0 {
            return Err(Error::invalid("removed_per_row", "must be at least 1"));
        }
        if !(0.0..=100.0).contains(&self.max_lightness) {
            return Err(Error::invalid(
                "max_lightness",
                format!("expected 0..=100, got {}", self.max_lightness),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(EditorConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_object_yields_defaults() {
        let config = EditorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn partial_override() {
        let config =
            EditorConfig::from_json_str(r#"{ "margin_gap": 10, "removed_per_row": 4 }"#).unwrap();
        assert_eq!(config.margin_gap, 10.0);
        assert_eq!(config.removed_per_row, 4);
        assert_eq!(config.reference_height, 300.0);
    }

    #[test]
    fn rejects_negative_size() {
        let err = EditorConfig::from_json_str(r#"{ "reference_height": -1 }"#).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfig {
                field: "reference_height",
                ..
            }
        ));
    }

    #[test]
    fn rejects_zero_row_length() {
        let err = EditorConfig::from_json_str(r#"{ "removed_per_row": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfig {
                field: "removed_per_row",
                ..
            }
        ));
    }

    #[test]
    fn rejects_out_of_range_lightness() {
        assert!(EditorConfig::from_json_str(r#"{ "max_lightness": 120 }"#).is_err());
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = EditorConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = EditorConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
