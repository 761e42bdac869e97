//! Grid configuration.
//!
//! [`GridConfig`] carries every tunable the solver and model read. Defaults
//! match the reference dashboard: twelve columns, widths 2..=12, heights
//! 1..=8. [`GridMetrics`] holds the rendering-only pixel constants the
//! interaction controller needs to turn pointer motion into cell motion.

use std::fmt;

use gridboard_core::GridBounds;
use serde::{Deserialize, Serialize};

pub const DEFAULT_COLS: u16 = 12;
pub const DEFAULT_MIN_W: u16 = 2;
pub const DEFAULT_MAX_W: u16 = 12;
pub const DEFAULT_MIN_H: u16 = 1;
pub const DEFAULT_MAX_H: u16 = 8;
/// Rows scanned by the row-major first-free-slot search.
pub const DEFAULT_MAX_SCAN_ROWS: u16 = 200;
/// Chebyshev radius of the nearest-open-slot ring search.
pub const DEFAULT_SEARCH_RADIUS: u16 = 24;
/// Upper bound on relocations performed by one cascade.
pub const DEFAULT_MAX_CASCADE_ITERATIONS: u32 = 4096;

/// Column count, size bounds, and search limits for one dashboard grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cols: u16,
    pub min_w: u16,
    pub max_w: u16,
    pub min_h: u16,
    pub max_h: u16,
    pub max_scan_rows: u16,
    pub search_radius: u16,
    pub max_cascade_iterations: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            min_w: DEFAULT_MIN_W,
            max_w: DEFAULT_MAX_W,
            min_h: DEFAULT_MIN_H,
            max_h: DEFAULT_MAX_H,
            max_scan_rows: DEFAULT_MAX_SCAN_ROWS,
            search_radius: DEFAULT_SEARCH_RADIUS,
            max_cascade_iterations: DEFAULT_MAX_CASCADE_ITERATIONS,
        }
    }
}

impl GridConfig {
    /// Config with a custom column count and default everything else.
    ///
    /// `max_w` follows the column count so full-width widgets stay legal.
    #[must_use]
    pub fn with_cols(cols: u16) -> Self {
        Self {
            cols,
            max_w: cols,
            ..Self::default()
        }
    }

    /// Normalized bounds used for every clamp.
    ///
    /// Contradictory settings are repaired rather than rejected; call
    /// [`GridConfig::validate`] to surface them.
    #[must_use]
    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.cols, self.min_w, self.max_w, self.min_h, self.max_h)
    }

    /// Report settings that [`GridConfig::bounds`] would have to repair.
    pub fn validate(&self) -> Result<(), GridConfigError> {
        if self.cols == 0 {
            return Err(GridConfigError::ZeroColumns);
        }
        if self.min_w == 0 || self.min_h == 0 {
            return Err(GridConfigError::ZeroMinimum {
                min_w: self.min_w,
                min_h: self.min_h,
            });
        }
        if self.min_w > self.max_w {
            return Err(GridConfigError::InvertedBounds {
                axis: "width",
                min: self.min_w,
                max: self.max_w,
            });
        }
        if self.min_h > self.max_h {
            return Err(GridConfigError::InvertedBounds {
                axis: "height",
                min: self.min_h,
                max: self.max_h,
            });
        }
        if self.max_w > self.cols {
            return Err(GridConfigError::WidthExceedsColumns {
                max_w: self.max_w,
                cols: self.cols,
            });
        }
        if self.max_scan_rows == 0 {
            return Err(GridConfigError::ZeroSearchLimit {
                field: "max_scan_rows",
            });
        }
        if self.max_cascade_iterations == 0 {
            return Err(GridConfigError::ZeroSearchLimit {
                field: "max_cascade_iterations",
            });
        }
        Ok(())
    }
}

/// Configuration problems reported by [`GridConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridConfigError {
    ZeroColumns,
    ZeroMinimum {
        min_w: u16,
        min_h: u16,
    },
    InvertedBounds {
        axis: &'static str,
        min: u16,
        max: u16,
    },
    WidthExceedsColumns {
        max_w: u16,
        cols: u16,
    },
    ZeroSearchLimit {
        field: &'static str,
    },
}

impl fmt::Display for GridConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroColumns => write!(f, "grid must have at least one column"),
            Self::ZeroMinimum { min_w, min_h } => {
                write!(f, "minimum widget size must be non-zero (min_w={min_w}, min_h={min_h})")
            }
            Self::InvertedBounds { axis, min, max } => {
                write!(f, "{axis} bounds are inverted: min={min} > max={max}")
            }
            Self::WidthExceedsColumns { max_w, cols } => {
                write!(f, "max_w={max_w} exceeds column count {cols}")
            }
            Self::ZeroSearchLimit { field } => write!(f, "{field} must be non-zero"),
        }
    }
}

impl std::error::Error for GridConfigError {}

/// Pixel constants used to map pointer motion onto cells.
///
/// They never influence placement decisions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridMetrics {
    pub row_height_px: f64,
    pub gap_px: f64,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            row_height_px: 80.0,
            gap_px: 16.0,
        }
    }
}

impl GridMetrics {
    /// Width of one column given the container width, with gaps between
    /// columns removed. Never negative.
    #[must_use]
    pub fn col_width_px(&self, container_width_px: f64, cols: u16) -> f64 {
        let cols = f64::from(cols.max(1));
        let gaps = self.gap_px.max(0.0) * (cols - 1.0);
        ((container_width_px - gaps) / cols).max(0.0)
    }

    /// Horizontal distance between the left edges of adjacent columns.
    #[must_use]
    pub fn col_pitch_px(&self, col_width_px: f64) -> f64 {
        col_width_px + self.gap_px.max(0.0)
    }

    /// Vertical distance between the top edges of adjacent rows.
    #[must_use]
    pub fn row_pitch_px(&self) -> f64 {
        self.row_height_px + self.gap_px.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GridConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.bounds(), GridBounds::new(12, 2, 12, 1, 8));
    }

    #[test]
    fn validate_reports_each_problem() {
        let zero_cols = GridConfig {
            cols: 0,
            ..GridConfig::default()
        };
        assert_eq!(zero_cols.validate(), Err(GridConfigError::ZeroColumns));

        let inverted = GridConfig {
            min_h: 5,
            max_h: 3,
            ..GridConfig::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(GridConfigError::InvertedBounds { axis: "height", .. })
        ));

        let too_wide = GridConfig {
            max_w: 16,
            ..GridConfig::default()
        };
        assert!(matches!(
            too_wide.validate(),
            Err(GridConfigError::WidthExceedsColumns { max_w: 16, cols: 12 })
        ));

        let no_cap = GridConfig {
            max_cascade_iterations: 0,
            ..GridConfig::default()
        };
        assert_eq!(
            no_cap.validate(),
            Err(GridConfigError::ZeroSearchLimit {
                field: "max_cascade_iterations"
            })
        );
    }

    #[test]
    fn with_cols_keeps_full_width_legal() {
        let config = GridConfig::with_cols(6);
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.bounds().max_w(), 6);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: GridConfig = serde_json::from_str(r#"{"cols": 8, "max_w": 8}"#).unwrap();
        assert_eq!(config.cols, 8);
        assert_eq!(config.min_w, DEFAULT_MIN_W);
        assert_eq!(config.search_radius, DEFAULT_SEARCH_RADIUS);
    }

    #[test]
    fn metrics_pitches() {
        let metrics = GridMetrics::default();
        // 12 columns, 11 gaps of 16px in 1376px -> 100px columns.
        let col = metrics.col_width_px(1376.0, 12);
        assert!((col - 100.0).abs() < f64::EPSILON);
        assert!((metrics.col_pitch_px(col) - 116.0).abs() < f64::EPSILON);
        assert!((metrics.row_pitch_px() - 96.0).abs() < f64::EPSILON);
        assert_eq!(metrics.col_width_px(10.0, 12), 0.0);
    }
}
