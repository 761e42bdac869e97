#![forbid(unsafe_code)]

//! Session configuration as data.
//!
//! A [`SessionConfig`] bundles the grid bounds, pixel metrics, and save
//! debounce of one dashboard session. It loads from TOML or JSON and every
//! field has a default, so partial files are fine:
//!
//! ```toml
//! save_debounce_ms = 750
//! container_width_px = 1440.0
//!
//! [grid]
//! cols = 12
//! max_h = 10
//!
//! [metrics]
//! row_height_px = 72.0
//! ```
//!
//! ```rust,ignore
//! let config = SessionConfig::from_toml_file("gridboard.toml")?;
//! ```

use std::path::Path;

use gridboard_layout::{GridConfig, GridConfigError, GridMetrics};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::Duration;

pub const DEFAULT_SAVE_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_CONTAINER_WIDTH_PX: f64 = 1200.0;

/// Tunables for one [`DashboardSession`](crate::DashboardSession).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub grid: GridConfig,
    pub metrics: GridMetrics,
    /// Quiet period before a changed layout is written.
    pub save_debounce_ms: u64,
    /// Initial grid container width; hosts update it on resize.
    pub container_width_px: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            metrics: GridMetrics::default(),
            save_debounce_ms: DEFAULT_SAVE_DEBOUNCE_MS,
            container_width_px: DEFAULT_CONTAINER_WIDTH_PX,
        }
    }
}

/// Errors loading or validating a [`SessionConfig`].
#[derive(Debug, Error)]
pub enum SessionConfigError {
    #[error("failed to read session config: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid grid config: {0}")]
    Grid(#[from] GridConfigError),
    #[error("invalid pixel metrics: {0}")]
    Metrics(String),
}

impl SessionConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, SessionConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SessionConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_json_str(s: &str) -> Result<Self, SessionConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SessionConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Check grid bounds and that every pixel length is finite and
    /// non-negative.
    pub fn validate(&self) -> Result<(), SessionConfigError> {
        self.grid.validate()?;
        let lengths = [
            ("row_height_px", self.metrics.row_height_px),
            ("gap_px", self.metrics.gap_px),
            ("container_width_px", self.container_width_px),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(SessionConfigError::Metrics(format!(
                    "{name} must be a finite non-negative length, got {value}"
                )));
            }
        }
        if self.metrics.row_height_px == 0.0 {
            return Err(SessionConfigError::Metrics(
                "row_height_px must be positive".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }

    /// Column width for the configured container.
    #[must_use]
    pub fn col_width_px(&self) -> f64 {
        self.metrics
            .col_width_px(self.container_width_px, self.grid.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = SessionConfig::default();
        config.validate().unwrap();
        assert_eq!(config.save_debounce(), Duration::from_millis(500));
        // (1200 - 11 * 16) / 12
        assert!((config.col_width_px() - 85.333_333).abs() < 1e-3);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = SessionConfig::from_toml_str(
            r#"
            save_debounce_ms = 750

            [grid]
            max_h = 10

            [metrics]
            row_height_px = 72.0
            "#,
        )
        .unwrap();
        assert_eq!(config.save_debounce_ms, 750);
        assert_eq!(config.grid.max_h, 10);
        assert_eq!(config.grid.cols, 12);
        assert_eq!(config.metrics.row_height_px, 72.0);
        assert_eq!(config.metrics.gap_px, 16.0);
    }

    #[test]
    fn json_round_trip() {
        let config = SessionConfig {
            save_debounce_ms: 10,
            ..SessionConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SessionConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn invalid_grid_is_rejected() {
        let err = SessionConfig::from_toml_str("[grid]\ncols = 0\n").unwrap_err();
        assert!(matches!(err, SessionConfigError::Grid(_)));
    }

    #[test]
    fn invalid_metrics_are_rejected() {
        let err = SessionConfig::from_json_str(r#"{"metrics": {"gap_px": -1.0}}"#).unwrap_err();
        assert!(matches!(err, SessionConfigError::Metrics(_)));
        let err = SessionConfig::from_json_str(r#"{"metrics": {"row_height_px": 0.0}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("row_height_px"));
    }

    #[test]
    fn parse_errors_are_typed() {
        assert!(matches!(
            SessionConfig::from_toml_str("cols = ["),
            Err(SessionConfigError::Toml(_))
        ));
        assert!(matches!(
            SessionConfig::from_json_str("{"),
            Err(SessionConfigError::Json(_))
        ));
    }

    #[test]
    fn file_loading() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("session.toml");
        std::fs::write(&toml_path, "save_debounce_ms = 42\n").unwrap();
        assert_eq!(
            SessionConfig::from_toml_file(&toml_path).unwrap().save_debounce_ms,
            42
        );
        let missing = SessionConfig::from_json_file(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(SessionConfigError::Io(_))));
    }
}
