use crate::error::EngineError;
use crate::result::EngineResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tuning for the click-versus-drag decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Straight-line travel (px) a press must exceed to become a drag.
    pub threshold_px: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self { threshold_px: 5.0 }
    }
}

/// Tuning for wheel smoothing. These encode feel, not correctness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Multiplier applied to each wheel delta before it moves the target.
    pub gain: f64,
    /// Fraction of the remaining distance closed per frame.
    pub convergence: f64,
    /// Distance below which the offset snaps onto the target.
    pub snap_epsilon: f64,
    /// Pixels per line for line-mode wheel deltas.
    pub line_height_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            gain: 0.52,
            convergence: 0.24,
            snap_epsilon: 0.5,
            line_height_px: 16.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Main-axis extent of one item including its gap (210 card + 24 gap).
    pub item_extent: f64,
    /// Extra items materialized on each side of the visible range.
    pub overscan: usize,
    /// How close `end` may get to the loaded length before prefetching.
    pub near_end_margin: usize,
    /// Items requested per page.
    pub page_size: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            item_extent: 234.0,
            overscan: 4,
            near_end_margin: 2,
            page_size: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Share of the item extent left visible of the neighbor past a
    /// selected item.
    pub peek_fraction: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            peek_fraction: 1.0 / 3.0,
        }
    }
}

impl SelectionConfig {
    pub fn peek_offset(&self, item_extent: f64) -> f64 {
        item_extent * self.peek_fraction
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub drag: DragConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
}

impl EngineConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/clipdeck/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("clipdeck/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("clipdeck\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load the user config, falling back to defaults when it is missing
    /// or unusable.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                match Self::load_from(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(
                            "Ignoring config at {}: {}",
                            config_path.display(),
                            e
                        );
                    }
                }
            }
        }
        Self::default()
    }

    pub fn load_from(path: &Path) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> EngineResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |msg: &str| Err(EngineError::InvalidConfig(msg.to_string()));

        if !(self.drag.threshold_px.is_finite() && self.drag.threshold_px >= 0.0) {
            return invalid("drag.threshold_px must be a non-negative number");
        }
        if !(self.scroll.gain.is_finite() && self.scroll.gain > 0.0) {
            return invalid("scroll.gain must be positive");
        }
        if !(self.scroll.convergence > 0.0 && self.scroll.convergence <= 1.0) {
            return invalid("scroll.convergence must be in (0, 1]");
        }
        if !(self.scroll.snap_epsilon.is_finite() && self.scroll.snap_epsilon > 0.0) {
            return invalid("scroll.snap_epsilon must be positive");
        }
        if !(self.scroll.line_height_px.is_finite() && self.scroll.line_height_px > 0.0) {
            return invalid("scroll.line_height_px must be positive");
        }
        if !(self.window.item_extent.is_finite() && self.window.item_extent > 0.0) {
            return invalid("window.item_extent must be positive");
        }
        if self.window.page_size == 0 {
            return invalid("window.page_size must be at least 1");
        }
        if !(self.selection.peek_fraction >= 0.0 && self.selection.peek_fraction < 1.0) {
            return invalid("selection.peek_fraction must be in [0, 1)");
        }
        Ok(())
    }

    pub fn peek_offset(&self) -> f64 {
        self.selection.peek_offset(self.window.item_extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.drag.threshold_px, 5.0);
        assert_eq!(config.scroll.gain, 0.52);
        assert_eq!(config.scroll.convergence, 0.24);
        assert_eq!(config.window.item_extent, 234.0);
        assert_eq!(config.window.overscan, 4);
        assert_eq!(config.window.near_end_margin, 2);
        assert!((config.peek_offset() - 78.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [drag]
            threshold_px = 8.0

            [window]
            overscan = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.drag.threshold_px, 8.0);
        assert_eq!(config.window.overscan, 2);
        assert_eq!(config.window.item_extent, 234.0);
        assert_eq!(config.scroll, ScrollConfig::default());
    }

    #[test]
    fn test_rejects_zero_item_extent() {
        let err = EngineConfig::from_toml_str("[window]\nitem_extent = 0.0\n").unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_convergence_out_of_range() {
        let mut config = EngineConfig::default();
        config.scroll.convergence = 1.5;
        assert!(config.validate().is_err());
        config.scroll.convergence = 0.0;
        assert!(config.validate().is_err());
        config.scroll.convergence = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_toml_is_serialization_error() {
        let err = EngineConfig::from_toml_str("[drag\nthreshold_px = ").unwrap_err();
        assert!(matches!(err, EngineError::Serialization(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[selection]\npeek_fraction = 0.25").unwrap();

        let config = EngineConfig::load_from(file.path()).unwrap();
        assert_eq!(config.selection.peek_fraction, 0.25);
        assert!((config.peek_offset() - 58.5).abs() < 1e-9);
    }

    #[test]
    fn test_load_from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::load_from(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }
}
