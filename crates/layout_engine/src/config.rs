//! Fitting configuration
//!
//! Settings are plain serde structs so hosts can keep them in a JSON file
//! next to the rest of their preferences. Every section falls back to its
//! defaults when omitted.

use crate::{FontSizeRange, LayoutError, MeasureSettings, Result, VerticalAlignment};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Binary search settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    /// Smallest font size the search may return
    pub min_font_size: f32,
    /// Largest font size the search may return
    pub max_font_size: f32,
    /// Stop once the search interval is narrower than this
    pub accuracy_threshold: f32,
    /// Size at which words are compared to find the longest one
    pub reference_font_size: f32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_font_size: 1.0,
            max_font_size: 512.0,
            accuracy_threshold: 2.0,
            reference_font_size: 100.0,
        }
    }
}

impl SearchSettings {
    /// The validated font size range
    pub fn font_range(&self) -> Result<FontSizeRange> {
        FontSizeRange::new(self.min_font_size, self.max_font_size)
    }

    pub fn validate(&self) -> Result<()> {
        self.font_range()?;
        if !self.accuracy_threshold.is_finite() || self.accuracy_threshold < 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "accuracy_threshold must be a non-negative number, got {}",
                self.accuracy_threshold
            )));
        }
        if !self.reference_font_size.is_finite() || self.reference_font_size <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "reference_font_size must be positive, got {}",
                self.reference_font_size
            )));
        }
        Ok(())
    }
}

/// Placement settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlacementSettings {
    /// Vertical alignment of fitted text inside its box
    pub alignment: VerticalAlignment,
}

/// Fit cache settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheSettings {
    /// Maximum number of cached fits
    pub max_entries: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { max_entries: 256 }
    }
}

/// Complete configuration for fitting, measuring and placing text
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AutoFitConfig {
    pub search: SearchSettings,
    pub measure: MeasureSettings,
    pub placement: PlacementSettings,
    pub cache: CacheSettings,
}

impl AutoFitConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AutoFitConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from disk.
    ///
    /// A missing file gives the defaults. A file that does not parse is
    /// logged and also gives the defaults; a file that parses but holds
    /// invalid values is an error.
    pub fn load_sync(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = match serde_json::from_str::<AutoFitConfig>(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    "Failed to parse config file {}, using defaults: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize as pretty JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        let spacing = self.measure.line_spacing;
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "line_spacing must be positive, got {}",
                spacing
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AutoFitConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = AutoFitConfig::from_json_str(
            r#"{ "search": { "max_font_size": 72.0 }, "placement": { "alignment": "bottom" } }"#,
        )
        .unwrap();

        assert_eq!(config.search.max_font_size, 72.0);
        assert_eq!(config.search.min_font_size, 1.0);
        assert_eq!(config.placement.alignment, VerticalAlignment::Bottom);
        assert_eq!(config.measure, MeasureSettings::default());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = AutoFitConfig::from_json_str(
            r#"{ "search": { "min_font_size": 40.0, "max_font_size": 20.0 } }"#,
        );
        assert!(matches!(result, Err(LayoutError::InvalidFontRange { .. })));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let result = AutoFitConfig::from_json_str(r#"{ "search": { "accuracy_threshold": -1.0 } }"#);
        assert!(matches!(result, Err(LayoutError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_line_spacing_rejected() {
        let result = AutoFitConfig::from_json_str(r#"{ "measure": { "line_spacing": 0.0 } }"#);
        assert!(matches!(result, Err(LayoutError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AutoFitConfig::load_sync(dir.path().join("absent.json")).unwrap();
        assert_eq!(config, AutoFitConfig::default());
    }

    #[test]
    fn test_load_unparseable_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autofit.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"{ not json").unwrap();

        let config = AutoFitConfig::load_sync(&path).unwrap();
        assert_eq!(config, AutoFitConfig::default());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autofit.json");
        let mut config = AutoFitConfig::default();
        config.search.accuracy_threshold = 0.5;
        config.cache.max_entries = 8;
        std::fs::write(&path, config.to_json_string().unwrap()).unwrap();

        assert_eq!(AutoFitConfig::load_sync(&path).unwrap(), config);
    }
}
