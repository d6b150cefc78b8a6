//! Stage configuration.

use std::fs;
use std::path::Path;

use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which nodes drop resolution looks at.
///
/// By default every node under the pointer is a drop candidate, hidden or
/// disabled alike. Grabbing is unaffected: hidden and disabled components
/// can never start a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Invisible nodes and their subtrees are not drop candidates.
    pub skip_hidden: bool,
    /// Disabled nodes and their subtrees are not drop candidates.
    pub skip_disabled: bool,
}

/// Range the view scale may be zoomed within.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self { min: 0.25, max: 4.0 }
    }
}

impl ScaleLimits {
    /// Bring `scale` into range. When `min > max`, `max` wins.
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.max(self.min).min(self.max)
    }
}

/// Stage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub width: f64,
    pub height: f64,
    /// Initial view scale (1.0 = one scene unit per pixel).
    pub view_scale: f64,
    /// Initial view offset in screen pixels.
    pub view_offset: Vec2,
    pub view_limits: ScaleLimits,
    pub drag: DragConfig,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            view_scale: 1.0,
            view_offset: Vec2::ZERO,
            view_limits: ScaleLimits::default(),
            drag: DragConfig::default(),
        }
    }
}

impl StageConfig {
    /// Parse a JSON document. Missing fields take their default values.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_json_str(&json)?;
        log::debug!("Loaded stage config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = StageConfig::default();
        assert!((config.view_scale - 1.0).abs() < f64::EPSILON);
        assert!(!config.drag.skip_hidden);
        assert!(!config.drag.skip_disabled);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = StageConfig::from_json_str(r#"{"width": 640, "drag": {"skip_hidden": true}}"#).unwrap();
        assert!((config.width - 640.0).abs() < f64::EPSILON);
        assert!((config.height - 800.0).abs() < f64::EPSILON);
        assert!(config.drag.skip_hidden);
        assert!(!config.drag.skip_disabled);
    }

    #[test]
    fn test_scale_limits_clamp() {
        let limits = ScaleLimits::default();
        assert_eq!(limits.clamp(0.01), 0.25);
        assert_eq!(limits.clamp(1.5), 1.5);
        assert_eq!(limits.clamp(40.0), 4.0);

        let inverted = ScaleLimits { min: 3.0, max: 2.0 };
        assert_eq!(inverted.clamp(1.0), 2.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = StageConfig {
            view_offset: Vec2::new(12.0, -4.0),
            ..StageConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(StageConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"view_scale": 2.0}}"#).unwrap();

        let config = StageConfig::load(file.path()).unwrap();
        assert!((config.view_scale - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(StageConfig::load(&missing), Err(ConfigError::Io(_))));

        assert!(matches!(StageConfig::from_json_str("{not json"), Err(ConfigError::Parse(_))));
    }
}
