//! Insight configuration
//!
//! Holds the fallback values substituted for missing upstream fields and the
//! ticker's rotation period.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/pulse/config/insights.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/insights.toml");

/// Values substituted when an upstream record omits an optional field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackDefaults {
    pub business_impact_score: f64,
    pub avg_resolution_time_days: f64,
    pub overall_sentiment: f64,
}

impl Default for FallbackDefaults {
    fn default() -> Self {
        Self {
            business_impact_score: 72.3,
            avg_resolution_time_days: 2.3,
            overall_sentiment: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsightConfig {
    pub defaults: FallbackDefaults,
    /// How long each insight is displayed before the ticker advances
    pub rotation_interval: Duration,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            defaults: FallbackDefaults::default(),
            rotation_interval: Duration::from_secs(60),
        }
    }
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded defaults"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl InsightConfig {
    /// Load using the default override location, falling back to embedded defaults
    pub fn load() -> Result<(Self, ConfigSource)> {
        Self::load_from(None)
    }

    /// Load with an explicit override path
    ///
    /// A missing override file is not an error; the embedded defaults are used.
    pub fn load_from(override_path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let path = match override_path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };

        if let Some(path) = path.filter(|p| p.exists()) {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::InvalidData(format!("Failed to read config {}: {}", path.display(), e))
            })?;
            let config = parse_config(&content)?;
            tracing::debug!(path = %path.display(), "Loaded insight config override");
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((parse_config(DEFAULT_CONFIG)?, ConfigSource::Embedded))
    }

    /// Parse config from TOML content, keeping built-in values for missing keys
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("pulse").join("config").join("insights.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    defaults: Option<RawDefaults>,
    rotation: Option<RawRotation>,
}

#[derive(Debug, Deserialize)]
struct RawDefaults {
    business_impact_score: Option<f64>,
    avg_resolution_time_days: Option<f64>,
    overall_sentiment: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawRotation {
    interval_secs: Option<u64>,
}

fn parse_config(content: &str) -> Result<InsightConfig> {
    let raw: RawConfig = toml::from_str(content)?;
    let mut config = InsightConfig::default();

    if let Some(defaults) = raw.defaults {
        if let Some(score) = defaults.business_impact_score {
            config.defaults.business_impact_score = finite("business_impact_score", score)?;
        }
        if let Some(days) = defaults.avg_resolution_time_days {
            config.defaults.avg_resolution_time_days = finite("avg_resolution_time_days", days)?;
        }
        if let Some(sentiment) = defaults.overall_sentiment {
            config.defaults.overall_sentiment = finite("overall_sentiment", sentiment)?;
        }
    }

    if let Some(rotation) = raw.rotation {
        if let Some(secs) = rotation.interval_secs {
            if secs == 0 {
                return Err(Error::InvalidData(
                    "rotation.interval_secs must be greater than 0".to_string(),
                ));
            }
            config.rotation_interval = Duration::from_secs(secs);
        }
    }

    Ok(config)
}

fn finite(key: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidData(format!(
            "defaults.{} must be a non-negative number, got {}",
            key, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, InsightConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = InsightConfig::from_toml(
            r#"
            [defaults]
            business_impact_score = 90.0
            "#,
        )
        .unwrap();

        assert_eq!(config.defaults.business_impact_score, 90.0);
        assert_eq!(config.defaults.avg_resolution_time_days, 2.3);
        assert_eq!(config.rotation_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(
            InsightConfig::from_toml("").unwrap(),
            InsightConfig::default()
        );
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = InsightConfig::from_toml("[rotation]\ninterval_secs = 0").unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_negative_default_rejected() {
        let err = InsightConfig::from_toml("[defaults]\noverall_sentiment = -1.0").unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let err = InsightConfig::from_toml("[defaults\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rotation]\ninterval_secs = 15").unwrap();

        let (config, source) = InsightConfig::load_from(Some(file.path())).unwrap();

        assert_eq!(config.rotation_interval, Duration::from_secs(15));
        assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_missing_override_falls_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let (config, source) = InsightConfig::load_from(Some(&path)).unwrap();

        assert_eq!(config, InsightConfig::default());
        assert_eq!(source, ConfigSource::Embedded);
    }
}
