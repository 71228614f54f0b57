//! Configuration for the hello-xr sample
//!
//! Settings are read from a TOML file with three sections:
//!
//! ```toml
//! [display]
//! spatial = "auto"        # auto | on | off
//! xr_feature = true
//! tick_rate_ms = 50
//!
//! [model]
//! asset = "assets/bugdroid.glb"
//! animation = "Armature|Take 001|BaseLayer"
//!
//! [logging]
//! level = "info"
//! file = "hello-xr.log"
//! ```
//!
//! Every field is optional; missing fields take their defaults.

mod loader;

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use loader::{default_config_path, resolve_path, CONFIG_ENV, CONFIG_FILE_NAME};

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// How the app decides between spatial and flat presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpatialMode {
    /// Spatial whenever the device supports it
    #[default]
    Auto,
    /// Start in full space; falls back to flat without XR support
    On,
    /// Start in home space
    Off,
}

impl SpatialMode {
    /// Whether full space should be requested at startup
    pub fn requests_spatial(&self) -> bool {
        !matches!(self, SpatialMode::Off)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub spatial: SpatialMode,
    /// Simulate a device with the XR spatial feature
    pub xr_feature: bool,
    pub tick_rate_ms: u64,
    /// Fixed window width in dp; derived from the terminal when unset
    pub window_width_dp: Option<f32>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            spatial: SpatialMode::Auto,
            xr_feature: true,
            tick_rate_ms: 50,
            window_width_dp: None,
        }
    }
}

impl DisplayConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// glTF/GLB file to load instead of the embedded droid
    pub asset: Option<PathBuf>,
    /// Name passed to the model constructor
    pub name: String,
    /// Animation started while animating
    pub animation: String,
    /// Mesh receiving the material override
    pub mesh: String,
    /// Model height in meters
    pub height_m: f32,
    /// Share of the available layout height the model fills
    pub fill_ratio: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            asset: None,
            name: "BUGDROID".to_string(),
            animation: "Armature|Take 001|BaseLayer".to_string(),
            mesh: "Bugdroid".to_string(),
            height_m: 2.08,
            fill_ratio: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `hello_xr_app=debug`
    pub level: String,
    /// Log file; the terminal UI logs to `hello-xr.log` when unset
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub model: ModelConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the first configuration file found, or defaults.
    ///
    /// Returns the path the configuration came from, if any.
    pub fn load(explicit: Option<PathBuf>) -> Result<(Self, Option<PathBuf>)> {
        match resolve_path(explicit) {
            Some(path) => {
                let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                let config = Self::from_toml_str(&content)?;
                tracing::debug!("Loaded configuration from {}", path.display());
                Ok((config, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.display.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid("display.tick_rate_ms must be positive".into()));
        }
        if let Some(width) = self.display.window_width_dp {
            if !(width.is_finite() && width > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "display.window_width_dp must be positive, got {width}"
                )));
            }
        }
        if !(self.model.height_m.is_finite() && self.model.height_m > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "model.height_m must be positive, got {}",
                self.model.height_m
            )));
        }
        if !(self.model.fill_ratio > 0.0 && self.model.fill_ratio <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "model.fill_ratio must be in (0, 1], got {}",
                self.model.fill_ratio
            )));
        }
        if self.model.name.trim().is_empty() {
            return Err(ConfigError::Invalid("model.name must not be empty".into()));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.level must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.model.name, "BUGDROID");
        assert_eq!(config.display.tick_rate(), Duration::from_millis(50));
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml_str(
            r#"
            [display]
            spatial = "off"
            window_width_dp = 480.0

            [model]
            asset = "/tmp/droid.glb"
            "#,
        )
        .unwrap();

        assert_eq!(config.display.spatial, SpatialMode::Off);
        assert!(!config.display.spatial.requests_spatial());
        assert!(config.display.xr_feature);
        assert_eq!(config.display.window_width_dp, Some(480.0));
        assert_eq!(config.model.asset, Some(PathBuf::from("/tmp/droid.glb")));
        assert_eq!(config.model.animation, "Armature|Take 001|BaseLayer");
    }

    #[test]
    fn test_unknown_spatial_mode_is_parse_error() {
        let err = AppConfig::from_toml_str("[display]\nspatial = \"sometimes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation() {
        let err = AppConfig::from_toml_str("[display]\ntick_rate_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = AppConfig::from_toml_str("[model]\nfill_ratio = 1.5").unwrap_err();
        assert!(err.to_string().contains("fill_ratio"));

        let err = AppConfig::from_toml_str("[model]\nheight_m = -2.0").unwrap_err();
        assert!(err.to_string().contains("height_m"));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let mut config = AppConfig::default();
        config.logging.file = Some(PathBuf::from("xr.log"));
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(AppConfig::from_toml_str(&text).unwrap(), config);
    }
}
