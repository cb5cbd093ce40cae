//! Panel configuration.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default committed size of a new panel.
pub const DEFAULT_SIZE: Size = Size::new(240.0, 240.0);

/// Default floor applied while resizing.
pub const DEFAULT_MIN_SIZE: Size = Size::new(100.0, 100.0);

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Construction-time settings of one panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub title: String,
    /// Initial committed top-left.
    pub position: Point,
    /// Initial committed size.
    pub size: Size,
    /// Smallest size any resize handle may produce.
    pub min_size: Size,
    /// Height of the title bar; subtracted from the content size and used
    /// as the displayed height while minimized.
    pub header_height: f64,
    /// Log controller init/dispose.
    pub debug: bool,
    /// Report runtime geometry on every move instead of only on commit.
    pub use_runtime: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title: "Untitled".to_string(),
            position: Point::ZERO,
            size: DEFAULT_SIZE,
            min_size: DEFAULT_MIN_SIZE,
            header_height: 0.0,
            debug: false,
            use_runtime: false,
        }
    }
}

impl PanelConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_min_size(mut self, min_size: Size) -> Self {
        self.min_size = min_size;
        self
    }

    pub fn with_runtime(mut self, use_runtime: bool) -> Self {
        self.use_runtime = use_runtime;
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.position.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "position must be finite, got {:?}",
                self.position
            )));
        }
        for (name, size) in [("size", self.size), ("min_size", self.min_size)] {
            if !size.is_finite() || size.width < 0.0 || size.height < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and non-negative, got {size:?}"
                )));
            }
        }
        if self.min_size.width > self.size.width || self.min_size.height > self.size.height {
            return Err(ConfigError::Invalid(format!(
                "min_size {:?} exceeds size {:?}",
                self.min_size, self.size
            )));
        }
        if !self.header_height.is_finite() || self.header_height < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "header_height must be finite and non-negative, got {}",
                self.header_height
            )));
        }
        Ok(())
    }
}
