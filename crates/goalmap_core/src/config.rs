//! Runtime configuration for front ends.
//!
//! # Responsibility
//! - Resolve database path, log settings and canvas size.
//! - Apply environment overrides on top of defaults.
//!
//! # Invariants
//! - Blank environment values are ignored.
//! - Canvas dimensions are finite and positive.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "GOALMAP_DB_PATH";
pub const LOG_DIR_ENV: &str = "GOALMAP_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "GOALMAP_LOG_LEVEL";

const DB_FILE_NAME: &str = "goalmap.sqlite3";
const LOG_DIR_NAME: &str = "goalmap-logs";
const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
    pub log_level: String,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let temp_dir = std::env::temp_dir();
        Self {
            db_path: temp_dir.join(DB_FILE_NAME),
            log_dir: temp_dir.join(LOG_DIR_NAME),
            log_level: default_log_level().to_string(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `GOALMAP_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from `lookup` (an environment-like source).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        if let Some(path) = non_blank(DB_PATH_ENV) {
            self.db_path = PathBuf::from(path);
        }
        if let Some(dir) = non_blank(LOG_DIR_ENV) {
            self.log_dir = PathBuf::from(dir);
        }
        if let Some(level) = non_blank(LOG_LEVEL_ENV) {
            self.log_level = level;
        }
        self
    }

    /// Sets the canvas size used to place new nodes.
    ///
    /// # Errors
    /// - `ConfigError::InvalidCanvas` for non-finite or non-positive sizes.
    pub fn with_canvas(mut self, width: f64, height: f64) -> Result<Self, ConfigError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidCanvas { width, height });
        }
        self.canvas_width = width;
        self.canvas_height = height;
        Ok(self)
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidCanvas { width: f64, height: f64 },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCanvas { width, height } => {
                write!(f, "canvas size must be positive, got {width}x{height}")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, DB_PATH_ENV, LOG_LEVEL_ENV};
    use std::path::PathBuf;

    #[test]
    fn overrides_replace_defaults_and_skip_blank_values() {
        let config = AppConfig::default().with_overrides(|name| match name {
            DB_PATH_ENV => Some(" /tmp/custom.db ".to_string()),
            LOG_LEVEL_ENV => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.db_path, PathBuf::from("/tmp/custom.db"));
        assert_eq!(config.log_level, AppConfig::default().log_level);
    }

    #[test]
    fn canvas_must_be_positive() {
        let err = AppConfig::default().with_canvas(0.0, 600.0).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCanvas { .. }));
        let config = AppConfig::default().with_canvas(1024.0, 768.0).unwrap();
        assert_eq!(config.canvas_width, 1024.0);
    }
}
