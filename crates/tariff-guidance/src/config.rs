//! Pipeline configuration.
//!
//! Defaults suit local use. A YAML file may override them, and environment
//! variables override the file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tariff_core::Locale;

/// Default lifetime of cached headers and super-headers.
pub const DEFAULT_HEADER_CACHE_TTL_SECS: u64 = 300;

/// Environment variable overriding [`PipelineConfig::header_cache_ttl_secs`].
pub const ENV_HEADER_CACHE_TTL_SECS: &str = "TARIFF_HEADER_CACHE_TTL_SECS";

/// Environment variable overriding [`PipelineConfig::default_locale`].
pub const ENV_DEFAULT_LOCALE: &str = "TARIFF_DEFAULT_LOCALE";

/// Configuration for the guidance pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Seconds a cached header list stays fresh.
    pub header_cache_ttl_secs: u64,
    /// Locale used when a request names none.
    pub default_locale: Locale,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            header_cache_ttl_secs: DEFAULT_HEADER_CACHE_TTL_SECS,
            default_locale: Locale::En,
        }
    }
}

impl PipelineConfig {
    /// Parse configuration from YAML. Missing keys take their defaults.
    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&raw)
    }

    /// Defaults with environment overrides applied.
    ///
    /// Variables:
    /// - `TARIFF_HEADER_CACHE_TTL_SECS` (default: 300)
    /// - `TARIFF_DEFAULT_LOCALE` (default: `en`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides on top of `self`.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|var| std::env::var(var).ok())
    }

    fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(raw) = lookup(ENV_HEADER_CACHE_TTL_SECS) {
            self.header_cache_ttl_secs =
                raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    var: ENV_HEADER_CACHE_TTL_SECS,
                    value: raw.clone(),
                    reason: "expected a whole number of seconds".to_string(),
                })?;
        }
        if let Some(raw) = lookup(ENV_DEFAULT_LOCALE) {
            self.default_locale = raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: ENV_DEFAULT_LOCALE,
                value: raw.clone(),
                reason: "expected en or cy".to_string(),
            })?;
        }
        Ok(self)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}
