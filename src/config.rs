//! Tool configuration module.
//!
//! Handles loading and validating the optional `ripecheck.toml`. All
//! options have defaults, so the file is only needed to override them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [cache]
//! # Maximum number of verdicts kept in memory. Omit for unbounded
//! # (one small record per distinct image per session). Set a bound for
//! # long-lived batch runs; least-recently-used verdicts are dropped —
//! # and re-analyzed with freshly drawn recommendation text if seen again.
//! # capacity = 1024
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `ripecheck.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Verdict cache settings.
    pub cache: CacheConfig,
}

/// Verdict cache settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Maximum number of cached verdicts. `None` means unbounded.
    pub capacity: Option<usize>,
}

impl AnalyzerConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.capacity == Some(0) {
            return Err(ConfigError::Validation(
                "cache.capacity must be at least 1 (omit for unbounded)".into(),
            ));
        }
        Ok(())
    }
}

/// Stock `ripecheck.toml` with every option documented, printed by
/// `ripecheck gen-config`.
pub fn stock_config_toml() -> &'static str {
    "\
# ripecheck configuration. Every option is optional; defaults shown.

[cache]
# Maximum number of verdicts kept in memory. Omit for unbounded.
# When bounded, least-recently-used verdicts are evicted; a re-analyzed
# image then gets freshly drawn recommendation text.
# capacity = 1024
"
}
