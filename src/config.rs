//! YAML configuration file support.
//!
//! Lets operators tune the matcher and the binary's logging from one file
//! instead of code.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "aeo-scoring"
//! log_level: "info"
//!
//! matcher:
//!   context_chars: 20
//!   fuzzy_min_confidence: 70
//!   partial_min_confidence: 60
//!   partial_max_confidence: 95
//!   min_variation_len: 3
//!   max_text_bytes: 1048576
//! ```

use std::fs;
use std::path::Path;

use matcher::MatchConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PresenceConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Default tracing filter for the binary; `RUST_LOG` wins when set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Matcher configuration
    #[serde(default)]
    pub matcher: MatchYamlConfig,
}

impl PresenceConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PresenceConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        if self.log_level.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "log_level must not be empty".to_string(),
            ));
        }

        self.matcher.validate()
    }

    /// Matcher settings as the engine's [`MatchConfig`].
    pub fn match_config(&self) -> MatchConfig {
        self.matcher.to_match_config()
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            log_level: default_log_level(),
            matcher: MatchYamlConfig::default(),
        }
    }
}

/// Matcher YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchYamlConfig {
    #[serde(default = "default_context_chars")]
    pub context_chars: usize,

    #[serde(default = "default_fuzzy_min")]
    pub fuzzy_min_confidence: u8,

    #[serde(default = "default_partial_min")]
    pub partial_min_confidence: u8,

    #[serde(default = "default_partial_max")]
    pub partial_max_confidence: u8,

    #[serde(default = "default_min_variation_len")]
    pub min_variation_len: usize,

    /// `null` disables the input-length guard
    #[serde(default = "default_max_text_bytes")]
    pub max_text_bytes: Option<usize>,
}

impl MatchYamlConfig {
    fn to_match_config(&self) -> MatchConfig {
        MatchConfig {
            context_chars: self.context_chars,
            fuzzy_min_confidence: self.fuzzy_min_confidence,
            partial_min_confidence: self.partial_min_confidence,
            partial_max_confidence: self.partial_max_confidence,
            min_variation_len: self.min_variation_len,
            max_text_bytes: self.max_text_bytes,
        }
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_match_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("matcher: {err}")))
    }
}

impl Default for MatchYamlConfig {
    fn default() -> Self {
        Self {
            context_chars: default_context_chars(),
            fuzzy_min_confidence: default_fuzzy_min(),
            partial_min_confidence: default_partial_min(),
            partial_max_confidence: default_partial_max(),
            min_variation_len: default_min_variation_len(),
            max_text_bytes: default_max_text_bytes(),
        }
    }
}

// Helper functions for serde defaults
fn default_log_level() -> String {
    "info".to_string()
}

fn default_context_chars() -> usize {
    MatchConfig::default().context_chars
}

fn default_fuzzy_min() -> u8 {
    MatchConfig::default().fuzzy_min_confidence
}

fn default_partial_min() -> u8 {
    MatchConfig::default().partial_min_confidence
}

fn default_partial_max() -> u8 {
    MatchConfig::default().partial_max_confidence
}

fn default_min_variation_len() -> usize {
    MatchConfig::default().min_variation_len
}

fn default_max_text_bytes() -> Option<usize> {
    MatchConfig::default().max_text_bytes
}
