// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration handling for conformancebot

use crate::error::{ConformanceError, Result};
use crate::model::TesterInfo;
use crate::normalizer::UnmappedPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Tester identity stamped on page contexts
    #[serde(default)]
    pub tester: TesterConfig,

    /// Finding normalization settings
    #[serde(default)]
    pub normalizer: NormalizerConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

/// Tester identity configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TesterConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub certification_number: String,
}

impl From<&TesterConfig> for TesterInfo {
    fn from(tester: &TesterConfig) -> Self {
        TesterInfo {
            name: tester.name.clone(),
            email: tester.email.clone(),
            organization: tester.organization.clone(),
            certification_number: tester.certification_number.clone(),
        }
    }
}

/// Finding normalization configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// What to do with scanner rules that map to no test
    #[serde(default)]
    pub unmapped_policy: UnmappedPolicy,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Refuse to export while critical tests are unperformed
    #[serde(default = "default_true")]
    pub require_critical_tests: bool,

    /// Also refuse while a critical test is only recorded as NOT TESTED
    #[serde(default)]
    pub require_decided_critical_tests: bool,

    /// Include the remediation plan in exports
    #[serde(default = "default_true")]
    pub include_remediation: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            require_critical_tests: true,
            require_decided_critical_tests: false,
            include_remediation: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|e| e == "toml").unwrap_or(false)
}

/// Load configuration from a path
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;

    let config: Config = if is_toml(path) {
        toml::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };

    debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Default config path relative to the working directory
pub fn default_config_path() -> PathBuf {
    PathBuf::from(".conformancebot/config.yml")
}

/// Write default configuration to a file
pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = if is_toml(path) {
        toml::to_string_pretty(&config).map_err(|e| ConformanceError::Config(e.to_string()))?
    } else {
        serde_yaml::to_string(&config)?
    };

    std::fs::write(path, content)?;
    Ok(())
}
