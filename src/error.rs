// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for conformancebot

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConformanceError>;

#[derive(Error, Debug)]
pub enum ConformanceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid test id: {0}")]
    InvalidTestId(String),

    #[error("Unknown test: {0}")]
    UnknownTest(String),

    #[error("Invalid outcome: {0}")]
    InvalidOutcome(String),

    #[error("Cannot export until required critical tests are performed: {}", .0.join(", "))]
    CriticalTestsMissing(Vec<String>),
}
