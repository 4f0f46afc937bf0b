//! Error types for loading link snapshots.
//!
//! The engine itself is total; only the edges that read external input fail.

use thiserror::Error;

/// Errors that can occur while loading links or building matchers.
#[derive(Error, Debug)]
pub enum RulesError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported snapshot format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid keyword pattern: {0}")]
    Pattern(String),
}
