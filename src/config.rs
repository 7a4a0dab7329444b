//! Environment-driven configuration

use std::env;
use std::sync::Arc;
use thiserror::Error;

use crate::models::label::{DetectionResult, UnknownLabel};
use crate::services::label_source::{FixedLabelSource, LabelSource, RandomLabelSource};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Deployment environment name (`ENVIRONMENT`, default `sandbox`).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT")
        .map(|e| e.trim().to_lowercase())
        .ok()
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| "sandbox".to_string())
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {key} value '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("Unknown LABEL_SOURCE '{0}' (expected 'random' or 'fixed')")]
    UnknownLabelSource(String),

    #[error("FIXED_LABELS is required when LABEL_SOURCE=fixed")]
    MissingFixedLabels,

    #[error("Invalid FIXED_LABELS: {0}")]
    InvalidLabel(#[from] UnknownLabel),
}

/// Which detector backs the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSourceKind {
    Random,
    Fixed(DetectionResult),
}

impl LabelSourceKind {
    pub fn build(&self) -> Arc<dyn LabelSource + Send + Sync> {
        match self {
            LabelSourceKind::Random => Arc::new(RandomLabelSource::new()),
            LabelSourceKind::Fixed(labels) => Arc::new(FixedLabelSource::new(labels.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub max_upload_bytes: usize,
    pub label_source: LabelSourceKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            label_source: LabelSourceKind::Random,
        }
    }
}

impl Config {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup (environment, map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let max_upload_bytes = match get("MAX_UPLOAD_BYTES") {
            Some(value) => match value.parse::<usize>() {
                Ok(bytes) if bytes > 0 => bytes,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "MAX_UPLOAD_BYTES",
                        value,
                    })
                }
            },
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let label_source = match get("LABEL_SOURCE").map(|s| s.to_lowercase()).as_deref() {
            None | Some("random") => LabelSourceKind::Random,
            Some("fixed") => {
                let list = get("FIXED_LABELS").ok_or(ConfigError::MissingFixedLabels)?;
                LabelSourceKind::Fixed(DetectionResult::parse_list(&list)?)
            }
            Some(other) => return Err(ConfigError::UnknownLabelSource(other.to_string())),
        };

        Ok(Self {
            port,
            max_upload_bytes,
            label_source,
        })
    }
}
