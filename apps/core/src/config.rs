//! Runtime configuration, read from the environment (and `.env` when present).

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use validator::Validate;

use crate::error::AppError;

pub const ENV_MODEL_TIMEOUT_SECS: &str = "DOCUMINT_MODEL_TIMEOUT_SECS";
pub const ENV_MAX_SPECIFIC_PROMPTS: &str = "DOCUMINT_MAX_SPECIFIC_PROMPTS";
pub const ENV_LOG_FORMAT: &str = "DOCUMINT_LOG_FORMAT";

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown log format: {}", other))),
        }
    }
}

/// Settings of the document analysis workflow.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnalysisConfig {
    /// Upper bound for a single model call, in seconds.
    #[validate(range(min = 1, max = 600))]
    pub model_timeout_secs: u64,
    /// How many document-specific questions are asked (each set has four).
    #[validate(range(max = 4))]
    pub max_specific_prompts: usize,
    pub log_format: LogFormat,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model_timeout_secs: 60,
            max_specific_prompts: 3,
            log_format: LogFormat::Pretty,
        }
    }
}

fn read_var<T>(name: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| AppError::Config(format!("{} has an invalid value '{}': {}", name, raw, e))),
        Err(_) => Ok(None),
    }
}

impl AnalysisConfig {
    /// Loads `.env` (if any), applies environment overrides and validates the result.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_current_env()
    }

    /// Builds the configuration from the process environment only.
    pub fn from_current_env() -> Result<Self, AppError> {
        let mut config = Self::default();
        if let Some(secs) = read_var(ENV_MODEL_TIMEOUT_SECS)? {
            config.model_timeout_secs = secs;
        }
        if let Some(count) = read_var(ENV_MAX_SPECIFIC_PROMPTS)? {
            config.max_specific_prompts = count;
        }
        if let Some(format) = read_var(ENV_LOG_FORMAT)? {
            config.log_format = format;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout_secs)
    }
}
