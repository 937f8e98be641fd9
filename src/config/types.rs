use std::time::Duration;

use serde::Deserialize;

use crate::args::{HttpMethod, MinDiff, parse_duration_arg};
use crate::error::{AppResult, ValidationError};

/// Values a `polypath.toml` / `polypath.json` file may set. Command-line
/// flags take precedence over every field.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    /// Path to the targets file.
    pub targets: Option<String>,
    pub wordlist: Option<String>,
    /// Same syntax as `-H`: `Key: Value` lists or `@file`.
    pub headers: Option<Vec<String>>,
    #[serde(alias = "method")]
    pub methods: Option<Vec<HttpMethod>>,
    pub status: Option<Vec<u16>>,
    pub min_diff: Option<MinDiffValue>,
    pub max_errors: Option<u64>,
    #[serde(alias = "concurrency")]
    pub workers: Option<usize>,
    pub insecure: Option<bool>,
    pub timeout: Option<DurationValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> AppResult<Duration> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero.into())
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MinDiffValue {
    Number(f64),
    Text(String),
}

impl MinDiffValue {
    pub(crate) fn to_min_diff(&self) -> Result<MinDiff, ValidationError> {
        match self {
            MinDiffValue::Number(value) => MinDiff::try_from(*value),
            MinDiffValue::Text(text) => text.parse(),
        }
    }
}
