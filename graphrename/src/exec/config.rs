// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Run configuration for the batch execution engine

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_BATCH_SIZE: usize = 100_000;

/// Errors raised while reading or validating run options
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Option '{key}' expects {expected}, got {value}")]
    InvalidValue {
        key: String,
        expected: &'static str,
        value: String,
    },

    #[error("Option '{key}' out of range: {reason}")]
    OutOfRange { key: String, reason: String },

    #[error("Malformed settings: {0}")]
    Malformed(String),
}

/// How transactional scopes map onto batches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchMode {
    /// One scope per batch
    #[default]
    Batch,
    /// One scope for the whole run
    BatchSingle,
    /// One scope per entity
    Single,
}

impl BatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchMode::Batch => "BATCH",
            BatchMode::BatchSingle => "BATCH_SINGLE",
            BatchMode::Single => "SINGLE",
        }
    }
}

impl fmt::Display for BatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BatchMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BATCH" => Ok(BatchMode::Batch),
            "BATCH_SINGLE" => Ok(BatchMode::BatchSingle),
            "SINGLE" => Ok(BatchMode::Single),
            _ => Err(ConfigError::InvalidValue {
                key: "batchMode".to_string(),
                expected: "one of BATCH, BATCH_SINGLE, SINGLE",
                value: s.to_string(),
            }),
        }
    }
}

/// Engine settings for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunConfig {
    /// Entities per batch
    pub batch_size: usize,
    /// Worker count when `parallel` is set
    pub concurrency: usize,
    /// Re-attempts of a failed batch before it is recorded as failed
    pub retries: u32,
    /// Dispatch batches to a worker pool
    pub parallel: bool,
    pub batch_mode: BatchMode,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            concurrency: host_parallelism(),
            retries: 0,
            parallel: true,
            batch_mode: BatchMode::Batch,
        }
    }
}

impl RunConfig {
    /// Read a caller-supplied option map over the defaults
    pub fn from_options(options: &Map<String, JsonValue>) -> Result<Self, ConfigError> {
        Self::default().merge_options(options)
    }

    /// Overlay recognised keys from `options`; unknown keys are ignored
    pub fn merge_options(&self, options: &Map<String, JsonValue>) -> Result<Self, ConfigError> {
        let mut config = self.clone();
        if let Some(value) = options.get("batchSize") {
            config.batch_size = to_usize("batchSize", value)?;
        }
        if let Some(value) = options.get("concurrency") {
            config.concurrency = to_usize("concurrency", value)?;
        }
        if let Some(value) = options.get("retries") {
            config.retries = u32::try_from(to_integer("retries", value)?).map_err(|_| {
                ConfigError::OutOfRange {
                    key: "retries".to_string(),
                    reason: format!("{} is not a valid retry count", value),
                }
            })?;
        }
        if let Some(value) = options.get("parallel") {
            config.parallel = to_boolean("parallel", value)?;
        }
        if let Some(value) = options.get("batchMode") {
            config.batch_mode = match value {
                JsonValue::String(s) => s.parse()?,
                other => {
                    return Err(ConfigError::InvalidValue {
                        key: "batchMode".to_string(),
                        expected: "a string",
                        value: other.to_string(),
                    })
                }
            };
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::OutOfRange {
                key: "batchSize".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.concurrency == 0 {
            return Err(ConfigError::OutOfRange {
                key: "concurrency".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_batch_mode(mut self, batch_mode: BatchMode) -> Self {
        self.batch_mode = batch_mode;
        self
    }
}

pub(crate) fn host_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn to_integer(key: &str, value: &JsonValue) -> Result<i64, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key: key.to_string(),
        expected: "an integer",
        value: value.to_string(),
    };
    match value {
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .ok_or_else(invalid),
        JsonValue::String(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn to_usize(key: &str, value: &JsonValue) -> Result<usize, ConfigError> {
    let n = to_integer(key, value)?;
    usize::try_from(n).map_err(|_| ConfigError::OutOfRange {
        key: key.to_string(),
        reason: format!("{} is negative", n),
    })
}

fn to_boolean(key: &str, value: &JsonValue) -> Result<bool, ConfigError> {
    match value {
        JsonValue::Bool(b) => Ok(*b),
        JsonValue::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        JsonValue::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            expected: "a boolean",
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: JsonValue) -> Map<String, JsonValue> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.batch_size, 100_000);
        assert!(config.concurrency >= 1);
        assert_eq!(config.retries, 0);
        assert!(config.parallel);
        assert_eq!(config.batch_mode, BatchMode::Batch);
    }

    #[test]
    fn test_options_override_and_ignore_unknown() {
        let config = RunConfig::from_options(&options(json!({
            "batchSize": 10,
            "concurrency": "4",
            "retries": 2,
            "parallel": "false",
            "batchMode": "single",
            "iterateList": true
        })))
        .unwrap();
        assert_eq!(config.batch_size, 10);
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.retries, 2);
        assert!(!config.parallel);
        assert_eq!(config.batch_mode, BatchMode::Single);
    }

    #[test]
    fn test_invalid_options_rejected() {
        assert!(matches!(
            RunConfig::from_options(&options(json!({"batchSize": 0}))),
            Err(ConfigError::OutOfRange { .. })
        ));
        assert!(matches!(
            RunConfig::from_options(&options(json!({"retries": -1}))),
            Err(ConfigError::OutOfRange { .. })
        ));
        assert!(matches!(
            RunConfig::from_options(&options(json!({"parallel": 1}))),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            RunConfig::from_options(&options(json!({"batchMode": "EVERYTHING"}))),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_merge_keeps_base_values() {
        let base = RunConfig::default().with_retries(3).with_parallel(false);
        let merged = base.merge_options(&options(json!({"batchSize": 5}))).unwrap();
        assert_eq!(merged.retries, 3);
        assert!(!merged.parallel);
        assert_eq!(merged.batch_size, 5);
    }

    #[test]
    fn test_serde_uses_option_names() {
        let config: RunConfig =
            serde_json::from_value(json!({"batchSize": 7, "batchMode": "BATCH_SINGLE"})).unwrap();
        assert_eq!(config.batch_size, 7);
        assert_eq!(config.batch_mode, BatchMode::BatchSingle);
    }
}
