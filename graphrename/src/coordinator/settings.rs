// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Host-level rename settings

use serde::{Deserialize, Serialize};

use crate::exec::{ConfigError, RunConfig};

pub const ENV_ENABLED: &str = "GRAPHRENAME_ENABLED";
pub const ENV_BATCH_SIZE: &str = "GRAPHRENAME_BATCH_SIZE";
pub const ENV_CONCURRENCY: &str = "GRAPHRENAME_CONCURRENCY";
pub const ENV_RETRIES: &str = "GRAPHRENAME_RETRIES";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenameSettings {
    /// When false every rename is refused before touching the store
    pub enabled: bool,
    /// Base run configuration that caller options are merged over
    pub default_run: RunConfig,
}

impl Default for RenameSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            default_run: RunConfig::default(),
        }
    }
}

impl RenameSettings {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        settings.default_run.validate()?;
        Ok(settings)
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(enabled) = parse_bool(ENV_ENABLED) {
            self.enabled = enabled?;
        }
        if let Some(batch_size) = parse_number::<usize>(ENV_BATCH_SIZE) {
            self.default_run.batch_size = batch_size?;
        }
        if let Some(concurrency) = parse_number::<usize>(ENV_CONCURRENCY) {
            self.default_run.concurrency = concurrency?;
        }
        if let Some(retries) = parse_number::<u32>(ENV_RETRIES) {
            self.default_run.retries = retries?;
        }
        self.default_run.validate()?;
        Ok(self)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str) -> Option<Result<T, ConfigError>> {
    std::env::var(key).ok().map(|val| {
        val.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            expected: "a non-negative integer",
            value: val.clone(),
        })
    })
}

/// Accepts "true", "1", "yes", "on" and their negatives, case-insensitively
fn parse_bool(key: &str) -> Option<Result<bool, ConfigError>> {
    std::env::var(key)
        .ok()
        .map(|val| match val.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                expected: "a boolean",
                value: val.clone(),
            }),
        })
}
