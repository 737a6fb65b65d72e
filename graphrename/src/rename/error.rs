// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Caller-visible rename errors

use thiserror::Error;

use crate::exec::{ConfigError, ExecutionError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenameError {
    #[error("Invalid {role} name '{name}': {reason}")]
    InvalidName {
        role: &'static str,
        name: String,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Rename operations are disabled")]
    FeatureDisabled,

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}
