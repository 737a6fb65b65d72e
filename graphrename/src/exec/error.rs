// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for batch execution

use thiserror::Error;

use super::config::ConfigError;
use crate::storage::StorageError;

/// Run-level failures
///
/// Batch and entity failures never surface here; they are recorded in the
/// run statistics. Only faults that abort the whole run are returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Non-retryable failure: {0}")]
    NonRetryable(String),

    #[error("Invalid run configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

impl From<StorageError> for ExecutionError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Unavailable(msg) => ExecutionError::StoreUnavailable(msg),
            other => ExecutionError::NonRetryable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_mapping() {
        assert_eq!(
            ExecutionError::from(StorageError::Unavailable("offline".into())),
            ExecutionError::StoreUnavailable("offline".into())
        );
        assert!(matches!(
            ExecutionError::from(StorageError::LockError("poisoned".into())),
            ExecutionError::NonRetryable(msg) if msg.contains("poisoned")
        ));
    }
}
