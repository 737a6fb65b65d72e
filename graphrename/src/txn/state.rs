// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Transaction identity and lifecycle state

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TRANSACTION_ID: AtomicU64 = AtomicU64::new(1);

/// Unique transaction identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionId(u64);

impl TransactionId {
    /// Allocate the next process-wide transaction ID
    pub fn new() -> Self {
        TransactionId(NEXT_TRANSACTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the underlying ID value
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "txn_{}", self.0)
    }
}

/// Transaction lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Transaction is active and can perform operations
    Active,
    /// Transaction has been committed successfully
    Committed,
    /// Transaction has been rolled back
    RolledBack,
}

impl TransactionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, TransactionStatus::Active)
    }
}
