// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Run statistics
//!
//! Workers report into a shared [`StatsAccumulator`]; counters are atomic
//! and error tallies sit behind a mutex. The accumulator is folded into an
//! immutable [`RunStats`] once every worker has finished.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Committed/failed tally for one level of granularity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeSummary {
    pub total: u64,
    pub committed: u64,
    pub failed: u64,
    pub errors: BTreeMap<String, u64>,
}

/// Final statistics of a rename run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    pub batches: u64,
    pub total: u64,
    #[serde(rename = "timeTaken")]
    pub time_taken_ms: u64,
    pub committed_operations: u64,
    pub failed_operations: u64,
    pub failed_batches: u64,
    pub retries: u64,
    pub error_messages: BTreeMap<String, u64>,
    pub batch: OutcomeSummary,
    pub operations: OutcomeSummary,
    pub was_cancelled: bool,
}

impl RunStats {
    pub fn has_failures(&self) -> bool {
        self.failed_batches > 0 || self.failed_operations > 0
    }
}

#[derive(Debug, Default)]
pub struct StatsAccumulator {
    batches: AtomicU64,
    total: AtomicU64,
    committed_batches: AtomicU64,
    failed_batches: AtomicU64,
    committed_operations: AtomicU64,
    failed_operations: AtomicU64,
    retries: AtomicU64,
    batch_errors: Mutex<HashMap<String, u64>>,
    operation_errors: Mutex<HashMap<String, u64>>,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch_started(&self) {
        self.batches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn candidates_seen(&self, count: u64) {
        self.total.fetch_add(count, Ordering::Relaxed);
    }

    pub fn batch_committed(&self, operations: u64) {
        self.committed_batches.fetch_add(1, Ordering::Relaxed);
        self.committed_operations
            .fetch_add(operations, Ordering::Relaxed);
    }

    /// A batch whose scope was abandoned after exhausting its retries
    pub fn batch_failed(&self, operations: u64, error: Option<&str>) {
        self.failed_batches.fetch_add(1, Ordering::Relaxed);
        self.failed_operations
            .fetch_add(operations, Ordering::Relaxed);
        if let Some(error) = error {
            *self.batch_errors.lock().entry(error.to_string()).or_insert(0) += 1;
        }
    }

    pub fn operation_committed(&self) {
        self.committed_operations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn operation_failed(&self, error: &str) {
        self.failed_operations.fetch_add(1, Ordering::Relaxed);
        *self
            .operation_errors
            .lock()
            .entry(error.to_string())
            .or_insert(0) += 1;
    }

    /// A batch in per-entity mode whose entities were settled individually
    pub fn batch_settled(&self, any_failed: bool) {
        if any_failed {
            self.failed_batches.fetch_add(1, Ordering::Relaxed);
        } else {
            self.committed_batches.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn retried(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn finish(&self, elapsed: Duration, was_cancelled: bool) -> RunStats {
        let batches = self.batches.load(Ordering::Relaxed);
        let total = self.total.load(Ordering::Relaxed);
        let committed_operations = self.committed_operations.load(Ordering::Relaxed);
        let failed_operations = self.failed_operations.load(Ordering::Relaxed);
        let batch_errors: BTreeMap<String, u64> = self
            .batch_errors
            .lock()
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        let operation_errors: BTreeMap<String, u64> = self
            .operation_errors
            .lock()
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();

        let mut error_messages = batch_errors.clone();
        for (message, count) in &operation_errors {
            *error_messages.entry(message.clone()).or_insert(0) += count;
        }

        RunStats {
            batches,
            total,
            time_taken_ms: elapsed.as_millis() as u64,
            committed_operations,
            failed_operations,
            failed_batches: self.failed_batches.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
            error_messages,
            batch: OutcomeSummary {
                total: batches,
                committed: self.committed_batches.load(Ordering::Relaxed),
                failed: self.failed_batches.load(Ordering::Relaxed),
                errors: batch_errors,
            },
            operations: OutcomeSummary {
                total,
                committed: committed_operations,
                failed: failed_operations,
                errors: operation_errors,
            },
            was_cancelled,
        }
    }
}
