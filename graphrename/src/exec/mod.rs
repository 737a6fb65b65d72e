// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Batch execution: run configuration, cancellation, statistics and the
//! engine that drives mutations through transactional scopes

pub mod batch;
pub mod cancel;
pub mod config;
pub mod engine;
pub mod error;
pub mod stats;

pub use cancel::CancellationToken;
pub use config::{BatchMode, ConfigError, RunConfig};
pub use engine::BatchExecutor;
pub use error::ExecutionError;
pub use stats::{OutcomeSummary, RunStats};
