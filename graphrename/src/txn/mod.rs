// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Transactional scopes
//!
//! - Transaction identity and lifecycle state
//! - Undo logging so a scope can be rolled back
//! - A scope guard that always releases its transaction

pub mod log;
pub mod scope;
pub mod state;

pub use log::{TransactionLog, UndoOperation};
pub use scope::TransactionScope;
pub use state::{TransactionId, TransactionStatus};
