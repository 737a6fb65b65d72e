// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! GraphRename - bulk renaming of graph schema elements
//!
//! Renames node labels, relationship types and property keys across large
//! graphs without holding one giant transaction:
//!
//! - **Batched execution**: matching entities are streamed in batches, each
//!   committed in its own transactional scope
//! - **Parallel workers**: batches are spread over a bounded worker pool
//! - **Retries and cancellation**: failed batches are retried, runs stop
//!   cleanly between batches
//! - **Schema impact**: constraints and indexes that still reference the old
//!   name are reported back, never modified
//!
//! # Usage
//!
//! ```
//! use graphrename::{MemoryStore, Node, RenameCoordinator};
//!
//! let store = MemoryStore::new();
//! store.insert_node(Node::with_labels("alice", &["Person"])).unwrap();
//!
//! let result = RenameCoordinator::new(&store)
//!     .rename_label("Person", "Human", None)
//!     .unwrap();
//! assert_eq!(result.stats.committed_operations, 1);
//! ```

// Public modules - the store and engine surfaces hosts plug into
pub mod coordinator;
pub mod exec;
pub mod rename;
pub mod schema;
pub mod storage;

// Internal modules - only visible within graphrename crate
pub(crate) mod txn;

// Re-export the public API - RenameCoordinator is the main entry point
pub use coordinator::{RenameCoordinator, RenameResult, RenameSettings};
pub use exec::{BatchMode, CancellationToken, ExecutionError, RunConfig, RunStats};
pub use rename::{RenameError, RenameKind, RenameRequest};
pub use schema::{SchemaCatalog, SchemaImpact};
pub use storage::{Edge, EntityRef, GraphStore, MemoryStore, Node, StorageError, Value};

// Needed by GraphStore implementations outside this crate
pub use txn::TransactionId;

/// GraphRename version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// GraphRename crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
