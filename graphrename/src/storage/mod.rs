// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph storage for the rename engine
//!
//! This module provides:
//! - Value type system for graph properties
//! - In-memory graph storage with label/type indices and adjacency lists
//! - The store traits the engine selects and mutates through
//! - An in-memory reference store

pub mod graph_cache;
pub mod memory;
pub mod traits;
pub mod types;
pub mod value;

pub use graph_cache::{GraphCache, GraphStats};
pub use memory::MemoryStore;
pub use traits::{CandidateStream, GraphStore, MutationOutcome, SchemaReader, StoreTransaction};
pub use types::{Edge, EntityRef, GraphError, Node, StorageError};
pub use value::Value;
