// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Store abstraction consumed by the rename engine
//!
//! The engine never touches graph structures directly: it selects
//! candidates, opens transactional scopes and applies mutations through
//! these traits, and reads constraints/indexes through [`SchemaReader`].

use crate::rename::spec::{MutationSpec, SelectionSpec};
use crate::schema::types::{ConstraintDefinition, IndexDefinition, SchemaTarget};
use crate::storage::types::{EntityRef, StorageError};
use crate::txn::TransactionId;

/// Lazy sequence of candidate entities produced by a selection
pub type CandidateStream = Box<dyn Iterator<Item = EntityRef> + Send>;

/// Result of applying a mutation to a single entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The entity was changed
    Applied,
    /// The entity no longer qualified (gone, or old name absent); nothing changed
    Skipped,
}

/// A graph store that can be selected from and mutated transactionally
pub trait GraphStore: Send + Sync {
    /// Evaluate a selection. The returned stream covers the entities that
    /// matched when the call was made; entities created afterwards need not
    /// appear.
    fn select(&self, selection: &SelectionSpec) -> Result<CandidateStream, StorageError>;

    /// Open a transactional scope
    fn begin_scope(&self) -> Result<Box<dyn StoreTransaction + '_>, StorageError>;

    /// Read-only schema introspection
    fn schema(&self) -> &dyn SchemaReader;
}

/// One open transactional scope against a [`GraphStore`]
pub trait StoreTransaction: Send {
    fn id(&self) -> TransactionId;

    /// Apply `mutation` to one entity inside this scope
    fn mutate(
        &mut self,
        entity: &EntityRef,
        mutation: &MutationSpec,
    ) -> Result<MutationOutcome, StorageError>;

    /// Make every mutation of this scope durable
    fn commit(self: Box<Self>) -> Result<(), StorageError>;

    /// Discard every mutation of this scope
    fn rollback(self: Box<Self>) -> Result<(), StorageError>;
}

/// Read-only view over constraint and index definitions
pub trait SchemaReader: Send + Sync {
    fn constraints_for(
        &self,
        target: &SchemaTarget,
    ) -> Result<Vec<ConstraintDefinition>, StorageError>;

    fn indexes_for(&self, target: &SchemaTarget) -> Result<Vec<IndexDefinition>, StorageError>;

    fn all_constraints(&self) -> Result<Vec<ConstraintDefinition>, StorageError>;

    fn all_indexes(&self) -> Result<Vec<IndexDefinition>, StorageError>;

    /// Whether indexes can be scoped to relationship types in this store
    fn supports_relationship_indexes(&self) -> bool {
        true
    }
}
