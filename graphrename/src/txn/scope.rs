// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Scope guard around a store transaction
//!
//! A [`TransactionScope`] that is dropped without `commit` rolls its
//! transaction back, so every exit path out of a batch (error, early
//! return, panic unwinding) releases the scope.

use log::{debug, warn};

use super::state::TransactionId;
use crate::rename::spec::MutationSpec;
use crate::storage::traits::{GraphStore, MutationOutcome, StoreTransaction};
use crate::storage::types::{EntityRef, StorageError};

pub struct TransactionScope<'a> {
    id: TransactionId,
    inner: Option<Box<dyn StoreTransaction + 'a>>,
}

impl<'a> TransactionScope<'a> {
    /// Open a new scope against `store`
    pub fn begin<S: GraphStore + ?Sized>(store: &'a S) -> Result<Self, StorageError> {
        let inner = store.begin_scope()?;
        let id = inner.id();
        debug!("{}: scope opened", id);
        Ok(Self {
            id,
            inner: Some(inner),
        })
    }

    pub fn mutate(
        &mut self,
        entity: &EntityRef,
        mutation: &MutationSpec,
    ) -> Result<MutationOutcome, StorageError> {
        match self.inner.as_mut() {
            Some(txn) => txn.mutate(entity, mutation),
            None => Err(StorageError::InvalidOperation(format!(
                "{} already released",
                self.id
            ))),
        }
    }

    pub fn commit(mut self) -> Result<(), StorageError> {
        match self.inner.take() {
            Some(txn) => {
                txn.commit()?;
                debug!("{}: committed", self.id);
                Ok(())
            }
            None => Err(StorageError::InvalidOperation(format!(
                "{} already released",
                self.id
            ))),
        }
    }
}

impl Drop for TransactionScope<'_> {
    fn drop(&mut self) {
        if let Some(txn) = self.inner.take() {
            if let Err(e) = txn.rollback() {
                warn!("{}: rollback on release failed: {}", self.id, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, Node};

    fn relabel() -> MutationSpec {
        MutationSpec::ReplaceLabel {
            old_label: "Person".into(),
            new_label: "Human".into(),
        }
    }

    #[test]
    fn test_dropped_scope_rolls_back() {
        let store = MemoryStore::new();
        store
            .insert_node(Node::with_labels("a", &["Person"]))
            .unwrap();

        {
            let mut scope = TransactionScope::begin(&store).unwrap();
            scope.mutate(&EntityRef::node("a"), &relabel()).unwrap();
        }

        assert!(store.node("a").unwrap().has_label("Person"));
    }

    #[test]
    fn test_committed_scope_persists() {
        let store = MemoryStore::new();
        store
            .insert_node(Node::with_labels("a", &["Person"]))
            .unwrap();

        let mut scope = TransactionScope::begin(&store).unwrap();
        scope.mutate(&EntityRef::node("a"), &relabel()).unwrap();
        scope.commit().unwrap();

        let node = store.node("a").unwrap();
        assert!(node.has_label("Human"));
        assert!(!node.has_label("Person"));
    }
}
