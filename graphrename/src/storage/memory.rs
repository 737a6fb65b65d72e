// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory graph store
//!
//! Reference implementation of [`GraphStore`] over a shared [`GraphCache`].
//! Mutations are applied eagerly under the graph write lock and recorded in
//! a per-scope undo log; rollback (explicit or on drop) replays that log.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, trace, warn};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::rename::spec::{MutationSpec, Predicate, SelectionSpec};
use crate::schema::SchemaCatalog;
use crate::storage::graph_cache::{GraphCache, GraphStats};
use crate::storage::traits::{
    CandidateStream, GraphStore, MutationOutcome, SchemaReader, StoreTransaction,
};
use crate::storage::types::{Edge, EntityRef, GraphError, Node, StorageError};
use crate::txn::{TransactionId, TransactionLog, TransactionStatus, UndoOperation};

/// Thread-safe in-memory graph store with schema catalog
#[derive(Debug)]
pub struct MemoryStore {
    graph: Arc<RwLock<GraphCache>>,
    schema: SchemaCatalog,
    available: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_schema(SchemaCatalog::new())
    }

    /// Create an empty store backed by the given schema catalog
    pub fn with_schema(schema: SchemaCatalog) -> Self {
        Self {
            graph: Arc::new(RwLock::new(GraphCache::new())),
            schema,
            available: AtomicBool::new(true),
        }
    }

    pub fn insert_node(&self, node: Node) -> Result<(), StorageError> {
        self.ensure_available()?;
        self.graph.write().add_node(node)?;
        Ok(())
    }

    pub fn insert_edge(&self, edge: Edge) -> Result<(), StorageError> {
        self.ensure_available()?;
        self.graph.write().add_edge(edge)?;
        Ok(())
    }

    pub fn node(&self, id: &str) -> Option<Node> {
        self.graph.read().get_node(id).cloned()
    }

    pub fn edge(&self, id: &str) -> Option<Edge> {
        self.graph.read().get_edge(id).cloned()
    }

    /// Snapshot of nodes carrying `label`, in id order
    pub fn nodes_with_label(&self, label: &str) -> Vec<Node> {
        let graph = self.graph.read();
        graph
            .node_ids_with_label(label)
            .iter()
            .filter_map(|id| graph.get_node(id).cloned())
            .collect()
    }

    /// Snapshot of relationships of type `rel_type`, in id order
    pub fn edges_with_type(&self, rel_type: &str) -> Vec<Edge> {
        let graph = self.graph.read();
        graph
            .edge_ids_with_label(rel_type)
            .iter()
            .filter_map(|id| graph.get_edge(id).cloned())
            .collect()
    }

    /// Outgoing relationships of a node
    pub fn outgoing(&self, node_id: &str) -> Vec<Edge> {
        self.graph
            .read()
            .get_outgoing_edges(node_id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> GraphStats {
        self.graph.read().stats()
    }

    /// Schema catalog, for creating and dropping constraints/indexes
    pub fn schema_catalog(&self) -> &SchemaCatalog {
        &self.schema
    }

    /// Simulate the store going away (or coming back)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), StorageError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StorageError::Unavailable(
                "in-memory store is offline".to_string(),
            ))
        }
    }

    fn matches(graph: &GraphCache, predicate: &Predicate, id: &str) -> bool {
        match predicate {
            Predicate::NodeLabel(label) => graph
                .get_node(id)
                .map_or(false, |node| node.has_label(label)),
            Predicate::NodeProperty(key) => graph
                .get_node(id)
                .map_or(false, |node| node.has_property(key)),
            Predicate::RelationshipType(rel_type) => graph
                .get_edge(id)
                .map_or(false, |edge| &edge.label == rel_type),
            Predicate::RelationshipProperty(key) => graph
                .get_edge(id)
                .map_or(false, |edge| edge.has_property(key)),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore for MemoryStore {
    fn select(&self, selection: &SelectionSpec) -> Result<CandidateStream, StorageError> {
        self.ensure_available()?;
        let graph = self.graph.read();
        let predicate = selection.predicate();

        let ids: Vec<String> = match selection.scope() {
            Some(scope) => {
                let mut seen = HashSet::new();
                scope
                    .iter()
                    .filter(|id| seen.insert(id.as_str()))
                    .filter(|id| Self::matches(&graph, predicate, id))
                    .cloned()
                    .collect()
            }
            None => match predicate {
                Predicate::NodeLabel(label) => graph.node_ids_with_label(label),
                Predicate::RelationshipType(rel_type) => graph.edge_ids_with_label(rel_type),
                Predicate::NodeProperty(key) => graph.node_ids_with_property(key),
                Predicate::RelationshipProperty(key) => graph.edge_ids_with_property(key),
            },
        };

        debug!("Selected {} candidates for {}", ids.len(), selection);

        let to_ref: fn(String) -> EntityRef = match predicate {
            Predicate::NodeLabel(_) | Predicate::NodeProperty(_) => EntityRef::Node,
            Predicate::RelationshipType(_) | Predicate::RelationshipProperty(_) => {
                EntityRef::Relationship
            }
        };
        Ok(Box::new(ids.into_iter().map(to_ref)))
    }

    fn begin_scope(&self) -> Result<Box<dyn StoreTransaction + '_>, StorageError> {
        self.ensure_available()?;
        let id = TransactionId::new();
        Ok(Box::new(MemoryTransaction {
            store: self,
            log: TransactionLog::new(id),
            status: TransactionStatus::Active,
        }))
    }

    fn schema(&self) -> &dyn SchemaReader {
        &self.schema
    }
}

/// Transactional scope over a [`MemoryStore`]
pub struct MemoryTransaction<'a> {
    store: &'a MemoryStore,
    log: TransactionLog,
    status: TransactionStatus,
}

impl MemoryTransaction<'_> {
    fn revert(&mut self) -> Result<(), StorageError> {
        let mut graph = self.store.graph.write();
        self.status = TransactionStatus::RolledBack;
        self.log.rollback(&mut graph)?;
        Ok(())
    }
}

impl StoreTransaction for MemoryTransaction<'_> {
    fn id(&self) -> TransactionId {
        self.log.transaction_id
    }

    fn mutate(
        &mut self,
        entity: &EntityRef,
        mutation: &MutationSpec,
    ) -> Result<MutationOutcome, StorageError> {
        if !self.status.is_active() {
            return Err(StorageError::InvalidOperation(format!(
                "{} is no longer active",
                self.log.transaction_id
            )));
        }
        self.store.ensure_available()?;
        let mut graph = self.store.graph.write();
        apply_mutation(&mut graph, &mut self.log, entity, mutation)
    }

    fn commit(mut self: Box<Self>) -> Result<(), StorageError> {
        self.store.ensure_available()?;
        self.status = TransactionStatus::Committed;
        self.log.clear();
        Ok(())
    }

    fn rollback(mut self: Box<Self>) -> Result<(), StorageError> {
        self.revert()
    }
}

impl Drop for MemoryTransaction<'_> {
    fn drop(&mut self) {
        if self.status.is_active() && !self.log.is_empty() {
            if let Err(e) = self.revert() {
                warn!(
                    "{}: rollback on drop failed: {}",
                    self.log.transaction_id, e
                );
            }
        }
    }
}

fn apply_mutation(
    graph: &mut GraphCache,
    log: &mut TransactionLog,
    entity: &EntityRef,
    mutation: &MutationSpec,
) -> Result<MutationOutcome, StorageError> {
    match (mutation, entity) {
        (
            MutationSpec::ReplaceLabel {
                old_label,
                new_label,
            },
            EntityRef::Node(node_id),
        ) => {
            let qualifies = graph
                .get_node(node_id)
                .map_or(false, |node| node.has_label(old_label));
            if !qualifies {
                return Ok(MutationOutcome::Skipped);
            }
            graph.remove_node_label(node_id, old_label)?;
            log.log_operation(UndoOperation::LabelRemoved {
                node_id: node_id.clone(),
                label: old_label.clone(),
            });
            if graph.add_node_label(node_id, new_label)? {
                log.log_operation(UndoOperation::LabelAdded {
                    node_id: node_id.clone(),
                    label: new_label.clone(),
                });
            }
            Ok(MutationOutcome::Applied)
        }
        (MutationSpec::RecreateRelationship { old_type, new_type }, EntityRef::Relationship(edge_id)) => {
            let old_edge = match graph.get_edge(edge_id) {
                Some(edge) if &edge.label == old_type => edge.clone(),
                _ => return Ok(MutationOutcome::Skipped),
            };
            let replacement = Edge {
                id: Uuid::new_v4().to_string(),
                from_node: old_edge.from_node.clone(),
                to_node: old_edge.to_node.clone(),
                label: new_type.clone(),
                properties: old_edge.properties.clone(),
            };
            let replacement_id = replacement.id.clone();
            // Create before delete so the endpoints are never left unconnected.
            graph.add_edge(replacement)?;
            log.log_operation(UndoOperation::EdgeInserted {
                edge_id: replacement_id,
            });
            let deleted_edge = graph.remove_edge(edge_id)?;
            log.log_operation(UndoOperation::EdgeDeleted { deleted_edge });
            Ok(MutationOutcome::Applied)
        }
        (
            MutationSpec::MoveProperty {
                old_key, new_key, ..
            },
            EntityRef::Node(node_id),
        ) => {
            let value = match graph.remove_node_property(node_id, old_key) {
                Ok(Some(value)) => value,
                Ok(None) | Err(GraphError::NodeNotFound(_)) => return Ok(MutationOutcome::Skipped),
                Err(e) => return Err(e.into()),
            };
            trace!(
                "Moving {} property {} -> {} on node {}",
                value.type_name(),
                old_key,
                new_key,
                node_id
            );
            log.log_operation(UndoOperation::NodePropertyChanged {
                node_id: node_id.clone(),
                key: old_key.clone(),
                previous: Some(value.clone()),
            });
            let previous = graph.set_node_property(node_id, new_key, value)?;
            log.log_operation(UndoOperation::NodePropertyChanged {
                node_id: node_id.clone(),
                key: new_key.clone(),
                previous,
            });
            Ok(MutationOutcome::Applied)
        }
        (
            MutationSpec::MoveProperty {
                old_key, new_key, ..
            },
            EntityRef::Relationship(edge_id),
        ) => {
            let value = match graph.remove_edge_property(edge_id, old_key) {
                Ok(Some(value)) => value,
                Ok(None) | Err(GraphError::EdgeNotFound(_)) => return Ok(MutationOutcome::Skipped),
                Err(e) => return Err(e.into()),
            };
            trace!(
                "Moving {} property {} -> {} on edge {}",
                value.type_name(),
                old_key,
                new_key,
                edge_id
            );
            log.log_operation(UndoOperation::EdgePropertyChanged {
                edge_id: edge_id.clone(),
                key: old_key.clone(),
                previous: Some(value.clone()),
            });
            let previous = graph.set_edge_property(edge_id, new_key, value)?;
            log.log_operation(UndoOperation::EdgePropertyChanged {
                edge_id: edge_id.clone(),
                key: new_key.clone(),
                previous,
            });
            Ok(MutationOutcome::Applied)
        }
        (mutation, entity) => Err(StorageError::InvalidOperation(format!(
            "cannot apply '{}' to {}",
            mutation, entity
        ))),
    }
}
