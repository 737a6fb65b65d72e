// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Transaction operation logging for rollback support
//!
//! Each mutation applied inside a scope records the inverse step needed
//! to restore the graph. Rollback replays the log most-recent-first.

use log::warn;

use super::state::TransactionId;
use crate::storage::graph_cache::GraphCache;
use crate::storage::types::{Edge, GraphError};
use crate::storage::Value;

/// Represents an operation that can be undone
#[derive(Debug, Clone, PartialEq)]
pub enum UndoOperation {
    /// A label was added to a node - to undo, remove it
    LabelAdded { node_id: String, label: String },
    /// A label was removed from a node - to undo, add it back
    LabelRemoved { node_id: String, label: String },
    /// A node property was written or removed - to undo, restore `previous`
    NodePropertyChanged {
        node_id: String,
        key: String,
        previous: Option<Value>,
    },
    /// An edge property was written or removed - to undo, restore `previous`
    EdgePropertyChanged {
        edge_id: String,
        key: String,
        previous: Option<Value>,
    },
    /// An edge was inserted - to undo, remove it
    EdgeInserted { edge_id: String },
    /// An edge was deleted - to undo, restore it
    EdgeDeleted { deleted_edge: Edge },
}

impl UndoOperation {
    /// Apply the inverse of the recorded mutation to `graph`
    fn revert(&self, graph: &mut GraphCache) -> Result<(), GraphError> {
        match self {
            UndoOperation::LabelAdded { node_id, label } => {
                graph.remove_node_label(node_id, label)?;
            }
            UndoOperation::LabelRemoved { node_id, label } => {
                graph.add_node_label(node_id, label)?;
            }
            UndoOperation::NodePropertyChanged {
                node_id,
                key,
                previous,
            } => match previous {
                Some(value) => {
                    graph.set_node_property(node_id, key, value.clone())?;
                }
                None => {
                    graph.remove_node_property(node_id, key)?;
                }
            },
            UndoOperation::EdgePropertyChanged {
                edge_id,
                key,
                previous,
            } => match previous {
                Some(value) => {
                    graph.set_edge_property(edge_id, key, value.clone())?;
                }
                None => {
                    graph.remove_edge_property(edge_id, key)?;
                }
            },
            UndoOperation::EdgeInserted { edge_id } => {
                graph.remove_edge(edge_id)?;
            }
            UndoOperation::EdgeDeleted { deleted_edge } => {
                graph.add_edge(deleted_edge.clone())?;
            }
        }
        Ok(())
    }
}

/// Transaction operation log for a single transaction
#[derive(Debug, Clone)]
pub struct TransactionLog {
    /// The transaction this log belongs to
    pub transaction_id: TransactionId,
    /// Operations in the order they were applied
    pub undo_operations: Vec<UndoOperation>,
}

impl TransactionLog {
    /// Create a new empty transaction log
    pub fn new(transaction_id: TransactionId) -> Self {
        Self {
            transaction_id,
            undo_operations: Vec::new(),
        }
    }

    /// Add an undo operation to the log
    pub fn log_operation(&mut self, operation: UndoOperation) {
        self.undo_operations.push(operation);
    }

    /// Number of logged operations
    pub fn len(&self) -> usize {
        self.undo_operations.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.undo_operations.is_empty()
    }

    /// Clear the log (used after commit)
    pub fn clear(&mut self) {
        self.undo_operations.clear();
    }

    /// Revert every logged operation, most recent first, draining the log.
    ///
    /// Keeps going after a failed step so that as much state as possible is
    /// restored; the first failure is returned.
    pub fn rollback(&mut self, graph: &mut GraphCache) -> Result<(), GraphError> {
        let mut first_error = None;
        for op in self.undo_operations.drain(..).rev() {
            if let Err(e) = op.revert(graph) {
                warn!(
                    "{}: failed to revert {:?}: {}",
                    self.transaction_id, op, e
                );
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::types::Node;

    fn graph() -> GraphCache {
        let mut graph = GraphCache::new();
        graph
            .add_node(Node::with_labels("a", &["Person"]).with_property("age", Value::Integer(30)))
            .unwrap();
        graph.add_node(Node::new("b")).unwrap();
        graph
            .add_edge(Edge::new("r1", "a", "b", "KNOWS").with_property("since", Value::Integer(2001)))
            .unwrap();
        graph
    }

    #[test]
    fn test_transaction_log_creation() {
        let txn_id = TransactionId::new();
        let log = TransactionLog::new(txn_id);

        assert_eq!(log.transaction_id, txn_id);
        assert!(log.is_empty());
    }

    #[test]
    fn test_rollback_restores_labels_and_properties() {
        let mut graph = graph();
        let mut log = TransactionLog::new(TransactionId::new());

        graph.remove_node_label("a", "Person").unwrap();
        log.log_operation(UndoOperation::LabelRemoved {
            node_id: "a".into(),
            label: "Person".into(),
        });
        graph.add_node_label("a", "Human").unwrap();
        log.log_operation(UndoOperation::LabelAdded {
            node_id: "a".into(),
            label: "Human".into(),
        });
        let previous = graph.remove_node_property("a", "age").unwrap();
        log.log_operation(UndoOperation::NodePropertyChanged {
            node_id: "a".into(),
            key: "age".into(),
            previous,
        });
        let previous = graph
            .set_node_property("a", "years", Value::Integer(30))
            .unwrap();
        log.log_operation(UndoOperation::NodePropertyChanged {
            node_id: "a".into(),
            key: "years".into(),
            previous,
        });

        log.rollback(&mut graph).unwrap();

        let node = graph.get_node("a").unwrap();
        assert_eq!(node.labels, vec!["Person".to_string()]);
        assert_eq!(node.get_property("age"), Some(&Value::Integer(30)));
        assert!(!node.has_property("years"));
        assert!(log.is_empty());
    }

    #[test]
    fn test_rollback_restores_recreated_edge() {
        let mut graph = graph();
        let mut log = TransactionLog::new(TransactionId::new());

        let mut replacement = graph.get_edge("r1").unwrap().clone();
        replacement.id = "r2".into();
        replacement.label = "FRIEND".into();
        graph.add_edge(replacement).unwrap();
        log.log_operation(UndoOperation::EdgeInserted {
            edge_id: "r2".into(),
        });
        let deleted_edge = graph.remove_edge("r1").unwrap();
        log.log_operation(UndoOperation::EdgeDeleted { deleted_edge });

        log.rollback(&mut graph).unwrap();

        assert!(graph.contains_edge("r1"));
        assert!(!graph.contains_edge("r2"));
        assert_eq!(graph.edge_ids_with_label("KNOWS"), vec!["r1".to_string()]);
    }
}
