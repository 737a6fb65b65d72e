// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Graph data structures and error types
//!
//! Defines Node and Edge structures for the in-memory graph,
//! the entity references handed between selection and mutation,
//! and the error types for graph and store operations.

use crate::storage::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Error types for graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Edge not found: {0}")]
    EdgeNotFound(String),

    #[error("Node already exists: {0}")]
    NodeAlreadyExists(String),

    #[error("Edge already exists: {0}")]
    EdgeAlreadyExists(String),

    #[error("Invalid edge: from node {from} to node {to} - one or both nodes don't exist")]
    InvalidEdge { from: String, to: String },
}

/// Error types for store operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Lock error: {0}")]
    LockError(String),

    #[error("Write conflict: {0}")]
    Conflict(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl StorageError {
    /// Infrastructure faults that retrying a batch cannot fix
    pub fn is_fatal(&self) -> bool {
        matches!(self, StorageError::Unavailable(_) | StorageError::LockError(_))
    }
}

/// Reference to a node or relationship owned by the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum EntityRef {
    Node(String),
    Relationship(String),
}

impl EntityRef {
    pub fn node(id: impl Into<String>) -> Self {
        EntityRef::Node(id.into())
    }

    pub fn relationship(id: impl Into<String>) -> Self {
        EntityRef::Relationship(id.into())
    }

    pub fn id(&self) -> &str {
        match self {
            EntityRef::Node(id) | EntityRef::Relationship(id) => id,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, EntityRef::Node(_))
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Node(id) => write!(f, "node({})", id),
            EntityRef::Relationship(id) => write!(f, "relationship({})", id),
        }
    }
}

/// Graph node with id, labels, and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub labels: Vec<String>,
    pub properties: HashMap<String, Value>,
}

impl Node {
    /// Create a new node with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            labels: Vec::new(),
            properties: HashMap::new(),
        }
    }

    /// Create a new node with id and labels
    pub fn with_labels(id: impl Into<String>, labels: &[&str]) -> Self {
        Self {
            id: id.into(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            properties: HashMap::new(),
        }
    }

    /// Builder-style property setter
    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Add a label to this node, returns false if already present
    pub fn add_label(&mut self, label: &str) -> bool {
        if self.has_label(label) {
            return false;
        }
        self.labels.push(label.to_string());
        true
    }

    /// Remove a label from this node, returns false if it was absent
    pub fn remove_label(&mut self, label: &str) -> bool {
        let before = self.labels.len();
        self.labels.retain(|l| l != label);
        self.labels.len() != before
    }

    /// Check if node has a specific label
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Check if node has a specific property
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }
}

/// Graph edge with id, from/to nodes, label, and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub from_node: String,
    pub to_node: String,
    pub label: String,
    pub properties: HashMap<String, Value>,
}

impl Edge {
    /// Create a new edge
    pub fn new(
        id: impl Into<String>,
        from_node: impl Into<String>,
        to_node: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from_node: from_node.into(),
            to_node: to_node.into(),
            label: label.into(),
            properties: HashMap::new(),
        }
    }

    /// Builder-style property setter
    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Check if edge has a specific property
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Check if this edge goes from node1 to node2
    pub fn goes_from_to(&self, from: &str, to: &str) -> bool {
        self.from_node == from && self.to_node == to
    }
}
