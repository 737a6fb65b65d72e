// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory graph cache implementation
//!
//! Provides graph storage using HashMap for nodes/edges and
//! adjacency lists for endpoint lookups. Label and type indices are
//! ordered sets so that selections enumerate ids in a stable order.

use crate::storage::types::{Edge, GraphError, Node};
use crate::storage::value::Value;
use std::collections::{BTreeSet, HashMap};

/// In-memory graph cache with indices for fast lookups
#[derive(Debug, Clone, Default)]
pub struct GraphCache {
    /// All nodes indexed by ID
    nodes: HashMap<String, Node>,

    /// All edges indexed by ID
    edges: HashMap<String, Edge>,

    /// Index: label -> node IDs with that label
    node_labels: HashMap<String, BTreeSet<String>>,

    /// Index: relationship type -> edge IDs of that type
    edge_labels: HashMap<String, BTreeSet<String>>,

    /// Adjacency list: node_id -> outgoing edge IDs
    adjacency_out: HashMap<String, Vec<String>>,

    /// Adjacency list: node_id -> incoming edge IDs
    adjacency_in: HashMap<String, Vec<String>>,
}

impl GraphCache {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::NodeAlreadyExists(node.id));
        }

        for label in &node.labels {
            self.node_labels
                .entry(label.clone())
                .or_default()
                .insert(node.id.clone());
        }

        self.adjacency_out.insert(node.id.clone(), Vec::new());
        self.adjacency_in.insert(node.id.clone(), Vec::new());
        self.nodes.insert(node.id.clone(), node);

        Ok(())
    }

    /// Add an edge to the graph
    ///
    /// Parallel edges sharing endpoints, type and properties are allowed;
    /// only the id has to be unique.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        if self.edges.contains_key(&edge.id) {
            return Err(GraphError::EdgeAlreadyExists(edge.id));
        }

        if !self.nodes.contains_key(&edge.from_node) || !self.nodes.contains_key(&edge.to_node)
        {
            return Err(GraphError::InvalidEdge {
                from: edge.from_node.clone(),
                to: edge.to_node.clone(),
            });
        }

        self.edge_labels
            .entry(edge.label.clone())
            .or_default()
            .insert(edge.id.clone());

        self.adjacency_out
            .entry(edge.from_node.clone())
            .or_default()
            .push(edge.id.clone());
        self.adjacency_in
            .entry(edge.to_node.clone())
            .or_default()
            .push(edge.id.clone());

        self.edges.insert(edge.id.clone(), edge);

        Ok(())
    }

    /// Get a node by ID
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get an edge by ID
    pub fn get_edge(&self, id: &str) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// IDs of nodes carrying `label`, in id order
    pub fn node_ids_with_label(&self, label: &str) -> Vec<String> {
        self.node_labels
            .get(label)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// IDs of edges of type `label`, in id order
    pub fn edge_ids_with_label(&self, label: &str) -> Vec<String> {
        self.edge_labels
            .get(label)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// IDs of nodes that carry a property keyed `key`, in id order
    pub fn node_ids_with_property(&self, key: &str) -> Vec<String> {
        let mut ids: Vec<String> = self
            .nodes
            .values()
            .filter(|n| n.has_property(key))
            .map(|n| n.id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// IDs of edges that carry a property keyed `key`, in id order
    pub fn edge_ids_with_property(&self, key: &str) -> Vec<String> {
        let mut ids: Vec<String> = self
            .edges
            .values()
            .filter(|e| e.has_property(key))
            .map(|e| e.id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Add `label` to a node, keeping the label index in sync
    pub fn add_node_label(&mut self, node_id: &str, label: &str) -> Result<bool, GraphError> {
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        if !node.add_label(label) {
            return Ok(false);
        }
        self.node_labels
            .entry(label.to_string())
            .or_default()
            .insert(node_id.to_string());
        Ok(true)
    }

    /// Remove `label` from a node, keeping the label index in sync
    pub fn remove_node_label(&mut self, node_id: &str, label: &str) -> Result<bool, GraphError> {
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        if !node.remove_label(label) {
            return Ok(false);
        }
        if let Some(ids) = self.node_labels.get_mut(label) {
            ids.remove(node_id);
            if ids.is_empty() {
                self.node_labels.remove(label);
            }
        }
        Ok(true)
    }

    /// Set a node property, returning the previous value
    pub fn set_node_property(
        &mut self,
        node_id: &str,
        key: &str,
        value: Value,
    ) -> Result<Option<Value>, GraphError> {
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        Ok(node.properties.insert(key.to_string(), value))
    }

    /// Remove a node property, returning the removed value
    pub fn remove_node_property(
        &mut self,
        node_id: &str,
        key: &str,
    ) -> Result<Option<Value>, GraphError> {
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        Ok(node.properties.remove(key))
    }

    /// Set an edge property, returning the previous value
    pub fn set_edge_property(
        &mut self,
        edge_id: &str,
        key: &str,
        value: Value,
    ) -> Result<Option<Value>, GraphError> {
        let edge = self
            .edges
            .get_mut(edge_id)
            .ok_or_else(|| GraphError::EdgeNotFound(edge_id.to_string()))?;
        Ok(edge.properties.insert(key.to_string(), value))
    }

    /// Remove an edge property, returning the removed value
    pub fn remove_edge_property(
        &mut self,
        edge_id: &str,
        key: &str,
    ) -> Result<Option<Value>, GraphError> {
        let edge = self
            .edges
            .get_mut(edge_id)
            .ok_or_else(|| GraphError::EdgeNotFound(edge_id.to_string()))?;
        Ok(edge.properties.remove(key))
    }

    /// Get all outgoing edges from a node
    pub fn get_outgoing_edges(&self, node_id: &str) -> Vec<&Edge> {
        self.adjacency_out
            .get(node_id)
            .map(|ids| ids.iter().filter_map(|id| self.edges.get(id)).collect())
            .unwrap_or_default()
    }

    /// Remove an edge
    pub fn remove_edge(&mut self, edge_id: &str) -> Result<Edge, GraphError> {
        let edge = self
            .edges
            .remove(edge_id)
            .ok_or_else(|| GraphError::EdgeNotFound(edge_id.to_string()))?;

        if let Some(edges) = self.edge_labels.get_mut(&edge.label) {
            edges.remove(edge_id);
            if edges.is_empty() {
                self.edge_labels.remove(&edge.label);
            }
        }

        if let Some(outgoing) = self.adjacency_out.get_mut(&edge.from_node) {
            outgoing.retain(|id| id != edge_id);
        }
        if let Some(incoming) = self.adjacency_in.get_mut(&edge.to_node) {
            incoming.retain(|id| id != edge_id);
        }

        Ok(edge)
    }

    /// Check if the graph contains an edge
    pub fn contains_edge(&self, edge_id: &str) -> bool {
        self.edges.contains_key(edge_id)
    }

    /// Get graph statistics
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            node_label_count: self.node_labels.len(),
            edge_label_count: self.edge_labels.len(),
        }
    }
}

/// Graph statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub node_label_count: usize,
    pub edge_label_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_people() -> GraphCache {
        let mut graph = GraphCache::new();
        graph
            .add_node(Node::with_labels("a", &["Person"]))
            .unwrap();
        graph
            .add_node(Node::with_labels("b", &["Person"]))
            .unwrap();
        graph
    }

    #[test]
    fn test_label_index_follows_relabel() {
        let mut graph = two_people();
        assert!(graph.remove_node_label("a", "Person").unwrap());
        assert!(graph.add_node_label("a", "Human").unwrap());

        assert_eq!(graph.node_ids_with_label("Person"), vec!["b".to_string()]);
        assert_eq!(graph.node_ids_with_label("Human"), vec!["a".to_string()]);
        assert_eq!(graph.stats().node_label_count, 2);
    }

    #[test]
    fn test_parallel_edges_allowed() {
        let mut graph = two_people();
        graph.add_edge(Edge::new("r1", "a", "b", "KNOWS")).unwrap();
        graph.add_edge(Edge::new("r2", "a", "b", "KNOWS")).unwrap();
        assert_eq!(graph.edge_ids_with_label("KNOWS").len(), 2);
        assert_eq!(graph.get_outgoing_edges("a").len(), 2);
    }

    #[test]
    fn test_edge_requires_endpoints() {
        let mut graph = two_people();
        let err = graph
            .add_edge(Edge::new("r1", "a", "missing", "KNOWS"))
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidEdge { .. }));
    }

    #[test]
    fn test_remove_edge_clears_indices() {
        let mut graph = two_people();
        graph.add_edge(Edge::new("r1", "a", "b", "KNOWS")).unwrap();
        graph.remove_edge("r1").unwrap();
        assert!(graph.edge_ids_with_label("KNOWS").is_empty());
        assert!(graph.get_outgoing_edges("a").is_empty());
        assert_eq!(graph.stats().edge_label_count, 0);
    }

    #[test]
    fn test_property_selection_is_sorted() {
        let mut graph = GraphCache::new();
        for id in ["c", "a", "b"] {
            graph
                .add_node(Node::new(id).with_property("name", Value::from(id)))
                .unwrap();
        }
        assert_eq!(
            graph.node_ids_with_property("name"),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }
}
