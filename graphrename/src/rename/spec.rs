// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Selection and mutation descriptors
//!
//! Structured value objects handed from the operation builder to the
//! execution engine and on to the store. Names and scope ids travel as
//! bound values, never as text spliced into a query string.

use serde::Serialize;
use std::fmt;

/// Kind of graph entity a selection enumerates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Node,
    Relationship,
}

/// Which entities qualify for a rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Predicate {
    /// Nodes tagged with the label
    NodeLabel(String),
    /// Relationships of the type
    RelationshipType(String),
    /// Nodes possessing the property key
    NodeProperty(String),
    /// Relationships possessing the property key
    RelationshipProperty(String),
}

impl Predicate {
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            Predicate::NodeLabel(_) | Predicate::NodeProperty(_) => EntityKind::Node,
            Predicate::RelationshipType(_) | Predicate::RelationshipProperty(_) => {
                EntityKind::Relationship
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::NodeLabel(label) => write!(f, "(n:`{}`)", label),
            Predicate::RelationshipType(rel_type) => write!(f, "()-[r:`{}`]->()", rel_type),
            Predicate::NodeProperty(key) => write!(f, "(n) WHERE n.`{}` IS NOT NULL", key),
            Predicate::RelationshipProperty(key) => {
                write!(f, "()-[r]->() WHERE r.`{}` IS NOT NULL", key)
            }
        }
    }
}

/// "Which entities": a predicate plus an optional bound scope of ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSpec {
    predicate: Predicate,
    scope: Option<Vec<String>>,
}

impl SelectionSpec {
    pub(crate) fn new(predicate: Predicate, scope: Option<Vec<String>>) -> Self {
        Self { predicate, scope }
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Entity ids the selection is restricted to, if any
    pub fn scope(&self) -> Option<&[String]> {
        self.scope.as_deref()
    }

    pub fn is_scoped(&self) -> bool {
        self.scope.is_some()
    }

    pub fn entity_kind(&self) -> EntityKind {
        self.predicate.entity_kind()
    }
}

impl fmt::Display for SelectionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(ids) => write!(f, "{} IN $scope[{}]", self.predicate, ids.len()),
            None => write!(f, "{}", self.predicate),
        }
    }
}

/// "What transform": applied to one selected entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MutationSpec {
    /// Untag `old_label`, tag `new_label`
    ReplaceLabel { old_label: String, new_label: String },
    /// Create a `new_type` relationship between the same endpoints with the
    /// same properties, then delete the old one
    RecreateRelationship { old_type: String, new_type: String },
    /// Read the value under `old_key`, remove it, write it under `new_key`
    MoveProperty {
        entity: EntityKind,
        old_key: String,
        new_key: String,
    },
}

impl MutationSpec {
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            MutationSpec::ReplaceLabel { .. } => EntityKind::Node,
            MutationSpec::RecreateRelationship { .. } => EntityKind::Relationship,
            MutationSpec::MoveProperty { entity, .. } => *entity,
        }
    }
}

impl fmt::Display for MutationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationSpec::ReplaceLabel {
                old_label,
                new_label,
            } => write!(f, "REMOVE n:`{}` SET n:`{}`", old_label, new_label),
            MutationSpec::RecreateRelationship { old_type, new_type } => write!(
                f,
                "CREATE (a)-[:`{}`]->(b) SET += r, DELETE r:`{}`",
                new_type, old_type
            ),
            MutationSpec::MoveProperty {
                old_key, new_key, ..
            } => write!(f, "MOVE .`{}` TO .`{}`", old_key, new_key),
        }
    }
}
