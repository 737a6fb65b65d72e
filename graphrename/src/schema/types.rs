// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
// Constraint and index definitions as seen through schema introspection

use serde::{Deserialize, Serialize};
use std::fmt;

/// The label or relationship type a schema element is scoped to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaTarget {
    Label(String),
    RelationshipType(String),
}

impl SchemaTarget {
    pub fn label(name: impl Into<String>) -> Self {
        SchemaTarget::Label(name.into())
    }

    pub fn relationship_type(name: impl Into<String>) -> Self {
        SchemaTarget::RelationshipType(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            SchemaTarget::Label(name) | SchemaTarget::RelationshipType(name) => name,
        }
    }

    fn pattern(&self, property_keys: &[String]) -> String {
        let keys = if property_keys.is_empty() {
            String::new()
        } else {
            format!(" {{{}}}", property_keys.join(", "))
        };
        match self {
            SchemaTarget::Label(label) => format!("(:{}{})", label, keys),
            SchemaTarget::RelationshipType(rel_type) => format!("()-[:{}{}]-()", rel_type, keys),
        }
    }
}

/// Constraint kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKind {
    Unique,
    NodeKey,
    NotNull,
    PropertyType,
}

/// A named constraint over a label or relationship type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintDefinition {
    pub name: String,
    pub kind: ConstraintKind,
    pub target: SchemaTarget,
    pub property_keys: Vec<String>,
}

impl ConstraintDefinition {
    pub fn new(
        name: impl Into<String>,
        kind: ConstraintKind,
        target: SchemaTarget,
        property_keys: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            target,
            property_keys: property_keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn references_property(&self, key: &str) -> bool {
        self.property_keys.iter().any(|k| k == key)
    }

    fn type_name(&self) -> &'static str {
        match (self.kind, &self.target) {
            (ConstraintKind::Unique, SchemaTarget::Label(_)) => "UNIQUENESS",
            (ConstraintKind::Unique, SchemaTarget::RelationshipType(_)) => {
                "RELATIONSHIP_UNIQUENESS"
            }
            (ConstraintKind::NodeKey, SchemaTarget::Label(_)) => "NODE_KEY",
            (ConstraintKind::NodeKey, SchemaTarget::RelationshipType(_)) => "RELATIONSHIP_KEY",
            (ConstraintKind::NotNull, SchemaTarget::Label(_)) => "NODE_PROPERTY_EXISTENCE",
            (ConstraintKind::NotNull, SchemaTarget::RelationshipType(_)) => {
                "RELATIONSHIP_PROPERTY_EXISTENCE"
            }
            (ConstraintKind::PropertyType, SchemaTarget::Label(_)) => "NODE_PROPERTY_TYPE",
            (ConstraintKind::PropertyType, SchemaTarget::RelationshipType(_)) => {
                "RELATIONSHIP_PROPERTY_TYPE"
            }
        }
    }
}

impl fmt::Display for ConstraintDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Constraint( name='{}', type='{}', schema={} )",
            self.name,
            self.type_name(),
            self.target.pattern(&self.property_keys)
        )
    }
}

/// Index kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKind {
    Range,
    Text,
    Point,
    FullText,
}

impl IndexKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Range => "RANGE",
            IndexKind::Text => "TEXT",
            IndexKind::Point => "POINT",
            IndexKind::FullText => "FULLTEXT",
        }
    }
}

/// A named index over a label or relationship type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDefinition {
    pub name: String,
    pub kind: IndexKind,
    pub target: SchemaTarget,
    pub property_keys: Vec<String>,
}

impl IndexDefinition {
    pub fn new(
        name: impl Into<String>,
        kind: IndexKind,
        target: SchemaTarget,
        property_keys: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            target,
            property_keys: property_keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn references_property(&self, key: &str) -> bool {
        self.property_keys.iter().any(|k| k == key)
    }
}

impl fmt::Display for IndexDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Index( name='{}', type='{}', schema={} )",
            self.name,
            self.kind.as_str(),
            self.target.pattern(&self.property_keys)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_description() {
        let c = ConstraintDefinition::new(
            "person_name",
            ConstraintKind::Unique,
            SchemaTarget::label("Person"),
            &["name"],
        );
        assert_eq!(
            c.to_string(),
            "Constraint( name='person_name', type='UNIQUENESS', schema=(:Person {name}) )"
        );
        assert!(c.references_property("name"));
        assert!(!c.references_property("age"));
    }

    #[test]
    fn test_relationship_index_description() {
        let i = IndexDefinition::new(
            "knows_since",
            IndexKind::Range,
            SchemaTarget::relationship_type("KNOWS"),
            &["since", "weight"],
        );
        assert_eq!(
            i.to_string(),
            "Index( name='knows_since', type='RANGE', schema=()-[:KNOWS {since, weight}]-() )"
        );
    }
}
