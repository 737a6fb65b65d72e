// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory constraint and index registry
//!
//! Definitions are kept in creation order, which is the discovery order
//! reported by introspection.

use log::debug;
use parking_lot::RwLock;

use crate::schema::types::{ConstraintDefinition, IndexDefinition, SchemaTarget};
use crate::storage::traits::SchemaReader;
use crate::storage::StorageError;

#[derive(Debug)]
pub struct SchemaCatalog {
    constraints: RwLock<Vec<ConstraintDefinition>>,
    indexes: RwLock<Vec<IndexDefinition>>,
    relationship_indexes: bool,
}

impl SchemaCatalog {
    pub fn new() -> Self {
        Self {
            constraints: RwLock::new(Vec::new()),
            indexes: RwLock::new(Vec::new()),
            relationship_indexes: true,
        }
    }

    /// Catalog for a store model without relationship-type indexes
    pub fn without_relationship_indexes() -> Self {
        Self {
            relationship_indexes: false,
            ..Self::new()
        }
    }

    pub fn create_constraint(&self, constraint: ConstraintDefinition) -> Result<(), StorageError> {
        let mut constraints = self.constraints.write();
        if constraints.iter().any(|c| c.name == constraint.name) {
            return Err(StorageError::InvalidOperation(format!(
                "Constraint '{}' already exists",
                constraint.name
            )));
        }
        debug!("Creating {}", constraint);
        constraints.push(constraint);
        Ok(())
    }

    pub fn drop_constraint(&self, name: &str) -> Result<ConstraintDefinition, StorageError> {
        let mut constraints = self.constraints.write();
        let position = constraints
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| {
                StorageError::InvalidOperation(format!("Constraint '{}' not found", name))
            })?;
        Ok(constraints.remove(position))
    }

    pub fn create_index(&self, index: IndexDefinition) -> Result<(), StorageError> {
        if matches!(index.target, SchemaTarget::RelationshipType(_)) && !self.relationship_indexes
        {
            return Err(StorageError::InvalidOperation(format!(
                "Relationship type indexes are not supported: '{}'",
                index.name
            )));
        }
        let mut indexes = self.indexes.write();
        if indexes.iter().any(|i| i.name == index.name) {
            return Err(StorageError::InvalidOperation(format!(
                "Index '{}' already exists",
                index.name
            )));
        }
        debug!("Creating {}", index);
        indexes.push(index);
        Ok(())
    }

    pub fn drop_index(&self, name: &str) -> Result<IndexDefinition, StorageError> {
        let mut indexes = self.indexes.write();
        let position = indexes
            .iter()
            .position(|i| i.name == name)
            .ok_or_else(|| StorageError::InvalidOperation(format!("Index '{}' not found", name)))?;
        Ok(indexes.remove(position))
    }
}

impl Default for SchemaCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaReader for SchemaCatalog {
    fn constraints_for(
        &self,
        target: &SchemaTarget,
    ) -> Result<Vec<ConstraintDefinition>, StorageError> {
        Ok(self
            .constraints
            .read()
            .iter()
            .filter(|c| &c.target == target)
            .cloned()
            .collect())
    }

    fn indexes_for(&self, target: &SchemaTarget) -> Result<Vec<IndexDefinition>, StorageError> {
        Ok(self
            .indexes
            .read()
            .iter()
            .filter(|i| &i.target == target)
            .cloned()
            .collect())
    }

    fn all_constraints(&self) -> Result<Vec<ConstraintDefinition>, StorageError> {
        Ok(self.constraints.read().clone())
    }

    fn all_indexes(&self) -> Result<Vec<IndexDefinition>, StorageError> {
        Ok(self.indexes.read().clone())
    }

    fn supports_relationship_indexes(&self) -> bool {
        self.relationship_indexes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{ConstraintKind, IndexKind};

    #[test]
    fn test_duplicate_names_rejected() {
        let catalog = SchemaCatalog::new();
        let c = ConstraintDefinition::new(
            "c1",
            ConstraintKind::Unique,
            SchemaTarget::label("Person"),
            &["name"],
        );
        catalog.create_constraint(c.clone()).unwrap();
        assert!(catalog.create_constraint(c).is_err());
        assert_eq!(catalog.drop_constraint("c1").unwrap().name, "c1");
        assert!(catalog.all_constraints().unwrap().is_empty());
    }

    #[test]
    fn test_lookup_by_target_keeps_creation_order() {
        let catalog = SchemaCatalog::new();
        for name in ["i2", "i1", "i3"] {
            catalog
                .create_index(IndexDefinition::new(
                    name,
                    IndexKind::Range,
                    SchemaTarget::label("Person"),
                    &["name"],
                ))
                .unwrap();
        }
        catalog
            .create_index(IndexDefinition::new(
                "other",
                IndexKind::Text,
                SchemaTarget::label("Company"),
                &["name"],
            ))
            .unwrap();

        let names: Vec<String> = catalog
            .indexes_for(&SchemaTarget::label("Person"))
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["i2", "i1", "i3"]);
    }

    #[test]
    fn test_relationship_indexes_can_be_unsupported() {
        let catalog = SchemaCatalog::without_relationship_indexes();
        assert!(!catalog.supports_relationship_indexes());
        let result = catalog.create_index(IndexDefinition::new(
            "knows_since",
            IndexKind::Range,
            SchemaTarget::relationship_type("KNOWS"),
            &["since"],
        ));
        assert!(result.is_err());
    }
}
