// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema impact reporting
//!
//! Finds the constraints and indexes that still reference a renamed label,
//! relationship type or property key. Renames never touch schema
//! definitions, so anything reported here is stale and must be reconciled
//! by the caller.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::rename::request::RenameKind;
use crate::schema::types::SchemaTarget;
use crate::storage::traits::SchemaReader;
use crate::storage::StorageError;

/// Constraints and indexes referencing a renamed element, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaImpact {
    pub constraints: Vec<String>,
    pub indexes: Vec<String>,
}

impl SchemaImpact {
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty() && self.indexes.is_empty()
    }
}

/// The old names to assess impact for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImpactQuery {
    pub label: Option<String>,
    pub rel_type: Option<String>,
    pub property: Option<String>,
}

impl ImpactQuery {
    /// Query matching the element a rename of `kind` replaces
    pub fn for_kind(kind: RenameKind, old_name: &str) -> Self {
        let old_name = Some(old_name.to_string());
        match kind {
            RenameKind::Label => Self {
                label: old_name,
                ..Self::default()
            },
            RenameKind::RelType => Self {
                rel_type: old_name,
                ..Self::default()
            },
            RenameKind::NodeProp | RenameKind::RelProp => Self {
                property: old_name,
                ..Self::default()
            },
        }
    }
}

/// Read-only reporter over a store's schema
pub struct SchemaImpactReporter<'a> {
    schema: &'a dyn SchemaReader,
}

impl<'a> SchemaImpactReporter<'a> {
    pub fn new(schema: &'a dyn SchemaReader) -> Self {
        Self { schema }
    }

    pub fn report(&self, query: &ImpactQuery) -> Result<SchemaImpact, StorageError> {
        let mut impact = ImpactCollector::default();

        if let Some(label) = &query.label {
            let target = SchemaTarget::label(label.as_str());
            for constraint in self.schema.constraints_for(&target)? {
                impact.constraint(&constraint.name, constraint.to_string());
            }
            for index in self.schema.indexes_for(&target)? {
                impact.index(&index.name, index.to_string());
            }
        }

        if let Some(rel_type) = &query.rel_type {
            let target = SchemaTarget::relationship_type(rel_type.as_str());
            for constraint in self.schema.constraints_for(&target)? {
                impact.constraint(&constraint.name, constraint.to_string());
            }
            if self.schema.supports_relationship_indexes() {
                for index in self.schema.indexes_for(&target)? {
                    impact.index(&index.name, index.to_string());
                }
            }
        }

        // Property keys are not namespaced to a label or type: scan everything.
        if let Some(property) = &query.property {
            for constraint in self.schema.all_constraints()? {
                if constraint.references_property(property) {
                    impact.constraint(&constraint.name, constraint.to_string());
                }
            }
            for index in self.schema.all_indexes()? {
                if index.references_property(property) {
                    impact.index(&index.name, index.to_string());
                }
            }
        }

        let impact = impact.finish();
        debug!(
            "Schema impact for {:?}: {} constraint(s), {} index(es)",
            query,
            impact.constraints.len(),
            impact.indexes.len()
        );
        Ok(impact)
    }
}

/// Accumulates descriptions, keeping the first sighting of each definition
#[derive(Default)]
struct ImpactCollector {
    seen_constraints: HashSet<String>,
    seen_indexes: HashSet<String>,
    impact: SchemaImpact,
}

impl ImpactCollector {
    fn constraint(&mut self, name: &str, description: String) {
        if self.seen_constraints.insert(name.to_string()) {
            self.impact.constraints.push(description);
        }
    }

    fn index(&mut self, name: &str, description: String) {
        if self.seen_indexes.insert(name.to_string()) {
            self.impact.indexes.push(description);
        }
    }

    fn finish(self) -> SchemaImpact {
        self.impact
    }
}
