// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Rename Operation Builder
//!
//! Turns a [`RenameRequest`] into the selection and mutation descriptors the
//! engine executes. Names are sanitized here and travel onward as bound
//! values; scope entries become bound ids.

use log::{debug, warn};

use super::error::RenameError;
use super::request::{RenameKind, RenameRequest};
use super::sanitize::sanitize_name;
use super::spec::{EntityKind, MutationSpec, Predicate, SelectionSpec};
use crate::storage::EntityRef;

/// Descriptors for one rename, plus the sanitized names they were built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOperation {
    pub kind: RenameKind,
    pub old_name: String,
    pub new_name: String,
    pub selection: SelectionSpec,
    pub mutation: MutationSpec,
}

pub struct RenameOperationBuilder;

impl RenameOperationBuilder {
    pub fn build(request: &RenameRequest) -> Result<RenameOperation, RenameError> {
        let old_name = sanitize_name("old", &request.old_name)?;
        let new_name = sanitize_name("new", &request.new_name)?;
        let scope = Self::bind_scope(request.kind, request.scope.as_deref());

        let (predicate, mutation) = match request.kind {
            RenameKind::Label => (
                Predicate::NodeLabel(old_name.clone()),
                MutationSpec::ReplaceLabel {
                    old_label: old_name.clone(),
                    new_label: new_name.clone(),
                },
            ),
            RenameKind::RelType => (
                Predicate::RelationshipType(old_name.clone()),
                MutationSpec::RecreateRelationship {
                    old_type: old_name.clone(),
                    new_type: new_name.clone(),
                },
            ),
            RenameKind::NodeProp => (
                Predicate::NodeProperty(old_name.clone()),
                MutationSpec::MoveProperty {
                    entity: EntityKind::Node,
                    old_key: old_name.clone(),
                    new_key: new_name.clone(),
                },
            ),
            RenameKind::RelProp => (
                Predicate::RelationshipProperty(old_name.clone()),
                MutationSpec::MoveProperty {
                    entity: EntityKind::Relationship,
                    old_key: old_name.clone(),
                    new_key: new_name.clone(),
                },
            ),
        };

        let selection = SelectionSpec::new(predicate, scope);
        debug!(
            "Built {} rename '{}' -> '{}': {}",
            request.kind, old_name, new_name, selection
        );

        Ok(RenameOperation {
            kind: request.kind,
            old_name,
            new_name,
            selection,
            mutation,
        })
    }

    /// Scope entries as bound ids. An absent or empty scope means the
    /// rename is unrestricted; entries of the wrong entity kind are dropped.
    fn bind_scope(kind: RenameKind, scope: Option<&[EntityRef]>) -> Option<Vec<String>> {
        let scope = scope.filter(|refs| !refs.is_empty())?;
        let wants_nodes = kind.entity_kind() == EntityKind::Node;

        let (matching, dropped): (Vec<&EntityRef>, Vec<&EntityRef>) =
            scope.iter().partition(|r| r.is_node() == wants_nodes);
        if !dropped.is_empty() {
            warn!(
                "Ignoring {} scope entr{} of the wrong kind for a {} rename",
                dropped.len(),
                if dropped.len() == 1 { "y" } else { "ies" },
                kind
            );
        }

        Some(matching.into_iter().map(|r| r.id().to_string()).collect())
    }
}
