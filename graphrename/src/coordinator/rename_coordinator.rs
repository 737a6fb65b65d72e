// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Rename orchestration
//!
//! Request flow:
//! 1. Refuse if renames are disabled
//! 2. Validate the run configuration and build the operation
//! 3. Run the batch engine
//! 4. Report schema definitions that still reference the old name
//!
//! Schema impact is assessed after the run, against the old name.

use log::info;
use serde_json::{Map, Value as JsonValue};

use super::context::RenameContext;
use super::result::RenameResult;
use super::settings::RenameSettings;
use crate::exec::{BatchExecutor, CancellationToken, ExecutionError, RunConfig};
use crate::rename::{RenameError, RenameKind, RenameOperationBuilder, RenameRequest};
use crate::schema::{ImpactQuery, SchemaImpactReporter};
use crate::storage::traits::GraphStore;
use crate::storage::EntityRef;

pub struct RenameCoordinator<'a> {
    store: &'a dyn GraphStore,
    settings: RenameSettings,
}

impl<'a> RenameCoordinator<'a> {
    pub fn new(store: &'a dyn GraphStore) -> Self {
        Self::with_settings(store, RenameSettings::default())
    }

    pub fn with_settings(store: &'a dyn GraphStore, settings: RenameSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &RenameSettings {
        &self.settings
    }

    pub fn rename(&self, request: &RenameRequest) -> Result<RenameResult, RenameError> {
        self.rename_with_cancellation(request, CancellationToken::new())
    }

    /// Run `request`, stopping between batches once `cancel` fires
    pub fn rename_with_cancellation(
        &self,
        request: &RenameRequest,
        cancel: CancellationToken,
    ) -> Result<RenameResult, RenameError> {
        if !self.settings.enabled {
            return Err(RenameError::FeatureDisabled);
        }
        request.config.validate()?;
        let operation = RenameOperationBuilder::build(request)?;

        info!(
            "Renaming {} '{}' to '{}'",
            operation.kind, operation.old_name, operation.new_name
        );

        let ctx = RenameContext::new(self.store, request.config.clone()).with_cancellation(cancel);
        let stats = BatchExecutor::new(ctx.store()).run(
            &operation.selection,
            &operation.mutation,
            ctx.config(),
            ctx.cancellation(),
        )?;

        let impact = SchemaImpactReporter::new(ctx.store().schema())
            .report(&ImpactQuery::for_kind(operation.kind, &operation.old_name))
            .map_err(ExecutionError::from)?;

        info!(
            "Renamed {} '{}' to '{}': {} committed, {} failed, {} stale schema definition(s)",
            operation.kind,
            operation.old_name,
            operation.new_name,
            stats.committed_operations,
            stats.failed_operations,
            impact.constraints.len() + impact.indexes.len()
        );
        Ok(RenameResult::new(stats, impact))
    }

    /// Rename a node label. Label renames take no options and always run
    /// with the default run configuration.
    pub fn rename_label(
        &self,
        old_label: &str,
        new_label: &str,
        nodes: Option<Vec<EntityRef>>,
    ) -> Result<RenameResult, RenameError> {
        let request = self.request(RenameKind::Label, old_label, new_label, nodes, None)?;
        self.rename(&request)
    }

    pub fn rename_type(
        &self,
        old_type: &str,
        new_type: &str,
        relationships: Option<Vec<EntityRef>>,
        options: Option<&Map<String, JsonValue>>,
    ) -> Result<RenameResult, RenameError> {
        let request = self.request(RenameKind::RelType, old_type, new_type, relationships, options)?;
        self.rename(&request)
    }

    pub fn rename_node_property(
        &self,
        old_key: &str,
        new_key: &str,
        nodes: Option<Vec<EntityRef>>,
        options: Option<&Map<String, JsonValue>>,
    ) -> Result<RenameResult, RenameError> {
        let request = self.request(RenameKind::NodeProp, old_key, new_key, nodes, options)?;
        self.rename(&request)
    }

    pub fn rename_type_property(
        &self,
        old_key: &str,
        new_key: &str,
        relationships: Option<Vec<EntityRef>>,
        options: Option<&Map<String, JsonValue>>,
    ) -> Result<RenameResult, RenameError> {
        let request = self.request(RenameKind::RelProp, old_key, new_key, relationships, options)?;
        self.rename(&request)
    }

    fn request(
        &self,
        kind: RenameKind,
        old_name: &str,
        new_name: &str,
        scope: Option<Vec<EntityRef>>,
        options: Option<&Map<String, JsonValue>>,
    ) -> Result<RenameRequest, RenameError> {
        if !self.settings.enabled {
            return Err(RenameError::FeatureDisabled);
        }
        let config: RunConfig = match options {
            Some(options) => self.settings.default_run.merge_options(options)?,
            None => self.settings.default_run.clone(),
        };
        let mut request = RenameRequest::new(kind, old_name, new_name).with_config(config);
        request.scope = scope;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ConstraintDefinition, ConstraintKind, SchemaCatalog, SchemaTarget};
    use crate::storage::{MemoryStore, Node};
    use serde_json::json;

    #[test]
    fn test_disabled_refuses_before_store_access() {
        let store = MemoryStore::new();
        store.set_available(false);
        let coordinator = RenameCoordinator::with_settings(&store, RenameSettings::disabled());

        let err = coordinator.rename_label("Person", "Human", None).unwrap_err();
        assert_eq!(err, RenameError::FeatureDisabled);
    }

    #[test]
    fn test_invalid_options_rejected_before_store_access() {
        let store = MemoryStore::new();
        store.set_available(false);
        let coordinator = RenameCoordinator::new(&store);
        let options = json!({"batchSize": 0});

        let err = coordinator
            .rename_node_property("name", "fullName", None, options.as_object())
            .unwrap_err();
        assert!(matches!(err, RenameError::InvalidConfig(_)));
    }

    #[test]
    fn test_label_rename_reports_constraints() {
        let catalog = SchemaCatalog::new();
        catalog
            .create_constraint(ConstraintDefinition::new(
                "person_name",
                ConstraintKind::Unique,
                SchemaTarget::label("Person"),
                &["name"],
            ))
            .unwrap();
        let store = MemoryStore::with_schema(catalog);
        store
            .insert_node(Node::with_labels("a", &["Person"]))
            .unwrap();

        let result = RenameCoordinator::new(&store)
            .rename_label("Person", "Human", None)
            .unwrap();
        assert_eq!(result.stats.committed_operations, 1);
        assert_eq!(result.constraints.len(), 1);
        assert!(result.constraints[0].contains("person_name"));
        assert!(store.node("a").unwrap().has_label("Human"));
    }

    #[test]
    fn test_store_failure_surfaces_as_execution_error() {
        let store = MemoryStore::new();
        store.set_available(false);
        let err = RenameCoordinator::new(&store)
            .rename_type("KNOWS", "MET", None, None)
            .unwrap_err();
        assert!(matches!(
            err,
            RenameError::Execution(ExecutionError::StoreUnavailable(_))
        ));
    }
}
