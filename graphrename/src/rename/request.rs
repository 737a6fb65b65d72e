// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Rename requests as submitted by callers

use serde::{Deserialize, Serialize};
use std::fmt;

use super::spec::EntityKind;
use crate::exec::RunConfig;
use crate::storage::EntityRef;

/// What a rename replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenameKind {
    /// A node label
    Label,
    /// A relationship type
    RelType,
    /// A property key on nodes
    NodeProp,
    /// A property key on relationships
    RelProp,
}

impl RenameKind {
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            RenameKind::Label | RenameKind::NodeProp => EntityKind::Node,
            RenameKind::RelType | RenameKind::RelProp => EntityKind::Relationship,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RenameKind::Label => "label",
            RenameKind::RelType => "relationship type",
            RenameKind::NodeProp => "node property",
            RenameKind::RelProp => "relationship property",
        }
    }
}

impl fmt::Display for RenameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    pub kind: RenameKind,
    pub old_name: String,
    pub new_name: String,
    /// Restrict the rename to these entities; `None` or empty means all
    #[serde(default)]
    pub scope: Option<Vec<EntityRef>>,
    #[serde(default)]
    pub config: RunConfig,
}

impl RenameRequest {
    pub fn new(kind: RenameKind, old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            kind,
            old_name: old_name.into(),
            new_name: new_name.into(),
            scope: None,
            config: RunConfig::default(),
        }
    }

    pub fn with_scope(mut self, scope: Vec<EntityRef>) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }
}
