// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema definitions, the in-memory catalog, and schema impact reporting

pub mod catalog;
pub mod impact;
pub mod types;

pub use catalog::SchemaCatalog;
pub use impact::{ImpactQuery, SchemaImpact, SchemaImpactReporter};
pub use types::{ConstraintDefinition, ConstraintKind, IndexDefinition, IndexKind, SchemaTarget};
