// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Rename requests and the descriptors built from them

pub mod builder;
pub mod error;
pub mod request;
pub mod sanitize;
pub mod spec;

pub use builder::{RenameOperation, RenameOperationBuilder};
pub use error::RenameError;
pub use request::{RenameKind, RenameRequest};
pub use sanitize::{sanitize_identifier, sanitize_name};
pub use spec::{EntityKind, MutationSpec, Predicate, SelectionSpec};
