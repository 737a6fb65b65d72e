// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Rename orchestration and results

pub mod context;
pub mod rename_coordinator;
pub mod result;
pub mod settings;

pub use context::RenameContext;
pub use rename_coordinator::RenameCoordinator;
pub use result::RenameResult;
pub use settings::RenameSettings;
