// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Request-scoped state handed to the engine and reporter

use crate::exec::{CancellationToken, RunConfig};
use crate::storage::traits::GraphStore;

/// Everything one rename needs besides its descriptors
pub struct RenameContext<'a> {
    store: &'a dyn GraphStore,
    config: RunConfig,
    cancel: CancellationToken,
}

impl<'a> RenameContext<'a> {
    pub fn new(store: &'a dyn GraphStore, config: RunConfig) -> Self {
        Self {
            store,
            config,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn store(&self) -> &'a dyn GraphStore {
        self.store
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }
}
