// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Cooperative cancellation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Shared flag checked by the engine between batches
///
/// Clones observe the same flag. Cancelling never interrupts a batch that
/// is already running.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Cancel this token once `timeout` has elapsed
    pub fn cancel_after(&self, timeout: Duration) -> JoinHandle<()> {
        let token = self.clone();
        std::thread::spawn(move || {
            std::thread::sleep(timeout);
            log::debug!("Cancelling run after {:?} timeout", timeout);
            token.cancel();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let token = CancellationToken::new();
        let observer = token.clone();
        assert!(!observer.is_cancelled());
        token.cancel();
        assert!(observer.is_cancelled());
    }

    #[test]
    fn test_cancel_after_timeout() {
        let token = CancellationToken::new();
        token
            .cancel_after(Duration::from_millis(10))
            .join()
            .unwrap();
        assert!(token.is_cancelled());
    }
}
