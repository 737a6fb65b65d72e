// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Lazy partitioning of a candidate stream into batches

use std::iter::Peekable;

use crate::storage::traits::CandidateStream;
use crate::storage::EntityRef;

/// A contiguous slice of the candidate stream
#[derive(Debug, Clone)]
pub struct Batch {
    pub index: u64,
    pub entities: Vec<EntityRef>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Pulls at most `batch_size` candidates per call; the stream is consumed
/// once and never rewound.
pub struct BatchSource {
    candidates: Peekable<CandidateStream>,
    batch_size: usize,
    next_index: u64,
}

impl BatchSource {
    pub fn new(candidates: CandidateStream, batch_size: usize) -> Self {
        Self {
            candidates: candidates.peekable(),
            batch_size: batch_size.max(1),
            next_index: 0,
        }
    }

    pub fn next_batch(&mut self) -> Option<Batch> {
        let entities: Vec<EntityRef> = self
            .candidates
            .by_ref()
            .take(self.batch_size)
            .collect();
        if entities.is_empty() {
            return None;
        }
        let index = self.next_index;
        self.next_index += 1;
        Some(Batch { index, entities })
    }

    /// True once every candidate has been handed out
    pub fn is_exhausted(&mut self) -> bool {
        self.candidates.peek().is_none()
    }

    /// Upper bound on the batches still to come, when the stream knows it
    pub fn remaining_batches_hint(&self) -> Option<usize> {
        self.candidates
            .size_hint()
            .1
            .map(|n| (n + self.batch_size - 1) / self.batch_size)
    }

    /// Drain the remaining stream into batches
    pub fn collect_all(mut self) -> Vec<Batch> {
        let mut batches = Vec::new();
        while let Some(batch) = self.next_batch() {
            batches.push(batch);
        }
        batches
    }
}
