// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Batch execution engine
//!
//! Drives a selection through batches of mutations:
//! 1. Candidates are pulled lazily from the store in `batch_size` slices
//! 2. Each batch (or entity, or the whole run, per [`BatchMode`]) runs in
//!    its own [`TransactionScope`]
//! 3. Failed scopes are retried up to `retries` times, then recorded
//! 4. Workers stop pulling new batches once the run is cancelled
//!
//! With `parallel` set, batches are distributed across a dedicated rayon
//! pool of up to `concurrency` workers sharing one batch source. The pool
//! never grows past the number of batches the selection can produce.

use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use super::batch::{Batch, BatchSource};
use super::cancel::CancellationToken;
use super::config::{BatchMode, RunConfig};
use super::error::ExecutionError;
use super::stats::{RunStats, StatsAccumulator};
use crate::rename::spec::{MutationSpec, SelectionSpec};
use crate::storage::traits::GraphStore;
use crate::storage::{EntityRef, StorageError};
use crate::txn::TransactionScope;

/// Hard ceiling on worker threads for one run
const MAX_WORKERS: usize = 256;

/// First run-aborting error raised by any worker
#[derive(Default)]
struct AbortSignal {
    raised: AtomicBool,
    error: Mutex<Option<ExecutionError>>,
}

impl AbortSignal {
    fn raise(&self, error: ExecutionError) {
        let mut slot = self.error.lock();
        if slot.is_none() {
            *slot = Some(error);
        }
        self.raised.store(true, Ordering::SeqCst);
    }

    fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    fn take(&self) -> Option<ExecutionError> {
        self.error.lock().take()
    }
}

/// Shared state of one run, borrowed by every worker
struct RunState<'r> {
    mutation: &'r MutationSpec,
    config: &'r RunConfig,
    cancel: &'r CancellationToken,
    stats: StatsAccumulator,
    abort: AbortSignal,
    /// Set when cancellation left candidates unprocessed
    interrupted: AtomicBool,
}

impl RunState<'_> {
    fn should_stop(&self) -> bool {
        self.cancel.is_cancelled() || self.abort.is_raised()
    }

    fn mark_interrupted(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    fn was_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }
}

/// Workers worth spawning for `concurrency` when at most `batch_hint`
/// batches remain
fn worker_count(concurrency: usize, batch_hint: Option<usize>) -> usize {
    let workers = concurrency.min(MAX_WORKERS);
    match batch_hint {
        Some(batches) => workers.min(batches),
        None => workers,
    }
}

pub struct BatchExecutor<'s, S: GraphStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: GraphStore + ?Sized> BatchExecutor<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Apply `mutation` to every entity `selection` yields
    ///
    /// Batch failures are reported in the returned statistics. An `Err`
    /// means the run itself could not proceed: the configuration was
    /// invalid, the selection failed, or the store became unavailable.
    pub fn run(
        &self,
        selection: &SelectionSpec,
        mutation: &MutationSpec,
        config: &RunConfig,
        cancel: &CancellationToken,
    ) -> Result<RunStats, ExecutionError> {
        config.validate()?;
        let started = Instant::now();
        info!(
            "Starting rename run: {} -> {} (batchSize={}, parallel={}, concurrency={}, retries={}, batchMode={})",
            selection,
            mutation,
            config.batch_size,
            config.parallel,
            config.concurrency,
            config.retries,
            config.batch_mode
        );

        let candidates = self.store.select(selection)?;
        let source = BatchSource::new(candidates, config.batch_size);
        let state = RunState {
            mutation,
            config,
            cancel,
            stats: StatsAccumulator::new(),
            abort: AbortSignal::default(),
            interrupted: AtomicBool::new(false),
        };

        match config.batch_mode {
            BatchMode::BatchSingle => self.run_single_scope(source, &state),
            BatchMode::Batch | BatchMode::Single if config.parallel => {
                self.run_parallel(source, &state)?
            }
            BatchMode::Batch | BatchMode::Single => {
                let source = Mutex::new(source);
                self.drain(&source, &state);
            }
        }

        if let Some(error) = state.abort.take() {
            warn!("Rename run aborted: {}", error);
            return Err(error);
        }

        let stats = state.stats.finish(started.elapsed(), state.was_interrupted());
        if stats.was_cancelled {
            info!(
                "Rename run cancelled after {} batch(es): {} committed, {} failed",
                stats.batches, stats.committed_operations, stats.failed_operations
            );
        } else {
            info!(
                "Rename run finished in {}ms: {} batch(es), {} committed, {} failed",
                stats.time_taken_ms,
                stats.batches,
                stats.committed_operations,
                stats.failed_operations
            );
        }
        Ok(stats)
    }

    fn run_parallel(
        &self,
        source: BatchSource,
        state: &RunState<'_>,
    ) -> Result<(), ExecutionError> {
        let workers = worker_count(state.config.concurrency, source.remaining_batches_hint());
        if workers == 0 {
            debug!("Selection is empty, no workers started");
            return Ok(());
        }
        debug!(
            "Starting {} worker(s) (concurrency={})",
            workers, state.config.concurrency
        );
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("rename-worker-{}", i))
            .build()
            .map_err(|e| ExecutionError::WorkerPool(e.to_string()))?;

        let source = Mutex::new(source);
        pool.scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|_| self.drain(&source, state));
            }
        });
        Ok(())
    }

    /// Worker loop: pull and process batches until the source is empty,
    /// the run is cancelled, or another worker aborted it
    fn drain(&self, source: &Mutex<BatchSource>, state: &RunState<'_>) {
        loop {
            if state.abort.is_raised() {
                break;
            }
            let next = {
                let mut source = source.lock();
                if state.cancel.is_cancelled() {
                    if !source.is_exhausted() {
                        state.mark_interrupted();
                    }
                    None
                } else {
                    source.next_batch()
                }
            };
            let batch = match next {
                Some(batch) => batch,
                None => break,
            };
            let outcome = match state.config.batch_mode {
                BatchMode::Single => self.process_entities(&batch, state),
                _ => self.process_batch(&batch, state),
            };
            if let Err(error) = outcome {
                state.abort.raise(error);
                break;
            }
        }
    }

    /// One scope per batch, retried as a unit
    fn process_batch(&self, batch: &Batch, state: &RunState<'_>) -> Result<(), ExecutionError> {
        state.stats.batch_started();
        state.stats.candidates_seen(batch.len() as u64);
        let operations = batch.len() as u64;

        let mut attempt = 0;
        loop {
            match self.apply_in_scope(&batch.entities, state.mutation) {
                Ok(()) => {
                    debug!("Batch {} committed {} operation(s)", batch.index, operations);
                    state.stats.batch_committed(operations);
                    return Ok(());
                }
                Err(e) if e.is_fatal() => return Err(e.into()),
                Err(e) if attempt < state.config.retries => {
                    attempt += 1;
                    state.stats.retried();
                    warn!(
                        "Batch {} failed ({}), retry {}/{}",
                        batch.index, e, attempt, state.config.retries
                    );
                }
                Err(e) => {
                    warn!("Batch {} failed after {} attempt(s): {}", batch.index, attempt + 1, e);
                    state.stats.batch_failed(operations, Some(&e.to_string()));
                    return Ok(());
                }
            }
        }
    }

    /// One scope per entity; the batch fails if any entity does. A batch
    /// cut short by cancellation without failures is neither committed
    /// nor failed.
    fn process_entities(&self, batch: &Batch, state: &RunState<'_>) -> Result<(), ExecutionError> {
        state.stats.batch_started();
        let mut any_failed = false;
        let mut interrupted = false;

        for entity in &batch.entities {
            if state.should_stop() {
                debug!("Batch {} interrupted between entities", batch.index);
                if state.cancel.is_cancelled() {
                    state.mark_interrupted();
                }
                interrupted = true;
                break;
            }
            state.stats.candidates_seen(1);

            let mut attempt = 0;
            loop {
                match self.apply_in_scope(std::slice::from_ref(entity), state.mutation) {
                    Ok(()) => {
                        state.stats.operation_committed();
                        break;
                    }
                    Err(e) if e.is_fatal() => return Err(e.into()),
                    Err(e) if attempt < state.config.retries => {
                        attempt += 1;
                        state.stats.retried();
                        debug!("{} failed ({}), retry {}", entity, e, attempt);
                    }
                    Err(e) => {
                        warn!("{} in batch {} failed: {}", entity, batch.index, e);
                        state.stats.operation_failed(&e.to_string());
                        any_failed = true;
                        break;
                    }
                }
            }
        }

        if any_failed || !interrupted {
            state.stats.batch_settled(any_failed);
        }
        Ok(())
    }

    /// The whole run in one scope: materialize every batch, then apply
    /// them in order and commit once. Any failure rolls back everything.
    /// Cancellation is only honoured before the scope opens and between
    /// retries; an open scope always runs to commit or rollback.
    fn run_single_scope(&self, mut source: BatchSource, state: &RunState<'_>) {
        if state.cancel.is_cancelled() {
            if !source.is_exhausted() {
                state.mark_interrupted();
            }
            debug!("Single-scope run cancelled before its scope opened");
            return;
        }
        let batches = source.collect_all();
        let operations: u64 = batches.iter().map(|b| b.len() as u64).sum();

        let mut attempt = 0;
        loop {
            match self.apply_all(&batches, state.mutation) {
                Ok(()) => {
                    for batch in &batches {
                        state.stats.batch_started();
                        state.stats.candidates_seen(batch.len() as u64);
                        state.stats.batch_committed(batch.len() as u64);
                    }
                    return;
                }
                Err(e) if e.is_fatal() => {
                    state.abort.raise(e.into());
                    return;
                }
                Err(e) if attempt < state.config.retries && !state.cancel.is_cancelled() => {
                    attempt += 1;
                    state.stats.retried();
                    warn!(
                        "Single-scope run failed ({}), retry {}/{}",
                        e, attempt, state.config.retries
                    );
                }
                Err(e) => {
                    if attempt < state.config.retries {
                        state.mark_interrupted();
                    }
                    warn!("Single-scope run failed, {} operation(s) rolled back: {}", operations, e);
                    let message = e.to_string();
                    for (i, batch) in batches.iter().enumerate() {
                        state.stats.batch_started();
                        state.stats.candidates_seen(batch.len() as u64);
                        let error = (i == 0).then_some(message.as_str());
                        state.stats.batch_failed(batch.len() as u64, error);
                    }
                    return;
                }
            }
        }
    }

    fn apply_all(&self, batches: &[Batch], mutation: &MutationSpec) -> Result<(), StorageError> {
        let mut scope = TransactionScope::begin(self.store)?;
        for entity in batches.iter().flat_map(|b| &b.entities) {
            scope.mutate(entity, mutation)?;
        }
        scope.commit()
    }

    fn apply_in_scope(
        &self,
        entities: &[EntityRef],
        mutation: &MutationSpec,
    ) -> Result<(), StorageError> {
        let mut scope = TransactionScope::begin(self.store)?;
        for entity in entities {
            scope.mutate(entity, mutation)?;
        }
        scope.commit()
    }
}
