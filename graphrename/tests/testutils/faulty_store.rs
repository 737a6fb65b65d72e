//! Store wrapper that injects failures
//!
//! Delegates to a MemoryStore, failing mutations of chosen entities and
//! optionally cancelling a token after a number of committed scopes or
//! while a chosen entity is being mutated.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use graphrename::rename::spec::{MutationSpec, SelectionSpec};
use graphrename::storage::traits::{CandidateStream, MutationOutcome, SchemaReader, StoreTransaction};
use graphrename::{CancellationToken, EntityRef, GraphStore, MemoryStore, StorageError, TransactionId};

#[derive(Debug, Clone)]
enum Fault {
    /// Fail every attempt with a retryable conflict
    Conflict,
    /// Fail the first `n` attempts, then succeed
    ConflictTimes(usize),
    /// Report the store as unavailable
    Offline,
}

pub struct FaultyStore {
    inner: MemoryStore,
    faults: Mutex<HashMap<String, Fault>>,
    attempts: Mutex<HashMap<String, usize>>,
    commits: AtomicUsize,
    cancel_after: Mutex<Option<(CancellationToken, usize)>>,
    cancel_on: Mutex<Option<(String, CancellationToken)>>,
}

impl FaultyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            faults: Mutex::new(HashMap::new()),
            attempts: Mutex::new(HashMap::new()),
            commits: AtomicUsize::new(0),
            cancel_after: Mutex::new(None),
            cancel_on: Mutex::new(None),
        }
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    pub fn fail_always(&self, entity_id: &str) {
        self.faults
            .lock()
            .unwrap()
            .insert(entity_id.to_string(), Fault::Conflict);
    }

    pub fn fail_times(&self, entity_id: &str, times: usize) {
        self.faults
            .lock()
            .unwrap()
            .insert(entity_id.to_string(), Fault::ConflictTimes(times));
    }

    pub fn go_offline_at(&self, entity_id: &str) {
        self.faults
            .lock()
            .unwrap()
            .insert(entity_id.to_string(), Fault::Offline);
    }

    /// Cancel `token` once `commits` scopes have committed
    pub fn cancel_after_commits(&self, token: CancellationToken, commits: usize) {
        *self.cancel_after.lock().unwrap() = Some((token, commits));
    }

    /// Cancel `token` from inside the scope that mutates `entity_id`
    pub fn cancel_on_mutate(&self, entity_id: &str, token: CancellationToken) {
        *self.cancel_on.lock().unwrap() = Some((entity_id.to_string(), token));
    }

    /// Mutation attempts made against `entity_id`
    pub fn attempts(&self, entity_id: &str) -> usize {
        self.attempts
            .lock()
            .unwrap()
            .get(entity_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    fn check(&self, entity: &EntityRef) -> Result<(), StorageError> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            let counter = attempts.entry(entity.id().to_string()).or_insert(0);
            *counter += 1;
            *counter
        };
        if let Some((id, token)) = self.cancel_on.lock().unwrap().as_ref() {
            if id == entity.id() {
                token.cancel();
            }
        }
        match self.faults.lock().unwrap().get(entity.id()) {
            Some(Fault::Conflict) => Err(StorageError::Conflict(format!(
                "injected conflict on {}",
                entity.id()
            ))),
            Some(Fault::ConflictTimes(n)) if attempt <= *n => Err(StorageError::Conflict(format!(
                "injected conflict on {}",
                entity.id()
            ))),
            Some(Fault::Offline) => Err(StorageError::Unavailable("injected outage".to_string())),
            _ => Ok(()),
        }
    }

    fn committed(&self) {
        let done = self.commits.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((token, after)) = self.cancel_after.lock().unwrap().as_ref() {
            if done >= *after {
                token.cancel();
            }
        }
    }
}

impl GraphStore for FaultyStore {
    fn select(&self, selection: &SelectionSpec) -> Result<CandidateStream, StorageError> {
        self.inner.select(selection)
    }

    fn begin_scope(&self) -> Result<Box<dyn StoreTransaction + '_>, StorageError> {
        Ok(Box::new(FaultyTransaction {
            inner: self.inner.begin_scope()?,
            store: self,
        }))
    }

    fn schema(&self) -> &dyn SchemaReader {
        self.inner.schema()
    }
}

struct FaultyTransaction<'a> {
    inner: Box<dyn StoreTransaction + 'a>,
    store: &'a FaultyStore,
}

impl StoreTransaction for FaultyTransaction<'_> {
    fn id(&self) -> TransactionId {
        self.inner.id()
    }

    fn mutate(
        &mut self,
        entity: &EntityRef,
        mutation: &MutationSpec,
    ) -> Result<MutationOutcome, StorageError> {
        self.store.check(entity)?;
        self.inner.mutate(entity, mutation)
    }

    fn commit(self: Box<Self>) -> Result<(), StorageError> {
        let store = self.store;
        self.inner.commit()?;
        store.committed();
        Ok(())
    }

    fn rollback(self: Box<Self>) -> Result<(), StorageError> {
        self.inner.rollback()
    }
}
