// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory lease store with real conditional-replace semantics
//!
//! The version check and the write happen under one lock, so two racing
//! replaces against the same token resolve the way a remote store would:
//! one wins, the other observes a mismatch.

use async_trait::async_trait;
use cf_lease::{Lease, LeaseStore, PartitionId, ReplaceOutcome, StoreError, VersionToken};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Recorded call to a store method
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Read {
        partition: String,
    },
    Replace {
        partition: String,
        expected: String,
    },
}

/// Scripted failure for an upcoming replace call
#[derive(Debug)]
pub enum ScriptedFailure {
    /// Report a structural conflict
    Conflict,
    /// Fail with a store error
    Error(StoreError),
}

/// Shared state behind every clone of the store
#[derive(Default)]
struct MemoryState {
    leases: HashMap<PartitionId, Lease>,
    calls: Vec<StoreCall>,
    // Configurable failure modes, consumed in FIFO order
    replace_failures: VecDeque<ScriptedFailure>,
    read_failures: VecDeque<StoreError>,
}

/// Lease store backed by a shared in-process map
///
/// Clones share state, so one store can serve many hosts in a test.
#[derive(Clone, Default)]
pub struct MemoryLeaseStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryLeaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a lease, minting a fresh version token
    ///
    /// Returns the stored record so tests can hand its token to a reader.
    pub fn insert(&self, lease: Lease) -> Lease {
        let stored = lease.with_version(mint_token());
        let mut state = self.lock();
        state.leases.insert(stored.partition.clone(), stored.clone());
        stored
    }

    /// Delete a lease out from under its holder
    pub fn remove(&self, partition: &PartitionId) -> Option<Lease> {
        self.lock().leases.remove(partition)
    }

    /// Current stored record, bypassing call recording
    pub fn get(&self, partition: &PartitionId) -> Option<Lease> {
        self.lock().leases.get(partition).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().leases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().leases.is_empty()
    }

    /// Queue a failure for an upcoming replace call
    pub fn fail_next_replace(&self, failure: ScriptedFailure) {
        self.lock().replace_failures.push_back(failure);
    }

    /// Queue a failure for an upcoming read call
    pub fn fail_next_read(&self, error: StoreError) {
        self.lock().read_failures.push_back(error);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Clear recorded calls
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Number of replace calls recorded
    pub fn replace_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| matches!(call, StoreCall::Replace { .. }))
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn mint_token() -> VersionToken {
    VersionToken::new(Uuid::new_v4().to_string())
}

#[async_trait]
impl LeaseStore for MemoryLeaseStore {
    async fn read(&self, partition: &PartitionId) -> Result<Option<Lease>, StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Read {
            partition: partition.0.clone(),
        });

        if let Some(error) = state.read_failures.pop_front() {
            return Err(error);
        }
        Ok(state.leases.get(partition).cloned())
    }

    async fn replace(
        &self,
        desired: &Lease,
        expected: &VersionToken,
    ) -> Result<ReplaceOutcome, StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Replace {
            partition: desired.partition.0.clone(),
            expected: expected.0.clone(),
        });

        if let Some(failure) = state.replace_failures.pop_front() {
            return match failure {
                ScriptedFailure::Conflict => Ok(ReplaceOutcome::Conflict),
                ScriptedFailure::Error(error) => Err(error),
            };
        }

        let Some(current) = state.leases.get(&desired.partition) else {
            return Ok(ReplaceOutcome::NotFound);
        };
        if current.version != *expected {
            return Ok(ReplaceOutcome::VersionMismatch);
        }

        let stored = desired.clone().with_version(mint_token());
        state.leases.insert(stored.partition.clone(), stored.clone());
        Ok(ReplaceOutcome::Replaced(stored))
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
