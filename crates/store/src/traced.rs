// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced store wrapper for consistent observability

use async_trait::async_trait;
use cf_lease::{Lease, LeaseStore, PartitionId, ReplaceOutcome, StoreError, VersionToken};

/// Wrapper that adds tracing to any LeaseStore
#[derive(Clone)]
pub struct TracedLeaseStore<S> {
    inner: S,
}

impl<S> TracedLeaseStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: LeaseStore> LeaseStore for TracedLeaseStore<S> {
    async fn read(&self, partition: &PartitionId) -> Result<Option<Lease>, StoreError> {
        let span = tracing::info_span!("store.read", partition = %partition);
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.read(partition).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(Some(lease)) => tracing::debug!(
                version = %lease.version,
                owner = ?lease.owner,
                elapsed_ms = elapsed.as_millis() as u64,
                "lease read"
            ),
            Ok(None) => tracing::debug!(
                elapsed_ms = elapsed.as_millis() as u64,
                "no lease recorded"
            ),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "read failed"
            ),
        }

        result
    }

    async fn replace(
        &self,
        desired: &Lease,
        expected: &VersionToken,
    ) -> Result<ReplaceOutcome, StoreError> {
        let span = tracing::info_span!("store.replace", partition = %desired.partition);
        let _guard = span.enter();

        tracing::debug!(expected = %expected, owner = ?desired.owner, "conditional write");

        let start = std::time::Instant::now();
        let result = self.inner.replace(desired, expected).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(ReplaceOutcome::Replaced(stored)) => tracing::debug!(
                version = %stored.version,
                elapsed_ms = elapsed.as_millis() as u64,
                "replaced"
            ),
            Ok(ReplaceOutcome::VersionMismatch) => tracing::debug!(
                elapsed_ms = elapsed.as_millis() as u64,
                "version mismatch"
            ),
            Ok(ReplaceOutcome::NotFound) => tracing::debug!(
                elapsed_ms = elapsed.as_millis() as u64,
                "lease not found"
            ),
            Ok(ReplaceOutcome::Conflict) => tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                "ownership conflict"
            ),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "replace failed"
            ),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
