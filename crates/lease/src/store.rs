// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conditional store contract
//!
//! The shared store is an external collaborator: it owns persistence
//! format, transport, and version-token minting. The protocol only needs
//! read-by-key and a compare-and-swap style conditional replace.

use crate::lease::{Lease, PartitionId, VersionToken};
use async_trait::async_trait;
use thiserror::Error;

/// Infrastructure failures the protocol passes through uninterpreted
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("request throttled: {0}")]
    Throttled(String),
    #[error("backend failure: {0}")]
    Backend(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of a conditional replace attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// Write applied; carries the stored lease with its fresh version token
    Replaced(Lease),
    /// Another writer advanced the record past the expected version;
    /// the record still exists
    VersionMismatch,
    /// The record is gone
    NotFound,
    /// Structural failure distinct from staleness (e.g. the record was
    /// deleted and recreated with an incompatible identity); never retried
    Conflict,
}

/// Store seam for lease records
///
/// Both operations may block on network I/O. `replace` must be atomic:
/// it either installs `desired` in full (with a fresh version token) or
/// leaves the record untouched.
#[async_trait]
pub trait LeaseStore: Clone + Send + Sync + 'static {
    /// Read the current lease for a partition, if any
    async fn read(&self, partition: &PartitionId) -> Result<Option<Lease>, StoreError>;

    /// Replace the record only while its version still equals `expected`
    async fn replace(
        &self,
        desired: &Lease,
        expected: &VersionToken,
    ) -> Result<ReplaceOutcome, StoreError>;
}
