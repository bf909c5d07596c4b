// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lease record model
//!
//! A lease tracks ownership and progress of one partition of a change
//! feed. Every snapshot is an immutable value: mutation helpers return a
//! new record, never modify in place.

use crate::clock::Clock;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier for one partition of the feed
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartitionId(pub String);

impl PartitionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for PartitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a processing host that can own leases
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostId(pub String);

impl HostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for HostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque concurrency stamp, replaced by the store on every successful
/// write. Only equality comparison is meaningful; the token carries no
/// ordering, which is why this type has no `Ord` impl.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionToken(pub String);

impl VersionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Display for VersionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque cursor into the partition's event stream. Meaningful only to
/// the consuming pipeline; the protocol moves it around untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContinuationToken(pub String);

impl ContinuationToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ownership and progress record for one partition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lease {
    /// Partition this lease covers
    pub partition: PartitionId,
    /// Current holder, if any
    pub owner: Option<HostId>,
    /// Progress cursor for the consuming pipeline
    pub continuation: Option<ContinuationToken>,
    /// Concurrency stamp; see [`VersionToken`]
    pub version: VersionToken,
    /// Wall-clock time of the last successful write
    pub last_updated: DateTime<Utc>,
}

impl Lease {
    /// Create an unowned lease with no progress cursor
    pub fn new(partition: PartitionId, version: VersionToken, clock: &impl Clock) -> Self {
        Self {
            partition,
            owner: None,
            continuation: None,
            version,
            last_updated: clock.now(),
        }
    }

    /// Check whether the lease is currently held by `host`
    pub fn is_owned_by(&self, host: &HostId) -> bool {
        self.owner.as_ref() == Some(host)
    }

    /// New snapshot with `owner` installed
    pub fn with_owner(self, owner: HostId) -> Self {
        Self {
            owner: Some(owner),
            ..self
        }
    }

    /// New snapshot with the owner cleared
    pub fn without_owner(self) -> Self {
        Self {
            owner: None,
            ..self
        }
    }

    /// New snapshot with the progress cursor advanced
    pub fn with_continuation(self, continuation: ContinuationToken) -> Self {
        Self {
            continuation: Some(continuation),
            ..self
        }
    }

    /// New snapshot carrying `version` (stores use this when stamping)
    pub fn with_version(self, version: VersionToken) -> Self {
        Self { version, ..self }
    }

    /// New snapshot with `last_updated` set
    pub fn with_last_updated(self, at: DateTime<Utc>) -> Self {
        Self {
            last_updated: at,
            ..self
        }
    }
}

#[cfg(test)]
#[path = "lease_tests.rs"]
mod tests;
