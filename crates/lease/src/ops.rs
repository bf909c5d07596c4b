// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canned mutators for the common lease operations
//!
//! Each constructor returns a mutator ready to hand to
//! [`LeaseUpdater::update`](crate::updater::LeaseUpdater::update). They
//! are pure: ownership checks run against whatever snapshot the
//! coordinator passes in, so a host that lost its lease mid-call aborts
//! instead of clobbering the new holder.

use crate::lease::{ContinuationToken, HostId, Lease};
use crate::updater::Mutation;

/// Record progress by advancing the continuation token
///
/// Aborts when `owner` no longer holds the lease; progress for a lost
/// lease must not be written.
pub fn checkpoint(
    owner: HostId,
    continuation: ContinuationToken,
) -> impl FnMut(&Lease) -> Mutation + Send {
    move |lease: &Lease| {
        if lease.is_owned_by(&owner) {
            Mutation::Propose(lease.clone().with_continuation(continuation.clone()))
        } else {
            Mutation::Abort
        }
    }
}

/// Refresh the lease heartbeat without changing its fields
///
/// The coordinator stamps `last_updated` on every write, so proposing
/// the snapshot unchanged is enough. Aborts when `owner` lost the lease.
pub fn renew(owner: HostId) -> impl FnMut(&Lease) -> Mutation + Send {
    move |lease: &Lease| {
        if lease.is_owned_by(&owner) {
            Mutation::Propose(lease.clone())
        } else {
            Mutation::Abort
        }
    }
}

/// Claim the lease for `new_owner` regardless of the current holder
///
/// Used both for acquiring an unowned partition and for stealing one
/// during rebalancing; contention is settled by the conditional write.
pub fn take_ownership(new_owner: HostId) -> impl FnMut(&Lease) -> Mutation + Send {
    move |lease: &Lease| Mutation::Propose(lease.clone().with_owner(new_owner.clone()))
}

/// Steal the lease from a specific incumbent
///
/// Aborts when the holder is no longer `expected`; the steal was planned
/// against stale state and the plan no longer applies.
pub fn take_ownership_from(
    expected: HostId,
    new_owner: HostId,
) -> impl FnMut(&Lease) -> Mutation + Send {
    move |lease: &Lease| {
        if lease.is_owned_by(&expected) {
            Mutation::Propose(lease.clone().with_owner(new_owner.clone()))
        } else {
            Mutation::Abort
        }
    }
}

/// Return the partition to the acquirable pool
///
/// Aborts when `owner` no longer holds the lease; someone else's claim
/// is not ours to clear.
pub fn release(owner: HostId) -> impl FnMut(&Lease) -> Mutation + Send {
    move |lease: &Lease| {
        if lease.is_owned_by(&owner) {
            Mutation::Propose(lease.clone().without_owner())
        } else {
            Mutation::Abort
        }
    }
}

#[cfg(test)]
#[path = "ops_tests.rs"]
mod tests;
