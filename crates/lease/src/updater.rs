// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lease update coordinator
//!
//! Drives a caller-supplied mutation to a safe conditional write under
//! optimistic concurrency: apply the mutator to the freshest snapshot,
//! attempt a compare-and-swap replace, re-read and retry on contention,
//! and classify every terminal outcome. The store's conditional write is
//! the only concurrency-control mechanism; no in-process lock is held
//! across a store round trip.

use crate::cancel::CancelToken;
use crate::clock::{Clock, SystemClock};
use crate::event::{EventSink, NullSink, UpdateEvent};
use crate::lease::Lease;
use crate::store::{LeaseStore, ReplaceOutcome, StoreError};
use std::sync::Arc;
use thiserror::Error;

/// What a mutator wants done with the current snapshot
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    /// Write this snapshot, conditional on the current version
    Propose(Lease),
    /// Deliberately write nothing; not an error
    Abort,
}

/// Coordinator tuning
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdaterConfig {
    /// Write attempts before the call gives up on a contested record.
    /// Always at least 1.
    pub max_attempts: u32,
}

impl UpdaterConfig {
    pub fn new() -> Self {
        Self { max_attempts: 5 }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal loss of a lease during an update call
///
/// `recoverable = true` means the record is gone and the caller's
/// balancing logic may attempt a fresh acquisition. `recoverable = false`
/// means a structural conflict or an exhausted retry budget; immediate
/// re-acquisition is not assumed safe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaseLost {
    pub recoverable: bool,
    /// Freshest snapshot the coordinator had when the loss was observed
    pub last_known: Lease,
}

/// How an update call resolved
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Exactly one conditional write applied; carries the stored lease
    /// with its fresh version token
    Updated(Lease),
    /// The mutator aborted; the input snapshot is handed back untouched
    /// and the store was never contacted for a write
    Unchanged(Lease),
    /// The lease was lost; see [`LeaseLost`]
    Lost(LeaseLost),
}

impl UpdateOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, UpdateOutcome::Updated(_))
    }

    pub fn is_lost(&self) -> bool {
        matches!(self, UpdateOutcome::Lost(_))
    }

    /// The lease carried by a non-lost outcome
    pub fn lease(&self) -> Option<&Lease> {
        match self {
            UpdateOutcome::Updated(lease) | UpdateOutcome::Unchanged(lease) => Some(lease),
            UpdateOutcome::Lost(_) => None,
        }
    }
}

/// Failures an update call does not resolve by itself
#[derive(Debug, Error)]
pub enum UpdateError {
    /// Infrastructure failure from the store, passed through uninterpreted
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    /// The caller cancelled before the next attempt was issued
    #[error("update cancelled")]
    Cancelled,
}

/// Retry/conflict coordinator for lease mutations
///
/// Cheap to clone; concurrent calls on clones contend only through the
/// store, which is the point.
#[derive(Clone)]
pub struct LeaseUpdater<S, C = SystemClock> {
    store: S,
    clock: C,
    config: UpdaterConfig,
    sink: Arc<dyn EventSink>,
}

impl<S: LeaseStore, C: Clock> LeaseUpdater<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            config: UpdaterConfig::default(),
            sink: Arc::new(NullSink),
        }
    }

    /// Set coordinator tuning
    pub fn with_config(mut self, config: UpdaterConfig) -> Self {
        self.config = config;
        self
    }

    /// Inject an observability sink for structured update events
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    /// Apply `mutate` to the lease under optimistic concurrency
    ///
    /// The mutator runs once per attempt against the freshest known
    /// snapshot and must tolerate being invoked several times within one
    /// call. At most one conditional write takes effect. `cancel` is
    /// polled before each attempt; a cancelled call never issues further
    /// writes and reports [`UpdateError::Cancelled`], distinct from lease
    /// loss.
    pub async fn update<F>(
        &self,
        snapshot: Lease,
        mut mutate: F,
        cancel: &CancelToken,
    ) -> Result<UpdateOutcome, UpdateError>
    where
        F: FnMut(&Lease) -> Mutation + Send,
    {
        let mut current = snapshot;
        let budget = self.config.max_attempts.max(1);

        for attempt in 1..=budget {
            if cancel.is_cancelled() {
                tracing::debug!(partition = %current.partition, attempt, "update cancelled");
                self.sink.emit(UpdateEvent::UpdateCancelled {
                    partition: current.partition.0.clone(),
                    attempt,
                });
                return Err(UpdateError::Cancelled);
            }

            let desired = match mutate(&current) {
                Mutation::Abort => {
                    tracing::debug!(partition = %current.partition, "mutation aborted");
                    self.sink.emit(UpdateEvent::MutationAborted {
                        partition: current.partition.0.clone(),
                    });
                    return Ok(UpdateOutcome::Unchanged(current));
                }
                Mutation::Propose(lease) => lease.with_last_updated(self.clock.now()),
            };

            match self.store.replace(&desired, &current.version).await? {
                ReplaceOutcome::Replaced(stored) => {
                    tracing::debug!(partition = %stored.partition, attempt, "lease updated");
                    self.sink.emit(UpdateEvent::LeaseUpdated {
                        partition: stored.partition.0.clone(),
                        owner: stored.owner.as_ref().map(|h| h.0.clone()),
                        attempt,
                    });
                    return Ok(UpdateOutcome::Updated(stored));
                }

                ReplaceOutcome::VersionMismatch => {
                    match self.store.read(&current.partition).await? {
                        None => {
                            tracing::debug!(partition = %current.partition, attempt, "lease gone");
                            self.sink.emit(UpdateEvent::LeaseGone {
                                partition: current.partition.0.clone(),
                                attempt,
                            });
                            return Ok(UpdateOutcome::Lost(LeaseLost {
                                recoverable: true,
                                last_known: current,
                            }));
                        }
                        Some(fresh) => {
                            tracing::debug!(
                                partition = %current.partition,
                                attempt,
                                competing_owner = ?fresh.owner,
                                "write contested"
                            );
                            self.sink.emit(UpdateEvent::WriteContested {
                                partition: current.partition.0.clone(),
                                attempt,
                                competing_owner: fresh.owner.as_ref().map(|h| h.0.clone()),
                            });
                            // Re-run the mutator against the winner's state
                            current = fresh;
                        }
                    }
                }

                ReplaceOutcome::NotFound => {
                    tracing::debug!(partition = %current.partition, attempt, "lease gone");
                    self.sink.emit(UpdateEvent::LeaseGone {
                        partition: current.partition.0.clone(),
                        attempt,
                    });
                    return Ok(UpdateOutcome::Lost(LeaseLost {
                        recoverable: true,
                        last_known: current,
                    }));
                }

                ReplaceOutcome::Conflict => {
                    tracing::warn!(partition = %current.partition, attempt, "structural conflict");
                    self.sink.emit(UpdateEvent::OwnershipConflict {
                        partition: current.partition.0.clone(),
                        attempt,
                    });
                    return Ok(UpdateOutcome::Lost(LeaseLost {
                        recoverable: false,
                        last_known: current,
                    }));
                }
            }
        }

        tracing::warn!(partition = %current.partition, attempts = budget, "retry budget exhausted");
        self.sink.emit(UpdateEvent::AttemptsExhausted {
            partition: current.partition.0.clone(),
            attempts: budget,
        });
        Ok(UpdateOutcome::Lost(LeaseLost {
            recoverable: false,
            last_known: current,
        }))
    }
}

#[cfg(test)]
#[path = "updater_tests.rs"]
mod tests;
