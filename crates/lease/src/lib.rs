// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cf-lease: Lease update protocol for the change-feed platform
//!
//! This crate provides:
//! - The versioned lease record and its identifier newtypes
//! - A store-agnostic boundary over conditional (compare-and-swap) writes
//! - The update coordinator: caller-supplied mutators driven to a safe
//!   write under optimistic concurrency, with bounded retries
//! - Canned mutators for checkpoint, renew, takeover, and release

pub mod cancel;
pub mod clock;
pub mod lease;

pub mod event;
pub mod store;

// Coordination (depends on the model above)
pub mod ops;
pub mod updater;

// Re-exports
pub use cancel::CancelToken;
pub use clock::{Clock, FakeClock, SystemClock};
pub use event::{EventSink, MemorySink, NullSink, UpdateEvent};
pub use lease::{ContinuationToken, HostId, Lease, PartitionId, VersionToken};
pub use store::{LeaseStore, ReplaceOutcome, StoreError};
pub use updater::{LeaseLost, LeaseUpdater, Mutation, UpdateError, UpdateOutcome, UpdaterConfig};
