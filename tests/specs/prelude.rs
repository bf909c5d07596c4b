//! Shared helpers for lease protocol specs.

pub use cf_lease::ops;
pub use cf_lease::{
    CancelToken, ContinuationToken, FakeClock, HostId, Lease, LeaseUpdater, MemorySink, Mutation,
    PartitionId, StoreError, UpdateError, UpdateEvent, UpdateOutcome, UpdaterConfig, VersionToken,
};
pub use cf_store::{MemoryLeaseStore, ScriptedFailure, StoreCall};
pub use std::sync::Arc;

/// A store seeded with one unowned partition, plus the stored record.
pub fn seeded_partition(partition: &str) -> (MemoryLeaseStore, Lease, FakeClock) {
    let clock = FakeClock::new();
    let store = MemoryLeaseStore::new();
    let lease = Lease::new(
        PartitionId::new(partition),
        VersionToken::new("seed"),
        &clock,
    );
    let stored = store.insert(lease);
    (store, stored, clock)
}

/// An updater over the shared store with a recording sink attached.
pub fn updater_with_sink(
    store: &MemoryLeaseStore,
    clock: &FakeClock,
) -> (LeaseUpdater<MemoryLeaseStore, FakeClock>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let updater = LeaseUpdater::new(store.clone(), clock.clone()).with_sink(sink.clone());
    (updater, sink)
}

/// An updater over the shared store with events discarded.
pub fn updater(
    store: &MemoryLeaseStore,
    clock: &FakeClock,
) -> LeaseUpdater<MemoryLeaseStore, FakeClock> {
    LeaseUpdater::new(store.clone(), clock.clone())
}
