//! Mutator contract specs
//!
//! An update call applies at most one conditional write, and an aborting
//! mutator applies none.

use crate::prelude::*;
use cf_lease::Clock;

#[tokio::test]
async fn a_proposed_change_lands_with_a_fresh_version() {
    let (store, stored, clock) = seeded_partition("p-1");
    let updater = updater(&store, &clock);

    let outcome = updater
        .update(
            stored.clone(),
            ops::take_ownership(HostId::new("host-a")),
            &CancelToken::new(),
        )
        .await
        .unwrap();

    let updated = outcome.lease().expect("takeover should land").clone();
    assert!(outcome.is_updated());
    assert_eq!(updated.owner, Some(HostId::new("host-a")));
    assert_ne!(updated.version, stored.version);
    assert_eq!(store.get(&stored.partition), Some(updated));
    assert_eq!(store.replace_count(), 1);
}

#[tokio::test]
async fn an_aborting_mutator_leaves_no_trace_in_the_store() {
    let (store, stored, clock) = seeded_partition("p-1");
    let updater = updater(&store, &clock);

    let outcome = updater
        .update(stored.clone(), |_: &Lease| Mutation::Abort, &CancelToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, UpdateOutcome::Unchanged(stored.clone()));
    assert_eq!(store.get(&stored.partition), Some(stored));
    assert_eq!(store.replace_count(), 0);
}

#[tokio::test]
async fn a_checkpoint_records_progress_for_the_holder() {
    let (store, stored, clock) = seeded_partition("p-1");
    let updater = updater(&store, &clock);
    let host = HostId::new("host-a");

    let owned = updater
        .update(
            stored,
            ops::take_ownership(host.clone()),
            &CancelToken::new(),
        )
        .await
        .unwrap()
        .lease()
        .expect("takeover should land")
        .clone();

    updater
        .update(
            owned.clone(),
            ops::checkpoint(host, ContinuationToken::new("c-17")),
            &CancelToken::new(),
        )
        .await
        .unwrap();

    let current = store.get(&owned.partition).unwrap();
    assert_eq!(current.continuation, Some(ContinuationToken::new("c-17")));
}

#[tokio::test]
async fn a_renewal_refreshes_the_write_stamp() {
    let (store, stored, clock) = seeded_partition("p-1");
    let updater = updater(&store, &clock);
    let host = HostId::new("host-a");

    let owned = updater
        .update(
            stored,
            ops::take_ownership(host.clone()),
            &CancelToken::new(),
        )
        .await
        .unwrap()
        .lease()
        .expect("takeover should land")
        .clone();

    clock.advance(std::time::Duration::from_secs(30));
    updater
        .update(owned.clone(), ops::renew(host), &CancelToken::new())
        .await
        .unwrap();

    let current = store.get(&owned.partition).unwrap();
    assert_eq!(current.last_updated, clock.now());
    assert!(current.last_updated > owned.last_updated);
}

#[tokio::test]
async fn a_release_returns_the_partition_to_the_pool() {
    let (store, stored, clock) = seeded_partition("p-1");
    let updater = updater(&store, &clock);
    let host = HostId::new("host-a");

    let owned = updater
        .update(
            stored,
            ops::take_ownership(host.clone()),
            &CancelToken::new(),
        )
        .await
        .unwrap()
        .lease()
        .expect("takeover should land")
        .clone();

    updater
        .update(owned.clone(), ops::release(host), &CancelToken::new())
        .await
        .unwrap();

    let current = store.get(&owned.partition).unwrap();
    assert_eq!(current.owner, None);
}
