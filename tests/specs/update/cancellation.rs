//! Cancellation specs
//!
//! Cancellation is reported distinctly from lease loss, and a cancelled
//! call never issues further writes.

use crate::prelude::*;

#[tokio::test]
async fn a_pre_cancelled_call_never_reaches_the_store() {
    let (store, stored, clock) = seeded_partition("p-1");
    let (updater, sink) = updater_with_sink(&store, &clock);
    let cancel = CancelToken::new();
    cancel.cancel();

    let result = updater
        .update(
            stored.clone(),
            ops::take_ownership(HostId::new("host-a")),
            &cancel,
        )
        .await;

    assert!(matches!(result, Err(UpdateError::Cancelled)));
    assert_eq!(store.replace_count(), 0);
    assert_eq!(store.get(&stored.partition), Some(stored));
    assert_eq!(sink.names(), vec!["lease:cancelled"]);
}

#[tokio::test]
async fn cancellation_stops_the_retry_loop_between_attempts() {
    let (store, stored, clock) = seeded_partition("p-1");
    let (updater, sink) = updater_with_sink(&store, &clock);

    // The competitor makes the first write miss; the caller cancels while
    // that attempt is in flight.
    let competitor = store.clone();
    let seed = stored.clone();
    let cancel = CancelToken::new();
    let trigger = cancel.clone();
    let result = updater
        .update(
            stored,
            move |lease: &Lease| {
                competitor.insert(seed.clone().with_owner(HostId::new("host-x")));
                trigger.cancel();
                Mutation::Propose(lease.clone().with_owner(HostId::new("host-a")))
            },
            &cancel,
        )
        .await;

    assert!(matches!(result, Err(UpdateError::Cancelled)));
    assert_eq!(store.replace_count(), 1);
    assert_eq!(sink.names(), vec!["lease:contested", "lease:cancelled"]);
}

#[tokio::test]
async fn cancellation_is_not_classified_as_a_lease_loss() {
    let (store, stored, clock) = seeded_partition("p-1");
    let updater = updater(&store, &clock);
    let cancel = CancelToken::new();
    cancel.cancel();

    let result = updater
        .update(
            stored,
            ops::take_ownership(HostId::new("host-a")),
            &cancel,
        )
        .await;

    // The caller distinguishes "asked to stop" from "the lease is gone".
    match result {
        Err(UpdateError::Cancelled) => {}
        other => panic!("expected a cancellation, got {other:?}"),
    }
}
