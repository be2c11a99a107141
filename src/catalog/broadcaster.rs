//! Change broadcaster implementation
//!
//! Wraps the [`ParameterStore`] so that every successful mutation emits
//! exactly one [`ChangeEvent`], fanned out to all attached subscribers.

use tokio::sync::{broadcast, RwLock};

use crate::stats::{CatalogStats, EventCounters};

use super::event::{ChangeEvent, ChangeKind};
use super::parameter::Parameter;
use super::store::ParameterStore;
use super::subscription::Subscription;

/// Default broadcast channel capacity
const DEFAULT_CAPACITY: usize = 256;

/// Serializes the catalog's mutation history into a single ordered event
/// sequence and fans it out to any number of independent subscribers
///
/// A newly attached subscriber immediately receives the most recent event
/// (replay-latest), then every event emitted after attach, in emission
/// order. The lock on the latest-event slot doubles as the mutation gate:
/// holding it across the store write and the channel send keeps emission
/// order identical to the order in which writes commit, and makes the
/// CREATED/UPDATED classification race-free.
pub struct ChangeBroadcaster {
    /// The wrapped store; all mutations go through the broadcaster
    store: ParameterStore,

    /// Most recently emitted event, replayed to new subscribers.
    /// Write-locked for the whole of every mutation.
    latest: RwLock<Option<ChangeEvent>>,

    /// Broadcast sender for fan-out to subscribers
    tx: broadcast::Sender<ChangeEvent>,

    /// Emission counters
    counters: EventCounters,
}

impl ChangeBroadcaster {
    /// Create a broadcaster around a store, with the default channel capacity
    pub fn new(store: ParameterStore) -> Self {
        Self::with_capacity(store, DEFAULT_CAPACITY)
    }

    /// Create a broadcaster with a custom channel capacity
    ///
    /// The capacity bounds how far a slow subscriber may fall behind before
    /// it is cancelled.
    pub fn with_capacity(store: ParameterStore, capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));

        Self {
            store,
            latest: RwLock::new(None),
            tx,
            counters: EventCounters::new(),
        }
    }

    /// Access the wrapped store
    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    /// Snapshot of all parameters
    pub async fn find_all(&self) -> Vec<Parameter> {
        self.store.list_all().await
    }

    /// Look up a parameter by key
    pub async fn find_by_key(&self, key: &str) -> Option<Parameter> {
        self.store.get(key).await
    }

    /// Insert or overwrite a parameter, emitting CREATED or UPDATED
    ///
    /// Exactly one event is emitted per call. The first writer to truly
    /// create a key emits CREATED; every later writer on that key emits
    /// UPDATED, even under concurrent upserts.
    pub async fn upsert(&self, parameter: Parameter) -> Parameter {
        let mut latest = self.latest.write().await;

        let (stored, created) = self.store.upsert(parameter.key, parameter.value).await;
        let kind = if created {
            ChangeKind::Created
        } else {
            ChangeKind::Updated
        };

        tracing::info!(key = %stored.key, kind = %kind, "Parameter upserted");
        self.emit(&mut latest, ChangeEvent::new(kind, stored.clone()));

        stored
    }

    /// Remove a parameter, emitting DELETED with the prior value
    ///
    /// Removing an absent key returns `None` and emits nothing.
    pub async fn remove(&self, key: &str) -> Option<Parameter> {
        let mut latest = self.latest.write().await;

        let removed = self.store.remove(key).await?;

        tracing::info!(key = %removed.key, "Parameter removed");
        self.emit(
            &mut latest,
            ChangeEvent::new(ChangeKind::Deleted, removed.clone()),
        );

        Some(removed)
    }

    /// Attach a new subscriber
    ///
    /// Returns immediately; the subscription's first delivered event is the
    /// most recent one emitted before attach, if any. Taking the latest-slot
    /// read lock around the receiver creation means an event landing
    /// concurrently is seen exactly once, either replayed or live.
    pub async fn subscribe(&self) -> Subscription {
        let latest = self.latest.read().await;
        let rx = self.tx.subscribe();
        let replay = latest.clone();

        tracing::debug!(subscribers = self.tx.receiver_count(), "Subscriber attached");

        Subscription::new(replay, rx)
    }

    /// Number of currently attached subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Catalog statistics snapshot
    pub async fn stats(&self) -> CatalogStats {
        CatalogStats {
            parameters: self.store.len().await,
            subscribers: self.tx.receiver_count(),
            events: self.counters.snapshot(),
        }
    }

    /// Publish an event: update the latest slot, then fan out
    ///
    /// Callers hold the slot's write lock, so slot and channel always agree
    /// on the emission order. A send with no subscribers is not an error.
    fn emit(&self, latest: &mut Option<ChangeEvent>, event: ChangeEvent) {
        self.counters.record(event.kind);
        *latest = Some(event.clone());
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio_test::assert_pending;

    use super::*;

    fn broadcaster() -> ChangeBroadcaster {
        ChangeBroadcaster::new(ParameterStore::new())
    }

    #[tokio::test]
    async fn test_created_then_updated() {
        let broadcaster = broadcaster();
        let mut sub = broadcaster.subscribe().await;

        broadcaster.upsert(Parameter::new("a", "1")).await;
        broadcaster.upsert(Parameter::new("a", "2")).await;

        let first = sub.recv().await.unwrap();
        assert_eq!(first.kind, ChangeKind::Created);
        assert_eq!(first.parameter, Parameter::new("a", "1"));

        let second = sub.recv().await.unwrap();
        assert_eq!(second.kind, ChangeKind::Updated);
        assert_eq!(second.parameter, Parameter::new("a", "2"));
    }

    #[tokio::test]
    async fn test_remove_emits_deleted() {
        let broadcaster = broadcaster();
        broadcaster.upsert(Parameter::new("a", "1")).await;

        let mut sub = broadcaster.subscribe().await;
        let removed = broadcaster.remove("a").await.unwrap();
        assert_eq!(removed, Parameter::new("a", "1"));

        // replayed CREATED, then the live DELETED
        assert_eq!(sub.recv().await.unwrap().kind, ChangeKind::Created);
        let deleted = sub.recv().await.unwrap();
        assert_eq!(deleted.kind, ChangeKind::Deleted);
        assert_eq!(deleted.parameter, Parameter::new("a", "1"));
    }

    #[tokio::test]
    async fn test_remove_absent_emits_nothing() {
        let broadcaster = broadcaster();
        let mut sub = broadcaster.subscribe().await;

        assert!(broadcaster.remove("missing").await.is_none());

        // the next event delivered is the later upsert, not a delete
        broadcaster.upsert(Parameter::new("a", "1")).await;
        let event = sub.recv().await.unwrap();
        assert_eq!(event.kind, ChangeKind::Created);
        assert_eq!(event.parameter.key, "a");
    }

    #[tokio::test]
    async fn test_replay_latest() {
        let broadcaster = broadcaster();
        broadcaster.upsert(Parameter::new("a", "1")).await;
        broadcaster.upsert(Parameter::new("b", "2")).await;
        broadcaster.upsert(Parameter::new("c", "3")).await;

        let mut sub = broadcaster.subscribe().await;
        let first = sub.recv().await.unwrap();
        assert_eq!(first.parameter, Parameter::new("c", "3"));

        // the replayed event is delivered once; the next one is live
        broadcaster.upsert(Parameter::new("d", "4")).await;
        let next = sub.recv().await.unwrap();
        assert_eq!(next.parameter, Parameter::new("d", "4"));
    }

    #[tokio::test]
    async fn test_no_replay_before_first_event() {
        let broadcaster = broadcaster();
        let mut sub = broadcaster.subscribe().await;

        {
            let mut recv = tokio_test::task::spawn(sub.recv());
            assert_pending!(recv.poll());
        }

        broadcaster.upsert(Parameter::new("a", "1")).await;
        assert_eq!(sub.recv().await.unwrap().kind, ChangeKind::Created);
    }

    #[tokio::test]
    async fn test_per_key_emission_order() {
        let broadcaster = broadcaster();
        let mut sub = broadcaster.subscribe().await;

        for i in 0..5 {
            broadcaster
                .upsert(Parameter::new("ordered", format!("v{i}")))
                .await;
        }

        for i in 0..5 {
            let event = sub.recv().await.unwrap();
            assert_eq!(event.parameter.value, format!("v{i}"));
        }
    }

    #[tokio::test]
    async fn test_concurrent_upserts_single_key() {
        let broadcaster = Arc::new(ChangeBroadcaster::with_capacity(ParameterStore::new(), 64));
        let mut sub = broadcaster.subscribe().await;

        let mut handles = Vec::new();
        for i in 0..16 {
            let broadcaster = Arc::clone(&broadcaster);
            handles.push(tokio::spawn(async move {
                broadcaster
                    .upsert(Parameter::new("shared.key", format!("v{i}")))
                    .await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let mut created = 0;
        let mut updated = 0;
        let mut last = None;
        for _ in 0..16 {
            let event = sub.recv().await.unwrap();
            match event.kind {
                ChangeKind::Created => created += 1,
                ChangeKind::Updated => updated += 1,
                ChangeKind::Deleted => panic!("no delete was issued"),
            }
            last = Some(event.parameter);
        }

        assert_eq!(created, 1);
        assert_eq!(updated, 15);
        // final stored value matches the last emitted event
        assert_eq!(broadcaster.find_by_key("shared.key").await, last);
    }

    #[tokio::test]
    async fn test_cancel_leaves_others_receiving() {
        let broadcaster = broadcaster();
        let mut keep = broadcaster.subscribe().await;
        let other = broadcaster.subscribe().await;
        assert_eq!(broadcaster.subscriber_count(), 2);

        drop(other);
        broadcaster.upsert(Parameter::new("a", "1")).await;

        assert_eq!(keep.recv().await.unwrap().kind, ChangeKind::Created);
        assert_eq!(broadcaster.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn test_overflowed_subscriber_cancelled() {
        let broadcaster = ChangeBroadcaster::with_capacity(ParameterStore::new(), 2);
        let mut sub = broadcaster.subscribe().await;

        for i in 0..8 {
            broadcaster
                .upsert(Parameter::new(format!("k{i}"), "v"))
                .await;
        }

        assert!(sub.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_replay_survives_broadcaster_drop() {
        let broadcaster = broadcaster();
        broadcaster.upsert(Parameter::new("a", "1")).await;

        let mut sub = broadcaster.subscribe().await;
        drop(broadcaster);

        assert_eq!(sub.recv().await.unwrap().kind, ChangeKind::Created);
        assert!(sub.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_stats_counts() {
        let broadcaster = broadcaster();
        broadcaster.upsert(Parameter::new("a", "1")).await;
        broadcaster.upsert(Parameter::new("a", "2")).await;
        broadcaster.remove("a").await;

        let stats = broadcaster.stats().await;
        assert_eq!(stats.events.created, 1);
        assert_eq!(stats.events.updated, 1);
        assert_eq!(stats.events.deleted, 1);
        assert_eq!(stats.parameters, 0);
        assert_eq!(stats.subscribers, 0);
    }

    #[tokio::test]
    async fn test_baseline_scenario() {
        let broadcaster = ChangeBroadcaster::new(ParameterStore::with_defaults());

        assert_eq!(
            broadcaster.find_by_key("conjunto.max.limit").await,
            Some(Parameter::new("conjunto.max.limit", "500"))
        );

        let mut sub = broadcaster.subscribe().await;
        let stored = broadcaster
            .upsert(Parameter::new("conjunto.max.limit", "600"))
            .await;
        assert_eq!(stored.value, "600");

        let event = sub.recv().await.unwrap();
        assert_eq!(event.kind, ChangeKind::Updated);
        assert_eq!(event.parameter, Parameter::new("conjunto.max.limit", "600"));

        assert!(broadcaster.remove("does.not.exist").await.is_none());
    }
}
