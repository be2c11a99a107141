//! Subscriber view of the change stream

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use super::event::ChangeEvent;

/// One observer's ordered view of the change stream
///
/// The first delivered event is the most recent one emitted before the
/// subscription attached, if any; every event emitted after attach follows
/// in emission order. Dropping the subscription cancels it without
/// disturbing other subscribers or the catalog.
///
/// The underlying channel is bounded. A subscriber that falls more than the
/// channel capacity behind is cancelled rather than handed a feed with
/// silent gaps.
pub struct Subscription {
    /// Event replayed before any live delivery
    replay: Option<ChangeEvent>,

    /// Live feed from the broadcaster
    rx: broadcast::Receiver<ChangeEvent>,
}

impl Subscription {
    pub(super) fn new(replay: Option<ChangeEvent>, rx: broadcast::Receiver<ChangeEvent>) -> Self {
        Self { replay, rx }
    }

    /// Receive the next change event
    ///
    /// Suspends until an event is available. Returns `None` once the
    /// broadcaster has gone away or this subscriber has overflowed.
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        if let Some(event) = self.replay.take() {
            return Some(event);
        }

        match self.rx.recv().await {
            Ok(event) => Some(event),
            Err(RecvError::Closed) => None,
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Subscriber overflowed, cancelling");
                None
            }
        }
    }
}
