//! Parameter catalog with live change fan-out
//!
//! The catalog stores named configuration values and routes every mutation
//! to all attached observers. It uses `tokio::sync::broadcast` for fan-out
//! to multiple subscribers, plus a retained latest-event slot so late
//! joiners start from the current state instead of a blank feed.
//!
//! # Architecture
//!
//! ```text
//!                      Arc<ChangeBroadcaster>
//!                 ┌───────────────────────────────┐
//!                 │ store: ParameterStore         │
//!                 │   RwLock<HashMap<Key, Param>> │
//!                 │ latest: RwLock<Option<Event>> │
//!                 │ tx: broadcast::Sender<Event>  │
//!                 └───────────────┬───────────────┘
//!                                 │
//!         ┌───────────────────────┼───────────────────────┐
//!         │                       │                       │
//!         ▼                       ▼                       ▼
//!    [Writer]               [Subscriber]            [Subscriber]
//!    upsert()/remove()      recv()                  recv()
//!         │                       │                       │
//!         └──► emit ChangeEvent ──► replay + live ──► SSE / caller
//! ```
//!
//! # Ordering
//!
//! The latest-event slot's write lock is held across the store write and
//! the channel send, so the emission order every subscriber observes is the
//! order in which writes actually committed. `subscribe()` takes the same
//! lock for reading, which closes the window where a new subscriber could
//! miss or double-receive an event landing at attach time.

pub mod broadcaster;
pub mod event;
pub mod parameter;
pub mod store;
pub mod subscription;

pub use broadcaster::ChangeBroadcaster;
pub use event::{ChangeEvent, ChangeKind};
pub use parameter::Parameter;
pub use store::ParameterStore;
pub use subscription::Subscription;
