//! Dynamic parameter catalog with live change streaming
//!
//! A process-local registry of named configuration values that can be read,
//! created, updated, deleted, and observed for change. Observers attach at
//! any time and immediately see the most recent change (replay-latest), then
//! every later mutation in emission order.
//!
//! # Quick start
//!
//! ```no_run
//! use params_rs::{ParameterServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> params_rs::Result<()> {
//!     let server = ParameterServer::new(ServerConfig::default());
//!     server.run().await
//! }
//! ```
//!
//! # Library use
//!
//! The catalog works without the HTTP layer:
//!
//! ```
//! use params_rs::{ChangeBroadcaster, Parameter, ParameterStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let broadcaster = ChangeBroadcaster::new(ParameterStore::with_defaults());
//! let mut changes = broadcaster.subscribe().await;
//!
//! broadcaster.upsert(Parameter::new("conjunto.max.limit", "600")).await;
//! let event = changes.recv().await.unwrap();
//! assert_eq!(event.parameter.value, "600");
//! # }
//! ```

pub mod catalog;
pub mod error;
pub mod server;
pub mod stats;

pub use catalog::{
    ChangeBroadcaster, ChangeEvent, ChangeKind, Parameter, ParameterStore, Subscription,
};
pub use error::{Error, Result};
pub use server::{ParameterServer, ServerConfig};
pub use stats::CatalogStats;
