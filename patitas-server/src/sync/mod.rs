//! Offline sync queue
//!
//! Buffers every local mutation and replays it against the backend once
//! connectivity returns. The queue is the only durable state in the
//! server: a single JSON file under the work dir, rewritten on every
//! change and rehydrated at startup.

mod backend;
mod queue;
mod service;
mod worker;

pub use backend::{HttpSyncBackend, SimulatedBackend, SyncBackend};
pub use queue::SyncQueue;
pub use service::SyncService;
pub use worker::SyncWorker;
