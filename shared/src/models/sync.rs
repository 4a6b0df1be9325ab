//! Sync Queue Models
//!
//! A queue item records one local mutation awaiting replay against the
//! backend. The whole queue is serialized as a plain JSON array with no
//! versioning (`work_dir/sync/queue.json`).

use serde::{Deserialize, Serialize};

/// Mutation kind being replayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncOperation {
    Create,
    Update,
    Delete,
}

/// One pending mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncQueueItem {
    pub id: i64,
    pub operation: SyncOperation,
    /// Entity name, e.g. "pension_stay", "coupon"
    pub entity: String,
    /// Snapshot of the mutated record (or `{"id": ...}` for deletes)
    pub data: serde_json::Value,
    /// Enqueue time, Unix millis — replay order is ascending timestamp
    pub timestamp: i64,
    /// Failed replay attempts so far; items past the cap are dropped
    pub retries: u32,
}

/// Queue status surfaced to the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncStatus {
    pub online: bool,
    pub syncing: bool,
    pub pending: usize,
    /// Latest replay error, single slot (not a log)
    pub last_error: Option<String>,
}
