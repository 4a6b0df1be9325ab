//! Persistent queue storage
//!
//! The whole queue serializes as a plain JSON array (no versioning).
//! A corrupt or unreadable file is discarded silently and the queue
//! starts empty — pending items are sacrificed rather than blocking
//! startup.

use std::fs;
use std::path::{Path, PathBuf};

use shared::models::SyncQueueItem;

use crate::utils::{AppError, AppResult};

/// On-disk FIFO of pending mutations.
pub struct SyncQueue {
    path: PathBuf,
    items: Vec<SyncQueueItem>,
}

impl SyncQueue {
    /// Load the queue from `path`, discarding corrupt content.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Vec<SyncQueueItem>>(&bytes) {
                Ok(items) => items,
                Err(e) => {
                    tracing::debug!("Discarding corrupt sync queue file: {e}");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self { path, items }
    }

    /// Write the queue back to disk. Called after every change.
    pub fn persist(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::internal(format!("Failed to create sync dir: {e}")))?;
        }
        let json = serde_json::to_vec_pretty(&self.items)?;
        fs::write(&self.path, json)
            .map_err(|e| AppError::internal(format!("Failed to write sync queue: {e}")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn push(&mut self, item: SyncQueueItem) {
        self.items.push(item);
    }

    /// Oldest pending item (ascending timestamp — FIFO replay order).
    pub fn oldest(&self) -> Option<SyncQueueItem> {
        self.items
            .iter()
            .min_by_key(|i| (i.timestamp, i.id))
            .cloned()
    }

    pub fn remove(&mut self, id: i64) -> Option<SyncQueueItem> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(pos))
    }

    /// Bump the retry counter of an item; returns the new count.
    pub fn bump_retries(&mut self, id: i64) -> Option<u32> {
        let item = self.items.iter_mut().find(|i| i.id == id)?;
        item.retries += 1;
        Some(item.retries)
    }

    /// Pending items in replay order.
    pub fn snapshot(&self) -> Vec<SyncQueueItem> {
        let mut items = self.items.clone();
        items.sort_by_key(|i| (i.timestamp, i.id));
        items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::SyncOperation;

    fn item(id: i64, ts: i64) -> SyncQueueItem {
        SyncQueueItem {
            id,
            operation: SyncOperation::Create,
            entity: "coupon".to_string(),
            data: serde_json::json!({"id": id}),
            timestamp: ts,
            retries: 0,
        }
    }

    #[test]
    fn persist_and_reload_preserves_order_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queue.json");

        let mut q = SyncQueue::load(&path);
        q.push(item(2, 200));
        q.push(item(1, 100));
        q.push(item(3, 300));
        q.persist().unwrap();

        let reloaded = SyncQueue::load(&path);
        assert_eq!(reloaded.snapshot(), q.snapshot());
        assert_eq!(reloaded.len(), 3);
        // FIFO: oldest timestamp first
        assert_eq!(reloaded.oldest().unwrap().id, 1);
    }

    #[test]
    fn corrupt_file_resets_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queue.json");
        std::fs::write(&path, b"{not json").unwrap();

        let q = SyncQueue::load(&path);
        assert!(q.is_empty());
    }

    #[test]
    fn missing_file_is_empty_queue() {
        let dir = tempfile::tempdir().unwrap();
        let q = SyncQueue::load(dir.path().join("nope.json"));
        assert!(q.is_empty());
    }
}
