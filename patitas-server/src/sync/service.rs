//! SyncService — queue ownership, guards, and the replay pass

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};
use shared::models::{SyncOperation, SyncQueueItem, SyncStatus};
use shared::util::{now_millis, snowflake_id};
use tokio::sync::Notify;

use super::backend::SyncBackend;
use super::queue::SyncQueue;

/// Failed replay attempts allowed before an item is dropped.
const MAX_RETRIES: u32 = 5;

struct SyncInner {
    queue: Mutex<SyncQueue>,
    online: AtomicBool,
    syncing: AtomicBool,
    last_error: RwLock<Option<String>>,
    wake: Notify,
}

/// Shared handle over the sync queue.
///
/// Mutating handlers call [`enqueue`](Self::enqueue); the worker (or a
/// manual trigger) runs [`process`](Self::process). Clones share state.
#[derive(Clone)]
pub struct SyncService {
    inner: Arc<SyncInner>,
}

impl SyncService {
    /// Rehydrate the queue from `queue_path` and start online.
    pub fn new(queue_path: impl Into<PathBuf>) -> Self {
        let queue = SyncQueue::load(queue_path);
        if !queue.is_empty() {
            tracing::info!("Sync queue rehydrated with {} pending item(s)", queue.len());
        }
        Self {
            inner: Arc::new(SyncInner {
                queue: Mutex::new(queue),
                online: AtomicBool::new(true),
                syncing: AtomicBool::new(false),
                last_error: RwLock::new(None),
                wake: Notify::new(),
            }),
        }
    }

    /// Append a mutation to the queue. Wakes the worker when online so
    /// the item replays immediately; offline items wait for
    /// connectivity.
    pub fn enqueue(&self, operation: SyncOperation, entity: &str, data: serde_json::Value) {
        let item = SyncQueueItem {
            id: snowflake_id(),
            operation,
            entity: entity.to_string(),
            data,
            timestamp: now_millis(),
            retries: 0,
        };
        {
            let mut queue = self.inner.queue.lock();
            queue.push(item);
            if let Err(e) = queue.persist() {
                tracing::error!("Failed to persist sync queue: {e}");
            }
        }
        if self.is_online() {
            self.inner.wake.notify_one();
        }
    }

    /// Manual "sync now" trigger; the pass itself applies the guards.
    pub fn sync_now(&self) {
        self.inner.wake.notify_one();
    }

    /// Connectivity toggle, driven by the dashboard's online/offline
    /// events. Going online kicks a replay pass.
    pub fn set_online(&self, online: bool) {
        let was = self.inner.online.swap(online, Ordering::SeqCst);
        if online && !was {
            tracing::info!("Back online, scheduling sync");
            self.inner.wake.notify_one();
        }
        if !online && was {
            tracing::info!("Offline; mutations will queue locally");
        }
    }

    pub fn is_online(&self) -> bool {
        self.inner.online.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> SyncStatus {
        SyncStatus {
            online: self.is_online(),
            syncing: self.inner.syncing.load(Ordering::SeqCst),
            pending: self.inner.queue.lock().len(),
            last_error: self.inner.last_error.read().clone(),
        }
    }

    /// Pending items in replay order (for the dashboard's sync panel).
    pub fn pending(&self) -> Vec<SyncQueueItem> {
        self.inner.queue.lock().snapshot()
    }

    /// Wait for the next wake-up (worker loop).
    pub async fn wait_wake(&self) {
        self.inner.wake.notified().await;
    }

    /// One replay pass.
    ///
    /// Runs only when online, not already syncing, and non-empty. Items
    /// go oldest-first; the first failure bumps that item's retry
    /// counter and ends the pass, so a persistently failing item blocks
    /// the queue instead of being skipped. Items past [`MAX_RETRIES`]
    /// are dropped.
    pub async fn process(&self, backend: &dyn SyncBackend) {
        if !self.is_online() {
            return;
        }
        if self.inner.syncing.swap(true, Ordering::SeqCst) {
            return; // a pass is already running
        }

        loop {
            if !self.is_online() {
                break;
            }
            let next = self.inner.queue.lock().oldest();
            let Some(item) = next else { break };

            match backend.replay(&item).await {
                Ok(()) => {
                    let mut queue = self.inner.queue.lock();
                    queue.remove(item.id);
                    if let Err(e) = queue.persist() {
                        tracing::error!("Failed to persist sync queue: {e}");
                    }
                    *self.inner.last_error.write() = None;
                    tracing::debug!(entity = %item.entity, id = item.id, "Replayed sync item");
                }
                Err(e) => {
                    *self.inner.last_error.write() = Some(e.to_string());
                    let mut queue = self.inner.queue.lock();
                    if let Some(retries) = queue.bump_retries(item.id)
                        && retries > MAX_RETRIES
                    {
                        queue.remove(item.id);
                        tracing::warn!(
                            entity = %item.entity,
                            id = item.id,
                            retries,
                            "Dropping sync item after retry exhaustion"
                        );
                    }
                    if let Err(e) = queue.persist() {
                        tracing::error!("Failed to persist sync queue: {e}");
                    }
                    break; // stop the pass on first failure
                }
            }
        }

        self.inner.syncing.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{AppError, AppResult};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    /// Scripted backend: fails the first `failures` calls, then succeeds.
    struct FlakyBackend {
        failures: usize,
        calls: AtomicUsize,
    }

    impl FlakyBackend {
        fn new(failures: usize) -> Self {
            Self {
                failures,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SyncBackend for FlakyBackend {
        async fn replay(&self, _item: &SyncQueueItem) -> AppResult<()> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err(AppError::unavailable("simulated outage"))
            } else {
                Ok(())
            }
        }
    }

    fn service() -> (SyncService, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let svc = SyncService::new(dir.path().join("queue.json"));
        (svc, dir)
    }

    #[tokio::test]
    async fn replays_in_fifo_order() {
        let (svc, _dir) = service();
        svc.enqueue(SyncOperation::Create, "coupon", serde_json::json!({"id": 1}));
        svc.enqueue(SyncOperation::Update, "coupon", serde_json::json!({"id": 1}));
        assert_eq!(svc.status().pending, 2);

        svc.process(&FlakyBackend::new(0)).await;
        assert_eq!(svc.status().pending, 0);
        assert!(svc.status().last_error.is_none());
    }

    #[tokio::test]
    async fn offline_queues_without_processing() {
        let (svc, _dir) = service();
        svc.set_online(false);
        svc.enqueue(SyncOperation::Delete, "cage", serde_json::json!({"id": 9}));

        svc.process(&FlakyBackend::new(0)).await;
        assert_eq!(svc.status().pending, 1);
    }

    #[tokio::test]
    async fn first_failure_blocks_the_pass() {
        let (svc, _dir) = service();
        svc.enqueue(SyncOperation::Create, "sale", serde_json::json!({"id": 1}));
        svc.enqueue(SyncOperation::Create, "sale", serde_json::json!({"id": 2}));

        svc.process(&FlakyBackend::new(1)).await;
        // Nothing replayed: the head item failed and the pass stopped
        assert_eq!(svc.status().pending, 2);
        assert!(svc.status().last_error.is_some());
        assert_eq!(svc.pending()[0].retries, 1);
    }

    #[tokio::test]
    async fn six_consecutive_failures_drop_the_item() {
        let (svc, _dir) = service();
        svc.enqueue(SyncOperation::Create, "invoice", serde_json::json!({"id": 7}));

        let backend = FlakyBackend::new(usize::MAX);
        for _ in 0..6 {
            svc.process(&backend).await;
        }
        assert_eq!(svc.status().pending, 0);
    }

    #[tokio::test]
    async fn queue_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queue.json");
        {
            let svc = SyncService::new(&path);
            svc.set_online(false);
            svc.enqueue(SyncOperation::Create, "client", serde_json::json!({"id": 3}));
        }
        let svc = SyncService::new(&path);
        assert_eq!(svc.status().pending, 1);
        assert_eq!(svc.pending()[0].entity, "client");
    }
}
