//! SyncWorker — background task that drains the queue
//!
//! Waits for wake-ups from the service (enqueue while online, manual
//! sync, connectivity regained) and runs one replay pass per wake-up.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::backend::SyncBackend;
use super::service::SyncService;

pub struct SyncWorker {
    service: SyncService,
    backend: Arc<dyn SyncBackend>,
    shutdown: CancellationToken,
}

impl SyncWorker {
    pub fn new(
        service: SyncService,
        backend: Arc<dyn SyncBackend>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            service,
            backend,
            shutdown,
        }
    }

    pub async fn run(self) {
        tracing::info!("SyncWorker started");

        // Catch up on anything rehydrated from disk
        self.service.process(self.backend.as_ref()).await;

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::info!("SyncWorker shutting down");
                    break;
                }
                _ = self.service.wait_wake() => {
                    self.service.process(self.backend.as_ref()).await;
                }
            }
        }

        tracing::info!("SyncWorker stopped");
    }
}
