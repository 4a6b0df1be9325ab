//! Replay targets for queued mutations

use std::time::Duration;

use async_trait::async_trait;
use shared::models::SyncQueueItem;

use crate::utils::{AppError, AppResult};

/// Destination that queued mutations replay against.
#[async_trait]
pub trait SyncBackend: Send + Sync {
    async fn replay(&self, item: &SyncQueueItem) -> AppResult<()>;
}

/// HTTP backend — POSTs each item to the configured cloud endpoint.
pub struct HttpSyncBackend {
    client: reqwest::Client,
    backend_url: String,
}

impl HttpSyncBackend {
    pub fn new(backend_url: String) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            backend_url,
        })
    }
}

#[async_trait]
impl SyncBackend for HttpSyncBackend {
    async fn replay(&self, item: &SyncQueueItem) -> AppResult<()> {
        let url = format!("{}/api/edge/sync", self.backend_url);

        let response = self
            .client
            .post(&url)
            .json(item)
            .send()
            .await
            .map_err(|e| AppError::unavailable(format!("Sync request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::unavailable(format!(
                "Sync failed with status {status}: {body}"
            )));
        }
        Ok(())
    }
}

/// Stand-in backend used when no `BACKEND_URL` is configured: replays
/// always succeed after a fixed delay, so the queue drains locally in
/// demos and development.
pub struct SimulatedBackend {
    delay: Duration,
}

impl SimulatedBackend {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(Duration::from_millis(150))
    }
}

#[async_trait]
impl SyncBackend for SimulatedBackend {
    async fn replay(&self, item: &SyncQueueItem) -> AppResult<()> {
        tokio::time::sleep(self.delay).await;
        tracing::debug!(
            entity = %item.entity,
            operation = ?item.operation,
            "Simulated replay ok"
        );
        Ok(())
    }
}
