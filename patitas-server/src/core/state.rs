//! Shared server state
//!
//! One `ServerState` is built at startup, seeded with mock data, and
//! cloned into every handler via the axum router. Everything inside is
//! an `Arc` under the hood, so clones are cheap and see the same data.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use shared::models::{
    Appointment, BusinessSettings, Cage, Campaign, Client, Coupon, Invoice, PensionStay, Sale,
    ShareableContent, SyncOperation,
};
use tokio_util::sync::CancellationToken;

use crate::pension::PensionService;
use crate::printing::PrintService;
use crate::store::{MemStore, seed};
use crate::sync::{HttpSyncBackend, SimulatedBackend, SyncBackend, SyncService, SyncWorker};
use crate::utils::AppResult;

use super::Config;

/// The in-memory collections behind every page.
#[derive(Clone, Default)]
pub struct Stores {
    pub appointments: MemStore<Appointment>,
    pub clients: MemStore<Client>,
    pub coupons: MemStore<Coupon>,
    pub campaigns: MemStore<Campaign>,
    pub invoices: MemStore<Invoice>,
    pub sales: MemStore<Sale>,
    pub shares: MemStore<ShareableContent>,
}

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub stores: Stores,
    pub settings: Arc<RwLock<BusinessSettings>>,
    pub pension: PensionService,
    pub sync: SyncService,
    pub print: PrintService,
    shutdown: CancellationToken,
}

impl ServerState {
    /// Build the state: work dir layout, seeded stores, rehydrated sync
    /// queue. No background tasks run yet.
    pub fn initialize(config: Config) -> AppResult<Self> {
        config.ensure_work_dir_structure().map_err(|e| {
            crate::utils::AppError::internal(format!(
                "Failed to create work directory {}: {e}",
                config.work_dir
            ))
        })?;

        let stores = Stores::default();
        stores.appointments.seed(seed::appointments());
        stores.clients.seed(seed::clients());
        stores.coupons.seed(seed::coupons());
        stores.campaigns.seed(seed::campaigns());
        stores.invoices.seed(seed::invoices());
        stores.sales.seed(seed::sales());
        stores.shares.seed(seed::shareable_content());

        let cages: MemStore<Cage> = MemStore::new();
        cages.seed(seed::cages());
        let stays: MemStore<PensionStay> = MemStore::new();
        let pension = PensionService::new(cages, stays, config.timezone);

        let sync = SyncService::new(config.sync_queue_path());
        let print = PrintService::new(config.printer_addr.clone(), config.timezone);

        tracing::info!(
            clients = stores.clients.len(),
            cages = pension.list_cages().len(),
            pending_sync = sync.status().pending,
            "Server state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            stores,
            settings: Arc::new(RwLock::new(seed::settings())),
            pension,
            sync,
            print,
            shutdown: CancellationToken::new(),
        })
    }

    /// Spawn the sync worker against the configured backend.
    pub fn start_background_tasks(&self) {
        let backend: Arc<dyn SyncBackend> = match &self.config.backend_url {
            Some(url) => match HttpSyncBackend::new(url.clone()) {
                Ok(backend) => {
                    tracing::info!("Sync backend: {url}");
                    Arc::new(backend)
                }
                Err(e) => {
                    tracing::error!("Failed to build HTTP sync backend, falling back: {e}");
                    Arc::new(SimulatedBackend::default())
                }
            },
            None => {
                tracing::info!("No BACKEND_URL set, sync replays are simulated");
                Arc::new(SimulatedBackend::default())
            }
        };

        let worker = SyncWorker::new(self.sync.clone(), backend, self.shutdown.clone());
        tokio::spawn(worker.run());
    }

    /// Record a local mutation for cloud replay. Every mutating handler
    /// calls this after the store change succeeds.
    pub fn record_change<T: Serialize>(&self, operation: SyncOperation, entity: &str, data: &T) {
        match serde_json::to_value(data) {
            Ok(value) => self.sync.enqueue(operation, entity, value),
            Err(e) => tracing::error!(entity, "Failed to serialize change for sync: {e}"),
        }
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Cancel background tasks (graceful shutdown).
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> (ServerState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);
        let state = ServerState::initialize(config).unwrap();
        (state, dir)
    }

    #[test]
    fn initialize_seeds_collections() {
        let (state, _dir) = state();
        assert_eq!(state.stores.clients.len(), 2);
        assert_eq!(state.pension.list_cages().len(), 9);
        assert_eq!(state.settings.read().business_name, "Patitas Pet Spa");
    }

    #[test]
    fn record_change_lands_in_queue() {
        let (state, _dir) = state();
        state.sync.set_online(false);
        let coupon = state.stores.coupons.get(401).unwrap();
        state.record_change(SyncOperation::Update, "coupon", &coupon);
        assert_eq!(state.sync.status().pending, 1);
    }
}
