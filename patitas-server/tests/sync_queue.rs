//! Offline queue behavior across restarts, over a full server state.

use std::time::Duration;

use patitas_server::sync::SimulatedBackend;
use patitas_server::{Config, ServerState};
use shared::models::SyncOperation;

fn state_in(dir: &std::path::Path) -> ServerState {
    let config = Config::with_overrides(dir.to_string_lossy().to_string(), 0);
    ServerState::initialize(config).unwrap()
}

#[tokio::test]
async fn offline_mutations_survive_restart_and_replay() {
    let dir = tempfile::tempdir().unwrap();

    {
        let state = state_in(dir.path());
        state.sync.set_online(false);

        let coupon = state.stores.coupons.get(401).unwrap();
        state.record_change(SyncOperation::Update, "coupon", &coupon);
        let client = state.stores.clients.get(1).unwrap();
        state.record_change(SyncOperation::Update, "client", &client);

        assert_eq!(state.sync.status().pending, 2);
        assert!(!state.sync.status().online);
    }

    // Simulated restart: same work dir, fresh state
    let state = state_in(dir.path());
    let status = state.sync.status();
    assert_eq!(status.pending, 2);
    // Connectivity flag is not persisted; a fresh process starts online
    assert!(status.online);

    let pending = state.sync.pending();
    assert_eq!(pending[0].entity, "coupon");
    assert_eq!(pending[1].entity, "client");

    let backend = SimulatedBackend::new(Duration::from_millis(1));
    state.sync.process(&backend).await;
    assert_eq!(state.sync.status().pending, 0);
    assert!(state.sync.status().last_error.is_none());
}

#[tokio::test]
async fn manual_sync_respects_offline_flag() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(dir.path());
    state.sync.set_online(false);

    let cage = state.pension.list_cages()[0].clone();
    state.record_change(SyncOperation::Update, "cage", &cage);

    // Offline passes are no-ops, whoever triggers them
    let backend = SimulatedBackend::new(Duration::from_millis(1));
    state.sync.process(&backend).await;
    assert_eq!(state.sync.status().pending, 1);

    state.sync.set_online(true);
    state.sync.process(&backend).await;
    assert_eq!(state.sync.status().pending, 0);
}
