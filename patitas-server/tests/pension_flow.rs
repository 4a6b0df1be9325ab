//! End-to-end boarding flow over a fully initialized server state.

use patitas_server::{Config, ServerState};
use shared::models::{CageStatus, StayCheckout, StayStatus, PensionStayCreate};

fn state() -> (ServerState, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(config).unwrap();
    (state, dir)
}

fn check_in(cage_id: i64) -> PensionStayCreate {
    PensionStayCreate {
        cage_id: Some(cage_id),
        client_id: 1,
        pet_id: 11,
        check_in_date: "2026-08-01".to_string(),
        check_in_time: Some("09:30".to_string()),
        expected_check_out_date: "2026-08-05".to_string(),
        base_rate: 25.0,
        pending_services: vec![],
        notes: None,
    }
}

#[test]
fn full_boarding_cycle() {
    let (state, _dir) = state();

    // Seeded room: 9 cages, the last one under maintenance
    let cages = state.pension.list_cages();
    assert_eq!(cages.len(), 9);
    let cage_id = cages
        .iter()
        .find(|c| c.status == CageStatus::Available)
        .unwrap()
        .id;

    let stay = state.pension.create_stay(check_in(cage_id)).unwrap();
    assert_eq!(stay.status, StayStatus::Active);
    assert_eq!(
        state.pension.get_cage(cage_id).unwrap().status,
        CageStatus::Occupied
    );

    // The cage is taken and cannot be double-booked or removed
    assert!(state.pension.create_stay(check_in(cage_id)).is_err());
    assert!(state.pension.delete_cage(cage_id).is_err());

    // An expected checkout in the past makes the stay overdue
    let overdue = state.pension.overdue_stays();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].id, stay.id);

    let summary = state.pension.summary();
    assert_eq!(summary.occupied, 1);
    assert_eq!(summary.active_stays, 1);
    assert_eq!(summary.overdue_stays, 1);

    // Checkout on the expected date: 4 days × 25, no penalty
    let done = state
        .pension
        .check_out(
            stay.id,
            StayCheckout {
                actual_check_out_date: Some("2026-08-05".to_string()),
                is_paid: true,
                notes: None,
            },
        )
        .unwrap();
    assert_eq!(done.status, StayStatus::Completed);
    assert!((done.total_charged - 100.0).abs() < 1e-9);
    assert!((done.extra_charges - 0.0).abs() < 1e-9);
    assert_eq!(
        state.pension.get_cage(cage_id).unwrap().status,
        CageStatus::Available
    );

    // Completed stays cannot be checked out twice
    assert!(
        state
            .pension
            .check_out(
                stay.id,
                StayCheckout {
                    actual_check_out_date: None,
                    is_paid: true,
                    notes: None,
                },
            )
            .is_err()
    );
}

#[test]
fn overdue_checkout_applies_penalty() {
    let (state, _dir) = state();
    let cage_id = state.pension.list_cages()[0].id;

    let stay = state.pension.create_stay(check_in(cage_id)).unwrap();

    // Two days past the expected checkout on a 4-day plan:
    // base 6 × 25 + penalty 2 × (25/4) × 1.5
    let done = state
        .pension
        .check_out(
            stay.id,
            StayCheckout {
                actual_check_out_date: Some("2026-08-07".to_string()),
                is_paid: false,
                notes: Some("Recogida con retraso".to_string()),
            },
        )
        .unwrap();

    let penalty = 2.0 * (25.0 / 4.0) * 1.5;
    assert!((done.extra_charges - penalty).abs() < 1e-9);
    assert!((done.total_charged - (150.0 + penalty)).abs() < 1e-9);
    assert!(!done.is_paid);
}
