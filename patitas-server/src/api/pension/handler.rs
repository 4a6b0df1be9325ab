//! Pension API handlers
//!
//! Thin wrappers over [`PensionService`]; the occupancy rules live
//! there, not here.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{
    Cage, CageCreate, CageUpdate, PensionStay, PensionStayCreate, PensionStayUpdate, StayCheckout,
    SyncOperation,
};

use crate::api::{ListQuery, status_matches};
use crate::core::ServerState;
use crate::pension::PensionSummary;
use crate::store::matches_search;
use crate::utils::AppResult;

const CAGE: &str = "cage";
const STAY: &str = "pension_stay";

/// GET /api/pension/summary - occupancy gauges for the page header
pub async fn summary(State(state): State<ServerState>) -> AppResult<Json<PensionSummary>> {
    Ok(Json(state.pension.summary()))
}

// ========== Cages ==========

/// GET /api/pension/cages - list, with ?search= and ?status=
pub async fn list_cages(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Cage>>> {
    let search = query.search.clone().unwrap_or_default();
    let cages = state
        .pension
        .list_cages()
        .into_iter()
        .filter(|c| {
            status_matches(&c.status, &query.status)
                && matches_search(
                    &search,
                    &[&c.number, c.location.as_deref().unwrap_or("")],
                )
        })
        .collect();
    Ok(Json(cages))
}

/// GET /api/pension/cages/:id
pub async fn get_cage(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Cage>> {
    Ok(Json(state.pension.get_cage(id)?))
}

/// POST /api/pension/cages
pub async fn create_cage(
    State(state): State<ServerState>,
    Json(payload): Json<CageCreate>,
) -> AppResult<Json<Cage>> {
    let cage = state.pension.create_cage(payload)?;
    state.record_change(SyncOperation::Create, CAGE, &cage);
    Ok(Json(cage))
}

/// PUT /api/pension/cages/:id
pub async fn update_cage(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CageUpdate>,
) -> AppResult<Json<Cage>> {
    let cage = state.pension.update_cage(id, payload)?;
    state.record_change(SyncOperation::Update, CAGE, &cage);
    Ok(Json(cage))
}

/// DELETE /api/pension/cages/:id - rejected while occupied
pub async fn delete_cage(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Cage>> {
    let cage = state.pension.delete_cage(id)?;
    state.record_change(SyncOperation::Delete, CAGE, &cage);
    Ok(Json(cage))
}

// ========== Stays ==========

/// GET /api/pension/stays - list, with ?search= and ?status=
pub async fn list_stays(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<PensionStay>>> {
    let search = query.search.clone().unwrap_or_default();
    let stays = state
        .pension
        .list_stays()
        .into_iter()
        .filter(|s| {
            status_matches(&s.status, &query.status)
                && matches_search(
                    &search,
                    &[
                        &s.check_in_date,
                        &s.expected_check_out_date,
                        s.notes.as_deref().unwrap_or(""),
                    ],
                )
        })
        .collect();
    Ok(Json(stays))
}

/// GET /api/pension/stays/overdue - active stays past expected checkout
pub async fn overdue_stays(State(state): State<ServerState>) -> AppResult<Json<Vec<PensionStay>>> {
    Ok(Json(state.pension.overdue_stays()))
}

/// GET /api/pension/stays/:id
pub async fn get_stay(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PensionStay>> {
    Ok(Json(state.pension.get_stay(id)?))
}

/// POST /api/pension/stays - check-in
pub async fn create_stay(
    State(state): State<ServerState>,
    Json(payload): Json<PensionStayCreate>,
) -> AppResult<Json<PensionStay>> {
    let stay = state.pension.create_stay(payload)?;
    state.record_change(SyncOperation::Create, STAY, &stay);
    Ok(Json(stay))
}

/// PUT /api/pension/stays/:id
pub async fn update_stay(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PensionStayUpdate>,
) -> AppResult<Json<PensionStay>> {
    let stay = state.pension.update_stay(id, payload)?;
    state.record_change(SyncOperation::Update, STAY, &stay);
    Ok(Json(stay))
}

/// POST /api/pension/stays/:id/checkout - finalize charges, free the cage
pub async fn check_out(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StayCheckout>,
) -> AppResult<Json<PensionStay>> {
    let stay = state.pension.check_out(id, payload)?;

    // A finished boarding counts as a visit
    state.stores.clients.update(stay.client_id, |c| {
        c.visit_count += 1;
        c.last_visit_at = Some(shared::util::now_millis());
    });

    state.record_change(SyncOperation::Update, STAY, &stay);
    Ok(Json(stay))
}

/// DELETE /api/pension/stays/:id
pub async fn delete_stay(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PensionStay>> {
    let stay = state.pension.delete_stay(id)?;
    state.record_change(SyncOperation::Delete, STAY, &stay);
    Ok(Json(stay))
}
