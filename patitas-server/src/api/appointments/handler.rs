//! Appointments API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{Appointment, AppointmentCreate, AppointmentStatus, AppointmentUpdate, SyncOperation};
use shared::util::{now_millis, snowflake_id};

use crate::api::{ListQuery, status_matches};
use crate::core::ServerState;
use crate::store::matches_search;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_amount, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult, time};

const RESOURCE: &str = "appointment";

/// GET /api/appointments - list, with ?search= and ?status=
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Appointment>>> {
    let search = query.search.clone().unwrap_or_default();
    let items = state.stores.appointments.filter(|a| {
        status_matches(&a.status, &query.status)
            && matches_search(&search, &[&a.service, &a.date, a.notes.as_deref().unwrap_or("")])
    });
    Ok(Json(items))
}

/// GET /api/appointments/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Appointment>> {
    let appointment = state
        .stores
        .appointments
        .get(id)
        .ok_or_else(|| AppError::not_found(format!("Appointment {} not found", id)))?;
    Ok(Json(appointment))
}

/// POST /api/appointments
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AppointmentCreate>,
) -> AppResult<Json<Appointment>> {
    validate_required_text(&payload.service, "service", MAX_NAME_LEN)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    validate_amount(payload.price, "price")?;
    time::parse_date(&payload.date)?;
    time::parse_time(&payload.time)?;
    if state.stores.clients.get(payload.client_id).is_none() {
        return Err(AppError::not_found(format!(
            "Client {} not found",
            payload.client_id
        )));
    }

    let now = now_millis();
    let appointment = state.stores.appointments.insert(Appointment {
        id: snowflake_id(),
        client_id: payload.client_id,
        pet_id: payload.pet_id,
        service: payload.service,
        date: payload.date,
        time: payload.time,
        status: AppointmentStatus::Pending,
        price: payload.price,
        notes: payload.notes,
        created_at: now,
        updated_at: now,
    });

    state.record_change(SyncOperation::Create, RESOURCE, &appointment);
    Ok(Json(appointment))
}

/// PUT /api/appointments/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AppointmentUpdate>,
) -> AppResult<Json<Appointment>> {
    if let Some(service) = &payload.service {
        validate_required_text(service, "service", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    if let Some(price) = payload.price {
        validate_amount(price, "price")?;
    }
    if let Some(date) = &payload.date {
        time::parse_date(date)?;
    }
    if let Some(t) = &payload.time {
        time::parse_time(t)?;
    }

    let previous_status = state
        .stores
        .appointments
        .get(id)
        .ok_or_else(|| AppError::not_found(format!("Appointment {} not found", id)))?
        .status;

    let appointment = state
        .stores
        .appointments
        .update(id, |a| {
            if let Some(service) = payload.service {
                a.service = service;
            }
            if let Some(date) = payload.date {
                a.date = date;
            }
            if let Some(t) = payload.time {
                a.time = t;
            }
            if let Some(status) = payload.status {
                a.status = status;
            }
            if let Some(price) = payload.price {
                a.price = price;
            }
            if payload.notes.is_some() {
                a.notes = payload.notes;
            }
            a.updated_at = now_millis();
        })
        .ok_or_else(|| AppError::not_found(format!("Appointment {} not found", id)))?;

    // A completed grooming bumps the client's visit counter
    if appointment.status == AppointmentStatus::Completed
        && previous_status != AppointmentStatus::Completed
    {
        state.stores.clients.update(appointment.client_id, |c| {
            c.visit_count += 1;
            c.last_visit_at = Some(now_millis());
        });
    }

    state.record_change(SyncOperation::Update, RESOURCE, &appointment);
    Ok(Json(appointment))
}

/// DELETE /api/appointments/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Appointment>> {
    let appointment = state
        .stores
        .appointments
        .remove(id)
        .ok_or_else(|| AppError::not_found(format!("Appointment {} not found", id)))?;

    state.record_change(SyncOperation::Delete, RESOURCE, &appointment);
    Ok(Json(appointment))
}
