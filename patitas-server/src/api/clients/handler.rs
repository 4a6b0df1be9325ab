//! Clients API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{
    Client, ClientCreate, ClientStatus, ClientUpdate, Pet, PetCreate, SyncOperation,
};
use shared::util::{now_millis, snowflake_id};

use crate::api::{ListQuery, status_matches};
use crate::core::ServerState;
use crate::store::matches_search;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "client";

fn validate_pet(pet: &PetCreate) -> AppResult<()> {
    validate_required_text(&pet.name, "pet name", MAX_NAME_LEN)?;
    validate_optional_text(&pet.breed, "breed", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&pet.notes, "pet notes", MAX_NOTE_LEN)?;
    Ok(())
}

fn build_pet(payload: PetCreate) -> Pet {
    Pet {
        id: snowflake_id(),
        name: payload.name,
        breed: payload.breed,
        age: payload.age,
        weight: payload.weight,
        color: payload.color,
        notes: payload.notes,
    }
}

/// GET /api/clients - list, with ?search= over name/phone/email/pet names
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Client>>> {
    let search = query.search.clone().unwrap_or_default();
    let items = state.stores.clients.filter(|c| {
        if !status_matches(&c.status, &query.status) {
            return false;
        }
        let pet_names = c.pets.iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
        let mut haystacks = vec![
            c.name.as_str(),
            c.phone.as_deref().unwrap_or(""),
            c.email.as_deref().unwrap_or(""),
        ];
        haystacks.extend(pet_names);
        matches_search(&search, &haystacks)
    });
    Ok(Json(items))
}

/// GET /api/clients/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Client>> {
    let client = state
        .stores
        .clients
        .get(id)
        .ok_or_else(|| AppError::not_found(format!("Client {} not found", id)))?;
    Ok(Json(client))
}

/// POST /api/clients - create a client with optional inline pets
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ClientCreate>,
) -> AppResult<Json<Client>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    for pet in &payload.pets {
        validate_pet(pet)?;
    }

    let now = now_millis();
    let client = state.stores.clients.insert(Client {
        id: snowflake_id(),
        name: payload.name,
        phone: payload.phone,
        email: payload.email,
        address: payload.address,
        status: ClientStatus::Active,
        pets: payload.pets.into_iter().map(build_pet).collect(),
        visit_count: 0,
        last_visit_at: None,
        created_at: now,
        updated_at: now,
    });

    state.record_change(SyncOperation::Create, RESOURCE, &client);
    Ok(Json(client))
}

/// PUT /api/clients/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ClientUpdate>,
) -> AppResult<Json<Client>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;

    let client = state
        .stores
        .clients
        .update(id, |c| {
            if let Some(name) = payload.name {
                c.name = name;
            }
            if payload.phone.is_some() {
                c.phone = payload.phone;
            }
            if payload.email.is_some() {
                c.email = payload.email;
            }
            if payload.address.is_some() {
                c.address = payload.address;
            }
            if let Some(status) = payload.status {
                c.status = status;
            }
            c.updated_at = now_millis();
        })
        .ok_or_else(|| AppError::not_found(format!("Client {} not found", id)))?;

    state.record_change(SyncOperation::Update, RESOURCE, &client);
    Ok(Json(client))
}

/// DELETE /api/clients/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Client>> {
    let client = state
        .stores
        .clients
        .remove(id)
        .ok_or_else(|| AppError::not_found(format!("Client {} not found", id)))?;

    state.record_change(SyncOperation::Delete, RESOURCE, &client);
    Ok(Json(client))
}

/// POST /api/clients/:id/pets - add a pet to an existing client
pub async fn add_pet(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PetCreate>,
) -> AppResult<Json<Client>> {
    validate_pet(&payload)?;

    let client = state
        .stores
        .clients
        .update(id, |c| {
            c.pets.push(build_pet(payload));
            c.updated_at = now_millis();
        })
        .ok_or_else(|| AppError::not_found(format!("Client {} not found", id)))?;

    state.record_change(SyncOperation::Update, RESOURCE, &client);
    Ok(Json(client))
}
