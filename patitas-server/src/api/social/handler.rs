//! Social sharing API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{
    ShareStatus, ShareableContent, ShareableContentCreate, ShareableContentUpdate, SyncOperation,
};
use shared::util::{now_millis, snowflake_id};

use crate::api::{ListQuery, status_matches};
use crate::core::ServerState;
use crate::store::matches_search;
use crate::utils::validation::{MAX_BODY_LEN, MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "share_content";

/// GET /api/social - list, with ?search= over title/body
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<ShareableContent>>> {
    let search = query.search.clone().unwrap_or_default();
    let items = state.stores.shares.filter(|s| {
        status_matches(&s.status, &query.status) && matches_search(&search, &[&s.title, &s.body])
    });
    Ok(Json(items))
}

/// GET /api/social/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ShareableContent>> {
    let content = state
        .stores
        .shares
        .get(id)
        .ok_or_else(|| AppError::not_found(format!("Content {} not found", id)))?;
    Ok(Json(content))
}

/// POST /api/social
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ShareableContentCreate>,
) -> AppResult<Json<ShareableContent>> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&payload.body, "body", MAX_BODY_LEN)?;

    let now = now_millis();
    let content = state.stores.shares.insert(ShareableContent {
        id: snowflake_id(),
        title: payload.title,
        body: payload.body,
        platform: payload.platform,
        status: ShareStatus::Draft,
        image_url: payload.image_url,
        shared_at: None,
        created_at: now,
        updated_at: now,
    });

    state.record_change(SyncOperation::Create, RESOURCE, &content);
    Ok(Json(content))
}

/// PUT /api/social/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ShareableContentUpdate>,
) -> AppResult<Json<ShareableContent>> {
    if let Some(title) = &payload.title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }
    if let Some(body) = &payload.body {
        validate_required_text(body, "body", MAX_BODY_LEN)?;
    }

    let content = state
        .stores
        .shares
        .update(id, |s| {
            if let Some(title) = payload.title {
                s.title = title;
            }
            if let Some(body) = payload.body {
                s.body = body;
            }
            if let Some(platform) = payload.platform {
                s.platform = platform;
            }
            if payload.image_url.is_some() {
                s.image_url = payload.image_url;
            }
            s.updated_at = now_millis();
        })
        .ok_or_else(|| AppError::not_found(format!("Content {} not found", id)))?;

    state.record_change(SyncOperation::Update, RESOURCE, &content);
    Ok(Json(content))
}

/// POST /api/social/:id/share - mark as shared
///
/// No platform API is called; the dashboard opens the platform's share
/// dialog client-side and this endpoint records the fact.
pub async fn share(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ShareableContent>> {
    let existing = state
        .stores
        .shares
        .get(id)
        .ok_or_else(|| AppError::not_found(format!("Content {} not found", id)))?;
    if existing.status == ShareStatus::Shared {
        return Err(AppError::business_rule(format!(
            "Content {} was already shared",
            id
        )));
    }

    let content = state
        .stores
        .shares
        .update(id, |s| {
            s.status = ShareStatus::Shared;
            s.shared_at = Some(now_millis());
            s.updated_at = now_millis();
        })
        .ok_or_else(|| AppError::not_found(format!("Content {} not found", id)))?;

    state.record_change(SyncOperation::Update, RESOURCE, &content);
    Ok(Json(content))
}

/// DELETE /api/social/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ShareableContent>> {
    let content = state
        .stores
        .shares
        .remove(id)
        .ok_or_else(|| AppError::not_found(format!("Content {} not found", id)))?;

    state.record_change(SyncOperation::Delete, RESOURCE, &content);
    Ok(Json(content))
}
