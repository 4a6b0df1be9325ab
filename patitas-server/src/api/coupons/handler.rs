//! Coupons API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{Coupon, CouponCreate, CouponStatus, CouponUpdate, DiscountType, SyncOperation};
use shared::util::{now_millis, snowflake_id};

use crate::api::{ListQuery, status_matches};
use crate::core::ServerState;
use crate::store::matches_search;
use crate::utils::validation::{MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult, time};

const RESOURCE: &str = "coupon";

fn validate_value(discount_type: DiscountType, value: f64) -> AppResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::validation("Discount value must be positive"));
    }
    if discount_type == DiscountType::Percent && value > 100.0 {
        return Err(AppError::validation("Percent discount cannot exceed 100"));
    }
    Ok(())
}

/// GET /api/coupons - list, with ?search= over code/description
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Coupon>>> {
    let search = query.search.clone().unwrap_or_default();
    let items = state.stores.coupons.filter(|c| {
        status_matches(&c.status, &query.status)
            && matches_search(&search, &[&c.code, c.description.as_deref().unwrap_or("")])
    });
    Ok(Json(items))
}

/// GET /api/coupons/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Coupon>> {
    let coupon = state
        .stores
        .coupons
        .get(id)
        .ok_or_else(|| AppError::not_found(format!("Coupon {} not found", id)))?;
    Ok(Json(coupon))
}

/// POST /api/coupons
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CouponCreate>,
) -> AppResult<Json<Coupon>> {
    validate_required_text(&payload.code, "code", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_value(payload.discount_type, payload.value)?;
    if let Some(until) = &payload.valid_until {
        time::parse_date(until)?;
    }

    let code = payload.code.trim().to_uppercase();
    if !state
        .stores
        .coupons
        .filter(|c| c.code.eq_ignore_ascii_case(&code))
        .is_empty()
    {
        return Err(AppError::conflict(format!("Coupon code '{}' already exists", code)));
    }

    let now = now_millis();
    let coupon = state.stores.coupons.insert(Coupon {
        id: snowflake_id(),
        code,
        description: payload.description,
        discount_type: payload.discount_type,
        value: payload.value,
        status: CouponStatus::Active,
        times_used: 0,
        max_uses: payload.max_uses,
        valid_until: payload.valid_until,
        created_at: now,
        updated_at: now,
    });

    state.record_change(SyncOperation::Create, RESOURCE, &coupon);
    Ok(Json(coupon))
}

/// PUT /api/coupons/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CouponUpdate>,
) -> AppResult<Json<Coupon>> {
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if let Some(until) = &payload.valid_until {
        time::parse_date(until)?;
    }
    let existing = state
        .stores
        .coupons
        .get(id)
        .ok_or_else(|| AppError::not_found(format!("Coupon {} not found", id)))?;
    validate_value(
        payload.discount_type.unwrap_or(existing.discount_type),
        payload.value.unwrap_or(existing.value),
    )?;

    let coupon = state
        .stores
        .coupons
        .update(id, |c| {
            if payload.description.is_some() {
                c.description = payload.description;
            }
            if let Some(dt) = payload.discount_type {
                c.discount_type = dt;
            }
            if let Some(value) = payload.value {
                c.value = value;
            }
            if let Some(status) = payload.status {
                c.status = status;
            }
            if payload.max_uses.is_some() {
                c.max_uses = payload.max_uses;
            }
            if payload.valid_until.is_some() {
                c.valid_until = payload.valid_until;
            }
            c.updated_at = now_millis();
        })
        .ok_or_else(|| AppError::not_found(format!("Coupon {} not found", id)))?;

    state.record_change(SyncOperation::Update, RESOURCE, &coupon);
    Ok(Json(coupon))
}

/// POST /api/coupons/:id/toggle - active <-> paused
pub async fn toggle(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Coupon>> {
    let existing = state
        .stores
        .coupons
        .get(id)
        .ok_or_else(|| AppError::not_found(format!("Coupon {} not found", id)))?;
    if existing.status == CouponStatus::Expired {
        return Err(AppError::business_rule(format!(
            "Coupon '{}' is expired and cannot be toggled",
            existing.code
        )));
    }

    let coupon = state
        .stores
        .coupons
        .update(id, |c| {
            c.status = match c.status {
                CouponStatus::Active => CouponStatus::Paused,
                _ => CouponStatus::Active,
            };
            c.updated_at = now_millis();
        })
        .ok_or_else(|| AppError::not_found(format!("Coupon {} not found", id)))?;

    state.record_change(SyncOperation::Update, RESOURCE, &coupon);
    Ok(Json(coupon))
}

/// DELETE /api/coupons/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Coupon>> {
    let coupon = state
        .stores
        .coupons
        .remove(id)
        .ok_or_else(|| AppError::not_found(format!("Coupon {} not found", id)))?;

    state.record_change(SyncOperation::Delete, RESOURCE, &coupon);
    Ok(Json(coupon))
}
