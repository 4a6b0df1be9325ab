//! Cash register API handlers
//!
//! Sales are immutable once rung up; corrections happen as new sales.
//! Totals and coupon discounts are computed here, never trusted from
//! the client.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use shared::models::{Coupon, CouponStatus, PaymentMethod, Sale, SaleCreate, SyncOperation};
use shared::util::{now_millis, snowflake_id};

use crate::api::ListQuery;
use crate::core::ServerState;
use crate::printing::PrintOutcome;
use crate::store::matches_search;
use crate::utils::validation::{MAX_NAME_LEN, validate_amount, validate_required_text};
use crate::utils::{AppError, AppResult, time};

const RESOURCE: &str = "sale";

/// GET /api/sales - list, newest first, with ?search= over item names
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Sale>>> {
    let search = query.search.clone().unwrap_or_default();
    let mut sales = state.stores.sales.filter(|s| {
        let names = s.items.iter().map(|i| i.name.as_str()).collect::<Vec<_>>();
        let mut haystacks = vec![s.coupon_code.as_deref().unwrap_or("")];
        haystacks.extend(names);
        matches_search(&search, &haystacks)
    });
    sales.sort_by_key(|s| std::cmp::Reverse(s.created_at));
    Ok(Json(sales))
}

/// GET /api/sales/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Sale>> {
    let sale = state
        .stores
        .sales
        .get(id)
        .ok_or_else(|| AppError::not_found(format!("Sale {} not found", id)))?;
    Ok(Json(sale))
}

/// Resolve a coupon code to an applicable coupon or a business error.
fn resolve_coupon(state: &ServerState, code: &str, today: chrono::NaiveDate) -> AppResult<Coupon> {
    let coupon = state
        .stores
        .coupons
        .filter(|c| c.code.eq_ignore_ascii_case(code))
        .into_iter()
        .next()
        .ok_or_else(|| AppError::not_found(format!("Coupon '{}' not found", code)))?;

    if coupon.status != CouponStatus::Active {
        return Err(AppError::business_rule(format!(
            "Coupon '{}' is not active",
            coupon.code
        )));
    }
    if let Some(until) = &coupon.valid_until
        && time::parse_date(until)? < today
    {
        return Err(AppError::business_rule(format!(
            "Coupon '{}' expired on {}",
            coupon.code, until
        )));
    }
    if let Some(max) = coupon.max_uses
        && coupon.times_used >= max
    {
        return Err(AppError::business_rule(format!(
            "Coupon '{}' has no uses left",
            coupon.code
        )));
    }
    Ok(coupon)
}

/// POST /api/sales - ring up a sale
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SaleCreate>,
) -> AppResult<Json<Sale>> {
    if payload.items.is_empty() {
        return Err(AppError::validation("Sale needs at least one item"));
    }
    for item in &payload.items {
        validate_required_text(&item.name, "item name", MAX_NAME_LEN)?;
        validate_amount(item.unit_price, "unit_price")?;
        if item.quantity <= 0 {
            return Err(AppError::validation("Item quantity must be positive"));
        }
    }
    if let Some(client_id) = payload.client_id
        && state.stores.clients.get(client_id).is_none()
    {
        return Err(AppError::not_found(format!("Client {} not found", client_id)));
    }

    let subtotal: f64 = payload.items.iter().map(|i| i.amount()).sum();
    let today = time::today_in(state.config.timezone);

    let (discount, coupon_code) = match &payload.coupon_code {
        Some(code) if !code.trim().is_empty() => {
            let coupon = resolve_coupon(&state, code.trim(), today)?;
            let discount = coupon.discount_on(subtotal);
            let updated = state.stores.coupons.update(coupon.id, |c| {
                c.times_used += 1;
                if let Some(max) = c.max_uses
                    && c.times_used >= max
                {
                    c.status = CouponStatus::Expired;
                }
                c.updated_at = now_millis();
            });
            if let Some(updated) = updated {
                state.record_change(SyncOperation::Update, "coupon", &updated);
            }
            (discount, Some(coupon.code))
        }
        _ => (0.0, None),
    };

    let ticket_number = state
        .stores
        .sales
        .list()
        .iter()
        .map(|s| s.ticket_number)
        .max()
        .unwrap_or(0)
        + 1;

    let sale = state.stores.sales.insert(Sale {
        id: snowflake_id(),
        ticket_number,
        client_id: payload.client_id,
        items: payload.items,
        subtotal,
        discount,
        coupon_code,
        total: (subtotal - discount).max(0.0),
        payment_method: payload.payment_method,
        created_at: now_millis(),
    });

    state.record_change(SyncOperation::Create, RESOURCE, &sale);
    Ok(Json(sale))
}

/// Register totals for one day.
#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub date: String,
    pub sales_count: usize,
    pub total: f64,
    pub cash: f64,
    pub card: f64,
    pub transfer: f64,
}

/// GET /api/sales/day-summary - today's totals by payment method
pub async fn day_summary(State(state): State<ServerState>) -> AppResult<Json<DaySummary>> {
    let tz = state.config.timezone;
    let today = time::today_in(tz);

    let mut summary = DaySummary {
        date: today.format("%Y-%m-%d").to_string(),
        sales_count: 0,
        total: 0.0,
        cash: 0.0,
        card: 0.0,
        transfer: 0.0,
    };

    for sale in state.stores.sales.list() {
        let Some(dt) = chrono::DateTime::from_timestamp_millis(sale.created_at) else {
            continue;
        };
        if dt.with_timezone(&tz).date_naive() != today {
            continue;
        }
        summary.sales_count += 1;
        summary.total += sale.total;
        match sale.payment_method {
            PaymentMethod::Cash => summary.cash += sale.total,
            PaymentMethod::Card => summary.card += sale.total,
            PaymentMethod::Transfer => summary.transfer += sale.total,
        }
    }
    Ok(Json(summary))
}

/// POST /api/sales/:id/receipt - render and print the ticket
pub async fn print_receipt(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PrintOutcome>> {
    let sale = state
        .stores
        .sales
        .get(id)
        .ok_or_else(|| AppError::not_found(format!("Sale {} not found", id)))?;
    let settings = state.settings.read().clone();

    let outcome = state.print.print_receipt(&sale, &settings).await?;
    Ok(Json(outcome))
}
