//! Billing API handlers
//!
//! Invoice totals (subtotal, IVA, total) are always recomputed here;
//! client-provided figures are ignored.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{Invoice, InvoiceCreate, InvoiceItem, InvoiceStatus, InvoiceUpdate, SyncOperation};
use shared::util::{now_millis, snowflake_id};

use crate::api::{ListQuery, status_matches};
use crate::core::ServerState;
use crate::store::matches_search;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_amount, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult, time};

const RESOURCE: &str = "invoice";

fn validate_items(items: &[InvoiceItem]) -> AppResult<()> {
    if items.is_empty() {
        return Err(AppError::validation("Invoice needs at least one line item"));
    }
    for item in items {
        validate_required_text(&item.description, "item description", MAX_NAME_LEN)?;
        validate_amount(item.unit_price, "unit_price")?;
        if item.quantity <= 0.0 {
            return Err(AppError::validation("Item quantity must be positive"));
        }
    }
    Ok(())
}

fn compute_totals(items: &[InvoiceItem], tax_rate: f64) -> (f64, f64, f64) {
    let subtotal: f64 = items.iter().map(|i| i.amount()).sum();
    let tax = subtotal * tax_rate / 100.0;
    (subtotal, tax, subtotal + tax)
}

/// Next "FAC-YYYY-NNNN" number, scanning existing invoices of the year.
fn next_invoice_number(state: &ServerState, year: i32) -> String {
    let prefix = format!("FAC-{year}-");
    let max_seq = state
        .stores
        .invoices
        .list()
        .iter()
        .filter_map(|i| i.number.strip_prefix(&prefix)?.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}{:04}", max_seq + 1)
}

/// GET /api/invoices - list, with ?search= and ?status=
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Invoice>>> {
    let search = query.search.clone().unwrap_or_default();
    let items = state.stores.invoices.filter(|i| {
        status_matches(&i.status, &query.status)
            && matches_search(&search, &[&i.number, i.notes.as_deref().unwrap_or("")])
    });
    Ok(Json(items))
}

/// Invoiced amounts grouped by status.
#[derive(Debug, Default, serde::Serialize)]
pub struct BillingSummary {
    pub count: usize,
    pub draft: f64,
    pub sent: f64,
    pub paid: f64,
    pub overdue: f64,
    pub cancelled: f64,
}

/// GET /api/invoices/summary - totals by status
pub async fn summary(State(state): State<ServerState>) -> AppResult<Json<BillingSummary>> {
    let mut summary = BillingSummary::default();
    for invoice in state.stores.invoices.list() {
        summary.count += 1;
        let slot = match invoice.status {
            InvoiceStatus::Draft => &mut summary.draft,
            InvoiceStatus::Sent => &mut summary.sent,
            InvoiceStatus::Paid => &mut summary.paid,
            InvoiceStatus::Overdue => &mut summary.overdue,
            InvoiceStatus::Cancelled => &mut summary.cancelled,
        };
        *slot += invoice.total;
    }
    Ok(Json(summary))
}

/// GET /api/invoices/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Invoice>> {
    let invoice = state
        .stores
        .invoices
        .get(id)
        .ok_or_else(|| AppError::not_found(format!("Invoice {} not found", id)))?;
    Ok(Json(invoice))
}

/// POST /api/invoices
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InvoiceCreate>,
) -> AppResult<Json<Invoice>> {
    validate_items(&payload.items)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    let issue_date = time::parse_date(&payload.issue_date)?;
    if let Some(due) = &payload.due_date {
        time::parse_date(due)?;
    }
    if state.stores.clients.get(payload.client_id).is_none() {
        return Err(AppError::not_found(format!(
            "Client {} not found",
            payload.client_id
        )));
    }

    let (subtotal, tax, total) = compute_totals(&payload.items, payload.tax_rate);
    let now = now_millis();
    let invoice = state.stores.invoices.insert(Invoice {
        id: snowflake_id(),
        number: next_invoice_number(&state, chrono::Datelike::year(&issue_date)),
        client_id: payload.client_id,
        items: payload.items,
        subtotal,
        tax_rate: payload.tax_rate,
        tax,
        total,
        status: InvoiceStatus::Draft,
        issue_date: payload.issue_date,
        due_date: payload.due_date,
        notes: payload.notes,
        created_at: now,
        updated_at: now,
    });

    state.record_change(SyncOperation::Create, RESOURCE, &invoice);
    Ok(Json(invoice))
}

/// PUT /api/invoices/:id - edits retotal the invoice
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<InvoiceUpdate>,
) -> AppResult<Json<Invoice>> {
    if let Some(items) = &payload.items {
        validate_items(items)?;
    }
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    if let Some(due) = &payload.due_date {
        time::parse_date(due)?;
    }

    let invoice = state
        .stores
        .invoices
        .update(id, |i| {
            if let Some(items) = payload.items {
                i.items = items;
            }
            if let Some(rate) = payload.tax_rate {
                i.tax_rate = rate;
            }
            if let Some(status) = payload.status {
                i.status = status;
            }
            if payload.due_date.is_some() {
                i.due_date = payload.due_date;
            }
            if payload.notes.is_some() {
                i.notes = payload.notes;
            }
            let (subtotal, tax, total) = compute_totals(&i.items, i.tax_rate);
            i.subtotal = subtotal;
            i.tax = tax;
            i.total = total;
            i.updated_at = now_millis();
        })
        .ok_or_else(|| AppError::not_found(format!("Invoice {} not found", id)))?;

    state.record_change(SyncOperation::Update, RESOURCE, &invoice);
    Ok(Json(invoice))
}

/// DELETE /api/invoices/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Invoice>> {
    let invoice = state
        .stores
        .invoices
        .remove(id)
        .ok_or_else(|| AppError::not_found(format!("Invoice {} not found", id)))?;

    state.record_change(SyncOperation::Delete, RESOURCE, &invoice);
    Ok(Json(invoice))
}
