//! API routes
//!
//! One module per dashboard page, each with a `router()` nesting its
//! resource under `/api/...` and a `handler` module with the endpoint
//! functions.

pub mod appointments;
pub mod billing;
pub mod cash_register;
pub mod clients;
pub mod coupons;
pub mod health;
pub mod marketing;
pub mod pension;
pub mod reports;
pub mod settings;
pub mod social;
pub mod sync;

use axum::Router;
use serde::{Deserialize, Serialize};

use crate::core::ServerState;

/// Query string accepted by every list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring over the entity's text fields
    pub search: Option<String>,
    /// Exact status, in its wire spelling (e.g. "active")
    pub status: Option<String>,
}

/// Compare a status enum against the query's wire spelling.
pub(crate) fn status_matches<T: Serialize>(status: &T, wanted: &Option<String>) -> bool {
    let Some(wanted) = wanted else { return true };
    match serde_json::to_value(status) {
        Ok(serde_json::Value::String(s)) => s.eq_ignore_ascii_case(wanted),
        _ => false,
    }
}

/// Assemble the full API router.
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(appointments::router())
        .merge(clients::router())
        .merge(pension::router())
        .merge(billing::router())
        .merge(cash_register::router())
        .merge(coupons::router())
        .merge(marketing::router())
        .merge(reports::router())
        .merge(settings::router())
        .merge(social::router())
        .merge(sync::router())
        .with_state(state)
}
