//! Reports API handlers
//!
//! Aggregations are computed on request by folding over the stores;
//! collections are small enough that caching would be premature.

use axum::{Json, extract::State};
use serde::Serialize;
use shared::models::{AppointmentStatus, ClientStatus, InvoiceStatus, StayStatus};

use crate::core::ServerState;
use crate::utils::AppResult;

/// One row of the most-requested-services ranking.
#[derive(Debug, Serialize)]
pub struct TopService {
    pub service: String,
    pub count: usize,
    pub revenue: f64,
}

#[derive(Debug, Serialize)]
pub struct OverviewReport {
    pub clients_total: usize,
    pub clients_active: usize,
    pub pets_total: usize,
    pub appointments_total: usize,
    pub appointments_pending: usize,
    pub appointments_completed: usize,
    pub appointment_revenue: f64,
    pub sales_total: usize,
    pub sales_revenue: f64,
    pub invoices_total: usize,
    pub invoices_unpaid: usize,
    pub invoiced_amount: f64,
    pub stays_active: usize,
    pub stays_overdue: usize,
    pub boarding_revenue: f64,
    pub occupancy_rate: f64,
    /// Up to five services by completed-appointment count
    pub top_services: Vec<TopService>,
}

fn top_services(appointments: &[shared::models::Appointment]) -> Vec<TopService> {
    use std::collections::HashMap;

    let mut by_service: HashMap<&str, (usize, f64)> = HashMap::new();
    for a in appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Completed)
    {
        let entry = by_service.entry(a.service.as_str()).or_default();
        entry.0 += 1;
        entry.1 += a.price;
    }

    let mut ranking: Vec<TopService> = by_service
        .into_iter()
        .map(|(service, (count, revenue))| TopService {
            service: service.to_string(),
            count,
            revenue,
        })
        .collect();
    ranking.sort_by(|a, b| b.count.cmp(&a.count).then(a.service.cmp(&b.service)));
    ranking.truncate(5);
    ranking
}

/// GET /api/reports/overview - headline numbers for the reports page
pub async fn overview(State(state): State<ServerState>) -> AppResult<Json<OverviewReport>> {
    let clients = state.stores.clients.list();
    let appointments = state.stores.appointments.list();
    let sales = state.stores.sales.list();
    let invoices = state.stores.invoices.list();
    let stays = state.pension.list_stays();
    let pension = state.pension.summary();

    let report = OverviewReport {
        clients_total: clients.len(),
        clients_active: clients
            .iter()
            .filter(|c| c.status == ClientStatus::Active)
            .count(),
        pets_total: clients.iter().map(|c| c.pets.len()).sum(),
        appointments_total: appointments.len(),
        appointments_pending: appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Pending)
            .count(),
        appointments_completed: appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Completed)
            .count(),
        appointment_revenue: appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Completed)
            .map(|a| a.price)
            .sum(),
        sales_total: sales.len(),
        sales_revenue: sales.iter().map(|s| s.total).sum(),
        invoices_total: invoices.len(),
        invoices_unpaid: invoices
            .iter()
            .filter(|i| matches!(i.status, InvoiceStatus::Sent | InvoiceStatus::Overdue))
            .count(),
        invoiced_amount: invoices.iter().map(|i| i.total).sum(),
        stays_active: pension.active_stays,
        stays_overdue: pension.overdue_stays,
        boarding_revenue: stays
            .iter()
            .filter(|s| s.status == StayStatus::Completed)
            .map(|s| s.total_charged)
            .sum(),
        occupancy_rate: pension.occupancy_rate,
        top_services: top_services(&appointments),
    };
    Ok(Json(report))
}
