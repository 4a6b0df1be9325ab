//! Invoice Model

use serde::{Deserialize, Serialize};

/// Invoice status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

/// Invoice line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl InvoiceItem {
    pub fn amount(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Invoice entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    /// Human-facing number, e.g. "FAC-2026-0012"
    pub number: String,
    pub client_id: i64,
    pub items: Vec<InvoiceItem>,
    pub subtotal: f64,
    /// IVA percentage applied, e.g. 21.0
    pub tax_rate: f64,
    pub tax: f64,
    pub total: f64,
    pub status: InvoiceStatus,
    /// `YYYY-MM-DD`
    pub issue_date: String,
    pub due_date: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create invoice payload — totals are computed server-side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceCreate {
    pub client_id: i64,
    pub items: Vec<InvoiceItem>,
    pub tax_rate: f64,
    pub issue_date: String,
    pub due_date: Option<String>,
    pub notes: Option<String>,
}

/// Update invoice payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceUpdate {
    pub items: Option<Vec<InvoiceItem>>,
    pub tax_rate: Option<f64>,
    pub status: Option<InvoiceStatus>,
    pub due_date: Option<String>,
    pub notes: Option<String>,
}
