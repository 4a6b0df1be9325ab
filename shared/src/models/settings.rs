//! Business Settings Model

use serde::{Deserialize, Serialize};

/// Single-record business configuration edited from the settings page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessSettings {
    pub business_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Tax id printed on receipts (NIF)
    pub tax_id: Option<String>,
    /// Opening hours free text, e.g. "L-V 9:00-19:00, S 10:00-14:00"
    pub schedule: Option<String>,
    /// Footer line printed at the bottom of every receipt
    pub receipt_footer: Option<String>,
    /// Default daily boarding rate suggested on new stays
    pub default_pension_rate: f64,
    /// IVA percentage applied to invoices by default
    pub default_tax_rate: f64,
    pub updated_at: i64,
}

/// Update settings payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessSettingsUpdate {
    pub business_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
    pub schedule: Option<String>,
    pub receipt_footer: Option<String>,
    pub default_pension_rate: Option<f64>,
    pub default_tax_rate: Option<f64>,
}
