//! Cash Register Sale Model

use serde::{Deserialize, Serialize};

/// Payment method accepted at the register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
}

/// A line on the register ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    pub name: String,
    pub quantity: i32,
    pub unit_price: f64,
}

impl SaleItem {
    pub fn amount(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Completed register sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    /// Sequential ticket number for the receipt
    pub ticket_number: i64,
    pub client_id: Option<i64>,
    pub items: Vec<SaleItem>,
    pub subtotal: f64,
    /// Discount applied from a coupon, as an absolute amount
    pub discount: f64,
    pub coupon_code: Option<String>,
    pub total: f64,
    pub payment_method: PaymentMethod,
    pub created_at: i64,
}

/// Create sale payload — totals are computed server-side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleCreate {
    pub client_id: Option<i64>,
    pub items: Vec<SaleItem>,
    pub coupon_code: Option<String>,
    pub payment_method: PaymentMethod,
}
