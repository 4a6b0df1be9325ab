//! Coupon Model

use serde::{Deserialize, Serialize};

/// Discount kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Percentage off the subtotal
    Percent,
    /// Fixed amount off
    Fixed,
}

/// Coupon status — active <-> paused is a plain toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponStatus {
    Active,
    Paused,
    Expired,
}

/// Coupon entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coupon {
    pub id: i64,
    /// Redemption code, e.g. "BIENVENIDO20"
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    /// Percent (0-100) or absolute amount, per `discount_type`
    pub value: f64,
    pub status: CouponStatus,
    pub times_used: i64,
    pub max_uses: Option<i64>,
    /// `YYYY-MM-DD`
    pub valid_until: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Coupon {
    /// Absolute discount this coupon grants on a subtotal.
    pub fn discount_on(&self, subtotal: f64) -> f64 {
        match self.discount_type {
            DiscountType::Percent => subtotal * self.value / 100.0,
            DiscountType::Fixed => self.value.min(subtotal),
        }
    }
}

/// Create coupon payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponCreate {
    pub code: String,
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub value: f64,
    pub max_uses: Option<i64>,
    pub valid_until: Option<String>,
}

/// Update coupon payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CouponUpdate {
    pub description: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub value: Option<f64>,
    pub status: Option<CouponStatus>,
    pub max_uses: Option<i64>,
    pub valid_until: Option<String>,
}
