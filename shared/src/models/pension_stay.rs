//! Pension Stay Model
//!
//! A boarding reservation linking a client's pet to a cage for a date
//! range. Weak references (`cage_id`, `client_id`, `pet_id`) are plain
//! ids with no referential-integrity enforcement; readers join and must
//! tolerate dangling ids.

use serde::{Deserialize, Serialize};

/// Stay lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StayStatus {
    Active,
    Completed,
    Cancelled,
}

/// An extra service scheduled during the stay (bath, nail trim, ...)
/// charged at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingService {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

/// Pension stay entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PensionStay {
    pub id: i64,
    pub cage_id: Option<i64>,
    pub client_id: i64,
    pub pet_id: i64,
    /// Check-in date, `YYYY-MM-DD`
    pub check_in_date: String,
    /// Check-in time, `HH:MM`
    pub check_in_time: Option<String>,
    /// Planned checkout date, `YYYY-MM-DD`
    pub expected_check_out_date: String,
    /// Actual checkout date, set when the stay completes
    pub actual_check_out_date: Option<String>,
    pub status: StayStatus,
    /// Daily boarding rate agreed at check-in
    pub base_rate: f64,
    /// Accumulated extra charges (overdue penalty, stored at checkout)
    pub extra_charges: f64,
    /// Final amount, computed at checkout only
    pub total_charged: f64,
    pub is_paid: bool,
    pub pending_services: Vec<PendingService>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create stay payload (check-in)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PensionStayCreate {
    pub cage_id: Option<i64>,
    pub client_id: i64,
    pub pet_id: i64,
    pub check_in_date: String,
    pub check_in_time: Option<String>,
    pub expected_check_out_date: String,
    pub base_rate: f64,
    #[serde(default)]
    pub pending_services: Vec<PendingService>,
    pub notes: Option<String>,
}

/// Update stay payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PensionStayUpdate {
    /// `Some(None)` is not expressible here; moving a stay off its cage
    /// goes through checkout or delete, so updates only reassign.
    pub cage_id: Option<i64>,
    pub check_in_date: Option<String>,
    pub check_in_time: Option<String>,
    pub expected_check_out_date: Option<String>,
    pub base_rate: Option<f64>,
    pub pending_services: Option<Vec<PendingService>>,
    pub notes: Option<String>,
}

/// Checkout payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StayCheckout {
    /// Actual checkout date, `YYYY-MM-DD`; defaults to today
    pub actual_check_out_date: Option<String>,
    #[serde(default)]
    pub is_paid: bool,
    pub notes: Option<String>,
}
