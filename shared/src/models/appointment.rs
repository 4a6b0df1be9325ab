//! Appointment Model

use serde::{Deserialize, Serialize};

/// Appointment status — transitions are plain toggles from the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// Grooming appointment entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub client_id: i64,
    pub pet_id: i64,
    /// Service name, e.g. "Baño y corte"
    pub service: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub status: AppointmentStatus,
    pub price: f64,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create appointment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentCreate {
    pub client_id: i64,
    pub pet_id: i64,
    pub service: String,
    pub date: String,
    pub time: String,
    pub price: f64,
    pub notes: Option<String>,
}

/// Update appointment payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentUpdate {
    pub service: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub price: Option<f64>,
    pub notes: Option<String>,
}
