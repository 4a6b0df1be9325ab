//! Client and Pet Models

use serde::{Deserialize, Serialize};

/// Client activity status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    Active,
    Inactive,
}

/// A pet owned by exactly one client (embedded list)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub breed: Option<String>,
    pub age: Option<i32>,
    /// Weight in kg
    pub weight: Option<f64>,
    pub color: Option<String>,
    pub notes: Option<String>,
}

/// Client entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: ClientStatus,
    pub pets: Vec<Pet>,
    /// Completed visits (groomings + boardings)
    pub visit_count: i64,
    pub last_visit_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create client payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCreate {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub pets: Vec<PetCreate>,
}

/// Update client payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: Option<ClientStatus>,
}

/// Inline pet creation payload (on a client or during stay registration)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetCreate {
    pub name: String,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub weight: Option<f64>,
    pub color: Option<String>,
    pub notes: Option<String>,
}
