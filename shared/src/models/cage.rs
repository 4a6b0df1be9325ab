//! Cage Model

use serde::{Deserialize, Serialize};

/// Physical boarding unit size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CageSize {
    Small,
    Medium,
    Large,
}

/// Cage occupancy status
///
/// `Occupied` mirrors whether an active stay references the cage.
/// `Maintenance` is operator-set and overrides availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CageStatus {
    Available,
    Occupied,
    Maintenance,
}

impl Default for CageStatus {
    fn default() -> Self {
        Self::Available
    }
}

/// Cage entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cage {
    pub id: i64,
    /// Display number, e.g. "J-04"
    pub number: String,
    pub size: CageSize,
    pub status: CageStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create cage payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CageCreate {
    pub number: String,
    pub size: CageSize,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// Update cage payload
///
/// `status` here only toggles available <-> maintenance; occupancy is
/// derived from stays and never set directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CageUpdate {
    pub number: Option<String>,
    pub size: Option<CageSize>,
    pub status: Option<CageStatus>,
    pub location: Option<String>,
    pub notes: Option<String>,
}
