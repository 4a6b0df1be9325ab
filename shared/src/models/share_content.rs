//! Shareable Content Model (social page)

use serde::{Deserialize, Serialize};

/// Target platform for a share
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePlatform {
    Instagram,
    Facebook,
    Whatsapp,
}

/// Share lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareStatus {
    Draft,
    Shared,
}

/// A post prepared from the dashboard (before/after photos, promos)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareableContent {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub platform: SharePlatform,
    pub status: ShareStatus,
    pub image_url: Option<String>,
    pub shared_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create shareable content payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareableContentCreate {
    pub title: String,
    pub body: String,
    pub platform: SharePlatform,
    pub image_url: Option<String>,
}

/// Update shareable content payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShareableContentUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub platform: Option<SharePlatform>,
    pub image_url: Option<String>,
}
