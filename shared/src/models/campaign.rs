//! Marketing Campaign Model

use serde::{Deserialize, Serialize};

/// Delivery channel for a campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignChannel {
    Email,
    Sms,
    Whatsapp,
    Social,
}

/// Campaign status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Running,
    Paused,
    Finished,
}

/// Marketing campaign entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub channel: CampaignChannel,
    pub status: CampaignStatus,
    pub budget: f64,
    /// Messages delivered
    pub sent: i64,
    /// Messages opened
    pub opened: i64,
    /// Coupons or offers redeemed from this campaign
    pub redeemed: i64,
    /// `YYYY-MM-DD`
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create campaign payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignCreate {
    pub name: String,
    pub channel: CampaignChannel,
    pub budget: f64,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub notes: Option<String>,
}

/// Update campaign payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignUpdate {
    pub name: Option<String>,
    pub channel: Option<CampaignChannel>,
    pub status: Option<CampaignStatus>,
    pub budget: Option<f64>,
    pub sent: Option<i64>,
    pub opened: Option<i64>,
    pub redeemed: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub notes: Option<String>,
}
