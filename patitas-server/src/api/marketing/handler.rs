//! Marketing API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{Campaign, CampaignCreate, CampaignStatus, CampaignUpdate, SyncOperation};
use shared::util::{now_millis, snowflake_id};

use crate::api::{ListQuery, status_matches};
use crate::core::ServerState;
use crate::store::matches_search;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult, time};

const RESOURCE: &str = "campaign";

fn validate_dates(start: &Option<String>, end: &Option<String>) -> AppResult<()> {
    let start = start.as_deref().map(time::parse_date).transpose()?;
    let end = end.as_deref().map(time::parse_date).transpose()?;
    if let (Some(start), Some(end)) = (start, end) {
        time::validate_date_order(start, end)?;
    }
    Ok(())
}

/// GET /api/campaigns - list, with ?search= and ?status=
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Campaign>>> {
    let search = query.search.clone().unwrap_or_default();
    let items = state.stores.campaigns.filter(|c| {
        status_matches(&c.status, &query.status)
            && matches_search(&search, &[&c.name, c.notes.as_deref().unwrap_or("")])
    });
    Ok(Json(items))
}

/// Funnel metrics summed over every campaign.
#[derive(Debug, Default, serde::Serialize)]
pub struct MarketingSummary {
    pub count: usize,
    pub running: usize,
    pub budget: f64,
    pub sent: i64,
    pub opened: i64,
    pub redeemed: i64,
    /// opened / sent, as a percentage
    pub open_rate: f64,
    /// redeemed / sent, as a percentage
    pub redemption_rate: f64,
}

fn summarize(campaigns: &[Campaign]) -> MarketingSummary {
    let mut summary = MarketingSummary::default();
    for c in campaigns {
        summary.count += 1;
        if c.status == CampaignStatus::Running {
            summary.running += 1;
        }
        summary.budget += c.budget;
        summary.sent += c.sent;
        summary.opened += c.opened;
        summary.redeemed += c.redeemed;
    }
    if summary.sent > 0 {
        summary.open_rate = summary.opened as f64 / summary.sent as f64 * 100.0;
        summary.redemption_rate = summary.redeemed as f64 / summary.sent as f64 * 100.0;
    }
    summary
}

/// GET /api/campaigns/summary - aggregate funnel metrics
pub async fn summary(State(state): State<ServerState>) -> AppResult<Json<MarketingSummary>> {
    Ok(Json(summarize(&state.stores.campaigns.list())))
}

/// GET /api/campaigns/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Campaign>> {
    let campaign = state
        .stores
        .campaigns
        .get(id)
        .ok_or_else(|| AppError::not_found(format!("Campaign {} not found", id)))?;
    Ok(Json(campaign))
}

/// POST /api/campaigns
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CampaignCreate>,
) -> AppResult<Json<Campaign>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    validate_dates(&payload.start_date, &payload.end_date)?;
    if !payload.budget.is_finite() || payload.budget < 0.0 {
        return Err(AppError::validation("Budget cannot be negative"));
    }

    let now = now_millis();
    let campaign = state.stores.campaigns.insert(Campaign {
        id: snowflake_id(),
        name: payload.name,
        channel: payload.channel,
        status: CampaignStatus::Draft,
        budget: payload.budget,
        sent: 0,
        opened: 0,
        redeemed: 0,
        start_date: payload.start_date,
        end_date: payload.end_date,
        notes: payload.notes,
        created_at: now,
        updated_at: now,
    });

    state.record_change(SyncOperation::Create, RESOURCE, &campaign);
    Ok(Json(campaign))
}

/// PUT /api/campaigns/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CampaignUpdate>,
) -> AppResult<Json<Campaign>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    validate_dates(&payload.start_date, &payload.end_date)?;
    if let Some(budget) = payload.budget
        && (!budget.is_finite() || budget < 0.0)
    {
        return Err(AppError::validation("Budget cannot be negative"));
    }

    let campaign = state
        .stores
        .campaigns
        .update(id, |c| {
            if let Some(name) = payload.name {
                c.name = name;
            }
            if let Some(channel) = payload.channel {
                c.channel = channel;
            }
            if let Some(status) = payload.status {
                c.status = status;
            }
            if let Some(budget) = payload.budget {
                c.budget = budget;
            }
            if let Some(sent) = payload.sent {
                c.sent = sent;
            }
            if let Some(opened) = payload.opened {
                c.opened = opened;
            }
            if let Some(redeemed) = payload.redeemed {
                c.redeemed = redeemed;
            }
            if payload.start_date.is_some() {
                c.start_date = payload.start_date;
            }
            if payload.end_date.is_some() {
                c.end_date = payload.end_date;
            }
            if payload.notes.is_some() {
                c.notes = payload.notes;
            }
            c.updated_at = now_millis();
        })
        .ok_or_else(|| AppError::not_found(format!("Campaign {} not found", id)))?;

    state.record_change(SyncOperation::Update, RESOURCE, &campaign);
    Ok(Json(campaign))
}

/// DELETE /api/campaigns/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Campaign>> {
    let campaign = state
        .stores
        .campaigns
        .remove(id)
        .ok_or_else(|| AppError::not_found(format!("Campaign {} not found", id)))?;

    state.record_change(SyncOperation::Delete, RESOURCE, &campaign);
    Ok(Json(campaign))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CampaignChannel;

    fn campaign(status: CampaignStatus, budget: f64, sent: i64, opened: i64, redeemed: i64) -> Campaign {
        Campaign {
            id: snowflake_id(),
            name: "Promo".to_string(),
            channel: CampaignChannel::Email,
            status,
            budget,
            sent,
            opened,
            redeemed,
            start_date: None,
            end_date: None,
            notes: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn summary_totals_the_funnel() {
        let campaigns = vec![
            campaign(CampaignStatus::Running, 150.0, 240, 96, 12),
            campaign(CampaignStatus::Finished, 50.0, 160, 24, 8),
            campaign(CampaignStatus::Draft, 80.0, 0, 0, 0),
        ];

        let summary = summarize(&campaigns);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.running, 1);
        assert!((summary.budget - 280.0).abs() < 1e-9);
        assert_eq!(summary.sent, 400);
        assert_eq!(summary.opened, 120);
        assert_eq!(summary.redeemed, 20);
        assert!((summary.open_rate - 30.0).abs() < 1e-9);
        assert!((summary.redemption_rate - 5.0).abs() < 1e-9);
    }

    #[test]
    fn summary_with_nothing_sent_has_zero_rates() {
        let summary = summarize(&[campaign(CampaignStatus::Draft, 10.0, 0, 0, 0)]);
        assert_eq!(summary.sent, 0);
        assert!((summary.open_rate).abs() < 1e-9);
        assert!((summary.redemption_rate).abs() < 1e-9);
    }
}
