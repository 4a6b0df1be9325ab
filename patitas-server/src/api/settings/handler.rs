//! Business settings API handlers

use axum::{Json, extract::State};
use shared::models::{BusinessSettings, BusinessSettingsUpdate, SyncOperation};
use shared::util::now_millis;

use crate::core::ServerState;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN,
    validate_amount, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "settings";

/// GET /api/settings
pub async fn get_settings(State(state): State<ServerState>) -> AppResult<Json<BusinessSettings>> {
    Ok(Json(state.settings.read().clone()))
}

/// PUT /api/settings - partial update of the single settings record
pub async fn update_settings(
    State(state): State<ServerState>,
    Json(payload): Json<BusinessSettingsUpdate>,
) -> AppResult<Json<BusinessSettings>> {
    if let Some(name) = &payload.business_name {
        validate_required_text(name, "business_name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.tax_id, "tax_id", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.schedule, "schedule", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.receipt_footer, "receipt_footer", MAX_NOTE_LEN)?;
    if let Some(rate) = payload.default_pension_rate {
        validate_amount(rate, "default_pension_rate")?;
    }
    if let Some(rate) = payload.default_tax_rate
        && !(0.0..=100.0).contains(&rate)
    {
        return Err(AppError::validation("default_tax_rate must be 0-100"));
    }

    let updated = {
        let mut settings = state.settings.write();
        if let Some(name) = payload.business_name {
            settings.business_name = name;
        }
        if payload.address.is_some() {
            settings.address = payload.address;
        }
        if payload.phone.is_some() {
            settings.phone = payload.phone;
        }
        if payload.email.is_some() {
            settings.email = payload.email;
        }
        if payload.tax_id.is_some() {
            settings.tax_id = payload.tax_id;
        }
        if payload.schedule.is_some() {
            settings.schedule = payload.schedule;
        }
        if payload.receipt_footer.is_some() {
            settings.receipt_footer = payload.receipt_footer;
        }
        if let Some(rate) = payload.default_pension_rate {
            settings.default_pension_rate = rate;
        }
        if let Some(rate) = payload.default_tax_rate {
            settings.default_tax_rate = rate;
        }
        settings.updated_at = now_millis();
        settings.clone()
    };

    state.record_change(SyncOperation::Update, RESOURCE, &updated);
    Ok(Json(updated))
}
