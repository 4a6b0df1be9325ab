//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen based on:
//! - ESC/POS 80mm printer line width: 48 chars
//! - Reasonable UX limits for names, notes, descriptions

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: client, pet, service, campaign, cage number, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, post bodies
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, coupon code, NIF, time strings
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Social post bodies get more room than notes
pub const MAX_BODY_LEN: usize = 2000;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    // Limits are in chars, not bytes: accented Spanish text must not
    // over-count
    let chars = value.chars().count();
    if chars > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({chars} chars, max {max_len})"
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        let chars = v.chars().count();
        if chars > max_len {
            return Err(AppError::validation(format!(
                "{field} is too long ({chars} chars, max {max_len})"
            )));
        }
    }
    Ok(())
}

/// Validate that a monetary amount is non-negative and finite.
pub fn validate_amount(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be a non-negative amount"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rules() {
        assert!(validate_required_text("Luna", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn length_limits_count_chars_not_bytes() {
        // 200 chars but 400 UTF-8 bytes
        let name = "ñ".repeat(MAX_NAME_LEN);
        assert!(validate_required_text(&name, "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text(&"ñ".repeat(201), "name", MAX_NAME_LEN).is_err());
        assert!(validate_optional_text(&Some(name), "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn amount_rules() {
        assert!(validate_amount(0.0, "price").is_ok());
        assert!(validate_amount(-1.0, "price").is_err());
        assert!(validate_amount(f64::NAN, "price").is_err());
    }
}
