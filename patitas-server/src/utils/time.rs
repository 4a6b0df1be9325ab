//! Time helpers — business timezone conversions
//!
//! Stays and appointments carry calendar dates as `YYYY-MM-DD` strings;
//! all parsing and "today" resolution happens here so the domain code
//! works on `NaiveDate` values.

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Parse a time string (HH:MM)
pub fn parse_time(time: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| AppError::validation(format!("Invalid time format: {}", time)))
}

/// Today's date in the business timezone
pub fn today_in(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

/// Validate that a checkout date does not precede the check-in date
pub fn validate_date_order(check_in: NaiveDate, check_out: NaiveDate) -> AppResult<()> {
    if check_out < check_in {
        return Err(AppError::validation(format!(
            "Checkout date {} is before check-in {}",
            check_out, check_in
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dates_and_rejects_garbage() {
        assert!(parse_date("2024-01-04").is_ok());
        assert!(parse_date("04/01/2024").is_err());
        assert!(parse_time("09:30").is_ok());
        assert!(parse_time("9h30").is_err());
    }

    #[test]
    fn date_order_check() {
        let a = parse_date("2024-01-01").unwrap();
        let b = parse_date("2024-01-04").unwrap();
        assert!(validate_date_order(a, b).is_ok());
        assert!(validate_date_order(b, a).is_err());
        assert!(validate_date_order(a, a).is_ok());
    }
}
