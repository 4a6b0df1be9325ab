//! Stay billing helpers
//!
//! Pure functions over a stay and an explicit `today`, so callers decide
//! the clock (handlers pass the business-timezone date, tests pass fixed
//! dates).

use chrono::NaiveDate;
use shared::models::{PensionStay, StayStatus};

use crate::utils::{AppResult, time};

/// Overdue penalty multiplier on the effective daily rate.
///
/// Inherited placeholder policy, not derived from a documented business
/// rule; adjust here if the penalty schedule ever gets decided.
pub const OVERDUE_RATE_MULTIPLIER: f64 = 1.5;

/// Planned stay length in days, never below 1 (same-day stays bill one
/// day, and the overdue formula divides by this).
pub fn planned_duration_days(stay: &PensionStay) -> AppResult<i64> {
    let check_in = time::parse_date(&stay.check_in_date)?;
    let expected = time::parse_date(&stay.expected_check_out_date)?;
    Ok((expected - check_in).num_days().max(1))
}

/// Billable stay length in days, minimum 1.
///
/// The end of the span depends on status: actual checkout for completed
/// stays, `today` for active ones, the expected checkout otherwise.
pub fn stay_duration_days(stay: &PensionStay, today: NaiveDate) -> AppResult<i64> {
    let check_in = time::parse_date(&stay.check_in_date)?;
    let end = match stay.status {
        StayStatus::Completed => match &stay.actual_check_out_date {
            Some(d) => time::parse_date(d)?,
            None => time::parse_date(&stay.expected_check_out_date)?,
        },
        StayStatus::Active => today,
        StayStatus::Cancelled => time::parse_date(&stay.expected_check_out_date)?,
    };
    Ok((end - check_in).num_days().max(1))
}

/// Overdue penalty for a stay.
///
/// Active stays past their expected checkout accrue
/// `extra_days × (base_rate / planned_days) × OVERDUE_RATE_MULTIPLIER`.
/// Anything else returns the stored `extra_charges` unchanged.
pub fn extra_charges(stay: &PensionStay, today: NaiveDate) -> AppResult<f64> {
    if stay.status != StayStatus::Active {
        return Ok(stay.extra_charges);
    }
    let expected = time::parse_date(&stay.expected_check_out_date)?;
    if today <= expected {
        return Ok(stay.extra_charges);
    }
    let extra_days = (today - expected).num_days();
    let planned = planned_duration_days(stay)?;
    Ok(extra_days as f64 * (stay.base_rate / planned as f64) * OVERDUE_RATE_MULTIPLIER)
}

/// True iff the stay is active and past its expected checkout date.
/// Non-active stays are never overdue, whatever their dates say.
pub fn is_overdue(stay: &PensionStay, today: NaiveDate) -> bool {
    if stay.status != StayStatus::Active {
        return false;
    }
    match time::parse_date(&stay.expected_check_out_date) {
        Ok(expected) => today > expected,
        Err(_) => false,
    }
}

/// Final amount at checkout:
/// `base_rate × duration + extra charges + Σ pending services`.
pub fn checkout_total(stay: &PensionStay, today: NaiveDate) -> AppResult<f64> {
    let duration = stay_duration_days(stay, today)?;
    let extra = extra_charges(stay, today)?;
    let services: f64 = stay.pending_services.iter().map(|s| s.price).sum();
    Ok(stay.base_rate * duration as f64 + extra + services)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::PendingService;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn stay(check_in: &str, expected: &str, base_rate: f64, status: StayStatus) -> PensionStay {
        PensionStay {
            id: 1,
            cage_id: Some(101),
            client_id: 1,
            pet_id: 11,
            check_in_date: check_in.to_string(),
            check_in_time: Some("10:00".to_string()),
            expected_check_out_date: expected.to_string(),
            actual_check_out_date: None,
            status,
            base_rate,
            extra_charges: 0.0,
            total_charged: 0.0,
            is_paid: false,
            pending_services: vec![],
            notes: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn duration_is_at_least_one_day() {
        let s = stay("2024-01-01", "2024-01-01", 100.0, StayStatus::Active);
        assert_eq!(stay_duration_days(&s, date("2024-01-01")).unwrap(), 1);

        // Even a clock running behind the check-in date bills one day
        assert_eq!(stay_duration_days(&s, date("2023-12-30")).unwrap(), 1);
    }

    #[test]
    fn duration_end_depends_on_status() {
        let mut s = stay("2024-01-01", "2024-01-04", 100.0, StayStatus::Active);
        assert_eq!(stay_duration_days(&s, date("2024-01-03")).unwrap(), 2);

        s.status = StayStatus::Completed;
        s.actual_check_out_date = Some("2024-01-06".to_string());
        assert_eq!(stay_duration_days(&s, date("2024-02-01")).unwrap(), 5);

        s.status = StayStatus::Cancelled;
        assert_eq!(stay_duration_days(&s, date("2024-02-01")).unwrap(), 3);
    }

    #[test]
    fn overdue_only_when_active_and_past_expected() {
        let s = stay("2024-01-01", "2024-01-04", 100.0, StayStatus::Active);
        assert!(!is_overdue(&s, date("2024-01-04")));
        assert!(is_overdue(&s, date("2024-01-05")));

        let done = stay("2024-01-01", "2024-01-04", 100.0, StayStatus::Completed);
        assert!(!is_overdue(&done, date("2024-06-01")));
        let cancelled = stay("2024-01-01", "2024-01-04", 100.0, StayStatus::Cancelled);
        assert!(!is_overdue(&cancelled, date("2024-06-01")));
    }

    #[test]
    fn extra_charges_two_days_overdue() {
        // 3-day stay at 100/day, queried 2 days past expected checkout:
        // 2 × (100/3) × 1.5 ≈ 100.0
        let s = stay("2024-01-01", "2024-01-04", 100.0, StayStatus::Active);
        let charge = extra_charges(&s, date("2024-01-06")).unwrap();
        assert!((charge - 100.0).abs() < 1e-9);
    }

    #[test]
    fn extra_charges_untouched_for_non_active() {
        let mut s = stay("2024-01-01", "2024-01-04", 100.0, StayStatus::Completed);
        s.extra_charges = 12.34;
        assert_eq!(extra_charges(&s, date("2024-06-01")).unwrap(), 12.34);
    }

    #[test]
    fn extra_charges_zero_day_plan_divides_by_one() {
        let s = stay("2024-01-01", "2024-01-01", 50.0, StayStatus::Active);
        // 1 day overdue on a same-day plan: 1 × (50/1) × 1.5
        let charge = extra_charges(&s, date("2024-01-02")).unwrap();
        assert!((charge - 75.0).abs() < 1e-9);
    }

    #[test]
    fn checkout_total_sums_rate_extra_and_services() {
        let mut s = stay("2024-01-01", "2024-01-04", 100.0, StayStatus::Active);
        s.pending_services = vec![
            PendingService {
                id: 1,
                name: "Baño".to_string(),
                price: 20.0,
            },
            PendingService {
                id: 2,
                name: "Corte de uñas".to_string(),
                price: 10.0,
            },
        ];
        // On the expected date: 3 days × 100 + 0 extra + 30 services
        let total = checkout_total(&s, date("2024-01-04")).unwrap();
        assert!((total - 330.0).abs() < 1e-9);

        // Two days overdue adds the ≈100 penalty and two billable days
        let total = checkout_total(&s, date("2024-01-06")).unwrap();
        assert!((total - (500.0 + 100.0 + 30.0)).abs() < 1e-9);
    }
}
