//! Pension service — cages and stays with the occupancy invariant

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;
use shared::models::{
    Cage, CageCreate, CageStatus, CageUpdate, PensionStay, PensionStayCreate, PensionStayUpdate,
    StayCheckout, StayStatus,
};
use shared::util::{now_millis, snowflake_id};

use crate::store::MemStore;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_amount, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, time};

/// Occupancy and workload snapshot for the pension page header.
#[derive(Debug, Clone, Serialize)]
pub struct PensionSummary {
    pub total_cages: usize,
    pub available: usize,
    pub occupied: usize,
    pub maintenance: usize,
    pub active_stays: usize,
    pub overdue_stays: usize,
    /// occupied / (total - maintenance), as a percentage
    pub occupancy_rate: f64,
}

/// Manager for the two boarding collections.
///
/// All mutations run under this service so the cage status can never
/// drift from the set of active stays: both collections are updated
/// before any call returns.
#[derive(Clone)]
pub struct PensionService {
    cages: MemStore<Cage>,
    stays: MemStore<PensionStay>,
    timezone: Tz,
}

impl PensionService {
    pub fn new(cages: MemStore<Cage>, stays: MemStore<PensionStay>, timezone: Tz) -> Self {
        Self {
            cages,
            stays,
            timezone,
        }
    }

    fn today(&self) -> NaiveDate {
        time::today_in(self.timezone)
    }

    /// The active stay referencing a cage, if any.
    fn active_stay_for_cage(&self, cage_id: i64) -> Option<PensionStay> {
        self.stays
            .filter(|s| s.status == StayStatus::Active && s.cage_id == Some(cage_id))
            .into_iter()
            .next()
    }

    /// Check a cage can take a new active stay.
    fn ensure_cage_free(&self, cage_id: i64) -> AppResult<Cage> {
        let cage = self
            .cages
            .get(cage_id)
            .ok_or_else(|| AppError::not_found(format!("Cage {} not found", cage_id)))?;
        if cage.status == CageStatus::Maintenance {
            return Err(AppError::conflict(format!(
                "Cage {} is under maintenance",
                cage.number
            )));
        }
        if let Some(stay) = self.active_stay_for_cage(cage_id) {
            return Err(AppError::conflict(format!(
                "Cage {} already holds active stay {}",
                cage.number, stay.id
            )));
        }
        Ok(cage)
    }

    fn set_cage_status(&self, cage_id: i64, status: CageStatus) {
        self.cages.update(cage_id, |c| {
            c.status = status;
            c.updated_at = now_millis();
        });
    }

    // ========== Cages ==========

    pub fn list_cages(&self) -> Vec<Cage> {
        self.cages.list()
    }

    pub fn get_cage(&self, id: i64) -> AppResult<Cage> {
        self.cages
            .get(id)
            .ok_or_else(|| AppError::not_found(format!("Cage {} not found", id)))
    }

    pub fn create_cage(&self, payload: CageCreate) -> AppResult<Cage> {
        validate_required_text(&payload.number, "number", MAX_NAME_LEN)?;
        validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
        let now = now_millis();
        let cage = Cage {
            id: snowflake_id(),
            number: payload.number,
            size: payload.size,
            status: CageStatus::Available,
            location: payload.location,
            notes: payload.notes,
            created_at: now,
            updated_at: now,
        };
        Ok(self.cages.insert(cage))
    }

    pub fn update_cage(&self, id: i64, payload: CageUpdate) -> AppResult<Cage> {
        let cage = self.get_cage(id)?;
        validate_optional_text(&payload.number, "number", MAX_NAME_LEN)?;
        validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

        if let Some(status) = payload.status {
            // Occupancy is derived from stays, never set by hand.
            if status == CageStatus::Occupied {
                return Err(AppError::validation(
                    "Cage status 'occupied' is derived from stays and cannot be set directly",
                ));
            }
            if cage.status == CageStatus::Occupied {
                return Err(AppError::conflict(format!(
                    "Cage {} has an active stay; check it out first",
                    cage.number
                )));
            }
        }

        self.cages
            .update(id, |c| {
                if let Some(number) = payload.number {
                    c.number = number;
                }
                if let Some(size) = payload.size {
                    c.size = size;
                }
                if let Some(status) = payload.status {
                    c.status = status;
                }
                if payload.location.is_some() {
                    c.location = payload.location;
                }
                if payload.notes.is_some() {
                    c.notes = payload.notes;
                }
                c.updated_at = now_millis();
            })
            .ok_or_else(|| AppError::not_found(format!("Cage {} not found", id)))
    }

    /// Delete a cage. Rejected while an active stay references it, so
    /// a stay can never be left pointing at a removed cage.
    pub fn delete_cage(&self, id: i64) -> AppResult<Cage> {
        let cage = self.get_cage(id)?;
        if let Some(stay) = self.active_stay_for_cage(id) {
            return Err(AppError::conflict(format!(
                "Cage {} holds active stay {}; check out or move the stay first",
                cage.number, stay.id
            )));
        }
        self.cages
            .remove(id)
            .ok_or_else(|| AppError::not_found(format!("Cage {} not found", id)))
    }

    // ========== Stays ==========

    pub fn list_stays(&self) -> Vec<PensionStay> {
        self.stays.list()
    }

    pub fn get_stay(&self, id: i64) -> AppResult<PensionStay> {
        self.stays
            .get(id)
            .ok_or_else(|| AppError::not_found(format!("Stay {} not found", id)))
    }

    /// Check-in: create a stay and occupy its cage.
    pub fn create_stay(&self, payload: PensionStayCreate) -> AppResult<PensionStay> {
        let check_in = time::parse_date(&payload.check_in_date)?;
        let expected = time::parse_date(&payload.expected_check_out_date)?;
        time::validate_date_order(check_in, expected)?;
        if let Some(t) = &payload.check_in_time {
            time::parse_time(t)?;
        }
        validate_amount(payload.base_rate, "base_rate")?;
        validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

        if let Some(cage_id) = payload.cage_id {
            self.ensure_cage_free(cage_id)?;
        }

        let now = now_millis();
        let stay = PensionStay {
            id: snowflake_id(),
            cage_id: payload.cage_id,
            client_id: payload.client_id,
            pet_id: payload.pet_id,
            check_in_date: payload.check_in_date,
            check_in_time: payload.check_in_time,
            expected_check_out_date: payload.expected_check_out_date,
            actual_check_out_date: None,
            status: StayStatus::Active,
            base_rate: payload.base_rate,
            extra_charges: 0.0,
            total_charged: 0.0,
            is_paid: false,
            pending_services: payload.pending_services,
            notes: payload.notes,
            created_at: now,
            updated_at: now,
        };
        let stay = self.stays.insert(stay);

        if let Some(cage_id) = stay.cage_id {
            self.set_cage_status(cage_id, CageStatus::Occupied);
        }
        Ok(stay)
    }

    /// Edit a stay. Reassigning the cage frees the old one and occupies
    /// the new one before the patch is applied.
    pub fn update_stay(&self, id: i64, payload: PensionStayUpdate) -> AppResult<PensionStay> {
        let existing = self.get_stay(id)?;

        if let Some(rate) = payload.base_rate {
            validate_amount(rate, "base_rate")?;
        }
        validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

        // Check the merged dates up front; nothing may mutate until the
        // whole patch is known to be valid.
        let check_in = time::parse_date(
            payload
                .check_in_date
                .as_deref()
                .unwrap_or(&existing.check_in_date),
        )?;
        let expected = time::parse_date(
            payload
                .expected_check_out_date
                .as_deref()
                .unwrap_or(&existing.expected_check_out_date),
        )?;
        time::validate_date_order(check_in, expected)?;

        let cage_change = match payload.cage_id {
            Some(new_cage) if Some(new_cage) != existing.cage_id => Some(new_cage),
            _ => None,
        };
        if let Some(new_cage) = cage_change {
            if existing.status != StayStatus::Active {
                return Err(AppError::business_rule(format!(
                    "Stay {} is not active; cage can only be reassigned on active stays",
                    id
                )));
            }
            self.ensure_cage_free(new_cage)?;
            if let Some(old_cage) = existing.cage_id {
                self.set_cage_status(old_cage, CageStatus::Available);
            }
            self.set_cage_status(new_cage, CageStatus::Occupied);
        }

        let updated = self
            .stays
            .update(id, |s| {
                if let Some(cage_id) = payload.cage_id {
                    s.cage_id = Some(cage_id);
                }
                if let Some(d) = payload.check_in_date {
                    s.check_in_date = d;
                }
                if payload.check_in_time.is_some() {
                    s.check_in_time = payload.check_in_time;
                }
                if let Some(d) = payload.expected_check_out_date {
                    s.expected_check_out_date = d;
                }
                if let Some(rate) = payload.base_rate {
                    s.base_rate = rate;
                }
                if let Some(services) = payload.pending_services {
                    s.pending_services = services;
                }
                if payload.notes.is_some() {
                    s.notes = payload.notes;
                }
                s.updated_at = now_millis();
            })
            .ok_or_else(|| AppError::not_found(format!("Stay {} not found", id)))?;

        Ok(updated)
    }

    /// Checkout: compute final charges, complete the stay, free the cage.
    pub fn check_out(&self, id: i64, payload: StayCheckout) -> AppResult<PensionStay> {
        let stay = self.get_stay(id)?;
        if stay.status != StayStatus::Active {
            return Err(AppError::business_rule(format!(
                "Stay {} is not active and cannot be checked out",
                id
            )));
        }
        validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

        let checkout_date = match &payload.actual_check_out_date {
            Some(d) => time::parse_date(d)?,
            None => self.today(),
        };
        // Charges are fixed at this moment, while the stay is still active
        let extra = super::billing::extra_charges(&stay, checkout_date)?;
        let total = super::billing::checkout_total(&stay, checkout_date)?;

        let updated = self
            .stays
            .update(id, |s| {
                s.status = StayStatus::Completed;
                s.actual_check_out_date = Some(checkout_date.format("%Y-%m-%d").to_string());
                s.extra_charges = extra;
                s.total_charged = total;
                s.is_paid = payload.is_paid;
                if payload.notes.is_some() {
                    s.notes = payload.notes;
                }
                s.updated_at = now_millis();
            })
            .ok_or_else(|| AppError::not_found(format!("Stay {} not found", id)))?;

        if let Some(cage_id) = updated.cage_id {
            self.set_cage_status(cage_id, CageStatus::Available);
        }
        Ok(updated)
    }

    /// Delete a stay; frees the cage only if the stay was still active.
    pub fn delete_stay(&self, id: i64) -> AppResult<PensionStay> {
        let stay = self
            .stays
            .remove(id)
            .ok_or_else(|| AppError::not_found(format!("Stay {} not found", id)))?;
        if stay.status == StayStatus::Active
            && let Some(cage_id) = stay.cage_id
        {
            self.set_cage_status(cage_id, CageStatus::Available);
        }
        Ok(stay)
    }

    /// Active stays past their expected checkout.
    pub fn overdue_stays(&self) -> Vec<PensionStay> {
        let today = self.today();
        self.stays
            .filter(|s| super::billing::is_overdue(s, today))
    }

    pub fn summary(&self) -> PensionSummary {
        let cages = self.cages.list();
        let today = self.today();
        let available = cages
            .iter()
            .filter(|c| c.status == CageStatus::Available)
            .count();
        let occupied = cages
            .iter()
            .filter(|c| c.status == CageStatus::Occupied)
            .count();
        let maintenance = cages
            .iter()
            .filter(|c| c.status == CageStatus::Maintenance)
            .count();
        let stays = self.stays.list();
        let active_stays = stays
            .iter()
            .filter(|s| s.status == StayStatus::Active)
            .count();
        let overdue_stays = stays
            .iter()
            .filter(|s| super::billing::is_overdue(s, today))
            .count();
        let usable = cages.len().saturating_sub(maintenance);
        let occupancy_rate = if usable == 0 {
            0.0
        } else {
            occupied as f64 / usable as f64 * 100.0
        };
        PensionSummary {
            total_cages: cages.len(),
            available,
            occupied,
            maintenance,
            active_stays,
            overdue_stays,
            occupancy_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CageSize;

    fn service() -> PensionService {
        let cages = MemStore::new();
        let stays = MemStore::new();
        let svc = PensionService::new(cages, stays, chrono_tz::Europe::Madrid);
        svc.create_cage(CageCreate {
            number: "M-01".to_string(),
            size: CageSize::Medium,
            location: None,
            notes: None,
        })
        .unwrap();
        svc
    }

    fn stay_payload(cage_id: Option<i64>) -> PensionStayCreate {
        PensionStayCreate {
            cage_id,
            client_id: 1,
            pet_id: 11,
            check_in_date: "2026-08-01".to_string(),
            check_in_time: Some("10:00".to_string()),
            expected_check_out_date: "2026-08-04".to_string(),
            base_rate: 25.0,
            pending_services: vec![],
            notes: None,
        }
    }

    #[test]
    fn check_in_occupies_and_checkout_frees() {
        let svc = service();
        let cage_id = svc.list_cages()[0].id;

        let stay = svc.create_stay(stay_payload(Some(cage_id))).unwrap();
        assert_eq!(svc.get_cage(cage_id).unwrap().status, CageStatus::Occupied);

        let done = svc
            .check_out(
                stay.id,
                StayCheckout {
                    actual_check_out_date: Some("2026-08-04".to_string()),
                    is_paid: true,
                    notes: None,
                },
            )
            .unwrap();
        assert_eq!(done.status, StayStatus::Completed);
        assert!((done.total_charged - 75.0).abs() < 1e-9); // 3 days × 25
        assert_eq!(svc.get_cage(cage_id).unwrap().status, CageStatus::Available);
    }

    #[test]
    fn double_occupancy_is_rejected() {
        let svc = service();
        let cage_id = svc.list_cages()[0].id;
        svc.create_stay(stay_payload(Some(cage_id))).unwrap();

        let err = svc.create_stay(stay_payload(Some(cage_id))).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn deleting_active_stay_frees_cage() {
        let svc = service();
        let cage_id = svc.list_cages()[0].id;
        let stay = svc.create_stay(stay_payload(Some(cage_id))).unwrap();

        svc.delete_stay(stay.id).unwrap();
        assert_eq!(svc.get_cage(cage_id).unwrap().status, CageStatus::Available);
    }

    #[test]
    fn occupied_cage_cannot_be_deleted() {
        let svc = service();
        let cage_id = svc.list_cages()[0].id;
        svc.create_stay(stay_payload(Some(cage_id))).unwrap();

        let err = svc.delete_cage(cage_id).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn cage_reassignment_moves_occupancy() {
        let svc = service();
        let first = svc.list_cages()[0].id;
        let second = svc
            .create_cage(CageCreate {
                number: "M-02".to_string(),
                size: CageSize::Medium,
                location: None,
                notes: None,
            })
            .unwrap()
            .id;

        let stay = svc.create_stay(stay_payload(Some(first))).unwrap();
        svc.update_stay(
            stay.id,
            PensionStayUpdate {
                cage_id: Some(second),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(svc.get_cage(first).unwrap().status, CageStatus::Available);
        assert_eq!(svc.get_cage(second).unwrap().status, CageStatus::Occupied);
    }

    #[test]
    fn rejected_update_leaves_stay_and_cages_untouched() {
        let svc = service();
        let first = svc.list_cages()[0].id;
        let second = svc
            .create_cage(CageCreate {
                number: "M-02".to_string(),
                size: CageSize::Medium,
                location: None,
                notes: None,
            })
            .unwrap()
            .id;
        let stay = svc.create_stay(stay_payload(Some(first))).unwrap();

        // Checkout before check-in, plus a cage move in the same patch
        let err = svc
            .update_stay(
                stay.id,
                PensionStayUpdate {
                    cage_id: Some(second),
                    expected_check_out_date: Some("2026-07-01".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let stored = svc.get_stay(stay.id).unwrap();
        assert_eq!(stored.expected_check_out_date, "2026-08-04");
        assert_eq!(stored.cage_id, Some(first));
        assert_eq!(svc.get_cage(first).unwrap().status, CageStatus::Occupied);
        assert_eq!(svc.get_cage(second).unwrap().status, CageStatus::Available);
    }

    #[test]
    fn occupied_status_cannot_be_set_by_hand() {
        let svc = service();
        let cage_id = svc.list_cages()[0].id;
        let err = svc
            .update_cage(
                cage_id,
                CageUpdate {
                    status: Some(CageStatus::Occupied),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn maintenance_cage_rejects_check_in() {
        let svc = service();
        let cage_id = svc.list_cages()[0].id;
        svc.update_cage(
            cage_id,
            CageUpdate {
                status: Some(CageStatus::Maintenance),
                ..Default::default()
            },
        )
        .unwrap();

        let err = svc.create_stay(stay_payload(Some(cage_id))).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn summary_counts_occupancy() {
        let svc = service();
        let cage_id = svc.list_cages()[0].id;
        svc.create_stay(stay_payload(Some(cage_id))).unwrap();

        let summary = svc.summary();
        assert_eq!(summary.total_cages, 1);
        assert_eq!(summary.occupied, 1);
        assert_eq!(summary.active_stays, 1);
        assert!((summary.occupancy_rate - 100.0).abs() < 1e-9);
    }
}
