//! In-memory stores
//!
//! The dashboard's collections live in process memory and re-seed from
//! mock data at every startup; the only durable state is the sync queue.
//! Stores are `RwLock`-protected maps shared across handlers via
//! [`crate::core::ServerState`].

pub mod seed;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

/// Anything storable under an i64 id.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;
}

macro_rules! impl_entity {
    ($($ty:ty),* $(,)?) => {
        $(impl Entity for $ty {
            fn id(&self) -> i64 {
                self.id
            }
        })*
    };
}

impl_entity!(
    shared::models::Appointment,
    shared::models::Cage,
    shared::models::Campaign,
    shared::models::Client,
    shared::models::Coupon,
    shared::models::Invoice,
    shared::models::PensionStay,
    shared::models::Sale,
    shared::models::ShareableContent,
);

/// Shared in-memory collection keyed by id.
///
/// Cloning is shallow; all clones see the same records.
#[derive(Debug)]
pub struct MemStore<T: Entity> {
    records: Arc<RwLock<HashMap<i64, T>>>,
}

impl<T: Entity> Clone for MemStore<T> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}

impl<T: Entity> Default for MemStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MemStore<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Replace the whole collection (startup seeding).
    pub fn seed(&self, items: Vec<T>) {
        let mut map = self.records.write();
        map.clear();
        for item in items {
            map.insert(item.id(), item);
        }
    }

    /// All records, ordered by id for stable listings.
    pub fn list(&self) -> Vec<T> {
        let mut items: Vec<T> = self.records.read().values().cloned().collect();
        items.sort_by_key(|i| i.id());
        items
    }

    /// Records matching a predicate, ordered by id.
    pub fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        let mut items: Vec<T> = self
            .records
            .read()
            .values()
            .filter(|i| pred(i))
            .cloned()
            .collect();
        items.sort_by_key(|i| i.id());
        items
    }

    pub fn get(&self, id: i64) -> Option<T> {
        self.records.read().get(&id).cloned()
    }

    pub fn insert(&self, item: T) -> T {
        self.records.write().insert(item.id(), item.clone());
        item
    }

    /// Apply a mutation to a record in place; returns the updated record.
    pub fn update(&self, id: i64, f: impl FnOnce(&mut T)) -> Option<T> {
        let mut map = self.records.write();
        let item = map.get_mut(&id)?;
        f(item);
        Some(item.clone())
    }

    pub fn remove(&self, id: i64) -> Option<T> {
        self.records.write().remove(&id)
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

/// Case-insensitive substring match used by every list endpoint's
/// free-text search. Empty needles match everything.
pub fn matches_search(needle: &str, haystacks: &[&str]) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    haystacks
        .iter()
        .any(|h| h.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Coupon, CouponStatus, DiscountType};

    fn coupon(id: i64, code: &str) -> Coupon {
        Coupon {
            id,
            code: code.to_string(),
            description: None,
            discount_type: DiscountType::Percent,
            value: 10.0,
            status: CouponStatus::Active,
            times_used: 0,
            max_uses: None,
            valid_until: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn crud_round_trip() {
        let store: MemStore<Coupon> = MemStore::new();
        store.insert(coupon(2, "VERANO15"));
        store.insert(coupon(1, "BIENVENIDO20"));

        assert_eq!(store.len(), 2);
        // list is ordered by id
        assert_eq!(store.list()[0].code, "BIENVENIDO20");

        store.update(2, |c| c.value = 15.0);
        assert_eq!(store.get(2).unwrap().value, 15.0);

        assert!(store.remove(1).is_some());
        assert!(store.get(1).is_none());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        assert!(matches_search("bienvenido", &["BIENVENIDO20", ""]));
        assert!(matches_search("", &["anything"]));
        assert!(!matches_search("verano", &["BIENVENIDO20"]));
    }
}
