//! `RwLock`-backed in-memory store implementations.
//!
//! Each store owns a `Vec` of records behind an `RwLock`. List
//! operations clone out snapshots so callers never hold a lock across
//! scoring or serialization.

use std::sync::RwLock;

use refeed_store_models::{
    Donation, DonationQuery, Donor, MatchQuery, MatchRecord, PriceObservation, PriceQuery,
    RecipientLocation,
};

use crate::{DonationStore, DonorStore, MatchStore, PriceStore, RecipientStore, StoreError};

/// In-memory donor store.
#[derive(Default)]
pub struct MemoryDonorStore {
    donors: RwLock<Vec<Donor>>,
}

impl MemoryDonorStore {
    /// Creates a store pre-loaded with the given donors.
    #[must_use]
    pub fn with_donors(donors: Vec<Donor>) -> Self {
        Self {
            donors: RwLock::new(donors),
        }
    }
}

impl DonorStore for MemoryDonorStore {
    fn list(&self) -> Vec<Donor> {
        self.donors.read().expect("donor store lock poisoned").clone()
    }

    fn get(&self, id: &str) -> Result<Donor, StoreError> {
        self.donors
            .read()
            .expect("donor store lock poisoned")
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("donor", id))
    }

    fn insert(&self, donor: Donor) {
        self.donors
            .write()
            .expect("donor store lock poisoned")
            .push(donor);
    }
}

/// In-memory donation store.
#[derive(Default)]
pub struct MemoryDonationStore {
    donations: RwLock<Vec<Donation>>,
}

impl MemoryDonationStore {
    /// Creates a store pre-loaded with the given donations.
    #[must_use]
    pub fn with_donations(donations: Vec<Donation>) -> Self {
        Self {
            donations: RwLock::new(donations),
        }
    }
}

impl DonationStore for MemoryDonationStore {
    fn list(&self, query: &DonationQuery) -> Vec<Donation> {
        self.donations
            .read()
            .expect("donation store lock poisoned")
            .iter()
            .filter(|d| {
                query.donor_id.as_deref().is_none_or(|id| d.donor_id == id)
                    && query.is_matched.is_none_or(|m| d.is_matched == m)
                    && query.category.is_none_or(|c| d.category == c)
            })
            .cloned()
            .collect()
    }

    fn get(&self, id: &str) -> Result<Donation, StoreError> {
        self.donations
            .read()
            .expect("donation store lock poisoned")
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("donation", id))
    }

    fn insert(&self, donation: Donation) {
        self.donations
            .write()
            .expect("donation store lock poisoned")
            .push(donation);
    }

    fn mark_matched(&self, id: &str) -> Result<bool, StoreError> {
        let mut donations = self.donations.write().expect("donation store lock poisoned");
        let donation = donations
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| StoreError::not_found("donation", id))?;
        if donation.is_matched {
            return Ok(false);
        }
        donation.is_matched = true;
        Ok(true)
    }
}

/// In-memory recipient zone store.
#[derive(Default)]
pub struct MemoryRecipientStore {
    recipients: RwLock<Vec<RecipientLocation>>,
}

impl MemoryRecipientStore {
    /// Creates a store pre-loaded with the given zones.
    #[must_use]
    pub fn with_recipients(recipients: Vec<RecipientLocation>) -> Self {
        Self {
            recipients: RwLock::new(recipients),
        }
    }
}

impl RecipientStore for MemoryRecipientStore {
    fn list(&self) -> Vec<RecipientLocation> {
        self.recipients
            .read()
            .expect("recipient store lock poisoned")
            .clone()
    }

    fn get(&self, id: &str) -> Result<RecipientLocation, StoreError> {
        self.recipients
            .read()
            .expect("recipient store lock poisoned")
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("recipient", id))
    }

    fn insert(&self, recipient: RecipientLocation) {
        self.recipients
            .write()
            .expect("recipient store lock poisoned")
            .push(recipient);
    }
}

/// In-memory match record store.
#[derive(Default)]
pub struct MemoryMatchStore {
    matches: RwLock<Vec<MatchRecord>>,
}

impl MatchStore for MemoryMatchStore {
    fn list(&self, query: &MatchQuery) -> Vec<MatchRecord> {
        self.matches
            .read()
            .expect("match store lock poisoned")
            .iter()
            .filter(|m| {
                query.status.is_none_or(|s| m.status == s)
                    && query.priority.is_none_or(|p| m.priority == p)
                    && query
                        .donation_id
                        .as_deref()
                        .is_none_or(|id| m.donation_id == id)
            })
            .cloned()
            .collect()
    }

    fn insert(&self, record: MatchRecord) {
        self.matches
            .write()
            .expect("match store lock poisoned")
            .push(record);
    }
}

/// In-memory price observation store.
#[derive(Default)]
pub struct MemoryPriceStore {
    observations: RwLock<Vec<PriceObservation>>,
}

impl MemoryPriceStore {
    /// Creates a store pre-loaded with the given observations.
    #[must_use]
    pub fn with_observations(observations: Vec<PriceObservation>) -> Self {
        Self {
            observations: RwLock::new(observations),
        }
    }
}

impl PriceStore for MemoryPriceStore {
    fn list(&self, query: &PriceQuery) -> Vec<PriceObservation> {
        self.observations
            .read()
            .expect("price store lock poisoned")
            .iter()
            .filter(|o| {
                query
                    .region
                    .as_deref()
                    .is_none_or(|r| o.region.to_lowercase().contains(&r.to_lowercase()))
                    && query
                        .item
                        .as_deref()
                        .is_none_or(|i| o.item.to_lowercase().contains(&i.to_lowercase()))
            })
            .cloned()
            .collect()
    }

    fn insert(&self, observation: PriceObservation) {
        self.observations
            .write()
            .expect("price store lock poisoned")
            .push(observation);
    }

    fn history(&self, region: &str, item: &str) -> Vec<PriceObservation> {
        let mut history: Vec<PriceObservation> = self
            .observations
            .read()
            .expect("price store lock poisoned")
            .iter()
            .filter(|o| o.region == region && o.item == item)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.observed_at.cmp(&a.observed_at));
        history
    }

    fn keys(&self) -> Vec<(String, String)> {
        let mut keys: Vec<(String, String)> = self
            .observations
            .read()
            .expect("price store lock poisoned")
            .iter()
            .map(|o| (o.region.clone(), o.item.clone()))
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone as _, Utc};
    use refeed_food_models::{FoodCategory, FoodCondition, QuantityUnit};
    use refeed_geo::Coordinate;

    use super::*;

    fn donation(id: &str, donor_id: &str, matched: bool) -> Donation {
        let t = Utc.with_ymd_and_hms(2025, 6, 29, 0, 0, 0).unwrap();
        Donation {
            id: id.to_string(),
            donor_id: donor_id.to_string(),
            food_type: "Apples".to_string(),
            category: FoodCategory::Produce,
            condition: FoodCondition::Good,
            quantity: 50.0,
            unit: QuantityUnit::Kg,
            expiry_date: t + chrono::Duration::days(3),
            origin: Coordinate::new(40.8176, -73.9282).unwrap(),
            description: None,
            is_matched: matched,
            created_at: t,
            updated_at: t,
        }
    }

    fn observation(id: &str, region: &str, item: &str, price: f64, day: u32) -> PriceObservation {
        let t = Utc.with_ymd_and_hms(2025, 6, day, 0, 0, 0).unwrap();
        PriceObservation {
            id: id.to_string(),
            region: region.to_string(),
            item: item.to_string(),
            price,
            currency: "USD".to_string(),
            unit: "per lb".to_string(),
            observed_at: t,
            recorded_at: t,
        }
    }

    #[test]
    fn donation_query_filters() {
        let store = MemoryDonationStore::with_donations(vec![
            donation("1", "a", false),
            donation("2", "a", true),
            donation("3", "b", false),
        ]);

        let unmatched = store.list(&DonationQuery {
            is_matched: Some(false),
            ..DonationQuery::default()
        });
        assert_eq!(unmatched.len(), 2);

        let donor_a = store.list(&DonationQuery {
            donor_id: Some("a".to_string()),
            ..DonationQuery::default()
        });
        assert_eq!(donor_a.len(), 2);
    }

    #[test]
    fn mark_matched_is_single_shot() {
        let store = MemoryDonationStore::with_donations(vec![donation("1", "a", false)]);
        assert_eq!(store.mark_matched("1"), Ok(true));
        assert_eq!(store.mark_matched("1"), Ok(false));
        assert!(matches!(
            store.mark_matched("missing"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn price_history_is_most_recent_first() {
        let store = MemoryPriceStore::with_observations(vec![
            observation("1", "Bronx, NY", "Apples", 3.00, 20),
            observation("2", "Bronx, NY", "Apples", 3.50, 29),
            observation("3", "Kigali", "Maize", 850.0, 29),
        ]);

        let history = store.history("Bronx, NY", "Apples");
        assert_eq!(history.len(), 2);
        assert!((history[0].price - 3.50).abs() < f64::EPSILON);
        assert!((history[1].price - 3.00).abs() < f64::EPSILON);

        assert_eq!(store.keys().len(), 2);
    }

    #[test]
    fn price_list_matches_substrings_case_insensitively() {
        let store = MemoryPriceStore::with_observations(vec![
            observation("1", "Bronx, NY", "Apples", 3.00, 20),
            observation("2", "Cleveland, OH", "Milk", 4.25, 29),
        ]);

        let hits = store.list(&PriceQuery {
            region: Some("bronx".to_string()),
            item: None,
        });
        assert_eq!(hits.len(), 1);
    }
}
