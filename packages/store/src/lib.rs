#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Store traits and in-memory implementations.
//!
//! The matching engine and the API handlers depend on these traits, not
//! on a concrete backend, so unit tests can inject fixture data and a
//! future database backend can slot in without touching the core logic.
//! The bundled [`memory`] implementations keep everything behind
//! `RwLock`s and are the only backend shipped today.

pub mod memory;
pub mod seed;

use refeed_store_models::{
    Donation, DonationQuery, Donor, MatchQuery, MatchRecord, PriceObservation, PriceQuery,
    RecipientLocation,
};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with the given ID exists.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record kind (e.g. "donation").
        kind: &'static str,
        /// The ID that was looked up.
        id: String,
    },
}

impl StoreError {
    /// Convenience constructor for a [`StoreError::NotFound`].
    #[must_use]
    pub fn not_found(kind: &'static str, id: &str) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// Access to registered donors.
pub trait DonorStore: Send + Sync {
    /// Lists all donors.
    fn list(&self) -> Vec<Donor>;

    /// Fetches a single donor by ID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no donor has that ID.
    fn get(&self, id: &str) -> Result<Donor, StoreError>;

    /// Inserts a new donor.
    fn insert(&self, donor: Donor);
}

/// Access to logged donations.
pub trait DonationStore: Send + Sync {
    /// Lists donations matching the query filters.
    fn list(&self, query: &DonationQuery) -> Vec<Donation>;

    /// Fetches a single donation by ID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no donation has that ID.
    fn get(&self, id: &str) -> Result<Donation, StoreError>;

    /// Inserts a new donation.
    fn insert(&self, donation: Donation);

    /// Atomically flips `is_matched` on the donation.
    ///
    /// Returns `true` if the flag was flipped, `false` if it was
    /// already set. The check and the write happen under one lock so
    /// two concurrent commits cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no donation has that ID.
    fn mark_matched(&self, id: &str) -> Result<bool, StoreError>;
}

/// Access to recipient zones (food deserts and demand locations).
pub trait RecipientStore: Send + Sync {
    /// Lists all recipient zones.
    fn list(&self) -> Vec<RecipientLocation>;

    /// Fetches a single zone by ID.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no zone has that ID.
    fn get(&self, id: &str) -> Result<RecipientLocation, StoreError>;

    /// Inserts a new zone.
    fn insert(&self, recipient: RecipientLocation);
}

/// Access to committed match records.
pub trait MatchStore: Send + Sync {
    /// Lists matches matching the query filters.
    fn list(&self, query: &MatchQuery) -> Vec<MatchRecord>;

    /// Inserts a committed match.
    fn insert(&self, record: MatchRecord);
}

/// Access to recorded price observations.
pub trait PriceStore: Send + Sync {
    /// Lists observations matching the query filters.
    fn list(&self, query: &PriceQuery) -> Vec<PriceObservation>;

    /// Inserts a new observation.
    fn insert(&self, observation: PriceObservation);

    /// Returns observations for an exact (region, item) key, most
    /// recent first by observation time.
    fn history(&self, region: &str, item: &str) -> Vec<PriceObservation>;

    /// Returns all distinct (region, item) keys with at least one
    /// observation.
    fn keys(&self) -> Vec<(String, String)>;
}
