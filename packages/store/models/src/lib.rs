#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Domain record types and store query parameter definitions.
//!
//! These types represent donations, donors, recipient zones, committed
//! matches, and price observations as held by the stores. They are
//! distinct from the API response types in `refeed_server_models`,
//! which evolve independently of the storage shapes.

use chrono::{DateTime, Utc};
use refeed_food_models::{
    DesertSeverity, DonorType, FoodCategory, FoodCondition, MatchPriority, MatchStatus,
    QuantityUnit,
};
use refeed_geo::Coordinate;
use serde::{Deserialize, Serialize};

/// A registered food donor (store, farm, distributor, or restaurant).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    /// Unique donor ID.
    pub id: String,
    /// Organization name.
    pub name: String,
    /// Kind of donor organization.
    pub donor_type: DonorType,
    /// Pickup location.
    pub location: Coordinate,
    /// Street address for drivers.
    pub address: String,
    /// Contact phone, if provided.
    pub phone: Option<String>,
    /// Contact email, if provided.
    pub email: Option<String>,
    /// Whether the donor is currently active.
    pub is_active: bool,
    /// When the donor registered.
    pub registered_at: DateTime<Utc>,
}

/// A logged food donation awaiting (or holding) a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    /// Unique donation ID.
    pub id: String,
    /// Donor that logged this donation.
    pub donor_id: String,
    /// Free-text food description (e.g. "Apples").
    pub food_type: String,
    /// Taxonomy category.
    pub category: FoodCategory,
    /// Condition grade at intake.
    pub condition: FoodCondition,
    /// Quantity in `unit`s.
    pub quantity: f64,
    /// Unit of measure for `quantity`.
    pub unit: QuantityUnit,
    /// When the food expires.
    pub expiry_date: DateTime<Utc>,
    /// Pickup origin. Defaults to the donor's location at intake.
    pub origin: Coordinate,
    /// Optional intake notes.
    pub description: Option<String>,
    /// Whether a committed match exists for this donation.
    pub is_matched: bool,
    /// When the donation was logged.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// A recipient zone: a food desert or other demand location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientLocation {
    /// Unique zone ID.
    pub id: String,
    /// Human-readable zone name (e.g. "South Bronx").
    pub name: String,
    /// Representative point for distance calculations.
    pub location: Coordinate,
    /// Access-gap severity tier.
    pub severity: DesertSeverity,
    /// Resident population, when known.
    pub population: Option<u32>,
    /// Resident demographics, when known.
    pub demographics: Option<Demographics>,
    /// USDA climate/region zone name for farming suitability
    /// (e.g. "temperate", "subtropical").
    pub climate_zone: Option<String>,
    /// When the zone record was created.
    pub created_at: DateTime<Utc>,
}

/// Demographic counts for a recipient zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    /// Residents under 18.
    pub children: u32,
    /// Residents 65 and older.
    pub seniors: u32,
    /// Household count.
    pub households: u32,
}

/// A committed pairing of a donation with a recipient zone.
///
/// Candidates produced by the engine are *not* records; only an
/// explicit create persists one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    /// Unique match ID.
    pub id: String,
    /// The matched donation.
    pub donation_id: String,
    /// The receiving zone.
    pub recipient_id: String,
    /// Great-circle pickup-to-zone distance in kilometers.
    pub distance_km: f64,
    /// Urgency tier at commit time.
    pub priority: MatchPriority,
    /// Lifecycle status.
    pub status: MatchStatus,
    /// When the match was committed.
    pub matched_at: DateTime<Utc>,
    /// Scheduled delivery time, when set.
    pub estimated_delivery: Option<DateTime<Utc>>,
}

/// A recorded market price for an item in a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceObservation {
    /// Unique observation ID.
    pub id: String,
    /// Region key (e.g. "Bronx, NY").
    pub region: String,
    /// Item key (e.g. "Apples").
    pub item: String,
    /// Observed price in `currency` units.
    pub price: f64,
    /// ISO currency code (e.g. "USD").
    pub currency: String,
    /// Unit the price applies to (e.g. "per lb").
    pub unit: String,
    /// When the price was observed.
    pub observed_at: DateTime<Utc>,
    /// When the observation was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Filters for querying donations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationQuery {
    /// Restrict to a single donor.
    pub donor_id: Option<String>,
    /// Filter by matched state (`None` = don't filter).
    pub is_matched: Option<bool>,
    /// Filter by taxonomy category.
    pub category: Option<FoodCategory>,
}

/// Filters for querying committed matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchQuery {
    /// Filter by lifecycle status.
    pub status: Option<MatchStatus>,
    /// Filter by urgency tier.
    pub priority: Option<MatchPriority>,
    /// Restrict to matches of one donation.
    pub donation_id: Option<String>,
}

/// Filters for querying price observations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuery {
    /// Case-insensitive region substring.
    pub region: Option<String>,
    /// Case-insensitive item substring.
    pub item: Option<String>,
}
