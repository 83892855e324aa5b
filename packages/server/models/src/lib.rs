#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the ReFeed server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the record types in `refeed_store_models` to allow independent
//! evolution of the API contract.

use chrono::{DateTime, Utc};
use refeed_food_models::{
    DesertSeverity, DonorType, FoodCategory, FoodCondition, MatchPriority, MatchStatus,
    QuantityUnit,
};
use refeed_store_models::{Demographics, Donation, Donor, MatchRecord, RecipientLocation};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// A food category entry returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCategory {
    /// Category name.
    pub name: String,
    /// Whether donations in this category are time-sensitive.
    pub perishable: bool,
}

/// A registered donor as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDonor {
    /// Unique donor ID.
    pub id: String,
    /// Business name.
    pub name: String,
    /// Kind of donor business.
    pub donor_type: DonorType,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Street address.
    pub address: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Whether the donor currently accepts pickups.
    pub is_active: bool,
    /// When the donor registered (ISO 8601).
    pub registered_at: DateTime<Utc>,
}

impl From<Donor> for ApiDonor {
    fn from(donor: Donor) -> Self {
        Self {
            id: donor.id,
            name: donor.name,
            donor_type: donor.donor_type,
            latitude: donor.location.lat,
            longitude: donor.location.lng,
            address: donor.address,
            phone: donor.phone,
            email: donor.email,
            is_active: donor.is_active,
            registered_at: donor.registered_at,
        }
    }
}

/// Request body for registering a donor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDonorRequest {
    /// Business name.
    pub name: String,
    /// Kind of donor business.
    pub donor_type: DonorType,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Street address.
    pub address: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Contact email.
    pub email: Option<String>,
}

/// A logged donation as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDonation {
    /// Unique donation ID.
    pub id: String,
    /// The donor who logged it.
    pub donor_id: String,
    /// Free-text food description (e.g. "Apples").
    pub food_type: String,
    /// Food category.
    pub category: FoodCategory,
    /// Condition of the food.
    pub condition: FoodCondition,
    /// Quantity in `unit`.
    pub quantity: f64,
    /// Unit of measure.
    pub unit: QuantityUnit,
    /// When the food expires (ISO 8601).
    pub expiry_date: DateTime<Utc>,
    /// Pickup latitude.
    pub latitude: f64,
    /// Pickup longitude.
    pub longitude: f64,
    /// Optional free-text notes.
    pub description: Option<String>,
    /// Whether the donation has been committed to a match.
    pub is_matched: bool,
    /// When the donation was logged.
    pub created_at: DateTime<Utc>,
}

impl From<Donation> for ApiDonation {
    fn from(donation: Donation) -> Self {
        Self {
            id: donation.id,
            donor_id: donation.donor_id,
            food_type: donation.food_type,
            category: donation.category,
            condition: donation.condition,
            quantity: donation.quantity,
            unit: donation.unit,
            expiry_date: donation.expiry_date,
            latitude: donation.origin.lat,
            longitude: donation.origin.lng,
            description: donation.description,
            is_matched: donation.is_matched,
            created_at: donation.created_at,
        }
    }
}

/// Request body for logging a donation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDonationRequest {
    /// The donor logging the donation.
    pub donor_id: String,
    /// Free-text food description.
    pub food_type: String,
    /// Food category.
    pub category: FoodCategory,
    /// Condition of the food.
    pub condition: FoodCondition,
    /// Quantity in `unit`.
    pub quantity: f64,
    /// Unit of measure.
    pub unit: QuantityUnit,
    /// When the food expires (ISO 8601).
    pub expiry_date: DateTime<Utc>,
    /// Pickup latitude; defaults to the donor's location when omitted.
    pub latitude: Option<f64>,
    /// Pickup longitude; defaults to the donor's location when omitted.
    pub longitude: Option<f64>,
    /// Optional free-text notes.
    pub description: Option<String>,
}

/// Query parameters for the donations endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationQueryParams {
    /// Filter to one donor.
    pub donor_id: Option<String>,
    /// Filter by matched state.
    pub matched: Option<bool>,
    /// Filter by food category.
    pub category: Option<FoodCategory>,
}

/// A recipient zone as returned by the food deserts endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFoodDesert {
    /// Unique zone ID.
    pub id: String,
    /// Zone name.
    pub name: String,
    /// Latitude of the zone's representative point.
    pub latitude: f64,
    /// Longitude of the zone's representative point.
    pub longitude: f64,
    /// Severity tier name.
    pub severity: DesertSeverity,
    /// Severity numeric value (0-3).
    pub severity_value: u8,
    /// Resident population, when known.
    pub population: Option<u32>,
    /// Demographic counts, when known.
    pub demographics: Option<Demographics>,
    /// Climate zone name, when known.
    pub climate_zone: Option<String>,
}

impl From<RecipientLocation> for ApiFoodDesert {
    fn from(zone: RecipientLocation) -> Self {
        Self {
            id: zone.id,
            name: zone.name,
            latitude: zone.location.lat,
            longitude: zone.location.lng,
            severity: zone.severity,
            severity_value: zone.severity.value(),
            population: zone.population,
            demographics: zone.demographics,
            climate_zone: zone.climate_zone,
        }
    }
}

/// Query parameters for the food deserts endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodDesertQueryParams {
    /// Minimum severity value (0-3).
    pub severity_min: Option<u8>,
}

/// Request body for recording a price observation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPriceRequest {
    /// Region key (e.g. "Bronx, NY").
    pub region: String,
    /// Item key (e.g. "Apples").
    pub item: String,
    /// Observed price.
    pub price: f64,
    /// Currency code; defaults to USD.
    pub currency: Option<String>,
    /// Pricing unit (e.g. "per lb"); defaults to "per unit".
    pub unit: Option<String>,
    /// When the price was observed; defaults to the time of the request.
    pub observed_at: Option<DateTime<Utc>>,
}

/// Query parameters for the prices endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQueryParams {
    /// Filter by region key.
    pub region: Option<String>,
    /// Filter by item key.
    pub item: Option<String>,
}

/// A committed match as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMatch {
    /// Unique match ID.
    pub id: String,
    /// The matched donation.
    pub donation_id: String,
    /// The recipient zone.
    pub recipient_id: String,
    /// Great-circle distance in kilometers.
    pub distance_km: f64,
    /// Urgency tier name.
    pub priority: MatchPriority,
    /// Urgency numeric value (1-3).
    pub priority_value: u8,
    /// Lifecycle status.
    pub status: MatchStatus,
    /// When the match was committed.
    pub matched_at: DateTime<Utc>,
    /// Expected delivery time, when scheduled.
    pub estimated_delivery: Option<DateTime<Utc>>,
}

impl From<MatchRecord> for ApiMatch {
    fn from(record: MatchRecord) -> Self {
        Self {
            id: record.id,
            donation_id: record.donation_id,
            recipient_id: record.recipient_id,
            distance_km: record.distance_km,
            priority: record.priority,
            priority_value: record.priority.value(),
            status: record.status,
            matched_at: record.matched_at,
            estimated_delivery: record.estimated_delivery,
        }
    }
}

/// Query parameters for the matches endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchQueryParams {
    /// Filter by lifecycle status.
    pub status: Option<MatchStatus>,
    /// Filter by urgency tier.
    pub priority: Option<MatchPriority>,
    /// Filter to one donation.
    pub donation_id: Option<String>,
}

/// Request body for committing a match.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    /// The donation to commit.
    pub donation_id: String,
    /// The recipient zone to commit it to.
    pub recipient_id: String,
    /// Urgency tier for the committed match.
    pub priority: MatchPriority,
}

/// Query parameters for the crop recommendations endpoint.
///
/// Either `recipientId` (zone conditions are looked up from the store)
/// or explicit zone conditions.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationQueryParams {
    /// Recipient zone to recommend for.
    pub recipient_id: Option<String>,
    /// Climate zone name (e.g. "continental").
    pub climate_zone: Option<String>,
    /// Resident population.
    pub population: Option<u32>,
    /// Number of children.
    pub children: Option<u32>,
    /// Number of seniors.
    pub seniors: Option<u32>,
    /// Number of households.
    pub households: Option<u32>,
}

#[cfg(test)]
mod tests {
    use refeed_geo::Coordinate;

    use super::*;

    #[test]
    fn donor_conversion_flattens_location() {
        let donor = Donor {
            id: "donor-1".to_string(),
            name: "Fresh Market Co.".to_string(),
            donor_type: DonorType::Supermarket,
            location: Coordinate::new(40.8176, -73.9282).unwrap(),
            address: "123 Main St".to_string(),
            phone: None,
            email: Some("contact@freshmarket.example".to_string()),
            is_active: true,
            registered_at: Utc::now(),
        };

        let api = ApiDonor::from(donor);
        assert!((api.latitude - 40.8176).abs() < f64::EPSILON);
        assert!((api.longitude - -73.9282).abs() < f64::EPSILON);

        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(json["donorType"], "SUPERMARKET");
        assert_eq!(json["isActive"], true);
    }

    #[test]
    fn match_conversion_carries_priority_value() {
        let record = MatchRecord {
            id: "match-1".to_string(),
            donation_id: "donation-1".to_string(),
            recipient_id: "recipient-1".to_string(),
            distance_km: 1.68,
            priority: MatchPriority::High,
            status: MatchStatus::Pending,
            matched_at: Utc::now(),
            estimated_delivery: None,
        };

        let api = ApiMatch::from(record);
        assert_eq!(api.priority_value, 3);

        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(json["priority"], "HIGH");
        assert_eq!(json["status"], "PENDING");
    }

    #[test]
    fn query_params_deserialize_from_camel_case() {
        let params: DonationQueryParams =
            serde_json::from_str(r#"{"donorId":"donor-1","matched":false}"#).unwrap();
        assert_eq!(params.donor_id.as_deref(), Some("donor-1"));
        assert_eq!(params.matched, Some(false));
        assert!(params.category.is_none());
    }
}
