//! Demo seed data for the in-memory stores.
//!
//! Mirrors the pilot deployment fixtures: New York borough food
//! deserts, a handful of Midwest high-severity zones with demographic
//! counts, two sample donors, and a short price history per region.
//! Expiry dates are relative to the supplied `now` so the matchmaking
//! demo stays meaningful regardless of when the server starts.

use chrono::{DateTime, Duration, Utc};
use refeed_food_models::{DesertSeverity, DonorType, FoodCategory, FoodCondition, QuantityUnit};
use refeed_geo::Coordinate;
use refeed_store_models::{Demographics, Donation, Donor, PriceObservation, RecipientLocation};

/// Builds a coordinate from components known to be valid.
fn coord(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).expect("seed coordinate out of range")
}

/// Seed donors: a Bronx supermarket and a Brooklyn restaurant.
#[must_use]
pub fn donors(now: DateTime<Utc>) -> Vec<Donor> {
    vec![
        Donor {
            id: "donor-1".to_string(),
            name: "Fresh Market Co.".to_string(),
            donor_type: DonorType::Supermarket,
            location: coord(40.8176, -73.9282),
            address: "123 Grand Concourse, Bronx, NY".to_string(),
            phone: Some("+1-718-555-0101".to_string()),
            email: Some("donations@freshmarket.example".to_string()),
            is_active: true,
            registered_at: now - Duration::days(90),
        },
        Donor {
            id: "donor-2".to_string(),
            name: "Borough Bakehouse".to_string(),
            donor_type: DonorType::Restaurant,
            location: coord(40.6892, -73.9441),
            address: "87 Fulton St, Brooklyn, NY".to_string(),
            phone: None,
            email: Some("kitchen@bakehouse.example".to_string()),
            is_active: true,
            registered_at: now - Duration::days(30),
        },
    ]
}

/// Seed donations: fresh apples and day-old bread, both unmatched.
#[must_use]
pub fn donations(now: DateTime<Utc>) -> Vec<Donation> {
    vec![
        Donation {
            id: "donation-1".to_string(),
            donor_id: "donor-1".to_string(),
            food_type: "Apples".to_string(),
            category: FoodCategory::Produce,
            condition: FoodCondition::Good,
            quantity: 50.0,
            unit: QuantityUnit::Kg,
            expiry_date: now + Duration::days(2),
            origin: coord(40.8176, -73.9282),
            description: Some("Fresh apples, slight cosmetic imperfections".to_string()),
            is_matched: false,
            created_at: now - Duration::hours(6),
            updated_at: now - Duration::hours(6),
        },
        Donation {
            id: "donation-2".to_string(),
            donor_id: "donor-2".to_string(),
            food_type: "Bread".to_string(),
            category: FoodCategory::Prepared,
            condition: FoodCondition::NearExpiry,
            quantity: 30.0,
            unit: QuantityUnit::Pieces,
            expiry_date: now + Duration::days(1),
            origin: coord(40.6892, -73.9441),
            description: Some("Day-old bread, perfect for immediate distribution".to_string()),
            is_matched: false,
            created_at: now - Duration::days(1),
            updated_at: now - Duration::days(1),
        },
    ]
}

/// Seed recipient zones.
///
/// The New York zones carry only population; the Midwest pilot zones
/// carry full demographics and climate zones so the farming
/// recommendations have something to work with.
#[must_use]
pub fn recipients(now: DateTime<Utc>) -> Vec<RecipientLocation> {
    let created = now - Duration::days(365);
    vec![
        RecipientLocation {
            id: "desert-south-bronx".to_string(),
            name: "South Bronx".to_string(),
            location: coord(40.8176, -73.9482),
            severity: DesertSeverity::High,
            population: Some(45000),
            demographics: None,
            climate_zone: Some("temperate".to_string()),
            created_at: created,
        },
        RecipientLocation {
            id: "desert-east-harlem".to_string(),
            name: "East Harlem".to_string(),
            location: coord(40.7949, -73.9320),
            severity: DesertSeverity::High,
            population: Some(38000),
            demographics: None,
            climate_zone: Some("temperate".to_string()),
            created_at: created,
        },
        RecipientLocation {
            id: "desert-bed-stuy".to_string(),
            name: "Bedford-Stuyvesant".to_string(),
            location: coord(40.6892, -73.9341),
            severity: DesertSeverity::High,
            population: Some(52000),
            demographics: None,
            climate_zone: Some("temperate".to_string()),
            created_at: created,
        },
        RecipientLocation {
            id: "desert-central-islip".to_string(),
            name: "Central Islip".to_string(),
            location: coord(40.7831, -73.1909),
            severity: DesertSeverity::Medium,
            population: Some(21000),
            demographics: None,
            climate_zone: Some("temperate".to_string()),
            created_at: created,
        },
        RecipientLocation {
            id: "desert-detroit-downtown".to_string(),
            name: "Detroit Downtown".to_string(),
            location: coord(42.3314, -83.0458),
            severity: DesertSeverity::High,
            population: Some(12500),
            demographics: Some(Demographics {
                children: 2800,
                seniors: 1900,
                households: 4200,
            }),
            climate_zone: Some("continental".to_string()),
            created_at: created,
        },
        RecipientLocation {
            id: "desert-chicago-south".to_string(),
            name: "Chicago South Side".to_string(),
            location: coord(41.8781, -87.6298),
            severity: DesertSeverity::High,
            population: Some(18000),
            demographics: Some(Demographics {
                children: 4200,
                seniors: 2100,
                households: 6800,
            }),
            climate_zone: Some("continental".to_string()),
            created_at: created,
        },
        RecipientLocation {
            id: "desert-south-phoenix".to_string(),
            name: "South Phoenix".to_string(),
            location: coord(33.4484, -112.0740),
            severity: DesertSeverity::High,
            population: Some(22000),
            demographics: Some(Demographics {
                children: 5800,
                seniors: 2200,
                households: 8400,
            }),
            climate_zone: Some("hot_arid".to_string()),
            created_at: created,
        },
        RecipientLocation {
            id: "source-hunts-point".to_string(),
            name: "Hunts Point Market".to_string(),
            location: coord(40.8089, -73.8800),
            severity: DesertSeverity::FoodSource,
            population: None,
            demographics: None,
            climate_zone: None,
            created_at: created,
        },
    ]
}

/// Seed price observations: apples trending up in the Bronx (below the
/// alert threshold) and a milk spike in Cleveland (above it).
#[must_use]
pub fn prices(now: DateTime<Utc>) -> Vec<PriceObservation> {
    let obs = |id: &str, region: &str, item: &str, price: f64, currency: &str, unit: &str, days_ago: i64| PriceObservation {
        id: id.to_string(),
        region: region.to_string(),
        item: item.to_string(),
        price,
        currency: currency.to_string(),
        unit: unit.to_string(),
        observed_at: now - Duration::days(days_ago),
        recorded_at: now - Duration::days(days_ago),
    };
    vec![
        obs("price-1", "Bronx, NY", "Apples", 3.00, "USD", "per lb", 9),
        obs("price-2", "Bronx, NY", "Apples", 3.50, "USD", "per lb", 2),
        obs("price-3", "Cleveland, OH", "Milk", 3.40, "USD", "per gallon", 10),
        obs("price-4", "Cleveland, OH", "Milk", 4.25, "USD", "per gallon", 1),
        obs("price-5", "Kigali", "Maize", 850.0, "RWF", "per kg", 3),
    ]
}

#[cfg(test)]
mod tests {
    use refeed_store_models::DonationQuery;

    use crate::memory::{MemoryDonationStore, MemoryRecipientStore};
    use crate::{DonationStore as _, RecipientStore as _};

    use super::*;

    #[test]
    fn seed_donations_are_unmatched() {
        let now = Utc::now();
        let store = MemoryDonationStore::with_donations(donations(now));
        let unmatched = store.list(&DonationQuery {
            is_matched: Some(false),
            ..DonationQuery::default()
        });
        assert_eq!(unmatched.len(), 2);
    }

    #[test]
    fn seed_recipients_include_demographics_for_pilot_zones() {
        let now = Utc::now();
        let store = MemoryRecipientStore::with_recipients(recipients(now));
        let detroit = store.get("desert-detroit-downtown").unwrap();
        assert_eq!(detroit.demographics.unwrap().children, 2800);
        assert_eq!(detroit.climate_zone.as_deref(), Some("continental"));
    }

    #[test]
    fn seed_prices_cover_multiple_keys() {
        let now = Utc::now();
        let all = prices(now);
        assert!(all.iter().any(|o| o.region == "Kigali"));
        assert!(all.iter().any(|o| o.region == "Cleveland, OH"));
    }
}
