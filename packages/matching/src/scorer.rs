//! Priority tiers and desirability scores for candidate pairings.
//!
//! The priority rules are the canonical set used by the scheduled
//! matchmaking run; an earlier ad-hoc variant with slightly different
//! distance cutoffs is superseded by these.

use chrono::{DateTime, Utc};
use refeed_food_models::MatchPriority;
use refeed_store_models::Donation;

/// Pairs closer than this are always high priority.
const HIGH_DISTANCE_KM: f64 = 2.0;
/// Pairs closer than this are high priority when the recipient region
/// has an active price spike.
const SPIKE_DISTANCE_KM: f64 = 5.0;
/// Pairs closer than this are at least medium priority.
const MEDIUM_DISTANCE_KM: f64 = 7.0;

/// The scorer's verdict for one candidate pairing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchAssessment {
    /// Urgency tier.
    pub priority: MatchPriority,
    /// Desirability score used for ranking candidates. Higher is
    /// better; never negative.
    pub score: f64,
}

/// Whole days until the expiry timestamp, rounded up.
///
/// A donation expiring later today counts as 1 day; an expired one
/// yields zero or a negative count.
#[must_use]
pub fn days_until_expiry(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (expiry - now).num_seconds();
    seconds.div_euclid(86_400) + i64::from(seconds.rem_euclid(86_400) > 0)
}

/// Scores a donation against a recipient at the given distance.
///
/// Priority (first rule wins):
/// 1. expires within 1 day
/// 2. closer than 2 km
/// 3. recipient region has a price spike and closer than 5 km
/// 4. expires within 3 days
/// 5. closer than 7 km
/// 6. otherwise low
///
/// The numeric score ranks candidates within a priority tier and
/// across donations; it starts at 100, loses 5 per km, and gains
/// bonuses for imminent expiry and large quantities.
#[must_use]
pub fn score(
    donation: &Donation,
    distance_km: f64,
    has_price_spike: bool,
    now: DateTime<Utc>,
) -> MatchAssessment {
    let days_left = days_until_expiry(donation.expiry_date, now);

    let priority = if days_left <= 1 || distance_km < HIGH_DISTANCE_KM {
        MatchPriority::High
    } else if has_price_spike && distance_km < SPIKE_DISTANCE_KM {
        MatchPriority::High
    } else if days_left <= 3 || distance_km < MEDIUM_DISTANCE_KM {
        MatchPriority::Medium
    } else {
        MatchPriority::Low
    };

    let mut score = 100.0 - distance_km * 5.0;
    score += match days_left {
        ..=1 => 50.0,
        2..=3 => 30.0,
        4..=7 => 10.0,
        _ => 0.0,
    };
    if donation.quantity > 100.0 {
        score += 10.0;
    } else if donation.quantity > 50.0 {
        score += 5.0;
    }

    MatchAssessment {
        priority,
        score: score.max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone as _};
    use refeed_food_models::{FoodCategory, FoodCondition, QuantityUnit};
    use refeed_geo::Coordinate;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 29, 12, 0, 0).unwrap()
    }

    fn donation(expiry_days: i64, quantity: f64) -> Donation {
        Donation {
            id: "donation-1".to_string(),
            donor_id: "donor-1".to_string(),
            food_type: "Apples".to_string(),
            category: FoodCategory::Produce,
            condition: FoodCondition::Good,
            quantity,
            unit: QuantityUnit::Kg,
            expiry_date: now() + Duration::days(expiry_days),
            origin: Coordinate::new(40.8176, -73.9282).unwrap(),
            description: None,
            is_matched: false,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn expiry_days_round_up() {
        assert_eq!(days_until_expiry(now() + Duration::hours(6), now()), 1);
        assert_eq!(days_until_expiry(now() + Duration::hours(30), now()), 2);
        assert_eq!(days_until_expiry(now(), now()), 0);
        assert_eq!(days_until_expiry(now() - Duration::hours(30), now()), -1);
    }

    #[test]
    fn imminent_expiry_is_high_regardless_of_distance() {
        let assessment = score(&donation(1, 10.0), 9.5, false, now());
        assert_eq!(assessment.priority, MatchPriority::High);
    }

    #[test]
    fn close_distance_is_high_priority() {
        let assessment = score(&donation(10, 10.0), 0.5, false, now());
        assert_eq!(assessment.priority, MatchPriority::High);
    }

    #[test]
    fn spike_promotes_nearby_pairs() {
        let calm = score(&donation(10, 10.0), 4.0, false, now());
        assert_eq!(calm.priority, MatchPriority::Medium);

        let spiking = score(&donation(10, 10.0), 4.0, true, now());
        assert_eq!(spiking.priority, MatchPriority::High);
    }

    #[test]
    fn spike_does_not_promote_distant_pairs() {
        let assessment = score(&donation(10, 10.0), 6.0, true, now());
        assert_eq!(assessment.priority, MatchPriority::Medium);
    }

    #[test]
    fn far_and_slow_is_low_priority() {
        let assessment = score(&donation(10, 10.0), 8.0, false, now());
        assert_eq!(assessment.priority, MatchPriority::Low);
    }

    #[test]
    fn score_rewards_proximity_urgency_and_quantity() {
        // 100 - 5*2 + 30 (3 days) + 5 (qty > 50)
        let assessment = score(&donation(3, 60.0), 2.0, false, now());
        assert!((assessment.score - 125.0).abs() < 1e-9);

        // Large quantity bonus replaces the small one.
        let bulk = score(&donation(3, 150.0), 2.0, false, now());
        assert!((bulk.score - 130.0).abs() < 1e-9);
    }

    #[test]
    fn score_is_clamped_at_zero() {
        let assessment = score(&donation(30, 1.0), 50.0, false, now());
        assert!((assessment.score - 0.0).abs() < 1e-9);
    }

    #[test]
    fn canonical_bronx_pair_scores_high() {
        // Donation expiring in 2 days, recipient ~1.7 km away.
        let assessment = score(&donation(2, 50.0), 1.7, false, now());
        assert_eq!(assessment.priority, MatchPriority::High);
        assert!(assessment.score > 90.0, "score was {}", assessment.score);
    }
}
