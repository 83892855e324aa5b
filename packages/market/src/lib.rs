#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Price spike detection.
//!
//! A spike is a relation over the two most recent observations for a
//! (region, item) key, not a stored entity: it is recomputed from the
//! price store on demand. The matchmaking engine treats an active spike
//! in a recipient's region as a priority signal.

use chrono::{DateTime, Utc};
use refeed_store::PriceStore;
use refeed_store_models::PriceObservation;
use serde::{Deserialize, Serialize};

/// Default relative increase (percent) that counts as a spike.
pub const DEFAULT_SPIKE_THRESHOLD_PCT: f64 = 20.0;

/// A detected price spike for one (region, item) key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSpike {
    /// Region key (e.g. "Bronx, NY").
    pub region: String,
    /// Item key (e.g. "Apples").
    pub item: String,
    /// Most recent observed price.
    pub current_price: f64,
    /// Previous observed price.
    pub previous_price: f64,
    /// Relative increase in percent.
    pub percentage_increase: f64,
    /// Observation time of the most recent price.
    pub observed_at: DateTime<Utc>,
}

/// Returns whether the two most recent observations constitute a spike
/// above `threshold_pct`.
///
/// `observations` must be ordered most recent first (the order
/// [`PriceStore::history`] returns). With fewer than two observations
/// no spike is determinable, and a previous price of zero is treated as
/// no spike rather than dividing by zero.
#[must_use]
pub fn detect_spike(observations: &[PriceObservation], threshold_pct: f64) -> bool {
    spike_between(observations).is_some_and(|pct| pct > threshold_pct)
}

/// Relative increase in percent between the two most recent
/// observations, or `None` when it cannot be computed.
fn spike_between(observations: &[PriceObservation]) -> Option<f64> {
    let [latest, previous, ..] = observations else {
        return None;
    };
    if previous.price == 0.0 {
        return None;
    }
    Some((latest.price - previous.price) / previous.price * 100.0)
}

/// Scans every (region, item) key in the store and returns a report for
/// each key whose latest movement exceeds `threshold_pct`.
pub fn scan_spikes(store: &dyn PriceStore, threshold_pct: f64) -> Vec<PriceSpike> {
    let mut spikes = Vec::new();
    for (region, item) in store.keys() {
        let history = store.history(&region, &item);
        let Some(pct) = spike_between(&history) else {
            continue;
        };
        if pct > threshold_pct {
            log::warn!(
                "price spike: {item} in {region} up {pct:.1}% ({} -> {})",
                history[1].price,
                history[0].price
            );
            spikes.push(PriceSpike {
                region,
                item,
                current_price: history[0].price,
                previous_price: history[1].price,
                percentage_increase: pct,
                observed_at: history[0].observed_at,
            });
        }
    }
    spikes
}

/// Whether any detected spike applies to the given region or zone name.
///
/// Spike regions are keyed like "Bronx, NY" while recipient zones are
/// named like "South Bronx", so the comparison uses the spike's primary
/// locality (the part before the comma) and matches on containment in
/// either direction.
#[must_use]
pub fn region_has_spike(spikes: &[PriceSpike], region: &str) -> bool {
    let region = region.to_lowercase();
    spikes.iter().any(|s| {
        let locality = s
            .region
            .split(',')
            .next()
            .unwrap_or(&s.region)
            .trim()
            .to_lowercase();
        !locality.is_empty() && (region.contains(&locality) || locality.contains(&region))
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone as _};
    use refeed_store::memory::MemoryPriceStore;

    use super::*;

    fn obs(region: &str, item: &str, price: f64, days_ago: i64) -> PriceObservation {
        let base = Utc.with_ymd_and_hms(2025, 6, 29, 12, 0, 0).unwrap();
        PriceObservation {
            id: format!("{region}-{item}-{days_ago}"),
            region: region.to_string(),
            item: item.to_string(),
            price,
            currency: "USD".to_string(),
            unit: "per lb".to_string(),
            observed_at: base - Duration::days(days_ago),
            recorded_at: base - Duration::days(days_ago),
        }
    }

    #[test]
    fn fewer_than_two_observations_is_no_spike() {
        assert!(!detect_spike(&[], DEFAULT_SPIKE_THRESHOLD_PCT));
        assert!(!detect_spike(
            &[obs("Bronx, NY", "Apples", 3.50, 0)],
            DEFAULT_SPIKE_THRESHOLD_PCT
        ));
    }

    #[test]
    fn zero_previous_price_is_no_spike() {
        let history = vec![
            obs("Bronx, NY", "Apples", 3.50, 0),
            obs("Bronx, NY", "Apples", 0.0, 5),
        ];
        assert!(!detect_spike(&history, DEFAULT_SPIKE_THRESHOLD_PCT));
    }

    #[test]
    fn twenty_one_percent_spikes_but_fifteen_does_not() {
        let spiking = vec![
            obs("Bronx, NY", "Apples", 121.0, 0),
            obs("Bronx, NY", "Apples", 100.0, 5),
        ];
        assert!(detect_spike(&spiking, DEFAULT_SPIKE_THRESHOLD_PCT));

        let calm = vec![
            obs("Bronx, NY", "Apples", 115.0, 0),
            obs("Bronx, NY", "Apples", 100.0, 5),
        ];
        assert!(!detect_spike(&calm, DEFAULT_SPIKE_THRESHOLD_PCT));
    }

    #[test]
    fn price_drops_never_spike() {
        let history = vec![
            obs("Bronx, NY", "Apples", 2.00, 0),
            obs("Bronx, NY", "Apples", 3.00, 5),
        ];
        assert!(!detect_spike(&history, DEFAULT_SPIKE_THRESHOLD_PCT));
    }

    #[test]
    fn scan_reports_only_spiking_keys() {
        let store = MemoryPriceStore::with_observations(vec![
            obs("Cleveland, OH", "Milk", 3.40, 10),
            obs("Cleveland, OH", "Milk", 4.25, 1),
            obs("Bronx, NY", "Apples", 3.00, 9),
            obs("Bronx, NY", "Apples", 3.50, 2),
        ]);

        let spikes = scan_spikes(&store, DEFAULT_SPIKE_THRESHOLD_PCT);
        assert_eq!(spikes.len(), 1);
        assert_eq!(spikes[0].region, "Cleveland, OH");
        assert!(spikes[0].percentage_increase > 20.0);
    }

    #[test]
    fn region_spike_matching_is_substring_both_ways() {
        let spikes = vec![PriceSpike {
            region: "Bronx, NY".to_string(),
            item: "Apples".to_string(),
            current_price: 4.0,
            previous_price: 3.0,
            percentage_increase: 33.3,
            observed_at: Utc.with_ymd_and_hms(2025, 6, 29, 0, 0, 0).unwrap(),
        }];
        assert!(region_has_spike(&spikes, "Bronx"));
        assert!(region_has_spike(&spikes, "South Bronx"));
        assert!(!region_has_spike(&spikes, "Cleveland"));
    }
}
