//! The matchmaking engine.
//!
//! `find_candidates` is a pure scan: it never writes. `create_match` is
//! the single mutating operation, and the donation's `is_matched` flag
//! is flipped atomically in the store so a donation can never hold two
//! committed matches. `run_matchmaking` chains the two the way the
//! scheduled job does.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use refeed_food_models::{DesertSeverity, MatchPriority, MatchStatus};
use refeed_geo::{PointIndex, distance_km};
use refeed_market::{PriceSpike, region_has_spike, scan_spikes};
use refeed_store::{DonationStore, MatchStore, PriceStore, RecipientStore};
use refeed_store_models::{DonationQuery, MatchRecord, RecipientLocation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{MatchError, scorer};

/// Tunable engine parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Pairs farther apart than this are never considered.
    pub max_radius_km: f64,
    /// Relative price increase (percent) that counts as a spike.
    pub spike_threshold_pct: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_radius_km: 10.0,
            spike_threshold_pct: refeed_market::DEFAULT_SPIKE_THRESHOLD_PCT,
        }
    }
}

/// A ranked candidate pairing produced by [`MatchEngine::find_candidates`].
///
/// Candidates are computed artifacts; only [`MatchEngine::create_match`]
/// persists one as a [`MatchRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    /// The unmatched donation.
    pub donation_id: String,
    /// The candidate recipient zone.
    pub recipient_id: String,
    /// Zone name, for display.
    pub recipient_name: String,
    /// Food description, for display.
    pub food_type: String,
    /// Great-circle distance in kilometers.
    pub distance_km: f64,
    /// Urgency tier.
    pub priority: MatchPriority,
    /// Ranking score (higher is better).
    pub score: f64,
    /// Whether a price spike in the zone's region contributed.
    pub price_spike: bool,
}

/// Summary of one scheduled matchmaking run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchmakingReport {
    /// Matches committed this run.
    pub new_matches: u32,
    /// Price spikes active during the run.
    pub price_alerts: u32,
    /// Unmatched donations examined.
    pub processed_donations: u32,
}

/// Scans donations against recipient zones and commits matches.
///
/// Stores are injected so tests run against fixture data and the API
/// layer shares one engine across requests.
pub struct MatchEngine {
    donations: Arc<dyn DonationStore>,
    recipients: Arc<dyn RecipientStore>,
    matches: Arc<dyn MatchStore>,
    prices: Arc<dyn PriceStore>,
    config: EngineConfig,
}

impl MatchEngine {
    /// Creates an engine over the given stores.
    #[must_use]
    pub fn new(
        donations: Arc<dyn DonationStore>,
        recipients: Arc<dyn RecipientStore>,
        matches: Arc<dyn MatchStore>,
        prices: Arc<dyn PriceStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            donations,
            recipients,
            matches,
            prices,
            config,
        }
    }

    /// Returns the engine configuration.
    #[must_use]
    pub const fn config(&self) -> EngineConfig {
        self.config
    }

    /// Finds ranked candidate pairings for every unmatched donation.
    ///
    /// Recipients beyond `max_radius_km` are pruned via the spatial
    /// index before exact scoring. The result is sorted descending by
    /// score; ties keep input order, so a fixed store state always
    /// yields the same ordering. Zones marked [`DesertSeverity::FoodSource`]
    /// are reference markers, not demand zones, and are skipped.
    #[must_use]
    pub fn find_candidates(&self, now: DateTime<Utc>) -> Vec<MatchCandidate> {
        let spikes = scan_spikes(self.prices.as_ref(), self.config.spike_threshold_pct);
        self.find_candidates_with_spikes(&spikes, now)
    }

    fn find_candidates_with_spikes(
        &self,
        spikes: &[PriceSpike],
        now: DateTime<Utc>,
    ) -> Vec<MatchCandidate> {
        let demand_zones: Vec<RecipientLocation> = self
            .recipients
            .list()
            .into_iter()
            .filter(|r| r.severity != DesertSeverity::FoodSource)
            .collect();

        let index = PointIndex::new(
            demand_zones
                .iter()
                .enumerate()
                .map(|(pos, r)| ((pos, r), r.location))
                .collect(),
        );

        let unmatched = self.donations.list(&DonationQuery {
            is_matched: Some(false),
            ..DonationQuery::default()
        });

        let mut candidates = Vec::new();
        for donation in &unmatched {
            let mut nearby = index.within_radius_km(donation.origin, self.config.max_radius_km);
            // The index returns hits in tree order; restore input order
            // so the final stable sort is deterministic.
            nearby.sort_by_key(|((pos, _), _)| *pos);

            for ((_, recipient), distance) in nearby {
                let has_spike = region_has_spike(spikes, &recipient.name);
                let assessment = scorer::score(donation, distance, has_spike, now);
                candidates.push(MatchCandidate {
                    donation_id: donation.id.clone(),
                    recipient_id: recipient.id.clone(),
                    recipient_name: recipient.name.clone(),
                    food_type: donation.food_type.clone(),
                    distance_km: (distance * 100.0).round() / 100.0,
                    priority: assessment.priority,
                    score: assessment.score,
                    price_spike: has_spike,
                });
            }
        }

        // Vec::sort_by is stable: equal scores keep donation/recipient
        // input order.
        candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        candidates
    }

    /// Commits a match between a donation and a recipient zone.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Store`] (not found) for unknown IDs and
    /// [`MatchError::AlreadyMatched`] if the donation already holds a
    /// committed match.
    pub fn create_match(
        &self,
        donation_id: &str,
        recipient_id: &str,
        priority: MatchPriority,
        now: DateTime<Utc>,
    ) -> Result<MatchRecord, MatchError> {
        let donation = self.donations.get(donation_id)?;
        let recipient = self.recipients.get(recipient_id)?;

        if !self.donations.mark_matched(donation_id)? {
            return Err(MatchError::AlreadyMatched {
                donation_id: donation_id.to_string(),
            });
        }

        let record = MatchRecord {
            id: Uuid::new_v4().to_string(),
            donation_id: donation_id.to_string(),
            recipient_id: recipient_id.to_string(),
            distance_km: distance_km(donation.origin, recipient.location),
            priority,
            status: MatchStatus::Pending,
            matched_at: now,
            estimated_delivery: Some(now + Duration::days(1)),
        };
        self.matches.insert(record.clone());

        log::info!(
            "match committed: {} -> {} ({:.1} km, {} priority)",
            donation.food_type,
            recipient.name,
            record.distance_km,
            record.priority
        );
        Ok(record)
    }

    /// Runs one full matchmaking pass: scan spikes, rank candidates,
    /// and commit the best candidate for each donation.
    #[must_use]
    pub fn run_matchmaking(&self, now: DateTime<Utc>) -> MatchmakingReport {
        log::info!("running matchmaking engine");
        let spikes = scan_spikes(self.prices.as_ref(), self.config.spike_threshold_pct);
        let candidates = self.find_candidates_with_spikes(&spikes, now);

        let processed = self
            .donations
            .list(&DonationQuery {
                is_matched: Some(false),
                ..DonationQuery::default()
            })
            .len();

        let mut new_matches = 0;
        for candidate in &candidates {
            // Candidates are score-ordered, so the first one seen for a
            // donation is its best; later ones fail AlreadyMatched.
            match self.create_match(
                &candidate.donation_id,
                &candidate.recipient_id,
                candidate.priority,
                now,
            ) {
                Ok(_) => new_matches += 1,
                Err(MatchError::AlreadyMatched { .. }) => {}
                Err(e) => log::error!("matchmaking commit failed: {e}"),
            }
        }

        let report = MatchmakingReport {
            new_matches,
            price_alerts: u32::try_from(spikes.len()).unwrap_or(u32::MAX),
            processed_donations: u32::try_from(processed).unwrap_or(u32::MAX),
        };
        log::info!(
            "matchmaking complete: {} new matches, {} price alerts, {} donations processed",
            report.new_matches,
            report.price_alerts,
            report.processed_donations
        );
        report
    }
}
