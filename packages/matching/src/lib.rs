#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Donation-to-desert matchmaking.
//!
//! [`scorer`] turns a (donation, distance, spike) triple into a
//! priority tier and a numeric desirability score; [`engine`] scans
//! unmatched donations against the recipient index, ranks the surviving
//! pairs, and commits matches. Both take an explicit `now` so scoring
//! is reproducible in tests.

pub mod engine;
pub mod scorer;

pub use engine::{EngineConfig, MatchCandidate, MatchEngine, MatchmakingReport};
pub use scorer::{MatchAssessment, days_until_expiry, score};

use refeed_store::StoreError;
use thiserror::Error;

/// Errors that can occur committing a match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The donation already holds a committed match.
    #[error("donation already matched: {donation_id}")]
    AlreadyMatched {
        /// The donation that was already matched.
        donation_id: String,
    },

    /// A referenced record does not exist.
    #[error(transparent)]
    Store(#[from] StoreError),
}
