#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Food taxonomy types and shared tier definitions.
//!
//! This crate defines the canonical food category taxonomy, donation
//! condition grades, desert severity tiers, and match priority/status
//! enums used across the entire refeed system. Donor intake forms and
//! external data feeds normalize into these shared types.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Top-level food category for a donation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FoodCategory {
    /// Fresh fruits and vegetables
    Produce,
    /// Milk, cheese, yogurt, eggs
    Dairy,
    /// Fresh and frozen meat, poultry, fish
    Meat,
    /// Bread, rice, pasta, cereal
    Grains,
    /// Ready-to-eat and cooked foods
    Prepared,
    /// Anything not fitting the above
    Other,
}

impl FoodCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Produce,
            Self::Dairy,
            Self::Meat,
            Self::Grains,
            Self::Prepared,
            Self::Other,
        ]
    }

    /// Whether this category is perishable enough that expiry dominates
    /// delivery scheduling.
    #[must_use]
    pub const fn is_perishable(self) -> bool {
        matches!(self, Self::Produce | Self::Dairy | Self::Meat | Self::Prepared)
    }
}

/// Condition grade reported by the donor at intake.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FoodCondition {
    /// Retail quality
    Excellent,
    /// Minor cosmetic imperfections
    Good,
    /// Edible but visibly aged
    Fair,
    /// Must move within days
    NearExpiry,
}

/// Unit of measure for a donation's quantity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum QuantityUnit {
    /// Kilograms
    Kg,
    /// Pounds
    Lbs,
    /// Individual items
    Pieces,
    /// Packed boxes
    Boxes,
}

/// Type of food donor organization.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DonorType {
    /// Grocery store or supermarket chain
    Supermarket,
    /// Farm or grower cooperative
    Farm,
    /// Wholesale distributor or warehouse
    Distributor,
    /// Restaurant or commercial kitchen
    Restaurant,
}

/// Severity tier for a recipient zone, from 0 (a food source, not a
/// desert) to 3 (most severe access gap).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DesertSeverity {
    /// Level 0: Area with adequate food access (reference marker)
    FoodSource = 0,
    /// Level 1: Limited access, partial coverage by nearby stores
    Low = 1,
    /// Level 2: Significant access gap
    Medium = 2,
    /// Level 3: Severe access gap, no full-service grocery in range
    High = 3,
}

impl DesertSeverity {
    /// Returns the numeric value of this severity tier.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Creates a severity tier from a numeric value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 0-3.
    pub const fn from_value(value: u8) -> Result<Self, InvalidSeverityError> {
        match value {
            0 => Ok(Self::FoodSource),
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            _ => Err(InvalidSeverityError { value }),
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::FoodSource, Self::Low, Self::Medium, Self::High]
    }
}

/// Error returned when attempting to create a [`DesertSeverity`] from an
/// invalid numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSeverityError {
    /// The invalid severity value that was provided.
    pub value: u8,
}

impl std::fmt::Display for InvalidSeverityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid severity value {}: expected 0-3", self.value)
    }
}

impl std::error::Error for InvalidSeverityError {}

/// Urgency tier assigned to a donation/recipient pairing.
///
/// Drives delivery ordering: `High` pairings are dispatched first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchPriority {
    /// Dispatch when capacity allows
    Low = 1,
    /// Dispatch within normal scheduling
    Medium = 2,
    /// Dispatch as soon as possible
    High = 3,
}

impl MatchPriority {
    /// Returns the numeric value of this priority (1-3, higher is more
    /// urgent).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }
}

/// Lifecycle status of a match record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    /// Reserved wire value for uncommitted candidates. Committed
    /// records start at [`MatchStatus::Pending`]; clients may still
    /// send this as a filter.
    Potential,
    /// Committed, awaiting acceptance by the recipient organization
    Pending,
    /// Accepted, awaiting pickup
    Accepted,
    /// Picked up, en route
    InTransit,
    /// Delivered and confirmed
    Delivered,
    /// Cancelled by either party
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_from_value_roundtrip() {
        for v in 0..=3u8 {
            let severity = DesertSeverity::from_value(v).unwrap();
            assert_eq!(severity.value(), v);
        }
        assert!(DesertSeverity::from_value(4).is_err());
    }

    #[test]
    fn severity_ordering() {
        assert!(DesertSeverity::High > DesertSeverity::Medium);
        assert!(DesertSeverity::Medium > DesertSeverity::Low);
        assert!(DesertSeverity::Low > DesertSeverity::FoodSource);
    }

    #[test]
    fn priority_ordering() {
        assert!(MatchPriority::High > MatchPriority::Medium);
        assert!(MatchPriority::Medium > MatchPriority::Low);
    }

    #[test]
    fn taxonomy_wire_format() {
        let json = serde_json::to_string(&FoodCondition::NearExpiry).unwrap();
        assert_eq!(json, "\"NEAR_EXPIRY\"");
        let parsed: FoodCondition = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, FoodCondition::NearExpiry);

        // Reserved status value stays parseable for client filters.
        let status: MatchStatus = serde_json::from_str("\"POTENTIAL\"").unwrap();
        assert_eq!(status, MatchStatus::Potential);
    }

    #[test]
    fn perishable_categories() {
        assert!(FoodCategory::Dairy.is_perishable());
        assert!(!FoodCategory::Grains.is_perishable());
    }
}
