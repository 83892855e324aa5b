//! Crop catalog and climate-zone tag table, loaded from embedded TOML.
//!
//! The TOML files under `packages/farming/catalog/` are baked into the
//! binary with [`include_str!`]. Adding a crop or a zone is a data
//! change only.

use refeed_store_models::Demographics;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::CatalogError;

/// Embedded catalog TOML.
const CROPS_TOML: &str = include_str!("../catalog/crops.toml");
const CLIMATE_ZONES_TOML: &str = include_str!("../catalog/climate_zones.toml");

/// Nutritional tier of a crop.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NutritionTier {
    /// Low nutritional density
    Low,
    /// Moderate nutritional density
    Medium,
    /// High nutritional density
    High,
}

impl NutritionTier {
    /// Sub-score contributed to suitability before weighting.
    #[must_use]
    pub const fn score(self) -> f64 {
        match self {
            Self::High => 30.0,
            Self::Medium => 20.0,
            Self::Low => 10.0,
        }
    }
}

/// A demographic condition used by catalog rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DemographicRule {
    /// Children count above a threshold.
    Children {
        /// Minimal count that triggers the rule.
        threshold: u32,
    },
    /// Seniors count above a threshold.
    Seniors {
        /// Minimal count that triggers the rule.
        threshold: u32,
    },
    /// Zone population above a threshold.
    Population {
        /// Minimal count that triggers the rule.
        threshold: u32,
    },
}

impl DemographicRule {
    /// Evaluates the rule against a zone's numbers.
    #[must_use]
    pub fn applies(self, population: u32, demographics: Demographics) -> bool {
        match self {
            Self::Children { threshold } => demographics.children > threshold,
            Self::Seniors { threshold } => demographics.seniors > threshold,
            Self::Population { threshold } => population > threshold,
        }
    }
}

/// A conditional score bonus defined per crop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DemandBonus {
    /// Bonus when children exceed a threshold.
    Children {
        /// Minimal count that triggers the bonus.
        threshold: u32,
        /// Points added.
        amount: f64,
    },
    /// Bonus when seniors exceed a threshold.
    Seniors {
        /// Minimal count that triggers the bonus.
        threshold: u32,
        /// Points added.
        amount: f64,
    },
    /// Bonus when population exceeds a threshold.
    Population {
        /// Minimal count that triggers the bonus.
        threshold: u32,
        /// Points added.
        amount: f64,
    },
    /// Unconditional bonus.
    Flat {
        /// Points added.
        amount: f64,
    },
}

impl DemandBonus {
    /// Points the bonus contributes for a zone's numbers.
    #[must_use]
    pub fn amount_for(self, population: u32, demographics: Demographics) -> f64 {
        match self {
            Self::Children { threshold, amount } => {
                if demographics.children > threshold {
                    amount
                } else {
                    0.0
                }
            }
            Self::Seniors { threshold, amount } => {
                if demographics.seniors > threshold {
                    amount
                } else {
                    0.0
                }
            }
            Self::Population { threshold, amount } => {
                if population > threshold {
                    amount
                } else {
                    0.0
                }
            }
            Self::Flat { amount } => amount,
        }
    }
}

/// One catalog entry: a crop and its scoring inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    /// Display name (e.g. "Leafy Greens (Lettuce, Spinach, Kale)").
    pub name: String,
    /// Yield in kilograms per growing cycle.
    pub base_yield_kg: f64,
    /// Growing cycle length in days.
    pub growth_days: u32,
    /// Climate tags the crop prefers; "any" matches every zone.
    pub climate_preference: Vec<String>,
    /// Nutritional tier.
    pub nutrition: NutritionTier,
    /// Optional conditional score bonus.
    #[serde(default)]
    pub demand_bonus: Option<DemandBonus>,
    /// Optional rule that marks local demand as high for this crop.
    #[serde(default)]
    pub high_demand_when: Option<DemographicRule>,
    /// Fruiting crop (drives hydroponic container selection).
    #[serde(default)]
    pub fruiting: bool,
    /// Demand driver flag: popular with families.
    #[serde(default)]
    pub appeals_to_families: bool,
    /// Demand driver flag: popular with older residents.
    #[serde(default)]
    pub appeals_to_seniors: bool,
}

/// A climate zone and the crop tags that count as a match there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClimateZone {
    /// Zone name (e.g. "continental").
    pub name: String,
    /// Tags considered matching in this zone.
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CropsFile {
    crops: Vec<CropProfile>,
}

#[derive(Debug, Deserialize)]
struct ZonesFile {
    zones: Vec<ClimateZone>,
}

/// Parses the embedded crop catalog and climate-zone table.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] if either embedded TOML file fails
/// to parse (a build-time data error).
pub fn load_embedded_catalog() -> Result<(Vec<CropProfile>, Vec<ClimateZone>), CatalogError> {
    let crops: CropsFile = toml::from_str(CROPS_TOML).map_err(|source| CatalogError::Parse {
        file: "crops.toml",
        source,
    })?;
    let zones: ZonesFile =
        toml::from_str(CLIMATE_ZONES_TOML).map_err(|source| CatalogError::Parse {
            file: "climate_zones.toml",
            source,
        })?;
    Ok((crops.crops, zones.zones))
}
