#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Crop suitability scoring and vertical farming container planning.
//!
//! The crop catalog and climate-zone tag table live in TOML files baked
//! into the binary at compile time, so extending the catalog never
//! touches the scoring logic. Scoring is a fixed, deterministic
//! weighting — the same zone, population, and demographics always
//! produce the same ranked list.

pub mod catalog;
pub mod containers;
pub mod impact;
pub mod scorer;

pub use catalog::{ClimateZone, CropProfile, NutritionTier, load_embedded_catalog};
pub use containers::{
    ContainerPlan, ContainerStatus, ContainerType, InstallationEstimate, plan_containers,
};
pub use impact::{ImpactProjection, project_impact};
pub use scorer::{CropRecommendation, CropSuitabilityScorer, DemandTier};

use thiserror::Error;

/// Errors that can occur loading the crop catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A catalog TOML file failed to parse.
    #[error("failed to parse {file}: {source}")]
    Parse {
        /// Which embedded file failed.
        file: &'static str,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}
