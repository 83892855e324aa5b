//! Vertical farming container planning for high-severity zones.
//!
//! For each high-severity recipient zone with a known population, plans
//! one container: picks the crop mix, sizes the monthly yield, projects
//! the severity impact, and estimates installation and maintenance
//! costs. Plans come back sorted by projected impact.

use refeed_food_models::DesertSeverity;
use refeed_geo::Coordinate;
use refeed_store_models::RecipientLocation;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::impact::{ImpactProjection, project_impact};
use crate::scorer::{CropRecommendation, CropSuitabilityScorer};

/// Monthly yield multiplier over one cycle's crop mix (overlapping
/// staggered cycles).
const CYCLE_OVERLAP_FACTOR: f64 = 1.5;

/// Kind of farming container.
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
pub enum ContainerType {
    /// Multi-rack stacked growing, largest capacity
    VerticalFarm,
    /// Nutrient-solution growing, best for fruiting crops
    Hydroponic,
    /// Misted-root growing, best for leafy greens and herbs
    Aeroponic,
}

impl ContainerType {
    /// Base installation cost in USD.
    #[must_use]
    pub const fn base_install_cost(self) -> u32 {
        match self {
            Self::VerticalFarm => 150_000,
            Self::Hydroponic => 80_000,
            Self::Aeroponic => 60_000,
        }
    }

    /// Base annual maintenance cost in USD.
    #[must_use]
    pub const fn base_maintenance_cost(self) -> u32 {
        match self {
            Self::VerticalFarm => 25_000,
            Self::Hydroponic => 15_000,
            Self::Aeroponic => 12_000,
        }
    }

    /// Installation lead time in weeks.
    #[must_use]
    pub const fn install_weeks(self) -> u8 {
        match self {
            Self::VerticalFarm => 8,
            Self::Hydroponic => 6,
            Self::Aeroponic => 10,
        }
    }
}

/// Deployment status of a container.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerStatus {
    /// Proposed, not yet installed
    Planned,
    /// Installed and producing
    Active,
    /// Installed, temporarily offline
    Maintenance,
}

/// Cost and lead-time estimates for one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationEstimate {
    /// One-time installation cost in USD.
    pub cost_estimate: u32,
    /// Installation lead time in weeks.
    pub installation_time_weeks: u8,
    /// Recurring annual maintenance cost in USD.
    pub maintenance_cost_annual: u32,
}

/// A planned container for one recipient zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPlan {
    /// Plan identifier, derived from the zone ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Selected container kind.
    pub container_type: ContainerType,
    /// Container site (the zone's representative point).
    pub location: Coordinate,
    /// Zone this container serves.
    pub recipient_id: String,
    /// Deployment status; plans start as [`ContainerStatus::Planned`].
    pub status: ContainerStatus,
    /// Expected monthly yield in kilograms.
    pub monthly_yield_kg: f64,
    /// Number of distinct crops in the mix.
    pub crop_types: u32,
    /// Recommended crop mix.
    pub recommendations: Vec<CropRecommendation>,
    /// Projected severity impact.
    pub impact: ImpactProjection,
    /// Cost and lead-time estimates.
    pub installation: InstallationEstimate,
}

/// Picks a container type for a zone.
///
/// Large zones justify a full vertical farm; fruiting crops in the mix
/// call for hydroponics; leafy mixes run best aeroponically.
fn select_container_type(
    population: u32,
    recommendations: &[CropRecommendation],
    scorer: &CropSuitabilityScorer,
) -> ContainerType {
    if population > 15_000 {
        return ContainerType::VerticalFarm;
    }
    let has_fruiting = recommendations.iter().any(|rec| {
        scorer
            .catalog()
            .iter()
            .any(|crop| crop.name == rec.crop && crop.fruiting)
    });
    if has_fruiting {
        ContainerType::Hydroponic
    } else {
        ContainerType::Aeroponic
    }
}

/// Builds the installation estimate for a container of the given size.
fn estimate_installation(container_type: ContainerType, monthly_yield_kg: f64) -> InstallationEstimate {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let yield_kg = monthly_yield_kg.max(0.0).round() as u32;
    InstallationEstimate {
        cost_estimate: container_type.base_install_cost() + yield_kg * 500,
        installation_time_weeks: container_type.install_weeks(),
        maintenance_cost_annual: container_type.base_maintenance_cost() + yield_kg * 100,
    }
}

/// Plans one container per high-severity zone with a known population.
///
/// Zones without population data cannot be impact-projected and are
/// skipped. Results are sorted descending by projected reduction.
#[must_use]
pub fn plan_containers(
    zones: &[RecipientLocation],
    scorer: &CropSuitabilityScorer,
) -> Vec<ContainerPlan> {
    let mut plans: Vec<ContainerPlan> = zones
        .iter()
        .filter(|zone| zone.severity == DesertSeverity::High)
        .filter_map(|zone| {
            let population = zone.population?;
            let climate = zone.climate_zone.as_deref().unwrap_or("temperate");
            let recommendations = scorer.recommend(climate, population, zone.demographics);
            if recommendations.is_empty() {
                return None;
            }

            let cycle_yield: f64 = recommendations.iter().map(|r| r.yield_per_cycle_kg).sum();
            let monthly_yield_kg = cycle_yield * CYCLE_OVERLAP_FACTOR;
            let container_type = select_container_type(population, &recommendations, scorer);
            let impact = project_impact(zone.severity, population, monthly_yield_kg);

            Some(ContainerPlan {
                id: format!("container-{}", zone.id),
                name: format!("Vertical Farm - {}", zone.name),
                container_type,
                location: zone.location,
                recipient_id: zone.id.clone(),
                status: ContainerStatus::Planned,
                monthly_yield_kg,
                crop_types: u32::try_from(recommendations.len()).unwrap_or(u32::MAX),
                recommendations,
                impact,
                installation: estimate_installation(container_type, monthly_yield_kg),
            })
        })
        .collect();

    plans.sort_by(|a, b| {
        b.impact
            .reduction_percentage
            .cmp(&a.impact.reduction_percentage)
    });
    plans
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use refeed_store_models::Demographics;

    use super::*;

    fn zone(
        id: &str,
        severity: DesertSeverity,
        population: Option<u32>,
        children: u32,
        climate: &str,
    ) -> RecipientLocation {
        RecipientLocation {
            id: id.to_string(),
            name: id.to_string(),
            location: Coordinate::new(42.3314, -83.0458).unwrap(),
            severity,
            population,
            demographics: Some(Demographics {
                children,
                seniors: 1900,
                households: 4200,
            }),
            climate_zone: Some(climate.to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn only_high_severity_zones_with_population_are_planned() {
        let scorer = CropSuitabilityScorer::from_embedded().unwrap();
        let zones = vec![
            zone("detroit", DesertSeverity::High, Some(12_500), 2_800, "continental"),
            zone("islip", DesertSeverity::Medium, Some(21_000), 2_800, "temperate"),
            zone("unknown-pop", DesertSeverity::High, None, 2_800, "temperate"),
        ];

        let plans = plan_containers(&zones, &scorer);
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].recipient_id, "detroit");
        assert_eq!(plans[0].status, ContainerStatus::Planned);
    }

    #[test]
    fn plans_are_sorted_by_projected_reduction() {
        let scorer = CropSuitabilityScorer::from_embedded().unwrap();
        // Same crop mix, different populations: the smaller zone gets
        // more coverage from the same yield.
        let zones = vec![
            zone("big", DesertSeverity::High, Some(40_000), 2_800, "continental"),
            zone("small", DesertSeverity::High, Some(150), 2_800, "continental"),
        ];

        let plans = plan_containers(&zones, &scorer);
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].recipient_id, "small");
        assert!(
            plans[0].impact.reduction_percentage > plans[1].impact.reduction_percentage
        );
    }

    #[test]
    fn large_zones_get_vertical_farms() {
        let scorer = CropSuitabilityScorer::from_embedded().unwrap();
        let zones = vec![zone(
            "phoenix",
            DesertSeverity::High,
            Some(22_000),
            5_800,
            "hot_arid",
        )];

        let plans = plan_containers(&zones, &scorer);
        assert_eq!(plans[0].container_type, ContainerType::VerticalFarm);
    }

    #[test]
    fn fruiting_mixes_get_hydroponics() {
        let scorer = CropSuitabilityScorer::from_embedded().unwrap();
        // Hot-arid at moderate population: tomatoes pass the floor via
        // the population bonus.
        let zones = vec![zone(
            "memphis",
            DesertSeverity::High,
            Some(12_000),
            1_000,
            "hot_arid",
        )];

        let plans = plan_containers(&zones, &scorer);
        assert_eq!(plans[0].container_type, ContainerType::Hydroponic);
    }

    #[test]
    fn installation_costs_scale_with_yield() {
        let small = estimate_installation(ContainerType::Aeroponic, 40.0);
        let large = estimate_installation(ContainerType::Aeroponic, 120.0);
        assert!(large.cost_estimate > small.cost_estimate);
        assert!(large.maintenance_cost_annual > small.maintenance_cost_annual);
        assert_eq!(small.installation_time_weeks, 10);
    }
}
