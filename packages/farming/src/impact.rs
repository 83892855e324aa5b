//! Severity-impact projection for a planned container.
//!
//! Coverage is estimated against a rough fresh-produce need of 50 kg
//! per resident per year. Severity steps down at fixed coverage
//! thresholds (high needs 40% coverage to become medium, medium needs
//! 60% to become low), with floors on the reported reduction so a
//! container that clears a threshold never reports a negligible
//! number.

use refeed_food_models::DesertSeverity;
use serde::{Deserialize, Serialize};

/// Estimated annual fresh-produce need per resident, in kilograms.
const ANNUAL_NEED_KG_PER_PERSON: f64 = 50.0;

/// Projected effect of a container on a zone's access gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactProjection {
    /// Severity tier before the container.
    pub current_severity: DesertSeverity,
    /// Severity tier projected after the container is productive.
    pub projected_severity: DesertSeverity,
    /// Estimated reduction of the access gap, in percent.
    pub reduction_percentage: u8,
    /// Residents whose produce need the container covers.
    pub population_served: u32,
}

/// Projects the impact of `monthly_yield_kg` of container capacity on
/// a zone.
#[must_use]
pub fn project_impact(
    current_severity: DesertSeverity,
    population: u32,
    monthly_yield_kg: f64,
) -> ImpactProjection {
    let annual_need_kg = f64::from(population) * ANNUAL_NEED_KG_PER_PERSON;
    let annual_yield_kg = monthly_yield_kg * 12.0;
    let coverage_pct = if annual_need_kg > 0.0 {
        (annual_yield_kg / annual_need_kg * 100.0).min(100.0)
    } else {
        0.0
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut reduction = (coverage_pct * 0.6).round().clamp(0.0, 100.0) as u8;
    let mut projected = current_severity;

    match current_severity {
        DesertSeverity::High => {
            if coverage_pct >= 40.0 {
                projected = DesertSeverity::Medium;
                reduction = reduction.max(35);
            } else if coverage_pct >= 20.0 {
                reduction = reduction.max(20);
            }
        }
        DesertSeverity::Medium => {
            if coverage_pct >= 60.0 {
                projected = DesertSeverity::Low;
                reduction = reduction.max(45);
            }
        }
        DesertSeverity::Low | DesertSeverity::FoodSource => {}
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let population_served = (f64::from(population) * coverage_pct / 100.0).round() as u32;

    ImpactProjection {
        current_severity,
        projected_severity: projected,
        reduction_percentage: reduction,
        population_served,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_severity_steps_down_with_enough_coverage() {
        // 5000 residents need 250 t/yr; 10 t/month covers 48%.
        let impact = project_impact(DesertSeverity::High, 5_000, 10_000.0);
        assert_eq!(impact.projected_severity, DesertSeverity::Medium);
        assert!(impact.reduction_percentage >= 35);
        assert_eq!(impact.population_served, 2_400);
    }

    #[test]
    fn high_severity_holds_below_threshold() {
        // 12500 residents, ~68 kg/month: coverage well under 20%.
        let impact = project_impact(DesertSeverity::High, 12_500, 68.0);
        assert_eq!(impact.projected_severity, DesertSeverity::High);
        assert!(impact.reduction_percentage < 20);
    }

    #[test]
    fn medium_severity_needs_sixty_percent() {
        let just_under = project_impact(DesertSeverity::Medium, 1_000, 2_450.0);
        assert_eq!(just_under.projected_severity, DesertSeverity::Medium);

        let enough = project_impact(DesertSeverity::Medium, 1_000, 2_600.0);
        assert_eq!(enough.projected_severity, DesertSeverity::Low);
        assert!(enough.reduction_percentage >= 45);
    }

    #[test]
    fn coverage_is_capped_at_full_population() {
        let impact = project_impact(DesertSeverity::High, 100, 10_000.0);
        assert_eq!(impact.population_served, 100);
    }

    #[test]
    fn zero_population_is_zero_coverage() {
        let impact = project_impact(DesertSeverity::High, 0, 1_000.0);
        assert_eq!(impact.population_served, 0);
        assert_eq!(impact.projected_severity, DesertSeverity::High);
    }

    #[test]
    fn impact_is_monotone_in_yield() {
        let mut last = 0;
        for yield_kg in [0.0, 500.0, 2_000.0, 10_000.0] {
            let impact = project_impact(DesertSeverity::High, 5_000, yield_kg);
            assert!(impact.reduction_percentage >= last);
            last = impact.reduction_percentage;
        }
    }
}
