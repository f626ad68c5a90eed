use crate::metrics::FarmMetrics;
use crate::profile::schema::{AnalyticsProfile, TierRuleDef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NO_STRENGTHS: &str = "None identified";
pub const NO_WEAKNESSES: &str = "No major areas identified";
pub const NO_RECOMMENDATIONS: &str = "Maintain current management practices";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PerformanceTier {
    Excellent,
    Good,
    Average,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceTier::Excellent => write!(f, "Excellent"),
            PerformanceTier::Good => write!(f, "Good"),
            PerformanceTier::Average => write!(f, "Average"),
            PerformanceTier::NeedsImprovement => write!(f, "Needs Improvement"),
        }
    }
}

/// Qualitative verdict on a farm. Each list holds at least one entry: when no
/// check fires it carries the fixed fallback text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceRating {
    pub tier: PerformanceTier,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

/// First row (top to bottom) whose two minimums both hold, else `NeedsImprovement`.
pub fn classify_tier(
    success_rate_pct: Decimal,
    avg_milk_per_cow: Decimal,
    tiers: &[TierRuleDef],
) -> PerformanceTier {
    tiers
        .iter()
        .find(|row| {
            success_rate_pct >= row.min_success_rate
                && avg_milk_per_cow >= row.min_avg_milk_per_cow
        })
        .map(|row| row.tier)
        .unwrap_or(PerformanceTier::NeedsImprovement)
}

fn or_fallback(items: Vec<String>, fallback: &str) -> Vec<String> {
    if items.is_empty() {
        vec![fallback.to_string()]
    } else {
        items
    }
}

/// Rate a farm from its metrics.
pub fn rate(metrics: &FarmMetrics, profile: &AnalyticsProfile) -> PerformanceRating {
    let success = metrics.pregnancy_rate;
    let target = profile.success_rate_target;
    let has_milking_cows = metrics.milking_cows > 0;
    let meets_target = success >= target;
    let has_milk = metrics.total_milk_production > Decimal::ZERO;

    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    let mut recommendations = Vec::new();

    if has_milking_cows {
        strengths.push(format!(
            "Active milking herd of {} cows",
            metrics.milking_cows
        ));
    } else {
        weaknesses.push("No milking cows in the herd".to_string());
        recommendations
            .push("Review herd composition and plan replacements for milking cows".to_string());
    }

    if meets_target {
        strengths.push(format!("Strong AI success rate of {:.1}%", success));
    } else {
        weaknesses.push(format!(
            "AI success rate of {:.1}% is below the {}% target",
            success, target
        ));
        recommendations
            .push("Review heat detection, AI timing and technician performance".to_string());
    }

    if has_milk {
        strengths.push(format!(
            "Milk production recorded ({:.1} L total)",
            metrics.total_milk_production
        ));
    } else {
        weaknesses.push("No milk production recorded".to_string());
        recommendations.push("Record monthly milk production to track yield".to_string());
    }

    let rating = PerformanceRating {
        tier: classify_tier(success, metrics.avg_milk_per_cow, &profile.tiers),
        strengths: or_fallback(strengths, NO_STRENGTHS),
        weaknesses: or_fallback(weaknesses, NO_WEAKNESSES),
        recommendations: or_fallback(recommendations, NO_RECOMMENDATIONS),
    };
    tracing::debug!(tier = %rating.tier, "farm rated");
    rating
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compose;
    use crate::model::{AiRecord, AnimalRecord, MilkRecord, PregnancyStatus};
    use crate::profile::builtin::default_profile;
    use rust_decimal_macros::dec;

    fn tiers() -> Vec<TierRuleDef> {
        default_profile().unwrap().tiers
    }

    #[test]
    fn test_excellent() {
        assert_eq!(
            classify_tier(dec!(75), dec!(16), &tiers()),
            PerformanceTier::Excellent
        );
    }

    #[test]
    fn test_high_success_low_milk_needs_improvement() {
        assert_eq!(
            classify_tier(dec!(65), dec!(5), &tiers()),
            PerformanceTier::NeedsImprovement
        );
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let t = tiers();
        assert_eq!(classify_tier(dec!(70), dec!(15), &t), PerformanceTier::Excellent);
        assert_eq!(classify_tier(dec!(60), dec!(12), &t), PerformanceTier::Good);
        assert_eq!(classify_tier(dec!(50), dec!(10), &t), PerformanceTier::Average);
        assert_eq!(
            classify_tier(dec!(49.99), dec!(100), &t),
            PerformanceTier::NeedsImprovement
        );
    }

    #[test]
    fn test_falls_through_to_lower_row() {
        // Excellent success rate but only Good milk yield.
        assert_eq!(classify_tier(dec!(90), dec!(13), &tiers()), PerformanceTier::Good);
    }

    #[test]
    fn test_empty_farm_gets_fallback_strengths() {
        let profile = default_profile().unwrap();
        let rating = rate(&compose(&[], &[], &[]), &profile);
        assert_eq!(rating.tier, PerformanceTier::NeedsImprovement);
        assert_eq!(rating.strengths, vec![NO_STRENGTHS.to_string()]);
        assert_eq!(rating.weaknesses.len(), 3);
        assert_eq!(rating.recommendations.len(), 3);
    }

    #[test]
    fn test_healthy_farm_gets_fallback_weaknesses() {
        let profile = default_profile().unwrap();
        let animals = vec![AnimalRecord {
            category: Some("Milking Cow".into()),
            ..Default::default()
        }];
        let ai_records = vec![AiRecord {
            pregnancy_status: PregnancyStatus::Pregnant,
            ..Default::default()
        }];
        let milk_records = vec![MilkRecord {
            total_milk_production: dec!(20),
            ..Default::default()
        }];
        let rating = rate(&compose(&animals, &ai_records, &milk_records), &profile);
        assert_eq!(rating.tier, PerformanceTier::Excellent);
        assert_eq!(rating.strengths.len(), 3);
        assert!(rating.strengths[1].contains("100.0%"));
        assert_eq!(rating.weaknesses, vec![NO_WEAKNESSES.to_string()]);
        assert_eq!(rating.recommendations, vec![NO_RECOMMENDATIONS.to_string()]);
    }

    #[test]
    fn test_tier_serializes_with_space() {
        let json = serde_json::to_string(&PerformanceTier::NeedsImprovement).unwrap();
        assert_eq!(json, "\"Needs Improvement\"");
    }
}
