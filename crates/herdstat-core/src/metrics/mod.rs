pub mod tables;

use crate::aggregate::{
    bucket_by_month, bucket_by_season, percentage, reduce_ai, reduce_milk, saturating_sum,
    AiOutcome, Bucket, MilkTotal,
};
use crate::classify::{classify, HerdComposition};
use crate::model::{AiRecord, AnimalRecord, AnimalType, MilkRecord, PregnancyStatus};
use crate::parsing::normalize::normalize_text;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

pub use tables::{group_success, GroupSuccess};

/// Snapshot of a farm's herd, milk and breeding performance.
///
/// Every ratio is zero when its denominator is zero. `growth_rate` is absent,
/// not zero, when fewer than two dated months of milk records exist.
///
/// Milk sums (total, monthly and seasonal) saturate at `Decimal::MAX` rather
/// than overflow, and `growth_rate` is absent when its arithmetic overflows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmMetrics {
    pub total_animals: usize,
    pub milking_cows: usize,
    pub herd_composition: HerdComposition,
    pub animal_types: BTreeMap<AnimalType, usize>,

    pub total_milk_production: Decimal,
    pub avg_milk_per_cow: Decimal,
    /// Highest monthly total (zero when no dated records).
    pub peak_milk_production: Decimal,
    /// Lowest monthly total (zero when no dated records).
    pub lowest_milk_production: Decimal,
    pub peak_month: Option<String>,
    pub lowest_month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_rate: Option<Decimal>,

    pub total_ai: usize,
    pub pregnant_count: usize,
    pub pregnancy_rate: Decimal,
    pub pregnancy_status: BTreeMap<PregnancyStatus, usize>,
    pub technician_performance: Vec<GroupSuccess>,
    pub breed_performance: Vec<GroupSuccess>,

    pub monthly_milk: Vec<Bucket<MilkTotal>>,
    pub seasonal_milk: Vec<Bucket<MilkTotal>>,
    pub monthly_ai: Vec<Bucket<AiOutcome>>,
    pub seasonal_ai: Vec<Bucket<AiOutcome>>,
}

/// A cow that is not dry. Counted from the raw category text, independently
/// of the herd classification.
fn is_milking_cow(animal: &AnimalRecord) -> bool {
    let lower = normalize_text(animal.category.as_deref());
    lower.contains("cow") && !lower.contains("dry")
}

/// Percentage change from the first to the last bucket.
///
/// None with fewer than two buckets or when the result does not fit a
/// `Decimal`; zero when the first bucket produced nothing.
pub fn growth_rate(monthly: &[Bucket<MilkTotal>]) -> Option<Decimal> {
    if monthly.len() < 2 {
        return None;
    }
    let first = monthly.first()?.value.production;
    let last = monthly.last()?.value.production;
    if first <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }
    let rate = last
        .checked_sub(first)
        .and_then(|delta| delta.checked_div(first))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));
    if rate.is_none() {
        tracing::warn!(%first, %last, "growth rate overflowed, omitted");
    }
    rate
}

/// Earliest highest and earliest lowest month.
fn extremes(monthly: &[Bucket<MilkTotal>]) -> Option<(&Bucket<MilkTotal>, &Bucket<MilkTotal>)> {
    let first = monthly.first()?;
    let mut peak = first;
    let mut lowest = first;
    for bucket in &monthly[1..] {
        if bucket.value.production > peak.value.production {
            peak = bucket;
        }
        if bucket.value.production < lowest.value.production {
            lowest = bucket;
        }
    }
    Some((peak, lowest))
}

/// Combine classification, bucketing and simple ratios into one snapshot.
///
/// Pure: the same inputs always give a structurally identical result.
pub fn compose(
    animals: &[AnimalRecord],
    ai_records: &[AiRecord],
    milk_records: &[MilkRecord],
) -> FarmMetrics {
    let herd_composition = classify(animals, ai_records);

    let total_animals = animals.len();
    let milking_cows = animals.iter().filter(|a| is_milking_cow(a)).count();

    let mut animal_types = BTreeMap::new();
    for animal in animals {
        *animal_types.entry(animal.kind()).or_insert(0) += 1;
    }

    let total_milk_production =
        saturating_sum(milk_records.iter().map(|r| r.total_milk_production));
    let avg_milk_per_cow = if milking_cows > 0 {
        total_milk_production / Decimal::from(milking_cows)
    } else {
        Decimal::ZERO
    };

    let monthly_milk = bucket_by_month(milk_records, |r| r.report_month, reduce_milk);
    let seasonal_milk = bucket_by_season(milk_records, |r| r.report_month, reduce_milk);
    let (peak, lowest) = match extremes(&monthly_milk) {
        Some((p, l)) => (
            (p.value.production, Some(p.label.clone())),
            (l.value.production, Some(l.label.clone())),
        ),
        None => ((Decimal::ZERO, None), (Decimal::ZERO, None)),
    };

    let pregnant_count = ai_records
        .iter()
        .filter(|r| r.pregnancy_status.is_pregnant())
        .count();
    let mut pregnancy_status: BTreeMap<PregnancyStatus, usize> =
        PregnancyStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for record in ai_records {
        *pregnancy_status.entry(record.pregnancy_status).or_insert(0) += 1;
    }

    let metrics = FarmMetrics {
        total_animals,
        milking_cows,
        herd_composition,
        animal_types,
        total_milk_production,
        avg_milk_per_cow,
        peak_milk_production: peak.0,
        lowest_milk_production: lowest.0,
        peak_month: peak.1,
        lowest_month: lowest.1,
        growth_rate: growth_rate(&monthly_milk),
        total_ai: ai_records.len(),
        pregnant_count,
        pregnancy_rate: percentage(pregnant_count, ai_records.len()),
        pregnancy_status,
        technician_performance: group_success(ai_records, |r| r.technician_name.as_deref()),
        breed_performance: group_success(ai_records, |r| r.bull_breed.as_deref()),
        monthly_milk,
        seasonal_milk,
        monthly_ai: bucket_by_month(ai_records, |r| r.ai_date, reduce_ai),
        seasonal_ai: bucket_by_season(ai_records, |r| r.ai_date, reduce_ai),
    };

    tracing::debug!(
        total_animals = metrics.total_animals,
        milking_cows = metrics.milking_cows,
        months = metrics.monthly_milk.len(),
        total_ai = metrics.total_ai,
        "metrics composed"
    );
    metrics
}
