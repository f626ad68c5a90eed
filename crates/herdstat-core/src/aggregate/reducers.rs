use crate::model::{AiRecord, MilkRecord, PregnancyStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `part / whole * 100`, or zero when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(whole)
}

/// Sum of quantities, pinned at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// Summed milk production for one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilkTotal {
    pub production: Decimal,
    pub records: usize,
}

pub fn reduce_milk(bucket: &[&MilkRecord]) -> MilkTotal {
    MilkTotal {
        production: saturating_sum(bucket.iter().map(|r| r.total_milk_production)),
        records: bucket.len(),
    }
}

/// Insemination outcomes for one group of AI records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiOutcome {
    pub total: usize,
    pub pregnant: usize,
    pub not_pregnant: usize,
    pub aborted: usize,
    pub unknown: usize,
    /// Pregnant share of `total`, in percent.
    pub success_rate: Decimal,
}

pub fn reduce_ai(bucket: &[&AiRecord]) -> AiOutcome {
    let mut outcome = AiOutcome {
        total: bucket.len(),
        ..Default::default()
    };
    for record in bucket {
        match record.pregnancy_status {
            PregnancyStatus::Pregnant => outcome.pregnant += 1,
            PregnancyStatus::NotPregnant => outcome.not_pregnant += 1,
            PregnancyStatus::Aborted => outcome.aborted += 1,
            PregnancyStatus::Unknown => outcome.unknown += 1,
        }
    }
    outcome.success_rate = percentage(outcome.pregnant, outcome.total);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percentage_zero_guard() {
        assert_eq!(percentage(5, 0), Decimal::ZERO);
        assert_eq!(percentage(0, 0), Decimal::ZERO);
        assert_eq!(percentage(1, 4), dec!(25));
    }

    #[test]
    fn test_reduce_milk_sums_exactly() {
        let a = MilkRecord {
            total_milk_production: dec!(0.1),
            ..Default::default()
        };
        let b = MilkRecord {
            total_milk_production: dec!(0.2),
            ..Default::default()
        };
        let total = reduce_milk(&[&a, &b]);
        assert_eq!(total.production, dec!(0.3));
        assert_eq!(total.records, 2);
    }

    #[test]
    fn test_reduce_milk_saturates_instead_of_overflowing() {
        let huge = MilkRecord {
            total_milk_production: Decimal::from_scientific("5e28").unwrap(),
            ..Default::default()
        };
        let total = reduce_milk(&[&huge, &huge]);
        assert_eq!(total.production, Decimal::MAX);
        assert_eq!(total.records, 2);
    }

    #[test]
    fn test_saturating_sum_negative() {
        let low = Decimal::from_scientific("-5e28").unwrap();
        assert_eq!(saturating_sum([low, low]), Decimal::MIN);
        assert_eq!(saturating_sum([dec!(1.5), dec!(-0.5)]), dec!(1));
    }

    #[test]
    fn test_reduce_ai_counts_statuses() {
        let records: Vec<AiRecord> = [
            PregnancyStatus::Pregnant,
            PregnancyStatus::Pregnant,
            PregnancyStatus::NotPregnant,
            PregnancyStatus::Unknown,
        ]
        .into_iter()
        .map(|s| AiRecord {
            pregnancy_status: s,
            ..Default::default()
        })
        .collect();
        let refs: Vec<&AiRecord> = records.iter().collect();
        let outcome = reduce_ai(&refs);
        assert_eq!(outcome.total, 4);
        assert_eq!(outcome.pregnant, 2);
        assert_eq!(outcome.not_pregnant, 1);
        assert_eq!(outcome.unknown, 1);
        assert_eq!(outcome.success_rate, dec!(50));
    }

    #[test]
    fn test_reduce_ai_empty() {
        let outcome = reduce_ai(&[]);
        assert_eq!(outcome.total, 0);
        assert_eq!(outcome.success_rate, Decimal::ZERO);
    }
}
