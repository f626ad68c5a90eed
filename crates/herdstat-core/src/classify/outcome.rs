use crate::model::HerdCategory;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Count of animals per fixed herd category.
///
/// All six categories are always present (zero when empty). Animals whose
/// category text matched no rule are not in any bucket; they are only counted
/// in `unclassified`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HerdComposition {
    pub categories: BTreeMap<HerdCategory, usize>,
    pub unclassified: usize,
}

impl Default for HerdComposition {
    fn default() -> Self {
        Self {
            categories: HerdCategory::ALL.iter().map(|c| (*c, 0)).collect(),
            unclassified: 0,
        }
    }
}

impl HerdComposition {
    pub(crate) fn record(&mut self, category: Option<HerdCategory>) {
        match category {
            Some(cat) => *self.categories.entry(cat).or_insert(0) += 1,
            None => self.unclassified += 1,
        }
    }

    pub fn count(&self, category: HerdCategory) -> usize {
        self.categories.get(&category).copied().unwrap_or(0)
    }

    /// Categories in display order with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (HerdCategory, usize)> + '_ {
        HerdCategory::ALL.iter().map(|c| (*c, self.count(*c)))
    }

    pub fn classified_total(&self) -> usize {
        self.categories.values().sum()
    }

    /// Share of `total_animals` in `category`, in percent. Zero when there are no animals.
    pub fn share_pct(&self, category: HerdCategory, total_animals: usize) -> Decimal {
        if total_animals == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.count(category)) * Decimal::ONE_HUNDRED / Decimal::from(total_animals)
    }
}
