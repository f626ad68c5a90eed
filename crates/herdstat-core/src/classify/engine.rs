use crate::classify::outcome::HerdComposition;
use crate::model::{AiRecord, AnimalRecord, HerdCategory};
use crate::parsing::normalize::{normalize_text, tag_key};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy)]
enum RuleKind {
    Cow,
    Heifer,
    Bull,
    Calf,
}

/// Ordered keyword rules over the lower-cased category text. First match wins,
/// so "Bull Calf" is a Bull and never a Calf.
const CATEGORY_RULES: &[(&str, RuleKind)] = &[
    ("cow", RuleKind::Cow),
    ("heifer", RuleKind::Heifer),
    ("bull", RuleKind::Bull),
    ("calf", RuleKind::Calf),
];

/// Tags that have at least one AI record with status `Pregnant`.
///
/// Built once per call so heifer lookups are O(1) instead of a scan of the AI records.
#[derive(Debug, Default)]
pub struct PregnancyIndex<'a> {
    pregnant_tags: HashSet<&'a str>,
}

impl<'a> PregnancyIndex<'a> {
    pub fn build(ai_records: &'a [AiRecord]) -> Self {
        let pregnant_tags = ai_records
            .iter()
            .filter(|r| r.pregnancy_status.is_pregnant())
            .filter_map(|r| tag_key(r.animal_tag.as_deref()))
            .collect();
        Self { pregnant_tags }
    }

    pub fn is_pregnant(&self, animal_tag: Option<&str>) -> bool {
        tag_key(animal_tag)
            .map(|tag| self.pregnant_tags.contains(tag))
            .unwrap_or(false)
    }
}

/// Classify raw category text. `pregnant` only matters for heifers.
pub fn classify_category(category: Option<&str>, pregnant: bool) -> Option<HerdCategory> {
    let lower = normalize_text(category);
    let (_, kind) = CATEGORY_RULES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))?;

    let category = match kind {
        RuleKind::Cow => {
            if lower.contains("dry") || lower.contains("non-milking") {
                HerdCategory::DryCow
            } else {
                HerdCategory::MilkingCow
            }
        }
        RuleKind::Heifer => {
            if pregnant {
                HerdCategory::PregnantHeifer
            } else {
                HerdCategory::NonPregnantHeifer
            }
        }
        RuleKind::Bull => HerdCategory::Bull,
        RuleKind::Calf => HerdCategory::Calves,
    };
    Some(category)
}

/// Classify one animal, cross-referencing its tag against the AI records.
pub fn classify_animal(animal: &AnimalRecord, index: &PregnancyIndex<'_>) -> Option<HerdCategory> {
    let pregnant = index.is_pregnant(animal.animal_tag.as_deref());
    classify_category(animal.category.as_deref(), pregnant)
}

/// Classify a herd into the six fixed categories.
///
/// Never fails: animals whose category matches no rule are dropped from the
/// buckets and only counted as unclassified.
pub fn classify(animals: &[AnimalRecord], ai_records: &[AiRecord]) -> HerdComposition {
    let index = PregnancyIndex::build(ai_records);
    let mut composition = HerdComposition::default();

    for animal in animals {
        composition.record(classify_animal(animal, &index));
    }

    tracing::debug!(
        classified = composition.classified_total(),
        unclassified = composition.unclassified,
        "herd classified"
    );
    composition
}
