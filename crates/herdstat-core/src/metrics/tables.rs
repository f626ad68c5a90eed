use crate::aggregate::percentage;
use crate::model::AiRecord;
use crate::parsing::normalize::group_label;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// AI success for one technician or bull breed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSuccess {
    pub name: String,
    pub total: usize,
    pub pregnant: usize,
    pub success_rate: Decimal,
}

/// Group AI records by a text field and rank groups by success rate.
///
/// Missing or blank keys group under "Unknown". Sorted by success rate
/// descending, then by name so equal rates have a stable order.
pub fn group_success<'a>(
    ai_records: &'a [AiRecord],
    key_of: impl Fn(&'a AiRecord) -> Option<&'a str>,
) -> Vec<GroupSuccess> {
    let mut groups: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for record in ai_records {
        let entry = groups
            .entry(group_label(key_of(record), "Unknown"))
            .or_insert((0, 0));
        entry.0 += 1;
        if record.pregnancy_status.is_pregnant() {
            entry.1 += 1;
        }
    }

    let mut rows: Vec<GroupSuccess> = groups
        .into_iter()
        .map(|(name, (total, pregnant))| GroupSuccess {
            name,
            total,
            pregnant,
            success_rate: percentage(pregnant, total),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.success_rate
            .cmp(&a.success_rate)
            .then_with(|| a.name.cmp(&b.name))
    });
    rows
}
