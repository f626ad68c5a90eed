//! Property tests over randomly generated herds, records and page content.

use chrono::NaiveDate;
use herdstat_core::aggregate::{bucket_by_month, reduce_milk};
use herdstat_core::classify::{classify, classify_category};
use herdstat_core::metrics::compose;
use herdstat_core::model::{AiRecord, AnimalRecord, HerdCategory, MilkRecord, PregnancyStatus};
use herdstat_core::profile::schema::LayoutDef;
use herdstat_core::report::{Element, PageWriter, TableSpec, TextStyle};
use proptest::prelude::*;
use rust_decimal::Decimal;

const EPSILON: f64 = 1e-9;

fn date() -> impl Strategy<Value = NaiveDate> {
    (2019i32..2026, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn category() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![
        prop::sample::select(vec![
            "Milking Cow",
            "Dry Cow",
            "Non-Milking Cow",
            "Pregnant Heifer",
            "Heifer",
            "Bull",
            "Bull Calf",
            "Female Calf",
            "Goat",
            "",
        ])
        .prop_map(String::from),
        "[A-Za-z -]{0,12}",
    ])
}

fn tag() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[A-C]-0[0-9]")
}

fn animal() -> impl Strategy<Value = AnimalRecord> {
    (category(), tag()).prop_map(|(category, animal_tag)| AnimalRecord {
        category,
        animal_tag,
        ..Default::default()
    })
}

fn ai_record() -> impl Strategy<Value = AiRecord> {
    (
        tag(),
        prop::option::of(date()),
        prop::sample::select(PregnancyStatus::ALL.to_vec()),
        prop::option::of("[A-D][a-z]{2,5}"),
    )
        .prop_map(|(animal_tag, ai_date, pregnancy_status, technician_name)| AiRecord {
            animal_tag,
            ai_date,
            pregnancy_status,
            technician_name,
            ..Default::default()
        })
}

fn milk_record() -> impl Strategy<Value = MilkRecord> {
    (prop::option::of(date()), 0u32..5000).prop_map(|(report_month, litres)| MilkRecord {
        report_month,
        total_milk_production: Decimal::from(litres),
        ..Default::default()
    })
}

#[derive(Debug, Clone)]
enum Block {
    Text(usize),
    Table(usize),
}

fn block() -> impl Strategy<Value = Block> {
    prop_oneof![
        (1usize..60).prop_map(Block::Text),
        (0usize..60).prop_map(Block::Table),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_every_animal_counted_at_most_once(
        animals in prop::collection::vec(animal(), 0..60),
        ai_records in prop::collection::vec(ai_record(), 0..30),
    ) {
        let herd = classify(&animals, &ai_records);
        let counted: usize = HerdCategory::ALL.iter().map(|c| herd.count(*c)).sum();
        prop_assert!(counted <= animals.len());
        prop_assert_eq!(counted + herd.unclassified, animals.len());
    }

    #[test]
    fn prop_bull_wins_over_calf(
        prefix in "[a-z ]{0,6}",
        middle in "[a-z ]{0,6}",
        suffix in "[a-z ]{0,6}",
        calf_first in any::<bool>(),
        upper in any::<bool>(),
    ) {
        let text = if calf_first {
            format!("{prefix}calf{middle}bull{suffix}")
        } else {
            format!("{prefix}bull{middle}calf{suffix}")
        };
        prop_assume!(!text.contains("cow") && !text.contains("heifer"));
        let text = if upper { text.to_uppercase() } else { text };
        prop_assert_eq!(classify_category(Some(&text), false), Some(HerdCategory::Bull));
    }

    #[test]
    fn prop_month_buckets_are_chronological(
        records in prop::collection::vec(milk_record(), 0..80),
    ) {
        let buckets = bucket_by_month(&records, |r| r.report_month, reduce_milk);
        for pair in buckets.windows(2) {
            prop_assert!(pair[0].start < pair[1].start);
        }
        let dated = records.iter().filter(|r| r.report_month.is_some()).count();
        let bucketed: usize = buckets.iter().map(|b| b.value.records).sum();
        prop_assert_eq!(bucketed, dated);
        for bucket in &buckets {
            let label = bucket.start.format("%b %Y").to_string();
            prop_assert_eq!(&bucket.label, &label);
        }
    }

    #[test]
    fn prop_blocks_never_split_or_cross_margins(
        blocks in prop::collection::vec(block(), 1..25),
    ) {
        let layout = LayoutDef::default();
        let mut writer = PageWriter::new(layout.clone());
        for block in &blocks {
            match block {
                Block::Text(lines) => {
                    let text = (0..*lines).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
                    writer.write_text(&text, TextStyle::Body);
                }
                Block::Table(rows) => {
                    let mut table = TableSpec::new(&["Name", "Value"]);
                    for i in 0..*rows {
                        table.row(vec![format!("row {i}"), i.to_string()]);
                    }
                    writer.write_table(&table);
                }
            }
        }
        let pages = writer.finish(|n, total| format!("Page {n} of {total}"));

        let bottom = layout.page_height_mm - layout.margin_mm;
        for page in &pages {
            let mut cursor = layout.margin_mm;
            for element in page.body() {
                prop_assert!(element.top() >= cursor - EPSILON);
                prop_assert!(element.bottom() <= bottom + EPSILON);
                cursor = element.bottom();
            }
        }

        let body: Vec<&Element> = pages.iter().flat_map(|p| p.body()).collect();
        let text_blocks: Vec<usize> = body
            .iter()
            .filter_map(|e| match e {
                Element::Text { lines, .. } => Some(lines.len()),
                _ => None,
            })
            .collect();
        let expected_text: Vec<usize> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Text(n) => Some(*n),
                Block::Table(_) => None,
            })
            .collect();
        prop_assert_eq!(text_blocks, expected_text);

        let rows = body.iter().filter(|e| matches!(e, Element::TableRow { .. })).count();
        let expected_rows: usize = blocks
            .iter()
            .map(|b| match b {
                Block::Table(n) => *n,
                Block::Text(_) => 0,
            })
            .sum();
        prop_assert_eq!(rows, expected_rows);
    }

    #[test]
    fn prop_compose_is_deterministic(
        animals in prop::collection::vec(animal(), 0..30),
        ai_records in prop::collection::vec(ai_record(), 0..30),
        milk_records in prop::collection::vec(milk_record(), 0..30),
    ) {
        let first = compose(&animals, &ai_records, &milk_records);
        let second = compose(&animals, &ai_records, &milk_records);
        prop_assert_eq!(first, second);
    }
}
