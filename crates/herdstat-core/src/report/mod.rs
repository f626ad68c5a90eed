pub mod document;
pub mod layout;

use crate::aggregate::{AiOutcome, Bucket, MilkTotal};
use crate::metrics::{FarmMetrics, GroupSuccess};
use crate::model::{FarmDescriptor, HerdCategory};
use crate::profile::schema::LayoutDef;
use crate::rating::PerformanceRating;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use document::{Cell, Element, Page, PaginatedDocument, TextStyle};
pub use layout::{wrap_text, PageWriter, TableSpec};

pub const REPORT_TITLE: &str = "Farm Analytics Report";
const FILENAME_PREFIX: &str = "Farm_Analytics_Report";
const FILENAME_FORBIDDEN: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
const SECTION_GAP_MM: f64 = 6.0;
const NOT_AVAILABLE: &str = "N/A";

/// A finished report and the name it should be saved under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportArtifact {
    pub document: PaginatedDocument,
    pub file_stem: String,
}

impl ReportArtifact {
    pub fn suggested_filename(&self, extension: &str) -> String {
        format!("{}.{}", self.file_stem, extension.trim_start_matches('.'))
    }
}

/// `Farm_Analytics_Report_<farm name>_<YYYY-MM-DD>`, with runs of whitespace
/// replaced by `_` and characters illegal in file names removed.
pub fn file_stem(farm: &FarmDescriptor, date: NaiveDate) -> String {
    let name = farm
        .display_name()
        .split_whitespace()
        .map(|word| word.replace(FILENAME_FORBIDDEN, ""))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    let name = if name.is_empty() { "Farm".to_string() } else { name };
    format!("{FILENAME_PREFIX}_{name}_{}", date.format("%Y-%m-%d"))
}

fn or_na(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn litres(value: Decimal) -> String {
    format!("{:.1} L", value)
}

fn pct(value: Decimal) -> String {
    format!("{:.1}%", value)
}

fn farm_block(farm: &FarmDescriptor) -> String {
    let status = match farm.is_active {
        Some(true) => "Active",
        Some(false) => "Inactive",
        None => "Unknown",
    };
    [
        format!("Farm Name: {}", farm.display_name()),
        format!("Registration Number: {}", or_na(farm.registration_number.as_deref())),
        format!("Owner: {}", or_na(farm.owner_name.as_deref())),
        format!("Address: {}", or_na(farm.address.as_deref())),
        format!("Farm Type: {}", or_na(farm.farm_type.as_deref())),
        format!("Status: {status}"),
    ]
    .join("\n")
}

fn herd_table(metrics: &FarmMetrics) -> TableSpec {
    let composition = &metrics.herd_composition;
    let mut table = TableSpec::new(&["Category", "Count", "Share"]).with_widths(&[2.0, 1.0, 1.0]);
    for category in HerdCategory::ALL {
        table.row(vec![
            category.label().to_string(),
            composition.count(category).to_string(),
            pct(composition.share_pct(category, metrics.total_animals)),
        ]);
    }
    table.row(vec![
        "Unclassified".to_string(),
        composition.unclassified.to_string(),
        String::new(),
    ]);
    table.row(vec![
        "Total Animals".to_string(),
        metrics.total_animals.to_string(),
        String::new(),
    ]);
    table
}

fn milk_table(metrics: &FarmMetrics) -> TableSpec {
    let extreme = |month: &Option<String>, value: Decimal| match month {
        Some(label) => format!("{} ({label})", litres(value)),
        None => NOT_AVAILABLE.to_string(),
    };
    let mut table = TableSpec::new(&["Metric", "Value"]).with_widths(&[1.0, 1.0]);
    table.row(vec![
        "Total Milk Production".into(),
        litres(metrics.total_milk_production),
    ]);
    table.row(vec!["Milking Cows".into(), metrics.milking_cows.to_string()]);
    table.row(vec![
        "Average per Milking Cow".into(),
        litres(metrics.avg_milk_per_cow),
    ]);
    table.row(vec![
        "Peak Production".into(),
        extreme(&metrics.peak_month, metrics.peak_milk_production),
    ]);
    table.row(vec![
        "Lowest Production".into(),
        extreme(&metrics.lowest_month, metrics.lowest_milk_production),
    ]);
    table.row(vec![
        "Growth Rate".into(),
        metrics
            .growth_rate
            .map(pct)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    ]);
    table
}

fn milk_series_table(header: &str, series: &[Bucket<MilkTotal>]) -> TableSpec {
    let mut table = TableSpec::new(&[header, "Production", "Records"]).with_widths(&[2.0, 2.0, 1.0]);
    for bucket in series {
        table.row(vec![
            bucket.label.clone(),
            litres(bucket.value.production),
            bucket.value.records.to_string(),
        ]);
    }
    table
}

fn ai_table(metrics: &FarmMetrics) -> TableSpec {
    let mut table = TableSpec::new(&["Metric", "Value"]).with_widths(&[1.0, 1.0]);
    table.row(vec!["Total AI Records".into(), metrics.total_ai.to_string()]);
    table.row(vec![
        "Confirmed Pregnancies".into(),
        metrics.pregnant_count.to_string(),
    ]);
    table.row(vec!["Success Rate".into(), pct(metrics.pregnancy_rate)]);
    for (status, count) in &metrics.pregnancy_status {
        table.row(vec![format!("Status: {status}"), count.to_string()]);
    }
    table
}

fn group_table(header: &str, groups: &[GroupSuccess]) -> TableSpec {
    let mut table = TableSpec::new(&[header, "AI Records", "Pregnant", "Success Rate"])
        .with_widths(&[2.0, 1.0, 1.0, 1.0]);
    for group in groups {
        table.row(vec![
            group.name.clone(),
            group.total.to_string(),
            group.pregnant.to_string(),
            pct(group.success_rate),
        ]);
    }
    table
}

fn ai_series_table(header: &str, series: &[Bucket<AiOutcome>]) -> TableSpec {
    let mut table = TableSpec::new(&[header, "AI Records", "Pregnant", "Success Rate"])
        .with_widths(&[2.0, 1.0, 1.0, 1.0]);
    for bucket in series {
        table.row(vec![
            bucket.label.clone(),
            bucket.value.total.to_string(),
            bucket.value.pregnant.to_string(),
            pct(bucket.value.success_rate),
        ]);
    }
    table
}

fn summary_block(rating: &PerformanceRating) -> String {
    let list = |items: &[String]| {
        items
            .iter()
            .map(|item| format!("- {item}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        "Overall Rating: {}\n\nStrengths:\n{}\n\nAreas for Improvement:\n{}\n\nRecommendations:\n{}",
        rating.tier,
        list(&rating.strengths),
        list(&rating.weaknesses),
        list(&rating.recommendations),
    )
}

/// Heading kept on the same page as the first `following_mm` of its content.
fn heading(writer: &mut PageWriter, text: &str, style: TextStyle, following_mm: f64) {
    writer.gap(SECTION_GAP_MM);
    writer.ensure_space(style.line_height_mm() + following_mm);
    writer.write_text(text, style);
}

fn table_lead(writer: &PageWriter, table: &TableSpec) -> f64 {
    let layout = writer.layout();
    if table.rows.is_empty() {
        layout.table_header_height_mm
    } else {
        layout.table_header_height_mm + layout.table_row_height_mm
    }
}

fn titled_table(writer: &mut PageWriter, title: &str, style: TextStyle, table: &TableSpec) {
    let lead = table_lead(writer, table);
    heading(writer, title, style, lead);
    writer.write_table(table);
}

/// Lay out a farm's metrics and rating on fixed-size pages.
///
/// Sections always appear in the same order; the AI section starts on a new
/// page when less than `section_break_min_space_mm` remains.
pub fn compose_report(
    farm: &FarmDescriptor,
    metrics: &FarmMetrics,
    rating: &PerformanceRating,
    layout: &LayoutDef,
    generated_on: NaiveDate,
) -> ReportArtifact {
    let mut writer = PageWriter::new(layout.clone());

    writer.write_text(REPORT_TITLE, TextStyle::Title);
    writer.write_text(
        &format!("Generated on {}", generated_on.format("%Y-%m-%d")),
        TextStyle::Small,
    );

    let farm_text = farm_block(farm);
    let farm_height = writer.measure_text(&farm_text, TextStyle::Body);
    heading(&mut writer, "Farm Information", TextStyle::Heading, farm_height);
    writer.write_text(&farm_text, TextStyle::Body);

    titled_table(&mut writer, "Herd Composition", TextStyle::Heading, &herd_table(metrics));

    titled_table(&mut writer, "Milk Production", TextStyle::Heading, &milk_table(metrics));
    if !metrics.monthly_milk.is_empty() {
        titled_table(
            &mut writer,
            "Monthly Production",
            TextStyle::Body,
            &milk_series_table("Month", &metrics.monthly_milk),
        );
    }
    if !metrics.seasonal_milk.is_empty() {
        titled_table(
            &mut writer,
            "Seasonal Production",
            TextStyle::Body,
            &milk_series_table("Season", &metrics.seasonal_milk),
        );
    }

    writer.break_if_below(layout.section_break_min_space_mm);
    titled_table(&mut writer, "AI Analysis", TextStyle::Heading, &ai_table(metrics));
    if !metrics.technician_performance.is_empty() {
        titled_table(
            &mut writer,
            "Technician Performance",
            TextStyle::Body,
            &group_table("Technician", &metrics.technician_performance),
        );
    }
    if !metrics.breed_performance.is_empty() {
        titled_table(
            &mut writer,
            "Bull Breed Performance",
            TextStyle::Body,
            &group_table("Bull Breed", &metrics.breed_performance),
        );
    }
    if !metrics.seasonal_ai.is_empty() {
        titled_table(
            &mut writer,
            "Seasonal AI Success",
            TextStyle::Body,
            &ai_series_table("Season", &metrics.seasonal_ai),
        );
    }

    let summary = summary_block(rating);
    let summary_height = writer.measure_text(&summary, TextStyle::Body);
    heading(&mut writer, "Performance Summary", TextStyle::Heading, summary_height);
    writer.write_text(&summary, TextStyle::Body);

    let farm_name = farm.display_name().to_string();
    let title = format!("{farm_name} - {REPORT_TITLE}");
    let pages = writer.finish(|number, total| format!("{title} | Page {number} of {total}"));

    tracing::debug!(pages = pages.len(), farm = %farm_name, "report laid out");

    ReportArtifact {
        document: PaginatedDocument {
            title: format!("{farm_name} - {REPORT_TITLE}"),
            page_width_mm: layout.page_width_mm,
            page_height_mm: layout.page_height_mm,
            margin_mm: layout.margin_mm,
            pages,
        },
        file_stem: file_stem(farm, generated_on),
    }
}
