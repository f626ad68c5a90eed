pub mod aggregate;
pub mod classify;
pub mod error;
pub mod metrics;
pub mod model;
pub mod parsing;
pub mod profile;
pub mod rating;
pub mod report;

use chrono::NaiveDate;
use metrics::FarmMetrics;
use model::FarmDataset;
use profile::schema::AnalyticsProfile;
use rating::PerformanceRating;
use report::ReportArtifact;
use serde::Serialize;

/// Metrics together with the rating derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmAssessment {
    pub farm_name: String,
    pub metrics: FarmMetrics,
    pub rating: PerformanceRating,
}

/// Main API entry point for on-screen analytics.
pub fn analyze(dataset: &FarmDataset) -> FarmMetrics {
    let metrics = metrics::compose(&dataset.animals, &dataset.ai_records, &dataset.milk_records);
    tracing::info!(
        farm = dataset.farm.display_name(),
        animals = metrics.total_animals,
        ai_records = metrics.total_ai,
        milk_records = dataset.milk_records.len(),
        "analysis complete"
    );
    metrics
}

/// Analyze a dataset and rate it against a profile's thresholds.
pub fn assess(dataset: &FarmDataset, profile: &AnalyticsProfile) -> FarmAssessment {
    let metrics = analyze(dataset);
    let rating = rating::rate(&metrics, profile);
    FarmAssessment {
        farm_name: dataset.farm.display_name().to_string(),
        metrics,
        rating,
    }
}

/// Run the whole pipeline and lay out the report, dated `generated_on`.
pub fn build_report(
    dataset: &FarmDataset,
    profile: &AnalyticsProfile,
    generated_on: NaiveDate,
) -> ReportArtifact {
    let assessment = assess(dataset, profile);
    let artifact = report::compose_report(
        &dataset.farm,
        &assessment.metrics,
        &assessment.rating,
        &profile.layout,
        generated_on,
    );
    tracing::info!(
        pages = artifact.document.page_count(),
        tier = %assessment.rating.tier,
        file = %artifact.file_stem,
        "report built"
    );
    artifact
}
