use chrono::{Local, NaiveDate};
use herdstat_core::error::HerdError;
use herdstat_core::parsing::load_dataset;
use std::path::Path;

use crate::output;

pub fn run(
    dataset_path: &Path,
    format: &str,
    out_dir: &Path,
    date: Option<NaiveDate>,
    profile: Option<&Path>,
    preset: Option<&str>,
) -> Result<(), HerdError> {
    let profile = super::resolve_profile(profile, preset)?;
    let dataset = load_dataset(dataset_path)?;
    let generated_on = date.unwrap_or_else(|| Local::now().date_naive());

    let artifact = herdstat_core::build_report(&dataset, &profile, generated_on);

    let (extension, contents) = match format {
        "json" => ("json", serde_json::to_string_pretty(&artifact.document)?),
        _ => ("txt", output::document::render_text(&artifact.document)),
    };

    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(artifact.suggested_filename(extension));
    std::fs::write(&path, contents)?;
    tracing::info!(path = %path.display(), "report written");

    println!(
        "Wrote {} ({} page{})",
        path.display(),
        artifact.document.page_count(),
        if artifact.document.page_count() == 1 { "" } else { "s" }
    );
    Ok(())
}
