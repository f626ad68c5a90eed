use herdstat_core::error::HerdError;
use herdstat_core::parsing::load_dataset;
use std::path::Path;

use crate::output;

pub fn run(
    dataset_path: &Path,
    output_format: &str,
    profile: Option<&Path>,
    preset: Option<&str>,
) -> Result<(), HerdError> {
    let profile = super::resolve_profile(profile, preset)?;
    let dataset = load_dataset(dataset_path)?;
    let assessment = herdstat_core::assess(&dataset, &profile);

    match output_format {
        "json" => output::json::print(&assessment)?,
        _ => output::table::print(&assessment),
    }

    Ok(())
}
