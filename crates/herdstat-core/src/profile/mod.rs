pub mod builtin;
pub mod schema;

use crate::error::HerdError;
use crate::rating::PerformanceTier;
use schema::AnalyticsProfile;
use std::collections::HashSet;
use std::path::Path;

/// Load a profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<AnalyticsProfile, HerdError> {
    let content = std::fs::read_to_string(path).map_err(|e| HerdError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse a profile from a JSON string.
pub fn parse_profile(json: &str, source: &Path) -> Result<AnalyticsProfile, HerdError> {
    let profile: AnalyticsProfile =
        serde_json::from_str(json).map_err(|e| HerdError::ProfileLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Parse a profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<AnalyticsProfile, HerdError> {
    let profile: AnalyticsProfile = serde_json::from_str(json).map_err(HerdError::Json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is well-formed.
pub fn validate_profile(profile: &AnalyticsProfile) -> Result<(), HerdError> {
    if profile.tiers.is_empty() {
        return Err(HerdError::ProfileInvalid("tiers must not be empty".into()));
    }

    let mut seen = HashSet::new();
    for row in &profile.tiers {
        if row.tier == PerformanceTier::NeedsImprovement {
            return Err(HerdError::ProfileInvalid(
                "'Needs Improvement' is the fallback tier and cannot have thresholds".into(),
            ));
        }
        if !seen.insert(row.tier) {
            return Err(HerdError::ProfileInvalid(format!(
                "tier '{}' appears more than once",
                row.tier
            )));
        }
        if row.min_success_rate.is_sign_negative() || row.min_avg_milk_per_cow.is_sign_negative()
        {
            return Err(HerdError::ProfileInvalid(format!(
                "tier '{}' has a negative threshold",
                row.tier
            )));
        }
    }

    for pair in profile.tiers.windows(2) {
        let (upper, lower) = (&pair[0], &pair[1]);
        if lower.min_success_rate > upper.min_success_rate
            || lower.min_avg_milk_per_cow > upper.min_avg_milk_per_cow
        {
            return Err(HerdError::ProfileInvalid(format!(
                "tier '{}' has higher thresholds than '{}' listed above it",
                lower.tier, upper.tier
            )));
        }
    }

    if profile.success_rate_target.is_sign_negative() {
        return Err(HerdError::ProfileInvalid(
            "success_rate_target must not be negative".into(),
        ));
    }

    let layout = &profile.layout;
    if layout.page_width_mm <= 0.0 || layout.page_height_mm <= 0.0 {
        return Err(HerdError::ProfileInvalid(
            "page dimensions must be positive".into(),
        ));
    }
    if layout.margin_mm < 0.0 || layout.content_width() <= 0.0 || layout.content_height() <= 0.0
    {
        return Err(HerdError::ProfileInvalid(format!(
            "margin {}mm leaves no content area on a {}x{}mm page",
            layout.margin_mm, layout.page_width_mm, layout.page_height_mm
        )));
    }
    if layout.table_row_height_mm <= 0.0 || layout.table_header_height_mm <= 0.0 {
        return Err(HerdError::ProfileInvalid(
            "table band heights must be positive".into(),
        ));
    }
    if layout.table_header_height_mm + layout.table_row_height_mm > layout.content_height() {
        return Err(HerdError::ProfileInvalid(
            "a table header and one row must fit on a page".into(),
        ));
    }
    if layout.section_break_min_space_mm < 0.0 {
        return Err(HerdError::ProfileInvalid(
            "section_break_min_space_mm must not be negative".into(),
        ));
    }
    if layout.section_break_min_space_mm > layout.content_height() {
        return Err(HerdError::ProfileInvalid(format!(
            "section_break_min_space_mm ({}) exceeds the content height ({}mm)",
            layout.section_break_min_space_mm,
            layout.content_height()
        )));
    }

    Ok(())
}
