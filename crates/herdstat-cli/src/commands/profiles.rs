use herdstat_core::error::HerdError;
use herdstat_core::profile::builtin;
use herdstat_core::profile::schema::AnalyticsProfile;
use std::path::Path;

pub fn list() -> Result<(), HerdError> {
    println!("Available predefined profiles:\n");
    for name in builtin::PRESETS {
        let profile = builtin::load_preset(name)?;
        println!("  {:<8} {} (v{})", name, profile.name, profile.version);
        if let Some(ref desc) = profile.description {
            println!("           {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), HerdError> {
    let profile = builtin::load_preset(preset)?;
    print_profile(&profile);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), HerdError> {
    let profile = herdstat_core::profile::load_profile(file)?;

    println!("Profile '{}' (v{}) is valid.", profile.name, profile.version);
    println!("  Tiers: {}", profile.tiers.len());
    println!("  Success rate target: {}%", profile.success_rate_target);

    // Warnings, not errors
    let mut warnings = Vec::new();
    if profile
        .tiers
        .first()
        .is_some_and(|row| profile.success_rate_target > row.min_success_rate)
    {
        warnings.push(
            "success_rate_target is above the top tier's minimum; a top-tier farm can still list AI success as a weakness"
                .to_string(),
        );
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

fn print_profile(profile: &AnalyticsProfile) {
    println!("{} (version {})\n", profile.name, profile.version);
    if let Some(ref desc) = profile.description {
        println!("{}\n", desc);
    }

    println!("A farm gets the first tier whose two minimums it meets:\n");
    println!("  {:<20}  {:>14}  {:>18}", "Tier", "AI success (%)", "Milk per cow (L)");
    println!("  {}", "-".repeat(56));
    for row in &profile.tiers {
        println!(
            "  {:<20}  {:>14}  {:>18}",
            row.tier.to_string(),
            format!(">= {}", row.min_success_rate),
            format!(">= {}", row.min_avg_milk_per_cow)
        );
    }
    println!("  {:<20}  {:>14}  {:>18}", "Needs Improvement", "otherwise", "");
    println!();

    println!(
        "AI success counts as a strength at or above {}%.\n",
        profile.success_rate_target
    );

    let layout = &profile.layout;
    println!("Page layout:");
    println!(
        "  Page {} x {} mm, margins {} mm",
        layout.page_width_mm, layout.page_height_mm, layout.margin_mm
    );
    println!(
        "  Table header {} mm, rows {} mm",
        layout.table_header_height_mm, layout.table_row_height_mm
    );
    println!(
        "  AI section starts a new page with less than {} mm left",
        layout.section_break_min_space_mm
    );
    println!();
}
