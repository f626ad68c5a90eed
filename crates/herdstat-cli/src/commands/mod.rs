pub mod analyze;
pub mod profiles;
pub mod report;

use herdstat_core::error::HerdError;
use herdstat_core::profile::builtin;
use herdstat_core::profile::schema::AnalyticsProfile;
use std::path::Path;

/// Custom profile file if given, else the named preset, else `default`.
pub fn resolve_profile(
    profile: Option<&Path>,
    preset: Option<&str>,
) -> Result<AnalyticsProfile, HerdError> {
    match (profile, preset) {
        (Some(path), _) => herdstat_core::profile::load_profile(path),
        (None, Some(name)) => builtin::load_preset(name),
        (None, None) => builtin::default_profile(),
    }
}
