use crate::error::HerdError;
use crate::profile::schema::AnalyticsProfile;
use crate::profile::validate_profile;

const DEFAULT_PROFILE_JSON: &str = include_str!("../../profiles/default.json");

/// Available predefined profiles.
pub const PRESETS: &[&str] = &["default"];

/// Load a predefined profile by name.
pub fn load_preset(name: &str) -> Result<AnalyticsProfile, HerdError> {
    match name {
        "default" => {
            let profile: AnalyticsProfile = serde_json::from_str(DEFAULT_PROFILE_JSON)?;
            validate_profile(&profile)?;
            Ok(profile)
        }
        _ => Err(HerdError::UnknownPreset {
            name: name.to_string(),
            available: PRESETS.join(", "),
        }),
    }
}

/// The built-in default profile.
pub fn default_profile() -> Result<AnalyticsProfile, HerdError> {
    load_preset("default")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::schema::LayoutDef;
    use crate::rating::PerformanceTier;
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_default_preset() {
        let profile = load_preset("default").unwrap();
        let tiers: Vec<PerformanceTier> = profile.tiers.iter().map(|t| t.tier).collect();
        assert_eq!(
            tiers,
            vec![
                PerformanceTier::Excellent,
                PerformanceTier::Good,
                PerformanceTier::Average
            ]
        );
        assert_eq!(profile.tiers[0].min_success_rate, dec!(70));
        assert_eq!(profile.tiers[0].min_avg_milk_per_cow, dec!(15));
        assert_eq!(profile.tiers[2].min_avg_milk_per_cow, dec!(10));
        assert_eq!(profile.success_rate_target, dec!(60));
        assert_eq!(profile.layout, LayoutDef::default());
    }

    #[test]
    fn test_unknown_preset() {
        assert!(matches!(
            load_preset("xyz"),
            Err(HerdError::UnknownPreset { .. })
        ));
    }
}
