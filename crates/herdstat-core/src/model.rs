use crate::parsing::dates::deserialize_loose_date;
use crate::parsing::values::{deserialize_loose_text, deserialize_quantity};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnimalType {
    Cattle,
    Buffalo,
    Other,
}

impl fmt::Display for AnimalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimalType::Cattle => write!(f, "Cattle"),
            AnimalType::Buffalo => write!(f, "Buffalo"),
            AnimalType::Other => write!(f, "Other"),
        }
    }
}

impl AnimalType {
    pub fn from_str_loose(s: &str) -> AnimalType {
        let lower = s.trim().to_lowercase();
        if lower.contains("cattle") || lower == "cow" {
            AnimalType::Cattle
        } else if lower.contains("buffalo") {
            AnimalType::Buffalo
        } else {
            AnimalType::Other
        }
    }
}

/// Outcome recorded against an insemination.
///
/// Upstream stores this as free text; only an exact (case-insensitive) "Pregnant"
/// counts as a success. Missing or unrecognized values read as `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PregnancyStatus {
    Pregnant,
    #[serde(rename = "Not Pregnant")]
    NotPregnant,
    Aborted,
    #[default]
    Unknown,
}

impl PregnancyStatus {
    pub const ALL: [PregnancyStatus; 4] = [
        PregnancyStatus::Pregnant,
        PregnancyStatus::NotPregnant,
        PregnancyStatus::Aborted,
        PregnancyStatus::Unknown,
    ];

    /// Case and surrounding whitespace are ignored. Anything unrecognised is
    /// `Unknown`.
    pub fn from_str_loose(s: &str) -> PregnancyStatus {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "pregnant" => PregnancyStatus::Pregnant,
            "not pregnant" | "not-pregnant" | "non-pregnant" | "non pregnant" => {
                PregnancyStatus::NotPregnant
            }
            "aborted" => PregnancyStatus::Aborted,
            _ => PregnancyStatus::Unknown,
        }
    }

    pub fn is_pregnant(&self) -> bool {
        matches!(self, PregnancyStatus::Pregnant)
    }
}

impl<'de> Deserialize<'de> for PregnancyStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .map(PregnancyStatus::from_str_loose)
            .unwrap_or_default())
    }
}

impl fmt::Display for PregnancyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PregnancyStatus::Pregnant => write!(f, "Pregnant"),
            PregnancyStatus::NotPregnant => write!(f, "Not Pregnant"),
            PregnancyStatus::Aborted => write!(f, "Aborted"),
            PregnancyStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

/// The fixed herd taxonomy. Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HerdCategory {
    #[serde(rename = "Milking Cow")]
    MilkingCow,
    #[serde(rename = "Dry Cow")]
    DryCow,
    #[serde(rename = "Pregnant Heifer")]
    PregnantHeifer,
    #[serde(rename = "Non-Pregnant Heifer")]
    NonPregnantHeifer,
    Bull,
    Calves,
}

impl HerdCategory {
    pub const ALL: [HerdCategory; 6] = [
        HerdCategory::MilkingCow,
        HerdCategory::DryCow,
        HerdCategory::PregnantHeifer,
        HerdCategory::NonPregnantHeifer,
        HerdCategory::Bull,
        HerdCategory::Calves,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HerdCategory::MilkingCow => "Milking Cow",
            HerdCategory::DryCow => "Dry Cow",
            HerdCategory::PregnantHeifer => "Pregnant Heifer",
            HerdCategory::NonPregnantHeifer => "Non-Pregnant Heifer",
            HerdCategory::Bull => "Bull",
            HerdCategory::Calves => "Calves",
        }
    }
}

impl fmt::Display for HerdCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalRecord {
    #[serde(default, deserialize_with = "deserialize_loose_text", alias = "_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text", alias = "animal_tag")]
    pub animal_tag: Option<String>,
    /// "Cattle" or "Buffalo" upstream; kept as text.
    #[serde(default, deserialize_with = "deserialize_loose_text", alias = "animal_type")]
    pub animal_type: Option<String>,
    /// Free text, e.g. "Milking Cow", "Female Calf". Classified by substring.
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub breed: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text", alias = "current_status")]
    pub current_status: Option<String>,
}

impl AnimalRecord {
    pub fn kind(&self) -> AnimalType {
        AnimalType::from_str_loose(self.animal_type.as_deref().unwrap_or(""))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRecord {
    #[serde(default, deserialize_with = "deserialize_loose_text", alias = "_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text", alias = "animal_tag")]
    pub animal_tag: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_date", alias = "ai_date")]
    pub ai_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_loose_text", alias = "bull_breed")]
    pub bull_breed: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text", alias = "technician_name")]
    pub technician_name: Option<String>,
    #[serde(default, alias = "pregnancy_status")]
    pub pregnancy_status: PregnancyStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilkRecord {
    #[serde(default, deserialize_with = "deserialize_loose_text", alias = "_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_date", alias = "report_month")]
    pub report_month: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "deserialize_quantity",
        alias = "total_milk_production"
    )]
    pub total_milk_production: Decimal,
}

/// Farm identity fields. Passed through to the report verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmDescriptor {
    #[serde(default, deserialize_with = "deserialize_loose_text", alias = "farm_name", alias = "name")]
    pub farm_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_loose_text",
        alias = "registration_number"
    )]
    pub registration_number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text", alias = "owner_name", alias = "owner")]
    pub owner_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_loose_text", alias = "farm_type")]
    pub farm_type: Option<String>,
    #[serde(default, alias = "is_active")]
    pub is_active: Option<bool>,
}

impl FarmDescriptor {
    pub fn display_name(&self) -> &str {
        self.farm_name.as_deref().unwrap_or("Unnamed Farm")
    }
}

/// Everything the engine consumes for one farm.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmDataset {
    #[serde(default)]
    pub farm: FarmDescriptor,
    #[serde(default)]
    pub animals: Vec<AnimalRecord>,
    #[serde(default, alias = "ai_records")]
    pub ai_records: Vec<AiRecord>,
    #[serde(default, alias = "milk_records")]
    pub milk_records: Vec<MilkRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pregnancy_status_ignores_case_and_padding() {
        assert_eq!(
            PregnancyStatus::from_str_loose("Pregnant"),
            PregnancyStatus::Pregnant
        );
        assert_eq!(
            PregnancyStatus::from_str_loose(" pregnant "),
            PregnancyStatus::Pregnant
        );
        assert_eq!(
            PregnancyStatus::from_str_loose("Not Pregnant"),
            PregnancyStatus::NotPregnant
        );
        assert_eq!(
            PregnancyStatus::from_str_loose("maybe"),
            PregnancyStatus::Unknown
        );
    }

    #[test]
    fn test_animal_type_loose() {
        assert_eq!(AnimalType::from_str_loose("Buffalo"), AnimalType::Buffalo);
        assert_eq!(AnimalType::from_str_loose("CATTLE"), AnimalType::Cattle);
        assert_eq!(AnimalType::from_str_loose("goat"), AnimalType::Other);
    }

    #[test]
    fn test_herd_category_ord_matches_display_order() {
        assert!(HerdCategory::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_dataset_accepts_camel_case_and_missing_fields() {
        let json = r#"{
            "farm": { "farmName": "Green Acres", "isActive": true },
            "animals": [
                { "animalTag": "A-1", "category": "Milking Cow" },
                { "animalTag": 42 }
            ],
            "aiRecords": [
                { "animalTag": "H-1", "aiDate": "2024-03-02T00:00:00.000Z", "pregnancyStatus": "Pregnant" },
                { "animalTag": "H-2", "pregnancyStatus": null }
            ],
            "milkRecords": [
                { "reportMonth": "2024-01", "totalMilkProduction": 1520.5 },
                { "reportMonth": "not a date", "totalMilkProduction": "300" }
            ]
        }"#;
        let ds: FarmDataset = serde_json::from_str(json).unwrap();
        assert_eq!(ds.farm.display_name(), "Green Acres");
        assert_eq!(ds.animals[1].animal_tag.as_deref(), Some("42"));
        assert!(ds.animals[1].category.is_none());
        assert_eq!(
            ds.ai_records[0].ai_date,
            NaiveDate::from_ymd_opt(2024, 3, 2)
        );
        assert_eq!(ds.ai_records[1].pregnancy_status, PregnancyStatus::Unknown);
        assert_eq!(
            ds.milk_records[0].report_month,
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert!(ds.milk_records[1].report_month.is_none());
        assert_eq!(ds.milk_records[1].total_milk_production, Decimal::from(300));
    }
}
