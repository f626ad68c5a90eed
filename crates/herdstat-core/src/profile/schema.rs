use crate::rating::PerformanceTier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Thresholds and page geometry used by the rating and report stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Rating rows, best tier first. A farm gets the first row whose two
    /// minimums it meets; `Needs Improvement` is the implicit fallback.
    pub tiers: Vec<TierRuleDef>,
    /// Success rate (%) at or above which AI performance counts as a strength.
    #[serde(default = "default_success_rate_target")]
    pub success_rate_target: Decimal,
    #[serde(default)]
    pub layout: LayoutDef,
}

fn default_success_rate_target() -> Decimal {
    Decimal::from(60)
}

/// One row of the tier table. Both minimums must hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierRuleDef {
    pub tier: PerformanceTier,
    pub min_success_rate: Decimal,
    pub min_avg_milk_per_cow: Decimal,
}

/// Page geometry in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutDef {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub margin_mm: f64,
    pub table_header_height_mm: f64,
    pub table_row_height_mm: f64,
    /// Space that must remain on the page before the AI section starts,
    /// otherwise it begins on a new page.
    pub section_break_min_space_mm: f64,
}

impl Default for LayoutDef {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 20.0,
            table_header_height_mm: 10.0,
            table_row_height_mm: 8.0,
            section_break_min_space_mm: 60.0,
        }
    }
}

impl LayoutDef {
    pub fn content_width(&self) -> f64 {
        self.page_width_mm - 2.0 * self.margin_mm
    }

    pub fn content_height(&self) -> f64 {
        self.page_height_mm - 2.0 * self.margin_mm
    }
}
