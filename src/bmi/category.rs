//! BMI categories
//!
//! The category ranges live in a table ordered by lower bound. Each range is
//! half-open with the lower bound inclusive, and the first range starts at
//! negative infinity, so every BMI value lands in exactly one category.

use serde::{Deserialize, Serialize};

/// Health category for a BMI value, in ascending BMI order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BmiCategory {
    #[serde(rename = "Severe Thinness")]
    SevereThinness,
    #[serde(rename = "Moderate Thinness")]
    ModerateThinness,
    #[serde(rename = "Mild Thinness")]
    MildThinness,
    #[serde(rename = "Normal")]
    Normal,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obese Class I")]
    ObeseClassI,
    #[serde(rename = "Obese Class II")]
    ObeseClassII,
    #[serde(rename = "Obese Class III")]
    ObeseClassIII,
}

impl BmiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::SevereThinness => "Severe Thinness",
            BmiCategory::ModerateThinness => "Moderate Thinness",
            BmiCategory::MildThinness => "Mild Thinness",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObeseClassI => "Obese Class I",
            BmiCategory::ObeseClassII => "Obese Class II",
            BmiCategory::ObeseClassIII => "Obese Class III",
        }
    }

    /// Severity tier, 1 (Severe Thinness) through 8 (Obese Class III).
    ///
    /// Only meant for picking a presentation style.
    pub fn tier(&self) -> u8 {
        match self {
            BmiCategory::SevereThinness => 1,
            BmiCategory::ModerateThinness => 2,
            BmiCategory::MildThinness => 3,
            BmiCategory::Normal => 4,
            BmiCategory::Overweight => 5,
            BmiCategory::ObeseClassI => 6,
            BmiCategory::ObeseClassII => 7,
            BmiCategory::ObeseClassIII => 8,
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the category table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryRange {
    /// Inclusive lower bound
    pub lower: f64,
    pub category: BmiCategory,
}

impl CategoryRange {
    /// Exclusive upper bound (the next row's lower bound, or +inf)
    pub fn upper(&self) -> f64 {
        CATEGORY_TABLE
            .iter()
            .map(|range| range.lower)
            .find(|&lower| lower > self.lower)
            .unwrap_or(f64::INFINITY)
    }

    pub fn contains(&self, bmi: f64) -> bool {
        bmi >= self.lower && bmi < self.upper()
    }
}

/// Category ranges ordered by lower bound
pub static CATEGORY_TABLE: [CategoryRange; 8] = [
    CategoryRange { lower: f64::NEG_INFINITY, category: BmiCategory::SevereThinness },
    CategoryRange { lower: 16.0, category: BmiCategory::ModerateThinness },
    CategoryRange { lower: 17.0, category: BmiCategory::MildThinness },
    CategoryRange { lower: 18.5, category: BmiCategory::Normal },
    CategoryRange { lower: 25.0, category: BmiCategory::Overweight },
    CategoryRange { lower: 30.0, category: BmiCategory::ObeseClassI },
    CategoryRange { lower: 35.0, category: BmiCategory::ObeseClassII },
    CategoryRange { lower: 40.0, category: BmiCategory::ObeseClassIII },
];

/// Look up the table row containing a BMI value
///
/// NaN compares false against every bound and ends up in the first row.
pub fn category_range(bmi: f64) -> &'static CategoryRange {
    let idx = CATEGORY_TABLE.partition_point(|range| range.lower <= bmi);
    &CATEGORY_TABLE[idx.saturating_sub(1)]
}

/// Classify a BMI value into its category and severity tier
pub fn classify(bmi: f64) -> (BmiCategory, u8) {
    let category = category_range(bmi).category;
    (category, category.tier())
}
