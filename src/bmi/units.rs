//! Unit systems and conversion constants
//!
//! Weight and height share one unit system; US inputs are converted into
//! kilograms and meters before any calculation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Conversion Constants
// ============================================================================

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;
/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;
/// Centimeters per meter
pub const CM_PER_M: f64 = 100.0;

/// Unit system shared by the weight and height fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Kilograms and meters
    #[default]
    Metric,
    /// Pounds and inches
    Us,
}

#[derive(Debug, Error)]
#[error("Unknown unit system '{0}' (expected 'metric' or 'us')")]
pub struct UnitSystemError(pub String);

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Us => "us",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "si" => Some(UnitSystem::Metric),
            "us" | "imperial" => Some(UnitSystem::Us),
            _ => None,
        }
    }

    /// Parse, or fall back to the default when no name is given
    pub fn parse_or_default(s: Option<&str>) -> Result<Self, UnitSystemError> {
        match s {
            None => Ok(UnitSystem::default()),
            Some(name) => Self::from_str(name).ok_or_else(|| UnitSystemError(name.to_string())),
        }
    }

    /// The other unit system
    pub fn toggled(&self) -> Self {
        match self {
            UnitSystem::Metric => UnitSystem::Us,
            UnitSystem::Us => UnitSystem::Metric,
        }
    }

    pub fn weight_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Us => "lbs",
        }
    }

    pub fn height_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m",
            UnitSystem::Us => "inches",
        }
    }

    /// Label for the weight input field
    pub fn weight_label(&self) -> String {
        format!("Weight ({})", self.weight_unit())
    }

    /// Label for the height input field
    pub fn height_label(&self) -> String {
        format!("Height ({})", self.height_unit())
    }
}

/// A single numeric reading in a given unit system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub unit: UnitSystem,
}

impl Measurement {
    pub fn new(value: f64, unit: UnitSystem) -> Self {
        Self { value, unit }
    }

    /// Interpret as a weight and return kilograms
    pub fn weight_kg(&self) -> f64 {
        match self.unit {
            UnitSystem::Metric => self.value,
            UnitSystem::Us => self.value * KG_PER_LB,
        }
    }

    /// Interpret as a height and return meters
    pub fn height_m(&self) -> f64 {
        match self.unit {
            UnitSystem::Metric => self.value,
            UnitSystem::Us => self.value * CM_PER_INCH / CM_PER_M,
        }
    }
}

/// Convert weight and height into kilograms and meters
///
/// Metric values pass through unchanged. No validation happens here.
pub fn normalize(weight: f64, height: f64, unit_system: UnitSystem) -> (f64, f64) {
    (
        Measurement::new(weight, unit_system).weight_kg(),
        Measurement::new(height, unit_system).height_m(),
    )
}
