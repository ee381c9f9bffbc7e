//! BMI calculation
//!
//! Turns raw field text into a [`BmiResult`]. Input that cannot be used
//! (empty, not a number, zero, or a BMI too large to represent) produces no result instead of an error the
//! caller has to handle; [`try_calculate`] reports the reason when needed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::category::{classify, BmiCategory};
use super::units::{normalize, UnitSystem};

/// Which input field a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputField {
    Weight,
    Height,
}

impl std::fmt::Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputField::Weight => f.write_str("weight"),
            InputField::Height => f.write_str("height"),
        }
    }
}

/// Reasons raw input is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{0} is empty")]
    Empty(InputField),

    #[error("{0} '{1}' is not a number")]
    NotANumber(InputField, String),

    #[error("{0} must not be zero")]
    Zero(InputField),

    #[error("{0} is out of range")]
    OutOfRange(InputField),
}

/// A computed BMI with its category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// BMI rounded to two decimal places
    pub bmi: f64,
    pub category: BmiCategory,
    /// 1..=8, ascending with BMI
    pub severity_tier: u8,
}

impl BmiResult {
    /// BMI with exactly two decimals, e.g. "22.86"
    pub fn formatted_bmi(&self) -> String {
        format!("{:.2}", self.bmi)
    }
}

/// Raw form input for one calculation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BmiRequest {
    pub weight: String,
    pub height: String,
    #[serde(default)]
    pub unit_system: UnitSystem,
}

impl BmiRequest {
    pub fn new(weight: impl Into<String>, height: impl Into<String>, unit_system: UnitSystem) -> Self {
        Self {
            weight: weight.into(),
            height: height.into(),
            unit_system,
        }
    }

    pub fn calculate(&self) -> Option<BmiResult> {
        calculate(&self.weight, &self.height, self.unit_system)
    }

    pub fn try_calculate(&self) -> Result<BmiResult, InputError> {
        try_calculate(&self.weight, &self.height, self.unit_system)
    }
}

/// weight (kg) / height (m)^2
///
/// Height must be finite and non-zero; this is not checked here.
pub fn compute_bmi(weight_kg: f64, height_m: f64) -> f64 {
    weight_kg / (height_m * height_m)
}

/// Round to two decimal places
///
/// Rounds the exact decimal value of the double, so 10.045 (stored as
/// 10.04499...) becomes 10.04.
pub fn round_bmi(bmi: f64) -> f64 {
    format!("{:.2}", bmi).parse().unwrap_or(bmi)
}

/// Calculate BMI from raw field text, or `None` if the input is unusable
pub fn calculate(weight_text: &str, height_text: &str, unit_system: UnitSystem) -> Option<BmiResult> {
    match try_calculate(weight_text, height_text, unit_system) {
        Ok(result) => Some(result),
        Err(e) => {
            tracing::debug!("No BMI result: {}", e);
            None
        }
    }
}

/// Calculate BMI from raw field text, reporting why input was rejected
///
/// Negative values are accepted and classified as-is.
pub fn try_calculate(
    weight_text: &str,
    height_text: &str,
    unit_system: UnitSystem,
) -> Result<BmiResult, InputError> {
    let weight = parse_input(weight_text, InputField::Weight)?;
    let height = parse_input(height_text, InputField::Height)?;

    let (weight_kg, height_m) = normalize(weight, height, unit_system);
    let bmi = compute_bmi(weight_kg, height_m);

    if !bmi.is_finite() {
        // A tiny height squares to zero; otherwise the weight overflowed
        let field = if height_m * height_m == 0.0 {
            InputField::Height
        } else {
            InputField::Weight
        };
        return Err(InputError::OutOfRange(field));
    }

    // Classify on the unrounded value
    let (category, severity_tier) = classify(bmi);

    Ok(BmiResult {
        bmi: round_bmi(bmi),
        category,
        severity_tier,
    })
}

/// Parse one field's text into a usable number
pub fn parse_input(text: &str, field: InputField) -> Result<f64, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty(field));
    }

    let value = leading_number(trimmed)
        .and_then(|num| num.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .ok_or_else(|| InputError::NotANumber(field, trimmed.to_string()))?;

    if value == 0.0 {
        return Err(InputError::Zero(field));
    }

    Ok(value)
}

/// Longest prefix of `s` that reads as a decimal number
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent. Trailing text such as a unit is ignored ("70kg").
fn leading_number(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < len && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - (end + 1);
        if digits + frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < len && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    Some(&s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_bmi() {
        let bmi = compute_bmi(70.0, 1.75);
        assert!((bmi - 22.857).abs() < 0.001);
    }

    #[test]
    fn test_compute_bmi_monotonic() {
        let heights = [1.2, 1.5, 1.75, 2.0];
        let weights = [40.0, 60.0, 80.0, 120.0];
        for &h in &heights {
            for pair in weights.windows(2) {
                assert!(compute_bmi(pair[0], h) < compute_bmi(pair[1], h));
            }
        }
        for &w in &weights {
            for pair in heights.windows(2) {
                assert!(compute_bmi(w, pair[0]) > compute_bmi(w, pair[1]));
            }
        }
    }

    #[test]
    fn test_calculate_metric() {
        let result = calculate("70", "1.75", UnitSystem::Metric).unwrap();
        assert!((result.bmi - 22.86).abs() < 1e-9);
        assert_eq!(result.category, BmiCategory::Normal);
        assert_eq!(result.severity_tier, 4);
        assert_eq!(result.formatted_bmi(), "22.86");
    }

    #[test]
    fn test_calculate_us() {
        let (kg, m) = normalize(154.0, 69.0, UnitSystem::Us);
        assert!((kg - 69.85).abs() < 0.01);
        assert!((m - 1.7526).abs() < 0.0001);

        let result = calculate("154", "69", UnitSystem::Us).unwrap();
        assert!((result.bmi - 22.74).abs() < 1e-9);
        assert_eq!(result.category, BmiCategory::Normal);
    }

    #[test]
    fn test_calculate_rejects_unusable_input() {
        assert_eq!(calculate("", "1.75", UnitSystem::Metric), None);
        assert_eq!(calculate("70", "   ", UnitSystem::Metric), None);
        assert_eq!(calculate("abc", "1.75", UnitSystem::Metric), None);
        assert_eq!(calculate("70", "0", UnitSystem::Metric), None);
        assert_eq!(calculate("0.0", "1.75", UnitSystem::Us), None);
        assert_eq!(calculate("NaN", "1.75", UnitSystem::Metric), None);
        assert_eq!(calculate("inf", "1.75", UnitSystem::Metric), None);
    }

    #[test]
    fn test_try_calculate_reports_reason() {
        assert_eq!(
            try_calculate("", "1.75", UnitSystem::Metric),
            Err(InputError::Empty(InputField::Weight))
        );
        assert_eq!(
            try_calculate("70", "tall", UnitSystem::Metric),
            Err(InputError::NotANumber(InputField::Height, "tall".to_string()))
        );
        assert_eq!(
            try_calculate("70", "-0", UnitSystem::Metric),
            Err(InputError::Zero(InputField::Height))
        );
        let err = try_calculate("70", "0", UnitSystem::Metric).unwrap_err();
        assert_eq!(err.to_string(), "height must not be zero");
    }

    #[test]
    fn test_calculate_rejects_non_finite_bmi() {
        assert_eq!(calculate("70", "1e-200", UnitSystem::Metric), None);
        assert_eq!(calculate("1e308", "0.5", UnitSystem::Metric), None);
        assert_eq!(
            try_calculate("70", "1e-200", UnitSystem::Metric),
            Err(InputError::OutOfRange(InputField::Height))
        );
        assert_eq!(
            try_calculate("1e308", "0.5", UnitSystem::Metric),
            Err(InputError::OutOfRange(InputField::Weight))
        );
        let err = try_calculate("70", "1e-200", UnitSystem::Us).unwrap_err();
        assert_eq!(err.to_string(), "height is out of range");
    }

    #[test]
    fn test_round_bmi_uses_exact_decimal_value() {
        assert_eq!(round_bmi(10.045), 10.04);
        assert_eq!(round_bmi(22.857142857), 22.86);
        assert_eq!(round_bmi(-22.857142857), -22.86);
        assert_eq!(round_bmi(18.5), 18.5);
    }

    #[test]
    fn test_calculate_negative_height_is_permitted() {
        // Squared height keeps the BMI positive
        let result = calculate("70", "-1.75", UnitSystem::Metric).unwrap();
        assert_eq!(result.category, BmiCategory::Normal);

        let result = calculate("-70", "1.75", UnitSystem::Metric).unwrap();
        assert!(result.bmi < 0.0);
        assert_eq!(result.category, BmiCategory::SevereThinness);
        assert_eq!(result.severity_tier, 1);
    }

    #[test]
    fn test_calculate_is_idempotent() {
        let a = calculate("81.3", "1.82", UnitSystem::Metric).unwrap();
        let b = calculate("81.3", "1.82", UnitSystem::Metric).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.bmi.to_bits(), b.bmi.to_bits());
    }

    #[test]
    fn test_classification_uses_unrounded_bmi() {
        // 24.996... rounds to 25.00 for display but is still Normal
        let height: f64 = 1.8;
        let weight = 24.996 * height * height;
        let result = calculate(&weight.to_string(), "1.8", UnitSystem::Metric).unwrap();
        assert_eq!(result.formatted_bmi(), "25.00");
        assert_eq!(result.category, BmiCategory::Normal);
    }

    #[test]
    fn test_parse_input_leading_number() {
        assert_eq!(parse_input("70kg", InputField::Weight), Ok(70.0));
        assert_eq!(parse_input(" 1.75 m ", InputField::Height), Ok(1.75));
        assert_eq!(parse_input(".5", InputField::Height), Ok(0.5));
        assert_eq!(parse_input("1.", InputField::Height), Ok(1.0));
        assert_eq!(parse_input("+3", InputField::Height), Ok(3.0));
        assert_eq!(parse_input("1e2", InputField::Weight), Ok(100.0));
        assert_eq!(parse_input("2e", InputField::Weight), Ok(2.0));
        assert_eq!(parse_input("-5", InputField::Weight), Ok(-5.0));
        assert!(matches!(
            parse_input(".", InputField::Weight),
            Err(InputError::NotANumber(InputField::Weight, _))
        ));
        assert!(matches!(
            parse_input("-", InputField::Weight),
            Err(InputError::NotANumber(_, _))
        ));
    }

    #[test]
    fn test_request_struct() {
        let request = BmiRequest::new("154", "69", UnitSystem::Us);
        assert_eq!(request.calculate(), calculate("154", "69", UnitSystem::Us));

        let request: BmiRequest = serde_json::from_str(r#"{"weight": "70", "height": "1.75"}"#).unwrap();
        assert_eq!(request.unit_system, UnitSystem::Metric);
        assert!(request.try_calculate().is_ok());
    }

    #[test]
    fn test_result_serialization() {
        let result = calculate("70", "1.75", UnitSystem::Metric).unwrap();
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["category"], "Normal");
        assert_eq!(json["severity_tier"], 4);
        assert_eq!(json["bmi"], 22.86);
    }
}
