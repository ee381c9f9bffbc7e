//! Calculator Tools
//!
//! Request/response functions over the BMI engine and the calculator session.

use serde::Serialize;

use crate::bmi::{self, category_range, BmiResult, CategoryRange, UnitSystem, CATEGORY_TABLE};
use crate::session::{Session, SessionSnapshot};

/// Response for calculate_bmi
#[derive(Debug, Serialize)]
pub struct CalculateBmiResponse {
    pub unit_system: UnitSystem,
    pub weight: String,
    pub height: String,
    /// Absent when the input was rejected
    pub result: Option<BmiResult>,
    pub formatted_bmi: Option<String>,
    pub reason: Option<String>,
}

/// Response for convert_to_metric
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub unit_system: UnitSystem,
    pub weight: f64,
    pub height: f64,
    pub weight_kg: f64,
    pub height_m: f64,
}

/// One row of the category table
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub severity_tier: u8,
    /// Inclusive; absent for the open-ended lowest range
    pub min_bmi: Option<f64>,
    /// Exclusive; absent for the open-ended highest range
    pub max_bmi: Option<f64>,
}

impl From<&CategoryRange> for CategorySummary {
    fn from(range: &CategoryRange) -> Self {
        let upper = range.upper();
        Self {
            category: range.category.label().to_string(),
            severity_tier: range.category.tier(),
            min_bmi: Some(range.lower).filter(|v| v.is_finite()),
            max_bmi: Some(upper).filter(|v| v.is_finite()),
        }
    }
}

/// Response for classify_bmi
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub bmi: f64,
    #[serde(flatten)]
    pub category: CategorySummary,
}

/// Response for list_bmi_categories
#[derive(Debug, Serialize)]
pub struct ListCategoriesResponse {
    pub categories: Vec<CategorySummary>,
    pub total: usize,
}

/// Response for calculate on the session
#[derive(Debug, Serialize)]
pub struct SessionCalculateResponse {
    /// Whether a new result replaced the previous one
    pub updated: bool,
    pub reason: Option<String>,
    pub formatted_bmi: Option<String>,
    pub session: SessionSnapshot,
}

/// Response for switch_units
#[derive(Debug, Serialize)]
pub struct SwitchUnitsResponse {
    pub previous: UnitSystem,
    pub unit_system: UnitSystem,
    /// Fields and result were cleared
    pub cleared: bool,
    pub session: SessionSnapshot,
}

fn parse_unit_system(unit_system: Option<&str>) -> Result<UnitSystem, String> {
    UnitSystem::parse_or_default(unit_system).map_err(|e| e.to_string())
}

// ============================================================================
// Engine Tool Functions
// ============================================================================

/// Calculate BMI from raw text without touching any session
pub fn calculate_bmi(
    weight: &str,
    height: &str,
    unit_system: Option<&str>,
) -> Result<CalculateBmiResponse, String> {
    let unit_system = parse_unit_system(unit_system)?;

    let (result, reason) = match bmi::try_calculate(weight, height, unit_system) {
        Ok(result) => (Some(result), None),
        Err(e) => (None, Some(e.to_string())),
    };

    Ok(CalculateBmiResponse {
        unit_system,
        weight: weight.to_string(),
        height: height.to_string(),
        formatted_bmi: result.as_ref().map(BmiResult::formatted_bmi),
        result,
        reason,
    })
}

/// Convert weight and height into kilograms and meters
pub fn convert_to_metric(
    weight: f64,
    height: f64,
    unit_system: Option<&str>,
) -> Result<ConvertResponse, String> {
    let unit_system = parse_unit_system(unit_system)?;
    let (weight_kg, height_m) = bmi::normalize(weight, height, unit_system);

    Ok(ConvertResponse {
        unit_system,
        weight,
        height,
        weight_kg,
        height_m,
    })
}

/// Classify an already computed BMI value
pub fn classify_bmi(value: f64) -> Result<ClassifyResponse, String> {
    if value.is_nan() {
        return Err("BMI value must be a number".to_string());
    }

    Ok(ClassifyResponse {
        bmi: value,
        category: CategorySummary::from(category_range(value)),
    })
}

/// List all categories in ascending BMI order
pub fn list_categories() -> ListCategoriesResponse {
    let categories: Vec<CategorySummary> = CATEGORY_TABLE.iter().map(CategorySummary::from).collect();
    let total = categories.len();
    ListCategoriesResponse { categories, total }
}

// ============================================================================
// Session Tool Functions
// ============================================================================

/// Update either or both fields; omitted fields keep their text
pub fn set_fields(session: &mut Session, weight: Option<&str>, height: Option<&str>) -> SessionSnapshot {
    if let Some(w) = weight {
        session.set_weight(w);
    }
    if let Some(h) = height {
        session.set_height(h);
    }
    session.snapshot()
}

/// Calculate on the session's current fields
pub fn calculate_session(session: &mut Session) -> SessionCalculateResponse {
    let (updated, reason) = match session.try_calculate() {
        Ok(_) => (true, None),
        Err(e) => (false, Some(e.to_string())),
    };

    SessionCalculateResponse {
        updated,
        reason,
        formatted_bmi: session.result().map(BmiResult::formatted_bmi),
        session: session.snapshot(),
    }
}

/// Toggle the unit system, or select one by name
pub fn switch_units(session: &mut Session, unit_system: Option<&str>) -> Result<SwitchUnitsResponse, String> {
    let previous = session.unit_system();

    let current = match unit_system {
        Some(name) => session.set_unit_system(parse_unit_system(Some(name))?),
        None => session.toggle_units(),
    };

    Ok(SwitchUnitsResponse {
        previous,
        unit_system: current,
        cleared: current != previous,
        session: session.snapshot(),
    })
}

pub fn reset_session(session: &mut Session) -> SessionSnapshot {
    session.reset();
    session.snapshot()
}

pub fn get_session(session: &Session) -> SessionSnapshot {
    session.snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_bmi_tool() {
        let response = calculate_bmi("154", "69", Some("us")).unwrap();
        assert_eq!(response.unit_system, UnitSystem::Us);
        assert_eq!(response.formatted_bmi.as_deref(), Some("22.74"));
        assert!(response.reason.is_none());
    }

    #[test]
    fn test_calculate_bmi_tool_rejected_input() {
        let response = calculate_bmi("", "1.75", None).unwrap();
        assert!(response.result.is_none());
        assert!(response.formatted_bmi.is_none());
        assert_eq!(response.reason.as_deref(), Some("weight is empty"));
    }

    #[test]
    fn test_unknown_unit_system_is_an_error() {
        let err = calculate_bmi("70", "1.75", Some("stone")).unwrap_err();
        assert!(err.contains("stone"));
        assert!(convert_to_metric(1.0, 1.0, Some("parsecs")).is_err());
    }

    #[test]
    fn test_convert_to_metric_tool() {
        let response = convert_to_metric(150.0, 70.0, Some("US")).unwrap();
        assert!((response.weight_kg - 68.0388).abs() < 0.0001);
        assert!((response.height_m - 1.778).abs() < 0.0001);

        let response = convert_to_metric(70.0, 1.75, None).unwrap();
        assert_eq!(response.weight_kg, 70.0);
        assert_eq!(response.height_m, 1.75);
    }

    #[test]
    fn test_classify_bmi_tool() {
        let response = classify_bmi(17.0).unwrap();
        assert_eq!(response.category.category, "Mild Thinness");
        assert_eq!(response.category.severity_tier, 3);
        assert_eq!(response.category.min_bmi, Some(17.0));
        assert_eq!(response.category.max_bmi, Some(18.5));

        let response = classify_bmi(10.0).unwrap();
        assert_eq!(response.category.min_bmi, None);

        assert!(classify_bmi(f64::NAN).is_err());
    }

    #[test]
    fn test_list_categories() {
        let response = list_categories();
        assert_eq!(response.total, 8);
        assert_eq!(response.categories[0].category, "Severe Thinness");
        assert_eq!(response.categories[7].category, "Obese Class III");
        assert_eq!(response.categories[7].max_bmi, None);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["categories"][3]["min_bmi"], 18.5);
    }

    #[test]
    fn test_session_flow() {
        let mut session = Session::default();
        set_fields(&mut session, Some("70"), Some("1.75"));
        let response = calculate_session(&mut session);
        assert!(response.updated);
        assert_eq!(response.formatted_bmi.as_deref(), Some("22.86"));

        set_fields(&mut session, None, Some("x"));
        let response = calculate_session(&mut session);
        assert!(!response.updated);
        assert_eq!(response.formatted_bmi.as_deref(), Some("22.86"));
        assert_eq!(response.session.weight, "70");
        assert!(response.reason.unwrap().contains("not a number"));
    }

    #[test]
    fn test_switch_units_tool() {
        let mut session = Session::default();
        set_fields(&mut session, Some("70"), Some("1.75"));
        calculate_session(&mut session);

        let response = switch_units(&mut session, Some("metric")).unwrap();
        assert!(!response.cleared);
        assert!(response.session.result.is_some());

        let response = switch_units(&mut session, None).unwrap();
        assert!(response.cleared);
        assert_eq!(response.unit_system, UnitSystem::Us);
        assert!(response.session.result.is_none());
        assert_eq!(response.session.weight, "");

        assert!(switch_units(&mut session, Some("cubits")).is_err());
        assert_eq!(session.unit_system(), UnitSystem::Us);
    }

    #[test]
    fn test_reset_session_tool() {
        let mut session = Session::new(UnitSystem::Us);
        set_fields(&mut session, Some("154"), Some("69"));
        calculate_session(&mut session);
        let snapshot = reset_session(&mut session);
        assert_eq!(snapshot.unit_system, UnitSystem::Us);
        assert!(snapshot.result.is_none());
        assert_eq!(get_session(&session).height, "");
    }
}
