//! BMI MCP Server Implementation
//!
//! Exposes the BMI engine and one calculator session as MCP tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::bmi::UnitSystem;
use crate::session::Session;
use crate::tools::calculator;
use crate::tools::status::StatusTracker;

/// BMI MCP Service
#[derive(Clone)]
pub struct BmiService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    session: Arc<Mutex<Session>>,
    tool_router: ToolRouter<BmiService>,
}

impl BmiService {
    pub fn new(default_units: UnitSystem) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new())),
            session: Arc::new(Mutex::new(Session::new(default_units))),
            tool_router: Self::tool_router(),
        }
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateBmiParams {
    /// Weight as typed, in kg (metric) or lbs (us)
    pub weight: String,
    /// Height as typed, in meters (metric) or inches (us)
    pub height: String,
    /// "metric" or "us" (default metric)
    pub unit_system: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertToMetricParams {
    pub weight: f64,
    pub height: f64,
    /// "metric" or "us" (default metric)
    pub unit_system: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ClassifyBmiParams {
    pub bmi: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetFieldsParams {
    /// New weight text (omit to keep current)
    pub weight: Option<String>,
    /// New height text (omit to keep current)
    pub height: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SwitchUnitsParams {
    /// Target unit system; omit to toggle
    pub unit_system: Option<String>,
}

// ============================================================================
// Tools
// ============================================================================

#[tool_router]
impl BmiService {
    // --- Status ---

    #[tool(description = "Get the current status of the BMI service including build info, uptime and calculation counters")]
    async fn bmi_status(&self) -> Result<CallToolResult, McpError> {
        let unit_system = self.session.lock().await.unit_system();
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status(unit_system))
    }

    #[tool(description = "Get instructions for using the BMI tools, including the category table. Call this when unsure how to use the calculator.")]
    fn bmi_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::BMI_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(BMI_INSTRUCTIONS)]))
    }

    // --- Engine ---

    #[tool(description = "Calculate BMI from weight and height text. Returns a null result with a reason when the input is empty, not a number, or zero.")]
    async fn calculate_bmi(&self, Parameters(p): Parameters<CalculateBmiParams>) -> Result<CallToolResult, McpError> {
        let result = calculator::calculate_bmi(&p.weight, &p.height, p.unit_system.as_deref())
            .map_err(|e| McpError::invalid_params(e, None))?;
        self.status_tracker.lock().await.record_calculation(result.result.is_some());
        json_result(&result)
    }

    #[tool(description = "Convert weight and height to kilograms and meters")]
    fn convert_to_metric(&self, Parameters(p): Parameters<ConvertToMetricParams>) -> Result<CallToolResult, McpError> {
        let result = calculator::convert_to_metric(p.weight, p.height, p.unit_system.as_deref())
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Classify a BMI value into its category and severity tier (1-8)")]
    fn classify_bmi(&self, Parameters(p): Parameters<ClassifyBmiParams>) -> Result<CallToolResult, McpError> {
        let result = calculator::classify_bmi(p.bmi).map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "List all BMI categories with their ranges and severity tiers")]
    fn list_bmi_categories(&self) -> Result<CallToolResult, McpError> {
        json_result(&calculator::list_categories())
    }

    // --- Session ---

    #[tool(description = "Set the weight and/or height field text of the calculator session")]
    async fn set_fields(&self, Parameters(p): Parameters<SetFieldsParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        json_result(&calculator::set_fields(&mut session, p.weight.as_deref(), p.height.as_deref()))
    }

    #[tool(description = "Calculate BMI from the session fields. If the input is unusable the previous result is kept.")]
    async fn calculate(&self) -> Result<CallToolResult, McpError> {
        let result = {
            let mut session = self.session.lock().await;
            calculator::calculate_session(&mut session)
        };
        self.status_tracker.lock().await.record_calculation(result.updated);
        json_result(&result)
    }

    #[tool(description = "Toggle the session unit system (or select one by name). Switching clears both fields and the result.")]
    async fn switch_units(&self, Parameters(p): Parameters<SwitchUnitsParams>) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        let result = calculator::switch_units(&mut session, p.unit_system.as_deref())
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Clear the session fields and result, keeping the unit system")]
    async fn reset_session(&self) -> Result<CallToolResult, McpError> {
        let mut session = self.session.lock().await;
        json_result(&calculator::reset_session(&mut session))
    }

    #[tool(description = "Get the session unit system, field labels, field text and last result")]
    async fn get_session(&self) -> Result<CallToolResult, McpError> {
        let session = self.session.lock().await;
        json_result(&calculator::get_session(&session))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for BmiService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "bmi_calculator".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("BMI Calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "BMI Calculator - body mass index from weight and height. \
                 Call bmi_instructions first if unsure. \
                 Stateless: calculate_bmi, convert_to_metric, classify_bmi, list_bmi_categories. \
                 Session: set_fields, calculate, switch_units (clears fields and result), reset_session, get_session. \
                 Status: bmi_status."
                    .into(),
            ),
        }
    }
}
