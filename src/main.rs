//! BMI Calculator
//!
//! An MCP server exposing the BMI engine and a calculator session.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use bmi_calculator::bmi::{UnitSystem, UnitSystemError};
use bmi_calculator::build_info;
use bmi_calculator::mcp::BmiService;

/// Get the initial unit system from environment or use metric
fn get_default_units() -> Result<UnitSystem, UnitSystemError> {
    let configured = std::env::var("BMI_DEFAULT_UNITS").ok();
    UnitSystem::parse_or_default(configured.as_deref())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr to not interfere with MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bmi_calculator=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let default_units = get_default_units()?;
    tracing::info!("Default unit system: {}", default_units.as_str());

    let service = BmiService::new(default_units);

    eprintln!("Starting MCP server on stdio...");
    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;

    server.waiting().await?;

    Ok(())
}
