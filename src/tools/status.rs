//! Status Tool
//!
//! Provides runtime status information about the BMI service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::bmi::UnitSystem;
use crate::build_info::BuildInfo;

/// Usage instructions for AI assistants
pub const BMI_INSTRUCTIONS: &str = r#"
# BMI Calculator Instructions

## One-off calculations

Use `calculate_bmi` with the weight and height exactly as the user typed them.
- `unit_system`: "metric" (kg, m) or "us" (lbs, inches). Defaults to metric.
- Height in metric is in **meters** (1.75), not centimeters (175).
- If `result` is null, read `reason`: the input was empty, not a number, zero,
  or out of range (BMI too large to represent).

## Form session

The session mirrors a calculator form:
1. `set_fields` to enter weight and/or height text
2. `calculate` to compute. A rejected input keeps the previous result.
3. `switch_units` toggles (or selects) the unit system and clears both fields
   and the result.

## Categories

| BMI          | Category          | Tier |
|--------------|-------------------|------|
| < 16         | Severe Thinness   | 1    |
| 16 - 17      | Moderate Thinness | 2    |
| 17 - 18.5    | Mild Thinness     | 3    |
| 18.5 - 25    | Normal            | 4    |
| 25 - 30      | Overweight        | 5    |
| 30 - 35      | Obese Class I     | 6    |
| 35 - 40      | Obese Class II    | 7    |
| >= 40        | Obese Class III   | 8    |

Lower bounds are inclusive: a BMI of exactly 25.0 is Overweight.
"#;

/// Status response
#[derive(Debug, Serialize)]
pub struct BmiStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    pub started_at: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
    pub calculations_performed: u64,
    pub calculations_rejected: u64,
    pub unit_system: UnitSystem,
}

/// Tracks service uptime and calculation counters
pub struct StatusTracker {
    start_time: Instant,
    started_at: DateTime<Utc>,
    calculations_performed: u64,
    calculations_rejected: u64,
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            started_at: Utc::now(),
            calculations_performed: 0,
            calculations_rejected: 0,
        }
    }

    /// Count a calculation request by outcome
    pub fn record_calculation(&mut self, produced_result: bool) {
        if produced_result {
            self.calculations_performed += 1;
        } else {
            self.calculations_rejected += 1;
        }
    }

    pub fn calculations_performed(&self) -> u64 {
        self.calculations_performed
    }

    pub fn calculations_rejected(&self) -> u64 {
        self.calculations_rejected
    }

    pub fn get_status(&self, unit_system: UnitSystem) -> BmiStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        BmiStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            started_at: self.started_at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
            calculations_performed: self.calculations_performed,
            calculations_rejected: self.calculations_rejected,
            unit_system,
        }
    }
}
