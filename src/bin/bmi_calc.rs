//! One-shot BMI calculation from the command line
//!
//! Usage: bmi_calc <weight> <height> [metric|us]
//!
//! Exit status: 0 with the result as JSON on stdout, 1 when the input gives
//! no result, 2 on bad usage.

use std::process::ExitCode;

use bmi_calculator::bmi::{try_calculate, UnitSystem};

const USAGE: &str = "Usage: bmi_calc <weight> <height> [metric|us]";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    }

    let unit_system = match UnitSystem::parse_or_default(args.get(2).map(String::as_str)) {
        Ok(u) => u,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    match try_calculate(&args[0], &args[1], unit_system) {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Serialization error: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("No result: {}", e);
            ExitCode::from(1)
        }
    }
}
