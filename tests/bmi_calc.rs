//! Exit status and output of the bmi_calc binary

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bmi_calc"))
        .args(args)
        .output()
        .expect("failed to run bmi_calc")
}

#[test]
fn test_metric_result_on_stdout() {
    let output = run(&["70", "1.75"]);
    assert_eq!(output.status.code(), Some(0));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["bmi"], 22.86);
    assert_eq!(json["category"], "Normal");
    assert_eq!(json["severity_tier"], 4);
}

#[test]
fn test_us_units() {
    let output = run(&["154", "69", "us"]);
    assert_eq!(output.status.code(), Some(0));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["bmi"], 22.74);
}

#[test]
fn test_rejected_input_exits_1() {
    let output = run(&["", "1.75"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("weight is empty"));

    let output = run(&["70", "1e-200"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("height is out of range"));
}

#[test]
fn test_bad_usage_exits_2() {
    assert_eq!(run(&[]).status.code(), Some(2));
    assert_eq!(run(&["70"]).status.code(), Some(2));
    assert_eq!(run(&["70", "1.75", "us", "extra"]).status.code(), Some(2));

    let output = run(&["70", "1.75", "stone"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown unit system 'stone'"));
}
