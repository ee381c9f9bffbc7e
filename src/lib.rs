//! BMI Calculator Library
//!
//! Unit normalization, BMI classification, and a calculator session.

pub mod bmi;
pub mod build_info;
pub mod mcp;
pub mod session;
pub mod tools;
