//! BMI engine
//!
//! Unit normalization, BMI computation and category lookup. Everything here
//! is pure; state lives in [`crate::session`].

pub mod calculator;
pub mod category;
pub mod units;

pub use calculator::{
    calculate, compute_bmi, parse_input, round_bmi, try_calculate, BmiRequest, BmiResult,
    InputError, InputField,
};
pub use category::{category_range, classify, BmiCategory, CategoryRange, CATEGORY_TABLE};
pub use units::{normalize, Measurement, UnitSystem, UnitSystemError, CM_PER_INCH, CM_PER_M, KG_PER_LB};
