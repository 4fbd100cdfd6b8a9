//! Binary primitives on parsed operands, plus the text conversions around them.

use crate::error::{ExpressionError, Result};

pub fn add(left: f64, right: f64) -> f64 {
    left + right
}

pub fn subtract(left: f64, right: f64) -> f64 {
    left - right
}

pub fn multiply(left: f64, right: f64) -> f64 {
    left * right
}

/// IEEE division: a zero divisor yields `inf`, `-inf` or `NaN`.
pub fn divide(left: f64, right: f64) -> f64 {
    left / right
}

/// Parses operand text such as `"18"`, `"-3"` or `"0.25"`.
pub fn parse_operand(text: &str) -> Result<f64> {
    text.parse::<f64>()
        .map_err(|_| ExpressionError::NonNumericResult(text.to_string()))
}

/// Shortest decimal text that round-trips, never in scientific notation.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}
