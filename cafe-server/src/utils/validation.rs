//! Input validation helpers
//!
//! Centralized length limits and numeric checks for order input.

use crate::orders::OrderError;

/// Customer names
pub const MAX_NAME_LEN: usize = 200;

/// Upper bound for line item count per order
pub const MAX_LINE_ITEMS: usize = 100;

/// Validate that an optional string, if present, is non-blank and within the length limit.
pub fn validate_optional_name(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), OrderError> {
    if let Some(v) = value {
        if v.trim().is_empty() {
            return Err(OrderError::Validation(format!("{field} must not be blank")));
        }
        if v.chars().count() > max_len {
            return Err(OrderError::Validation(format!(
                "{field} is too long ({} chars, max {max_len})",
                v.chars().count()
            )));
        }
    }
    Ok(())
}

/// Validate that a number is finite and `>= 0`.
pub fn validate_non_negative(value: f64, field: &str) -> Result<(), OrderError> {
    if !value.is_finite() || value < 0.0 {
        return Err(OrderError::Validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(())
}

/// Validate that a number is finite and `> 0`.
pub fn validate_positive(value: f64, field: &str) -> Result<(), OrderError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(OrderError::Validation(format!(
            "{field} must be a positive number"
        )));
    }
    Ok(())
}
