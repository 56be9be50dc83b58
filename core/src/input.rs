use crate::model::savings::UpdateError;

/// Parses an amount exactly as it was typed.
///
/// No trimming and no thousands separators: `" 5"` and `"1,000"` are both
/// rejected. Values that parse but are not finite (`inf`, `NaN`) are rejected
/// too so the balance stays a real number.
pub fn parse_amount(text: &str) -> Result<f64, UpdateError> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(UpdateError::InvalidAmount(text.to_string())),
    }
}

/// Same rules as [`parse_amount`], for places where absence is the only
/// interesting outcome (the goal field).
pub fn parse_optional_amount(text: &str) -> Option<f64> {
    parse_amount(text).ok()
}
