//! Per-field checks.
//!
//! The numeric rule short-circuits on the first failing condition (valid
//! number, then negative, then cap), so a user sees one message per field.
//! Rules for different fields are independent; a row accumulates every
//! failing field before it is classified.

use chrono::NaiveDate;
use markload_model::{FieldKind, FieldRule, FieldValue};

const TRUTHY: &[&str] = &["true", "1", "yes"];
const FALSY: &[&str] = &["false", "0", "no"];

pub(crate) fn check_field(raw: &str, field: &FieldRule) -> Result<FieldValue, String> {
    match &field.kind {
        FieldKind::Numeric { max, required } => check_numeric(raw, field.label, *max, *required),
        FieldKind::Boolean { default } => check_boolean(raw, field.label, *default),
        FieldKind::Enum { allowed } => check_enum(raw, field.label, allowed),
        FieldKind::Date { required } => check_date(raw, field.label, *required),
        FieldKind::Text { required } => check_text(raw, field.label, *required),
    }
}

fn check_numeric(
    raw: &str,
    label: &str,
    max: Option<f64>,
    required: bool,
) -> Result<FieldValue, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        // Null, not zero: "no mark entered" is distinct from zero marks.
        return if required {
            Err(format!("{label} is required"))
        } else {
            Ok(FieldValue::Null)
        };
    }
    let value = match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => return Err(format!("{label} must be a valid number")),
    };
    if value < 0.0 {
        return Err(format!("{label} cannot be negative"));
    }
    if let Some(max) = max
        && value > max
    {
        return Err(format!("{label} cannot exceed {max}"));
    }
    Ok(FieldValue::Number(value))
}

fn check_boolean(raw: &str, label: &str, default: bool) -> Result<FieldValue, String> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return Ok(FieldValue::Bool(default));
    }
    if TRUTHY.contains(&normalized.as_str()) {
        return Ok(FieldValue::Bool(true));
    }
    if FALSY.contains(&normalized.as_str()) {
        return Ok(FieldValue::Bool(false));
    }
    Err(format!("{label} must be true/false, 1/0, or yes/no"))
}

fn check_enum(raw: &str, label: &str, allowed: &[&str]) -> Result<FieldValue, String> {
    let normalized = raw.trim().to_lowercase();
    if allowed.contains(&normalized.as_str()) {
        return Ok(FieldValue::Text(normalized));
    }
    Err(format!("{label} must be one of: {}", allowed.join(", ")))
}

fn check_date(raw: &str, label: &str, required: bool) -> Result<FieldValue, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return if required {
            Err(format!("{label} is required"))
        } else {
            Ok(FieldValue::Null)
        };
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(_) => Ok(FieldValue::Text(trimmed.to_string())),
        Err(_) => Err(format!("{label} must be a valid date (YYYY-MM-DD)")),
    }
}

fn check_text(raw: &str, label: &str, required: bool) -> Result<FieldValue, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() && required {
        return Err(format!("{label} is required"));
    }
    Ok(FieldValue::Text(trimmed.to_string()))
}
