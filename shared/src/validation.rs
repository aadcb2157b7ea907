//! Field constraints shared by the command and query paths.

use serde_json::Value;

use crate::ValidationError;

/// Amount must be present and a finite, non-negative JSON number.
pub fn amount(value: Option<&Value>) -> Result<f64, ValidationError> {
    let value = value.ok_or_else(|| ValidationError::new("amount", "is required"))?;
    let amount = value
        .as_f64()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| ValidationError::new("amount", "must be a finite number"))?;

    if amount < 0.0 {
        return Err(ValidationError::new("amount", "must not be negative"));
    }

    // -0.0 passes the check above; store it as 0
    Ok(if amount == 0.0 { 0.0 } else { amount })
}

/// Status must be a non-blank string. Surrounding whitespace is dropped.
pub fn status(value: Option<&Value>) -> Result<String, ValidationError> {
    let value = value.ok_or_else(|| ValidationError::new("status", "is required"))?;
    let status = value
        .as_str()
        .ok_or_else(|| ValidationError::new("status", "must be a string"))?;

    optional_text(Some(status)).ok_or_else(|| ValidationError::new("status", "must not be empty"))
}

/// Trims an optional text parameter. Blank input becomes `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_zero_and_positive_amounts() {
        assert_eq!(amount(Some(&json!(0))).unwrap(), 0.0);
        assert_eq!(amount(Some(&json!(100))).unwrap(), 100.0);
        assert_eq!(amount(Some(&json!(12.75))).unwrap(), 12.75);
    }

    #[test]
    fn negative_zero_is_stored_as_zero() {
        let value = amount(Some(&json!(-0.0))).unwrap();
        assert!(value.is_sign_positive());
    }

    #[test]
    fn rejects_missing_negative_and_non_numeric_amounts() {
        assert_eq!(amount(None).unwrap_err().reason, "is required");
        assert_eq!(amount(Some(&json!(-1))).unwrap_err().reason, "must not be negative");
        assert_eq!(amount(Some(&json!("100"))).unwrap_err().reason, "must be a finite number");
        assert_eq!(amount(Some(&Value::Null)).unwrap_err().field, "amount");
    }

    #[test]
    fn status_is_trimmed() {
        assert_eq!(status(Some(&json!("  pending "))).unwrap(), "pending");
    }

    #[test]
    fn rejects_missing_blank_and_non_string_status() {
        assert_eq!(status(None).unwrap_err().reason, "is required");
        assert_eq!(status(Some(&json!(""))).unwrap_err().reason, "must not be empty");
        assert_eq!(status(Some(&json!("   "))).unwrap_err().reason, "must not be empty");
        assert_eq!(status(Some(&json!(7))).unwrap_err().reason, "must be a string");
    }

    #[test]
    fn status_is_an_open_string() {
        let long = "s".repeat(500);
        assert_eq!(status(Some(&json!(long))).unwrap(), long);
        assert_eq!(status(Some(&json!("a\tb"))).unwrap(), "a\tb");
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some(" \t ")), None);
        assert_eq!(optional_text(Some(" x ")), Some("x".to_string()));
    }
}
