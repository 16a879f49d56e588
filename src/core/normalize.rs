use super::error::ValidationError;
use super::types::{Field, NormalizedField};

/// Reduces free-form text to a numeric-looking string for `field`.
///
/// Only ASCII digits and the first decimal point survive; digit groups that
/// follow later decimal points are appended to the fraction.
pub fn sanitize(field: Field, raw: &str) -> String {
    let mut integer = String::new();
    let mut fraction = String::new();
    let mut seen_point = false;

    for ch in raw.chars() {
        match ch {
            '0'..='9' if seen_point => fraction.push(ch),
            '0'..='9' => integer.push(ch),
            '.' => seen_point = true,
            _ => {}
        }
    }

    if !seen_point {
        return integer;
    }

    if let Some(max_digits) = field.spec().max_fraction_digits {
        fraction.truncate(max_digits);
    }

    format!("{integer}.{fraction}")
}

/// Best-effort numeric value of already sanitized text; unusable text is 0.
pub fn parse_value(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

/// Field-commit validation of sanitized text.
pub fn validate(field: Field, text: &str) -> Result<f64, ValidationError> {
    let spec = field.spec();
    let text = text.trim();

    if text.is_empty() {
        if spec.empty_is_zero {
            return Ok(0.0);
        }
        return Err(ValidationError::Required { label: spec.label });
    }

    let value = match text.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return Err(ValidationError::NotNumeric { label: spec.label }),
    };

    if value < spec.min {
        return Err(ValidationError::BelowMinimum {
            label: spec.label,
            min: spec.min,
        });
    }

    if let Some(max) = spec.max.filter(|max| value > *max) {
        return Err(ValidationError::AboveMaximum {
            label: spec.label,
            max,
        });
    }

    Ok(value)
}

pub fn normalize(field: Field, raw: &str) -> NormalizedField {
    let text = sanitize(field, raw);
    let value = parse_value(&text);
    match validate(field, &text) {
        Ok(_) => NormalizedField {
            value,
            valid: true,
            message: None,
        },
        Err(e) => NormalizedField {
            value,
            valid: false,
            message: Some(e.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_non_numeric_characters() {
        assert_eq!(sanitize(Field::GoalAmount, "$50,000"), "50000");
        assert_eq!(sanitize(Field::CurrentSavings, " 1 2a3 "), "123");
        assert_eq!(sanitize(Field::GoalAmount, "-250"), "250");
    }

    #[test]
    fn sanitize_collapses_repeated_decimal_points() {
        assert_eq!(sanitize(Field::GoalAmount, "12.34.56"), "12.3456");
        assert_eq!(sanitize(Field::TimeHorizonYears, "1..5"), "1.5");
        assert_eq!(sanitize(Field::CurrentSavings, ".5"), ".5");
    }

    #[test]
    fn sanitize_truncates_rate_fraction_to_two_digits() {
        assert_eq!(sanitize(Field::AnnualReturnPercent, "7.6789"), "7.67");
        assert_eq!(sanitize(Field::AnnualReturnPercent, "7.6.7.8.9"), "7.67");
        assert_eq!(sanitize(Field::AnnualReturnPercent, "7."), "7.");
        assert_eq!(sanitize(Field::GoalAmount, "7.6789"), "7.6789");
    }

    #[test]
    fn parse_value_clamps_unusable_text_to_zero() {
        assert_eq!(parse_value(""), 0.0);
        assert_eq!(parse_value("."), 0.0);
        assert_eq!(parse_value("-3"), 0.0);
        assert_eq!(parse_value("abc"), 0.0);
        assert_eq!(parse_value("12.5"), 12.5);
        assert_eq!(parse_value("12."), 12.0);
    }

    #[test]
    fn validate_requires_primary_fields() {
        let err = validate(Field::GoalAmount, "").expect_err("goal is required");
        assert_eq!(err, ValidationError::Required { label: "Savings goal" });
        assert!(validate(Field::TimeHorizonYears, "  ").is_err());
        assert!(validate(Field::AnnualReturnPercent, "").is_err());
    }

    #[test]
    fn validate_defaults_empty_current_savings_to_zero() {
        assert_eq!(validate(Field::CurrentSavings, ""), Ok(0.0));
    }

    #[test]
    fn validate_rejects_non_numeric_and_out_of_range_text() {
        let err = validate(Field::GoalAmount, ".").expect_err("lone point is not a number");
        assert!(matches!(err, ValidationError::NotNumeric { .. }));

        let err = validate(Field::GoalAmount, "-5").expect_err("negative is below minimum");
        assert!(matches!(err, ValidationError::BelowMinimum { .. }));

        let err = validate(Field::AnnualReturnPercent, "150").expect_err("rate above maximum");
        assert_eq!(err.to_string(), "Expected annual return must be at most 100");

        assert_eq!(validate(Field::GoalAmount, "1000000000"), Ok(1_000_000_000.0));
    }

    #[test]
    fn normalize_reports_failure_but_keeps_best_effort_value() {
        let field = normalize(Field::TimeHorizonYears, "250");
        assert!(!field.valid);
        assert_eq!(field.value, 250.0);
        assert_eq!(
            field.message.as_deref(),
            Some("Time horizon must be at most 100")
        );

        let field = normalize(Field::GoalAmount, "");
        assert!(!field.valid);
        assert_eq!(field.value, 0.0);
        assert_eq!(field.message.as_deref(), Some("Savings goal is required"));
    }

    #[test]
    fn normalize_accepts_messy_but_usable_input() {
        let field = normalize(Field::GoalAmount, "$12,500.50");
        assert!(field.valid);
        assert_eq!(field.value, 12_500.5);
        assert_eq!(field.message, None);

        let field = normalize(Field::AnnualReturnPercent, "6.999%");
        assert!(field.valid);
        assert_eq!(field.value, 6.99);
    }
}
