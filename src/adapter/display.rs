use serde::Serialize;

use crate::core::ProjectionResult;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayValues {
    pub monthly_payment: String,
    pub total_principal: String,
    pub interest_earned: String,
    pub final_amount: String,
    pub progress_ratio: f64,
}

impl DisplayValues {
    pub fn from_result(result: &ProjectionResult) -> Self {
        Self {
            monthly_payment: format_currency(result.monthly_payment),
            total_principal: format_currency(result.total_principal),
            interest_earned: format_currency(result.interest_earned),
            final_amount: format_currency(result.final_amount),
            progress_ratio: progress_ratio(result),
        }
    }
}

/// Whole-dollar text with thousands separators. The sign is dropped.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "$0".to_string();
    }

    let digits = format!("{:.0}", value.abs().round());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    grouped.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Width of the progress indicator: contributed principal against the
/// displayed final amount. Not clamped, so it can exceed 100.
pub fn progress_ratio(result: &ProjectionResult) -> f64 {
    let ratio = result.total_principal / result.final_amount * 100.0;
    if ratio.is_finite() { ratio } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_currency_rounds_to_whole_units_with_separators() {
        assert_eq!(format_currency(698.393), "$698");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.5), "$1,000");
        assert_eq!(format_currency(1_234_567.89), "$1,234,568");
        assert_eq!(format_currency(100_000.0), "$100,000");
    }

    #[test]
    fn format_currency_shows_negative_values_as_absolute() {
        assert_eq!(format_currency(-1_234.5), "$1,235");
        assert_eq!(format_currency(-0.2), "$0");
    }

    #[test]
    fn format_currency_handles_non_finite_values() {
        assert_eq!(format_currency(f64::NAN), "$0");
        assert_eq!(format_currency(f64::INFINITY), "$0");
    }

    #[test]
    fn progress_ratio_uses_principal_over_echoed_goal() {
        let result = ProjectionResult {
            monthly_payment: 0.0,
            total_principal: 75_000.0,
            interest_earned: 0.0,
            final_amount: 50_000.0,
            progress_percentage: 0.0,
        };
        assert_eq!(progress_ratio(&result), 150.0);

        let zero_goal = ProjectionResult {
            final_amount: 0.0,
            ..result
        };
        assert_eq!(progress_ratio(&zero_goal), 0.0);
    }

    #[test]
    fn display_values_format_every_figure() {
        let result = ProjectionResult {
            monthly_payment: 333.333,
            total_principal: 10_000.0,
            interest_earned: 0.0,
            final_amount: 10_000.0,
            progress_percentage: 100.0,
        };
        let display = DisplayValues::from_result(&result);
        assert_eq!(display.monthly_payment, "$333");
        assert_eq!(display.total_principal, "$10,000");
        assert_eq!(display.interest_earned, "$0");
        assert_eq!(display.final_amount, "$10,000");
        assert_eq!(display.progress_ratio, 100.0);
    }
}
