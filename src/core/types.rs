use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    GoalAmount,
    TimeHorizonYears,
    AnnualReturnPercent,
    CurrentSavings,
}

/// Per-field input rules applied by the normalizer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub min: f64,
    pub max: Option<f64>,
    pub empty_is_zero: bool,
    pub max_fraction_digits: Option<usize>,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::GoalAmount,
        Field::TimeHorizonYears,
        Field::AnnualReturnPercent,
        Field::CurrentSavings,
    ];

    pub fn spec(self) -> FieldSpec {
        match self {
            Field::GoalAmount => FieldSpec {
                label: "Savings goal",
                min: 0.0,
                max: None,
                empty_is_zero: false,
                max_fraction_digits: None,
            },
            Field::TimeHorizonYears => FieldSpec {
                label: "Time horizon",
                min: 0.0,
                max: Some(100.0),
                empty_is_zero: false,
                max_fraction_digits: None,
            },
            Field::AnnualReturnPercent => FieldSpec {
                label: "Expected annual return",
                min: 0.0,
                max: Some(100.0),
                empty_is_zero: false,
                max_fraction_digits: Some(2),
            },
            Field::CurrentSavings => FieldSpec {
                label: "Current savings",
                min: 0.0,
                max: None,
                empty_is_zero: true,
                max_fraction_digits: None,
            },
        }
    }

    /// Short name used by the command line front end.
    pub fn short_name(self) -> &'static str {
        match self {
            Field::GoalAmount => "goal",
            Field::TimeHorizonYears => "years",
            Field::AnnualReturnPercent => "rate",
            Field::CurrentSavings => "savings",
        }
    }

    /// Wire name, as used in JSON bodies.
    pub fn key(self) -> &'static str {
        match self {
            Field::GoalAmount => "goalAmount",
            Field::TimeHorizonYears => "timeHorizonYears",
            Field::AnnualReturnPercent => "annualReturnPercent",
            Field::CurrentSavings => "currentSavings",
        }
    }

    /// Accepts either the short name or the wire name, ignoring case.
    pub fn from_name(name: &str) -> Option<Field> {
        let name = name.trim();
        Field::ALL.into_iter().find(|f| {
            f.short_name().eq_ignore_ascii_case(name) || f.key().eq_ignore_ascii_case(name)
        })
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDomain {
    pub goal_amount: f64,
    pub time_horizon_years: f64,
    pub annual_return_percent: f64,
    pub current_savings: f64,
}

impl InputDomain {
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::GoalAmount => self.goal_amount,
            Field::TimeHorizonYears => self.time_horizon_years,
            Field::AnnualReturnPercent => self.annual_return_percent,
            Field::CurrentSavings => self.current_savings,
        }
    }

    pub fn set(&mut self, field: Field, value: f64) {
        match field {
            Field::GoalAmount => self.goal_amount = value,
            Field::TimeHorizonYears => self.time_horizon_years = value,
            Field::AnnualReturnPercent => self.annual_return_percent = value,
            Field::CurrentSavings => self.current_savings = value,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub monthly_payment: f64,
    pub total_principal: f64,
    pub interest_earned: f64,
    /// Echo of the requested goal, not the projected total.
    pub final_amount: f64,
    pub progress_percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedField {
    pub value: f64,
    pub valid: bool,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_accepts_short_and_wire_names() {
        assert_eq!(Field::from_name("goal"), Some(Field::GoalAmount));
        assert_eq!(Field::from_name("RATE"), Some(Field::AnnualReturnPercent));
        assert_eq!(Field::from_name("timeHorizonYears"), Some(Field::TimeHorizonYears));
        assert_eq!(Field::from_name(" currentsavings "), Some(Field::CurrentSavings));
        assert_eq!(Field::from_name("inflation"), None);
    }

    #[test]
    fn wire_names_match_serde_names() {
        for field in Field::ALL {
            let json = serde_json::to_string(&field).expect("field serializes");
            assert_eq!(json, format!("\"{}\"", field.key()));
        }
    }

    #[test]
    fn only_current_savings_defaults_empty_to_zero() {
        for field in Field::ALL {
            assert_eq!(field.spec().empty_is_zero, field == Field::CurrentSavings);
            assert_eq!(field.spec().min, 0.0);
        }
    }
}
