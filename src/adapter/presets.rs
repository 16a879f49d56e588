use serde::Serialize;

use crate::core::InputDomain;
use crate::error::AppError;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub key: &'static str,
    pub name: &'static str,
    pub goal_amount: f64,
    pub time_horizon_years: f64,
    pub annual_return_percent: f64,
}

pub const PRESETS: [Preset; 4] = [
    Preset {
        key: "emergency",
        name: "Emergency fund",
        goal_amount: 15_000.0,
        time_horizon_years: 2.0,
        annual_return_percent: 4.0,
    },
    Preset {
        key: "car",
        name: "New car",
        goal_amount: 30_000.0,
        time_horizon_years: 3.0,
        annual_return_percent: 5.0,
    },
    Preset {
        key: "house",
        name: "House down payment",
        goal_amount: 100_000.0,
        time_horizon_years: 7.0,
        annual_return_percent: 6.0,
    },
    Preset {
        key: "retirement",
        name: "Retirement boost",
        goal_amount: 500_000.0,
        time_horizon_years: 25.0,
        annual_return_percent: 7.5,
    },
];

/// Values restored by the reset action.
pub const DEFAULT_INPUTS: InputDomain = InputDomain {
    goal_amount: 50_000.0,
    time_horizon_years: 5.0,
    annual_return_percent: 7.0,
    current_savings: 0.0,
};

pub fn find_preset(key: &str) -> Result<&'static Preset, AppError> {
    let key = key.trim();
    PRESETS
        .iter()
        .find(|p| p.key.eq_ignore_ascii_case(key))
        .ok_or_else(|| AppError::UnknownPreset(key.to_string()))
}

impl Preset {
    /// Current savings always restart at zero when an example is applied.
    pub fn inputs(&self) -> InputDomain {
        InputDomain {
            goal_amount: self.goal_amount,
            time_horizon_years: self.time_horizon_years,
            annual_return_percent: self.annual_return_percent,
            current_savings: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_preset_is_case_insensitive() {
        let preset = find_preset(" House ").expect("house preset exists");
        assert_eq!(preset.key, "house");
        assert_eq!(preset.inputs().current_savings, 0.0);
    }

    #[test]
    fn find_preset_rejects_unknown_keys() {
        let err = find_preset("yacht").expect_err("no yacht preset");
        assert!(err.to_string().contains("yacht"));
    }

    #[test]
    fn preset_keys_are_unique() {
        for (i, a) in PRESETS.iter().enumerate() {
            for b in &PRESETS[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }
}
