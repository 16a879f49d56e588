use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::display::DisplayValues;
use super::presets::{DEFAULT_INPUTS, Preset};
use crate::core::{
    Field, InputDomain, NormalizedField, ProjectionResult, normalize, parse_value, project,
    sanitize,
};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    pub domain: InputDomain,
    pub result: ProjectionResult,
    pub display: DisplayValues,
}

/// Field text and field errors of one calculator form.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorForm {
    fields: BTreeMap<Field, String>,
    errors: BTreeMap<Field, String>,
}

impl Default for CalculatorForm {
    fn default() -> Self {
        let mut form = Self {
            fields: BTreeMap::new(),
            errors: BTreeMap::new(),
        };
        form.load(&DEFAULT_INPUTS);
        form
    }
}

impl CalculatorForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, field: Field) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Live keystroke path: the text is sanitized and stored, never validated.
    pub fn input(&mut self, field: Field, raw: &str) -> &str {
        let text = sanitize(field, raw);
        debug!(?field, raw, text = %text, "field input");
        self.fields.insert(field, text);
        self.text(field)
    }

    pub fn commit(&mut self, field: Field) -> NormalizedField {
        let normalized = normalize(field, self.text(field));
        match &normalized.message {
            Some(message) => {
                debug!(?field, %message, "field rejected");
                self.errors.insert(field, message.clone());
            }
            None => {
                self.errors.remove(&field);
            }
        }
        normalized
    }

    pub fn commit_all(&mut self) -> Vec<(Field, NormalizedField)> {
        Field::ALL
            .into_iter()
            .map(|field| (field, self.commit(field)))
            .collect()
    }

    pub fn domain(&self) -> InputDomain {
        let mut domain = InputDomain::default();
        for field in Field::ALL {
            domain.set(field, parse_value(self.text(field)));
        }
        domain
    }

    pub fn calculate(&self) -> Calculation {
        calculate(self.domain())
    }

    pub fn apply_preset(&mut self, preset: &Preset) -> Calculation {
        debug!(preset = preset.key, "applying preset");
        self.load(&preset.inputs());
        self.calculate()
    }

    pub fn reset(&mut self) -> Calculation {
        debug!("resetting form");
        self.load(&DEFAULT_INPUTS);
        self.calculate()
    }

    fn load(&mut self, inputs: &InputDomain) {
        self.errors.clear();
        for field in Field::ALL {
            self.fields.insert(field, inputs.get(field).to_string());
        }
    }
}

pub fn calculate(domain: InputDomain) -> Calculation {
    let result = project(&domain);
    Calculation {
        domain,
        result,
        display: DisplayValues::from_result(&result),
    }
}
