pub(crate) mod rules;

pub use rules::{is_valid_email, word_count, word_limit};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{FormField, FormState};
use rules::DECLARATION_MESSAGE;

/// Why a field failed validation. Both kinds are recoverable by correcting the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingRequiredField,
    ConstraintViolation,
}

/// Inline message shown next to the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn missing(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::MissingRequiredField,
            message: message.into(),
        }
    }

    pub fn constraint(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::ConstraintViolation,
            message: message.into(),
        }
    }
}

/// Field-level failures from the most recent validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<FormField, FieldError>);

impl ErrorMap {
    pub fn get(&self, field: impl Into<FormField>) -> Option<&FieldError> {
        self.0.get(&field.into())
    }

    pub fn message(&self, field: impl Into<FormField>) -> Option<&str> {
        self.get(field).map(|error| error.message.as_str())
    }

    pub fn contains(&self, field: impl Into<FormField>) -> bool {
        self.0.contains_key(&field.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    pub(crate) fn insert(&mut self, field: FormField, error: FieldError) {
        self.0.insert(field, error);
    }

    pub(crate) fn remove(&mut self, field: FormField) -> Option<FieldError> {
        self.0.remove(&field)
    }
}

/// Compute the errors for `step` alone. Steps without rules, including out-of-range
/// indices, always validate clean.
pub fn validate(step: usize, state: &FormState) -> ErrorMap {
    let mut errors = ErrorMap::default();
    let Some(step_rules) = rules::rules_for(step) else {
        return errors;
    };

    for rule in step_rules.fields {
        if let Some(error) = rule.evaluate(state.text(rule.field)) {
            errors.insert(FormField::Text(rule.field), error);
        }
    }

    if step_rules.declaration && !state.declaration {
        errors.insert(
            FormField::Declaration,
            FieldError::missing(DECLARATION_MESSAGE),
        );
    }

    errors
}
