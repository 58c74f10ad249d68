//! Rule evaluation.

use crate::{Field, RULES, RegistrationInput, Rule, ValidationError};

/// Primary message when nothing failed.
pub const VALIDATED_MESSAGE: &str = "validation passed";

/// The report produced by [`Validator::validate`].
///
/// # Invariants
/// - `is_valid == errors.is_empty()`
/// - `message == errors[0]` when there are errors, else [`VALIDATED_MESSAGE`]
/// - `fields[i]` is the field that produced `errors[i]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub fields: Vec<Field>,
    pub message: String,
}

impl ValidationResult {
    fn from_failures(failures: Vec<(Field, &'static str)>) -> Self {
        let (fields, errors): (Vec<Field>, Vec<String>) = failures
            .into_iter()
            .map(|(field, message)| (field, message.to_string()))
            .unzip();
        let message = errors
            .first()
            .cloned()
            .unwrap_or_else(|| VALIDATED_MESSAGE.to_string());

        Self {
            is_valid: errors.is_empty(),
            errors,
            fields,
            message,
        }
    }

    /// Returns the first error reported for `field`, if any.
    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.fields
            .iter()
            .position(|f| *f == field)
            .map(|i| self.errors[i].as_str())
    }

    /// Converts the report into a `Result` for `?`-style callers.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}

/// Evaluates an ordered rule table.
///
/// Every field is checked (one failing field never hides another), but a
/// field stops at its first failing rule.
#[derive(Debug, Clone)]
pub struct Validator {
    rules: Vec<Rule>,
}

impl Validator {
    /// Creates a validator over a custom rule table.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Returns the rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Appends a rule, evaluated after all existing ones.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn validate(&self, input: &RegistrationInput) -> ValidationResult {
        let mut failures: Vec<(Field, &'static str)> = Vec::new();

        for rule in &self.rules {
            if failures.iter().any(|(field, _)| *field == rule.field) {
                continue;
            }
            if !(rule.passes)(input) {
                failures.push((rule.field, rule.message));
            }
        }

        let result = ValidationResult::from_failures(failures);
        tracing::debug!(
            is_valid = result.is_valid,
            errors = result.errors.len(),
            "registration input validated"
        );
        result
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(RULES.to_vec())
    }
}

/// Validates `input` against the default [`RULES`].
pub fn validate(input: &RegistrationInput) -> ValidationResult {
    Validator::default().validate(input)
}
