// File: src/validation/mod.rs
// Purpose: Validation runtime, rule trait and translated messages

use std::collections::HashMap;
use std::sync::Arc;

pub mod i18n;
pub mod rules;

pub use i18n::{translated_error_message, Catalog, I18n};

/// Submitted input (field name → value)
pub type Input = HashMap<String, String>;

/// A single validation rule
pub trait Rule: Send + Sync {
    /// Key of the rule's message (`validate.<name>`)
    fn name(&self) -> &'static str {
        "invalid"
    }

    /// Whether the rule runs on empty values
    fn validate_when_empty(&self) -> bool {
        false
    }

    fn validate(&self, value: &str, input: &Input) -> bool;

    /// Untranslated fallback message
    fn error_message(&self, field: &str) -> String;

    /// Named parameters passed to the message, in order
    fn parameters(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Parameters whose values are field names and get translated as such
    fn i18n_field_name_parameters(&self) -> &[&'static str] {
        &[]
    }
}

/// Result of validation with errors
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: HashMap<String, Vec<String>>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: HashMap::new(),
        }
    }

    /// Create a failed validation result
    pub fn failure(errors: HashMap<String, Vec<String>>) -> Self {
        Self {
            is_valid: false,
            errors,
        }
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get first error for a specific field
    pub fn get_error(&self, field: &str) -> Option<&String> {
        self.errors.get(field).and_then(|errors| errors.first())
    }

    /// Get all errors for a specific field
    pub fn get_errors(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }
}

/// Runs rules over submitted input
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use kiln::validation::rules::{MinLength, Required};
/// use kiln::validation::Validator;
///
/// let validator = Validator::new()
///     .rule("name", Required)
///     .rule("password", MinLength(8));
///
/// let mut input = HashMap::new();
/// input.insert("password".to_string(), "short".to_string());
///
/// let result = validator.validate(&input);
/// assert!(!result.is_valid);
/// assert_eq!(result.get_error("name").unwrap(), "The name field is required.");
/// assert!(result.get_error("password").is_some());
/// ```
#[derive(Default)]
pub struct Validator {
    rules: Vec<(String, Box<dyn Rule>)>,
    i18n: Option<Arc<dyn I18n>>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates error messages through `i18n`
    pub fn with_i18n(mut self, i18n: Arc<dyn I18n>) -> Self {
        self.i18n = Some(i18n);
        self
    }

    /// Adds a rule for a field; rules run in the order they were added
    pub fn rule(mut self, field: impl Into<String>, rule: impl Rule + 'static) -> Self {
        self.rules.push((field.into(), Box::new(rule)));
        self
    }

    pub fn validate(&self, input: &Input) -> ValidationResult {
        let mut errors: HashMap<String, Vec<String>> = HashMap::new();

        for (field, rule) in &self.rules {
            let value = input.get(field).map_or("", String::as_str);

            if value.is_empty() && !rule.validate_when_empty() {
                continue;
            }

            if rule.validate(value, input) {
                continue;
            }

            let message = match &self.i18n {
                Some(i18n) => translated_error_message(rule.as_ref(), i18n.as_ref(), field, rule.name()),
                None => rule.error_message(field),
            };

            tracing::trace!(field = %field, rule = rule.name(), "validation failed");
            errors.entry(field.clone()).or_default().push(message);
        }

        if errors.is_empty() {
            ValidationResult::success()
        } else {
            ValidationResult::failure(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::rules::{Matches, MinLength, Required};
    use super::*;
    use pretty_assertions::assert_eq;

    fn input(pairs: &[(&str, &str)]) -> Input {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_valid_input() {
        let validator = Validator::new()
            .rule("email", Required)
            .rule("password", MinLength(4));

        let result = validator.validate(&input(&[("email", "a@b.c"), ("password", "secret")]));
        assert!(result.is_valid);
        assert!(!result.has_errors());
    }

    #[test]
    fn test_empty_values_skip_optional_rules() {
        let validator = Validator::new().rule("nickname", MinLength(3));

        assert!(validator.validate(&input(&[("nickname", "")])).is_valid);
    }

    #[test]
    fn test_errors_collect_per_field() {
        let validator = Validator::new()
            .rule("password", MinLength(8))
            .rule("password", Matches::field("password_confirmation"));

        let result = validator.validate(&input(&[
            ("password", "short"),
            ("password_confirmation", "other"),
        ]));

        assert_eq!(result.get_errors("password").map(Vec::len), Some(2));
    }

    #[test]
    fn test_translated_messages() {
        let catalog = Catalog::new([
            ("validate.required", "Le champ %s est obligatoire."),
            ("validate.overrides.fieldnames.email", "courriel"),
        ]);
        let validator = Validator::new()
            .with_i18n(Arc::new(catalog))
            .rule("email", Required);

        let result = validator.validate(&Input::new());
        assert_eq!(
            result.get_error("email").unwrap(),
            "Le champ courriel est obligatoire."
        );
    }
}
