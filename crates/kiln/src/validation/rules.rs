// File: src/validation/rules.rs
// Purpose: Built-in validation rules

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Input, Rule};

// Email validation regex
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex is valid")
});

/// The field must be present and not blank
#[derive(Debug, Clone, Copy)]
pub struct Required;

impl Rule for Required {
    fn name(&self) -> &'static str {
        "required"
    }

    fn validate_when_empty(&self) -> bool {
        true
    }

    fn validate(&self, value: &str, _input: &Input) -> bool {
        !value.trim().is_empty()
    }

    fn error_message(&self, field: &str) -> String {
        format!("The {field} field is required.")
    }
}

/// The value must have at least this many characters
#[derive(Debug, Clone, Copy)]
pub struct MinLength(pub usize);

impl Rule for MinLength {
    fn name(&self) -> &'static str {
        "min_length"
    }

    fn validate(&self, value: &str, _input: &Input) -> bool {
        value.chars().count() >= self.0
    }

    fn error_message(&self, field: &str) -> String {
        format!("The value of the {field} field must be at least {} characters long.", self.0)
    }

    fn parameters(&self) -> Vec<(&'static str, String)> {
        vec![("minLength", self.0.to_string())]
    }
}

/// The value must be an email address
#[derive(Debug, Clone, Copy)]
pub struct Email;

impl Rule for Email {
    fn name(&self) -> &'static str {
        "email"
    }

    fn validate(&self, value: &str, _input: &Input) -> bool {
        EMAIL_REGEX.is_match(value)
    }

    fn error_message(&self, field: &str) -> String {
        format!("The {field} field must contain a valid e-mail address.")
    }
}

/// The value must match a regex
#[derive(Debug, Clone)]
pub struct Pattern(pub Regex);

impl Rule for Pattern {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn validate(&self, value: &str, _input: &Input) -> bool {
        self.0.is_match(value)
    }

    fn error_message(&self, field: &str) -> String {
        format!("The value of the {field} field does not match the required format.")
    }

    fn parameters(&self) -> Vec<(&'static str, String)> {
        vec![("regex", self.0.as_str().to_string())]
    }
}

/// The value must equal another field's value
#[derive(Debug, Clone)]
pub struct Matches {
    field: String,
}

impl Matches {
    pub fn field(field: impl Into<String>) -> Self {
        Self { field: field.into() }
    }
}

impl Rule for Matches {
    fn name(&self) -> &'static str {
        "match"
    }

    fn validate(&self, value: &str, input: &Input) -> bool {
        input.get(&self.field).is_some_and(|other| other == value)
    }

    fn error_message(&self, field: &str) -> String {
        format!("The values of the {field} field and {} field must match.", self.field)
    }

    fn parameters(&self) -> Vec<(&'static str, String)> {
        vec![("field", self.field.clone())]
    }

    fn i18n_field_name_parameters(&self) -> &[&'static str] {
        &["field"]
    }
}
