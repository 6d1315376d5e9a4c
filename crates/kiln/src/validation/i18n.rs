// File: src/validation/i18n.rs
// Purpose: Translated validation error messages

use std::collections::HashMap;

use super::Rule;

/// Message lookup used by validation rules
pub trait I18n: Send + Sync {
    fn has(&self, key: &str) -> bool;

    /// Translates `key`, substituting `params` in order
    fn get(&self, key: &str, params: &[String]) -> String;
}

/// In-memory message table
///
/// Messages use `%s` placeholders filled in order. Unknown keys translate
/// to themselves.
///
/// # Examples
///
/// ```
/// use kiln::validation::{Catalog, I18n};
///
/// let catalog = Catalog::new([("validate.required", "The %s field is required.")]);
/// assert_eq!(
///     catalog.get("validate.required", &["email".to_string()]),
///     "The email field is required."
/// );
/// assert_eq!(catalog.get("missing.key", &[]), "missing.key");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    pub fn new<I, K, V>(messages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            messages: messages
                .into_iter()
                .map(|(key, message)| (key.into(), message.into()))
                .collect(),
        }
    }
}

impl I18n for Catalog {
    fn has(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    fn get(&self, key: &str, params: &[String]) -> String {
        let Some(message) = self.messages.get(key) else {
            return key.to_string();
        };

        let mut params = params.iter();
        let mut pieces = message.split("%s");
        let mut translated = pieces.next().unwrap_or_default().to_string();
        for piece in pieces {
            translated.push_str(params.next().map_or("", String::as_str));
            translated.push_str(piece);
        }
        translated
    }
}

/// Builds the translated error message for a failed rule
///
/// Lookup order:
/// 1. `validate.overrides.messages.<field>.<rule>`, given the raw field
///    name and the rule's parameter values
/// 2. `validate.<rule>`, given the field name (translated through
///    `validate.overrides.fieldnames.<field>` when present) and the
///    parameter values, where parameters the rule marks as field names are
///    translated the same way
pub fn translated_error_message(
    rule: &dyn Rule,
    i18n: &dyn I18n,
    field: &str,
    rule_name: &str,
) -> String {
    let override_key = format!("validate.overrides.messages.{field}.{rule_name}");

    if i18n.has(&override_key) {
        let params: Vec<String> = std::iter::once(field.to_string())
            .chain(rule.parameters().into_iter().map(|(_, value)| value))
            .collect();

        return i18n.get(&override_key, &params);
    }

    let translatable = rule.i18n_field_name_parameters();
    let mut params = vec![translate_field_name(i18n, field)];
    for (name, value) in rule.parameters() {
        if translatable.contains(&name) {
            params.push(translate_field_name(i18n, &value));
        } else {
            params.push(value);
        }
    }

    i18n.get(&format!("validate.{rule_name}"), &params)
}

fn translate_field_name(i18n: &dyn I18n, field: &str) -> String {
    let key = format!("validate.overrides.fieldnames.{field}");

    if i18n.has(&key) {
        i18n.get(&key, &[])
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Input;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Records every lookup and answers from a fixed table
    #[derive(Default)]
    struct RecordingI18n {
        known: HashMap<String, String>,
        calls: Mutex<Vec<String>>,
    }

    impl RecordingI18n {
        fn with(entries: &[(&str, &str)]) -> Self {
            Self {
                known: entries
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect(),
                calls: Mutex::default(),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl I18n for RecordingI18n {
        fn has(&self, key: &str) -> bool {
            self.calls.lock().unwrap().push(format!("has {key}"));
            self.known.contains_key(key)
        }

        fn get(&self, key: &str, params: &[String]) -> String {
            self.calls
                .lock()
                .unwrap()
                .push(format!("get {key} {params:?}"));
            self.known
                .get(key)
                .cloned()
                .unwrap_or_else(|| "translated".to_string())
        }
    }

    struct PlainRule;

    impl Rule for PlainRule {
        fn validate(&self, _value: &str, _input: &Input) -> bool {
            true
        }

        fn error_message(&self, _field: &str) -> String {
            String::new()
        }
    }

    struct ParameterRule;

    impl Rule for ParameterRule {
        fn validate(&self, _value: &str, _input: &Input) -> bool {
            true
        }

        fn error_message(&self, _field: &str) -> String {
            String::new()
        }

        fn parameters(&self) -> Vec<(&'static str, String)> {
            vec![("foo", "foovalue".to_string()), ("bar", "barvalue".to_string())]
        }

        fn i18n_field_name_parameters(&self) -> &[&'static str] {
            &["foo"]
        }
    }

    #[test]
    fn test_custom_error_message() {
        let i18n = RecordingI18n::with(&[("validate.overrides.messages.foobar.barfoo", "translated")]);

        assert_eq!(
            translated_error_message(&PlainRule, &i18n, "foobar", "barfoo"),
            "translated"
        );
        assert_eq!(
            i18n.calls(),
            vec![
                "has validate.overrides.messages.foobar.barfoo",
                "get validate.overrides.messages.foobar.barfoo [\"foobar\"]",
            ]
        );
    }

    #[test]
    fn test_custom_error_message_with_parameters() {
        let i18n = RecordingI18n::with(&[("validate.overrides.messages.foobar.barfoo", "translated")]);

        translated_error_message(&ParameterRule, &i18n, "foobar", "barfoo");

        assert_eq!(
            i18n.calls()[1],
            "get validate.overrides.messages.foobar.barfoo [\"foobar\", \"foovalue\", \"barvalue\"]"
        );
    }

    #[test]
    fn test_translated_field_name() {
        let i18n = RecordingI18n::with(&[("validate.overrides.fieldnames.foobar", "foobaz")]);

        assert_eq!(
            translated_error_message(&PlainRule, &i18n, "foobar", "barfoo"),
            "translated"
        );
        assert_eq!(
            i18n.calls(),
            vec![
                "has validate.overrides.messages.foobar.barfoo",
                "has validate.overrides.fieldnames.foobar",
                "get validate.overrides.fieldnames.foobar []",
                "get validate.barfoo [\"foobaz\"]",
            ]
        );
    }

    #[test]
    fn test_translated_field_names_in_parameters() {
        let i18n = RecordingI18n::with(&[
            ("validate.overrides.fieldnames.foobar", "foobaz"),
            ("validate.overrides.fieldnames.foovalue", "foofield"),
        ]);

        translated_error_message(&ParameterRule, &i18n, "foobar", "barfoo");

        assert_eq!(
            i18n.calls(),
            vec![
                "has validate.overrides.messages.foobar.barfoo",
                "has validate.overrides.fieldnames.foobar",
                "get validate.overrides.fieldnames.foobar []",
                "has validate.overrides.fieldnames.foovalue",
                "get validate.overrides.fieldnames.foovalue []",
                "get validate.barfoo [\"foobaz\", \"foofield\", \"barvalue\"]",
            ]
        );
    }

    #[test]
    fn test_default_message() {
        let i18n = RecordingI18n::default();

        assert_eq!(
            translated_error_message(&PlainRule, &i18n, "foobar", "barfoo"),
            "translated"
        );
        assert_eq!(
            i18n.calls(),
            vec![
                "has validate.overrides.messages.foobar.barfoo",
                "has validate.overrides.fieldnames.foobar",
                "get validate.barfoo [\"foobar\"]",
            ]
        );
    }

    #[test]
    fn test_catalog_fills_placeholders_in_order() {
        let catalog = Catalog::new([("validate.min_length", "%s must be at least %s characters")]);

        assert_eq!(
            catalog.get(
                "validate.min_length",
                &["Password".to_string(), "8".to_string()]
            ),
            "Password must be at least 8 characters"
        );
    }

    #[test]
    fn test_catalog_missing_params_render_empty() {
        let catalog = Catalog::new([("greeting", "Hello %s!")]);

        assert_eq!(catalog.get("greeting", &[]), "Hello !");
    }
}
