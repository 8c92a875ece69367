//! Shared form state
//!
//! One [`FormState`] backs every field in a form. Rendering registers
//! fields the first time it sees them, key handling mutates values through
//! [`Binding`](super::Binding), and validation replaces the error map
//! wholesale after each submit attempt.

use std::collections::HashMap;

use super::field::{FieldValue, FileHandle};
use super::spec::FieldSpec;

#[derive(Debug, Default)]
pub struct FormState {
    values: HashMap<String, FieldValue>,
    errors: HashMap<String, String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value under the field's name unless it is already known.
    /// Returns whether the registration took effect, so callers can tell a
    /// fresh field from a repeat sighting of the same name.
    pub fn register(&mut self, spec: &FieldSpec) -> bool {
        if self.values.contains_key(&spec.name) {
            return false;
        }
        self.values.insert(spec.name.clone(), spec.seed_value());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn value_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.values.get_mut(name)
    }

    pub fn set_value(&mut self, name: &str, value: FieldValue) {
        self.values.insert(name.to_string(), value);
    }

    /// Text stored under `name` (empty string when absent or non-textual)
    pub fn text(&self, name: &str) -> &str {
        self.value(name).map(FieldValue::as_text).unwrap_or("")
    }

    /// Flag stored under `name` (false when absent or non-flag)
    pub fn flag(&self, name: &str) -> bool {
        self.value(name).map(FieldValue::as_flag).unwrap_or(false)
    }

    /// Chosen option stored under `name`, if any
    pub fn choice(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(FieldValue::as_choice)
    }

    /// Files stored under `name` (empty when absent or non-file)
    pub fn files(&self, name: &str) -> &[FileHandle] {
        self.value(name).map(FieldValue::as_files).unwrap_or(&[])
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Replace the whole error map with a fresh validation outcome
    pub fn set_errors(&mut self, errors: HashMap<String, String>) {
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::FieldKind;

    fn text_spec(name: &str) -> FieldSpec {
        FieldSpec::new(FieldKind::Input, name, "Label")
    }

    mod registration {
        use super::*;

        #[test]
        fn test_register_seeds_default_value() {
            let mut state = FormState::new();
            let registered = state.register(&text_spec("name"));

            assert!(registered);
            assert_eq!(state.value("name"), Some(&FieldValue::Text(String::new())));
        }

        #[test]
        fn test_register_same_name_twice_keeps_first_value() {
            let mut state = FormState::new();
            state.register(&text_spec("name"));
            state.set_value("name", FieldValue::Text("Amara".to_string()));

            let registered = state.register(&text_spec("name"));

            assert!(!registered);
            assert_eq!(state.text("name"), "Amara");
        }

        #[test]
        fn test_register_uses_spec_initial() {
            let mut state = FormState::new();
            let spec =
                text_spec("occupation").initial(FieldValue::Text("Engineer".to_string()));
            state.register(&spec);

            assert_eq!(state.text("occupation"), "Engineer");
        }

        #[test]
        fn test_contains_reflects_registration() {
            let mut state = FormState::new();
            assert!(!state.contains("name"));
            state.register(&text_spec("name"));
            assert!(state.contains("name"));
        }
    }

    mod typed_getters {
        use super::*;

        #[test]
        fn test_text_on_missing_field_is_empty() {
            let state = FormState::new();
            assert_eq!(state.text("ghost"), "");
        }

        #[test]
        fn test_flag_on_missing_field_is_false() {
            let state = FormState::new();
            assert!(!state.flag("ghost"));
        }

        #[test]
        fn test_choice_round_trip() {
            let mut state = FormState::new();
            state.set_value("gender", FieldValue::Choice(Some("Female".to_string())));
            assert_eq!(state.choice("gender"), Some("Female"));
        }

        #[test]
        fn test_files_on_mismatched_value_is_empty() {
            let mut state = FormState::new();
            state.set_value("docs", FieldValue::Text("oops".to_string()));
            assert!(state.files("docs").is_empty());
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn test_set_errors_replaces_previous_map() {
            let mut state = FormState::new();
            let mut first = HashMap::new();
            first.insert("name".to_string(), "Required".to_string());
            state.set_errors(first);

            let mut second = HashMap::new();
            second.insert("email".to_string(), "Invalid".to_string());
            state.set_errors(second);

            assert_eq!(state.error("name"), None);
            assert_eq!(state.error("email"), Some("Invalid"));
            assert_eq!(state.error_count(), 1);
        }

        #[test]
        fn test_clear_errors() {
            let mut state = FormState::new();
            let mut errors = HashMap::new();
            errors.insert("name".to_string(), "Required".to_string());
            state.set_errors(errors);
            assert!(state.has_errors());

            state.clear_errors();
            assert!(!state.has_errors());
        }
    }
}
