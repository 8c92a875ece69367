//! Submission rules for the intake form
//!
//! Validation runs over the whole [`FormState`] snapshot at submit time.
//! Nothing in here renders or mutates; the renderer stays free of semantic
//! checks and just shows whatever messages land in the error map.

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use regex::Regex;

use crate::config::IntakeConfig;
use crate::state::constants::DOCUMENT_FIELD;
use crate::state::forms::{human_date_format, normalize_phone, FormState};

/// Deterministic, side-effect-free check over a form snapshot.
pub trait Validator: Send + Sync {
    /// Per-field messages for everything wrong with the snapshot. An empty
    /// map means the form may be submitted.
    fn validate(&self, state: &FormState) -> HashMap<String, String>;
}

/// Shape of an acceptable email address
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
/// Shape of a normalized international phone number
const PHONE_PATTERN: &str = r"^\+[0-9]{7,15}$";

/// Text fields that only need to be non-empty
const REQUIRED_TEXT_FIELDS: &[&str] = &[
    "address",
    "occupation",
    "emergency_contact_name",
    "insurance_provider",
    "insurance_policy_number",
    "identification_number",
];

/// Fields holding phone numbers
const PHONE_FIELDS: &[&str] = &["phone", "emergency_contact_number"];

/// Select fields and the message shown while nothing is chosen
const CHOICE_FIELDS: &[(&str, &str)] = &[
    ("gender", "Select a gender option"),
    ("primary_physician", "Select a primary care physician"),
    ("identification_type", "Select an identification type"),
];

/// Consent flags that must all be set before submission
const CONSENT_FIELDS: &[&str] = &["treatment_consent", "disclosure_consent", "privacy_consent"];

/// The clinic's rules for a complete registration.
pub struct RegistrationRules {
    email: Regex,
    phone: Regex,
    date_format: String,
    default_country_code: String,
}

impl RegistrationRules {
    pub fn new(config: &IntakeConfig) -> Result<Self> {
        Ok(Self {
            email: Regex::new(EMAIL_PATTERN).context("compile email pattern")?,
            phone: Regex::new(PHONE_PATTERN).context("compile phone pattern")?,
            date_format: config.date_format.clone(),
            default_country_code: config.default_country_code.clone(),
        })
    }

    /// First failing birth date rule: present, parseable, not in the future
    fn birth_date_message(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Some("Date of birth is required".to_string());
        }
        let Ok(date) = NaiveDate::parse_from_str(raw, &self.date_format) else {
            return Some(format!(
                "Enter the date as {}",
                human_date_format(&self.date_format)
            ));
        };
        if date > Utc::now().date_naive() {
            return Some("Date of birth cannot be in the future".to_string());
        }
        None
    }
}

impl Validator for RegistrationRules {
    fn validate(&self, state: &FormState) -> HashMap<String, String> {
        let mut errors = HashMap::new();

        if state.text("name").trim().chars().count() < 2 {
            errors.insert(
                "name".to_string(),
                "Name must be at least 2 characters".to_string(),
            );
        }

        if !self.email.is_match(state.text("email").trim()) {
            errors.insert(
                "email".to_string(),
                "Enter a valid email address".to_string(),
            );
        }

        for field in PHONE_FIELDS {
            let normalized = normalize_phone(state.text(field), &self.default_country_code);
            if !self.phone.is_match(&normalized) {
                errors.insert(field.to_string(), "Enter a valid phone number".to_string());
            }
        }

        if let Some(message) = self.birth_date_message(state.text("birth_date")) {
            errors.insert("birth_date".to_string(), message);
        }

        for (field, message) in CHOICE_FIELDS {
            if state.choice(field).is_none() {
                errors.insert(field.to_string(), message.to_string());
            }
        }

        for field in REQUIRED_TEXT_FIELDS {
            if state.text(field).trim().is_empty() {
                errors.insert(field.to_string(), "This field is required".to_string());
            }
        }

        if state.files(DOCUMENT_FIELD).is_empty() {
            errors.insert(
                DOCUMENT_FIELD.to_string(),
                "Attach a scanned copy of your identification".to_string(),
            );
        }

        for field in CONSENT_FIELDS {
            if !state.flag(field) {
                errors.insert(
                    field.to_string(),
                    "Consent is required to continue".to_string(),
                );
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::constants::{DEFAULT_DATE_FORMAT, DOCTORS};
    use crate::state::forms::{FieldValue, FileHandle, RegistrationForm};
    use chrono::Days;

    fn rules() -> RegistrationRules {
        RegistrationRules::new(&IntakeConfig::default()).unwrap()
    }

    /// A snapshot that satisfies every rule
    fn valid_state() -> FormState {
        let mut form = RegistrationForm::new(DEFAULT_DATE_FORMAT);
        let state = &mut form.state;
        state.set_value("name", FieldValue::Text("Amara Okafor".to_string()));
        state.set_value("email", FieldValue::Text("amara@example.com".to_string()));
        state.set_value("phone", FieldValue::Text("+14155550123".to_string()));
        state.set_value("birth_date", FieldValue::Date("1990-04-12".to_string()));
        state.set_value("gender", FieldValue::Choice(Some("Female".to_string())));
        state.set_value("address", FieldValue::Text("14 Street, New York".to_string()));
        state.set_value("occupation", FieldValue::Text("Engineer".to_string()));
        state.set_value(
            "emergency_contact_name",
            FieldValue::Text("Ngozi Okafor".to_string()),
        );
        state.set_value(
            "emergency_contact_number",
            FieldValue::Text("+14155550199".to_string()),
        );
        state.set_value(
            "primary_physician",
            FieldValue::Choice(Some(DOCTORS[0].to_string())),
        );
        state.set_value(
            "insurance_provider",
            FieldValue::Text("BlueCross".to_string()),
        );
        state.set_value(
            "insurance_policy_number",
            FieldValue::Text("ABC123456789".to_string()),
        );
        state.set_value(
            "identification_type",
            FieldValue::Choice(Some("Passport".to_string())),
        );
        state.set_value(
            "identification_number",
            FieldValue::Text("P1234567".to_string()),
        );
        state.set_value(
            DOCUMENT_FIELD,
            FieldValue::Files(vec![FileHandle::from_path("/tmp/passport.png")]),
        );
        for consent in CONSENT_FIELDS {
            state.set_value(consent, FieldValue::Flag(true));
        }
        form.state
    }

    #[test]
    fn test_complete_form_passes() {
        let errors = rules().validate(&valid_state());
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn test_untouched_form_reports_every_required_field() {
        let form = RegistrationForm::new(DEFAULT_DATE_FORMAT);
        let errors = rules().validate(&form.state);

        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("birth_date"));
        assert!(errors.contains_key(DOCUMENT_FIELD));
        assert_eq!(errors.len(), 18);
    }

    #[test]
    fn test_short_name_is_rejected() {
        let mut state = valid_state();
        state.set_value("name", FieldValue::Text("A".to_string()));

        let errors = rules().validate(&state);
        assert_eq!(
            errors.get("name").map(String::as_str),
            Some("Name must be at least 2 characters")
        );
    }

    #[test]
    fn test_email_shape_is_checked() {
        let mut state = valid_state();
        state.set_value("email", FieldValue::Text("not-an-email".to_string()));

        let errors = rules().validate(&state);
        assert_eq!(
            errors.get("email").map(String::as_str),
            Some("Enter a valid email address")
        );
    }

    #[test]
    fn test_phone_without_country_code_uses_default_prefix() {
        let mut state = valid_state();
        state.set_value("phone", FieldValue::Text("(555) 123-4567".to_string()));

        let errors = rules().validate(&state);
        assert!(!errors.contains_key("phone"));
    }

    #[test]
    fn test_too_short_phone_is_rejected() {
        let mut state = valid_state();
        state.set_value("phone", FieldValue::Text("+123".to_string()));

        let errors = rules().validate(&state);
        assert_eq!(
            errors.get("phone").map(String::as_str),
            Some("Enter a valid phone number")
        );
    }

    #[test]
    fn test_emergency_number_is_checked_separately() {
        let mut state = valid_state();
        state.set_value("emergency_contact_number", FieldValue::Text(String::new()));

        let errors = rules().validate(&state);
        assert!(errors.contains_key("emergency_contact_number"));
        assert!(!errors.contains_key("phone"));
    }

    #[test]
    fn test_birth_date_format_mismatch_names_the_format() {
        let mut state = valid_state();
        state.set_value("birth_date", FieldValue::Date("12.04.1990".to_string()));

        let errors = rules().validate(&state);
        assert_eq!(
            errors.get("birth_date").map(String::as_str),
            Some("Enter the date as YYYY-MM-DD")
        );
    }

    #[test]
    fn test_birth_date_in_the_future_is_rejected() {
        let tomorrow = Utc::now()
            .date_naive()
            .checked_add_days(Days::new(1))
            .unwrap();
        let mut state = valid_state();
        state.set_value(
            "birth_date",
            FieldValue::Date(tomorrow.format(DEFAULT_DATE_FORMAT).to_string()),
        );

        let errors = rules().validate(&state);
        assert_eq!(
            errors.get("birth_date").map(String::as_str),
            Some("Date of birth cannot be in the future")
        );
    }

    #[test]
    fn test_unselected_choices_each_report() {
        let mut state = valid_state();
        state.set_value("gender", FieldValue::Choice(None));
        state.set_value("primary_physician", FieldValue::Choice(None));

        let errors = rules().validate(&state);
        assert_eq!(
            errors.get("gender").map(String::as_str),
            Some("Select a gender option")
        );
        assert_eq!(
            errors.get("primary_physician").map(String::as_str),
            Some("Select a primary care physician")
        );
    }

    #[test]
    fn test_whitespace_only_text_counts_as_empty() {
        let mut state = valid_state();
        state.set_value("address", FieldValue::Text("   ".to_string()));

        let errors = rules().validate(&state);
        assert_eq!(
            errors.get("address").map(String::as_str),
            Some("This field is required")
        );
    }

    #[test]
    fn test_missing_document_is_reported() {
        let mut state = valid_state();
        state.set_value(DOCUMENT_FIELD, FieldValue::Files(Vec::new()));

        let errors = rules().validate(&state);
        assert_eq!(
            errors.get(DOCUMENT_FIELD).map(String::as_str),
            Some("Attach a scanned copy of your identification")
        );
    }

    #[test]
    fn test_each_consent_is_required() {
        for consent in CONSENT_FIELDS {
            let mut state = valid_state();
            state.set_value(consent, FieldValue::Flag(false));

            let errors = rules().validate(&state);
            assert_eq!(
                errors.get(*consent).map(String::as_str),
                Some("Consent is required to continue"),
                "consent {consent} not enforced"
            );
        }
    }

    #[test]
    fn test_textareas_stay_optional() {
        let mut state = valid_state();
        state.set_value("allergies", FieldValue::Text(String::new()));
        state.set_value("past_medical_history", FieldValue::Text(String::new()));

        let errors = rules().validate(&state);
        assert!(!errors.contains_key("allergies"));
        assert!(!errors.contains_key("past_medical_history"));
    }
}
