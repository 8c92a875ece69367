//! Wire types for the patient registry endpoint

use std::fs;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::IntakeConfig;
use crate::state::constants::DOCUMENT_FIELD;
use crate::state::forms::{normalize_phone, FormState};

/// Identifier the registry assigns to a stored registration
pub type RecordId = Uuid;

/// Errors from talking to the registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to encode registration: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("registry rejected the registration ({code}): {message}")]
    Status { code: u16, message: String },
    #[error("unexpected registry response: {0}")]
    InvalidResponse(String),
}

/// Scanned document read into memory for the multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Registration payload POSTed to `{base}/patients`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRegistration {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub gender: String,
    pub address: String,
    pub occupation: String,
    pub emergency_contact_name: String,
    pub emergency_contact_number: String,
    pub primary_physician: String,
    pub insurance_provider: String,
    pub insurance_policy_number: String,
    pub allergies: Option<String>,
    pub current_medication: Option<String>,
    pub family_medical_history: Option<String>,
    pub past_medical_history: Option<String>,
    pub identification_type: String,
    pub identification_number: String,
    pub treatment_consent: bool,
    pub disclosure_consent: bool,
    pub privacy_consent: bool,
    /// Sent as a multipart file part, never in the JSON body
    #[serde(skip)]
    pub identification_document: Option<Attachment>,
}

/// Response body for a stored registration
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationReceipt {
    pub id: RecordId,
}

impl NewRegistration {
    /// Build the wire payload from a validated form snapshot. Reads the
    /// first attached file into memory, so call this after validation.
    pub fn from_form(state: &FormState, user_id: &str, config: &IntakeConfig) -> Result<Self> {
        let birth_date =
            NaiveDate::parse_from_str(state.text("birth_date").trim(), &config.date_format)
                .context("parse date of birth")?;

        let identification_document = match state.files(DOCUMENT_FIELD).first() {
            Some(handle) => {
                let bytes = fs::read(&handle.path)
                    .with_context(|| format!("read attachment {}", handle.path.display()))?;
                Some(Attachment {
                    file_name: handle.file_name.clone(),
                    mime_type: handle.mime_type.clone(),
                    bytes,
                })
            }
            None => None,
        };

        let optional = |name: &str| {
            let text = state.text(name).trim();
            if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        };

        Ok(Self {
            user_id: user_id.to_string(),
            name: state.text("name").trim().to_string(),
            email: state.text("email").trim().to_string(),
            phone: normalize_phone(state.text("phone"), &config.default_country_code),
            birth_date,
            gender: state.choice("gender").unwrap_or_default().to_string(),
            address: state.text("address").trim().to_string(),
            occupation: state.text("occupation").trim().to_string(),
            emergency_contact_name: state.text("emergency_contact_name").trim().to_string(),
            emergency_contact_number: normalize_phone(
                state.text("emergency_contact_number"),
                &config.default_country_code,
            ),
            primary_physician: state
                .choice("primary_physician")
                .unwrap_or_default()
                .to_string(),
            insurance_provider: state.text("insurance_provider").trim().to_string(),
            insurance_policy_number: state.text("insurance_policy_number").trim().to_string(),
            allergies: optional("allergies"),
            current_medication: optional("current_medication"),
            family_medical_history: optional("family_medical_history"),
            past_medical_history: optional("past_medical_history"),
            identification_type: state
                .choice("identification_type")
                .unwrap_or_default()
                .to_string(),
            identification_number: state.text("identification_number").trim().to_string(),
            treatment_consent: state.flag("treatment_consent"),
            disclosure_consent: state.flag("disclosure_consent"),
            privacy_consent: state.flag("privacy_consent"),
            identification_document,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::constants::DEFAULT_DATE_FORMAT;
    use crate::state::forms::{FieldValue, FileHandle, RegistrationForm};
    use std::io::Write;

    fn test_config() -> IntakeConfig {
        IntakeConfig::default()
    }

    /// Snapshot with every submitted field filled in
    fn filled_state() -> FormState {
        let mut form = RegistrationForm::new(DEFAULT_DATE_FORMAT);
        let state = &mut form.state;
        state.set_value("name", FieldValue::Text("  Amara Okafor ".to_string()));
        state.set_value("email", FieldValue::Text("amara@example.com".to_string()));
        state.set_value("phone", FieldValue::Text("(555) 123-4567".to_string()));
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
            FieldValue::Text("+1 415 555 0199".to_string()),
        );
        state.set_value(
            "primary_physician",
            FieldValue::Choice(Some("Dr. Adam Smith".to_string())),
        );
        state.set_value(
            "insurance_provider",
            FieldValue::Text("BlueCross".to_string()),
        );
        state.set_value(
            "insurance_policy_number",
            FieldValue::Text("ABC123456789".to_string()),
        );
        state.set_value("allergies", FieldValue::Text("Peanuts".to_string()));
        state.set_value(
            "identification_type",
            FieldValue::Choice(Some("Passport".to_string())),
        );
        state.set_value(
            "identification_number",
            FieldValue::Text("P1234567".to_string()),
        );
        for consent in ["treatment_consent", "disclosure_consent", "privacy_consent"] {
            state.set_value(consent, FieldValue::Flag(true));
        }
        form.state
    }

    #[test]
    fn test_from_form_converts_typed_values() {
        let registration = NewRegistration::from_form(&filled_state(), "user-1", &test_config())
            .unwrap();

        assert_eq!(registration.user_id, "user-1");
        assert_eq!(registration.name, "Amara Okafor");
        assert_eq!(
            registration.birth_date,
            NaiveDate::from_ymd_opt(1990, 4, 12).unwrap()
        );
        assert_eq!(registration.phone, "+915551234567");
        assert_eq!(registration.emergency_contact_number, "+14155550199");
        assert_eq!(registration.gender, "Female");
        assert!(registration.treatment_consent);
        assert!(registration.identification_document.is_none());
    }

    #[test]
    fn test_from_form_keeps_filled_textareas_and_drops_empty_ones() {
        let registration = NewRegistration::from_form(&filled_state(), "user-1", &test_config())
            .unwrap();

        assert_eq!(registration.allergies.as_deref(), Some("Peanuts"));
        assert!(registration.current_medication.is_none());
        assert!(registration.past_medical_history.is_none());
    }

    #[test]
    fn test_from_form_reads_first_attachment() {
        let mut file = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .unwrap();
        file.write_all(b"fake scan bytes").unwrap();

        let mut state = filled_state();
        state.set_value(
            DOCUMENT_FIELD,
            FieldValue::Files(vec![FileHandle::from_path(file.path())]),
        );

        let registration =
            NewRegistration::from_form(&state, "user-1", &test_config()).unwrap();
        let attachment = registration.identification_document.unwrap();

        assert_eq!(attachment.bytes, b"fake scan bytes");
        assert_eq!(attachment.mime_type, "image/png");
        assert!(attachment.file_name.ends_with(".png"));
    }

    #[test]
    fn test_from_form_fails_on_unreadable_attachment() {
        let mut state = filled_state();
        state.set_value(
            DOCUMENT_FIELD,
            FieldValue::Files(vec![FileHandle::from_path("/no/such/scan.png")]),
        );

        assert!(NewRegistration::from_form(&state, "user-1", &test_config()).is_err());
    }

    #[test]
    fn test_from_form_fails_on_unparseable_birth_date() {
        let mut state = filled_state();
        state.set_value("birth_date", FieldValue::Date("12.04.1990".to_string()));

        assert!(NewRegistration::from_form(&state, "user-1", &test_config()).is_err());
    }

    #[test]
    fn test_wire_shape_is_camel_case_without_the_document() {
        let registration = NewRegistration::from_form(&filled_state(), "user-1", &test_config())
            .unwrap();
        let value = serde_json::to_value(&registration).unwrap();

        assert_eq!(value["userId"], "user-1");
        assert_eq!(value["birthDate"], "1990-04-12");
        assert_eq!(value["emergencyContactName"], "Ngozi Okafor");
        assert_eq!(value["privacyConsent"], true);
        assert!(value.get("identificationDocument").is_none());
    }

    #[test]
    fn test_receipt_parses_record_id() {
        let receipt: RegistrationReceipt =
            serde_json::from_str(r#"{"id": "67e55044-10b1-426f-9247-bb680e5fe0c8"}"#).unwrap();
        assert_eq!(
            receipt.id,
            "67e55044-10b1-426f-9247-bb680e5fe0c8".parse::<RecordId>().unwrap()
        );
    }
}
