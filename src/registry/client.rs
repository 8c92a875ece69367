//! HTTP client for the clinic's patient registry

use async_trait::async_trait;
use reqwest::multipart;

use crate::config::IntakeConfig;

use super::traits::RegistryClientTrait;
use super::types::{NewRegistration, RegistrationReceipt, RegistryError};

/// Default registry address
const DEFAULT_ADDRESS: &str = "http://127.0.0.1:7151";

/// Environment variable overriding the configured registry address
const ADDRESS_ENV: &str = "INTAKE_REGISTRY_URL";

/// Longest response body carried into a status-line error message
const ERROR_BODY_LIMIT: usize = 160;

/// Client for the patient registry HTTP API
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
}

impl RegistryClient {
    /// Create a client from config; the environment wins over the file
    pub fn from_config(config: &IntakeConfig) -> Self {
        let address =
            resolve_address(std::env::var(ADDRESS_ENV).ok(), config.registry_url.clone());
        Self::with_address(&address)
    }

    pub fn with_address(address: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: address.trim_end_matches('/').to_string(),
        }
    }

    fn patients_endpoint(&self) -> String {
        format!("{}/patients", self.base_url)
    }

    fn health_endpoint(&self) -> String {
        format!("{}/health", self.base_url)
    }
}

/// Environment beats config file beats the built-in default
fn resolve_address(env_value: Option<String>, configured: Option<String>) -> String {
    env_value
        .filter(|value| !value.trim().is_empty())
        .or(configured)
        .unwrap_or_else(|| DEFAULT_ADDRESS.to_string())
}

/// Clip a response body to something the status line can show
fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[async_trait]
impl RegistryClientTrait for RegistryClient {
    async fn check_connection(&self) -> bool {
        match self.http.get(self.health_endpoint()).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn register_patient(
        &self,
        registration: NewRegistration,
    ) -> Result<RegistrationReceipt, RegistryError> {
        let request = self.http.post(self.patients_endpoint());
        let response = match registration.identification_document {
            Some(ref attachment) => {
                // The JSON payload rides along as a form field next to the scan
                let body = serde_json::to_string(&registration)?;
                let part = multipart::Part::bytes(attachment.bytes.clone())
                    .file_name(attachment.file_name.clone())
                    .mime_str(&attachment.mime_type)?;
                let form = multipart::Form::new()
                    .text("registration", body)
                    .part("identificationDocument", part);
                request.multipart(form).send().await?
            }
            None => request.json(&registration).send().await?,
        };

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RegistryError::Status {
                code: status.as_u16(),
                message: clip(message.trim(), ERROR_BODY_LIMIT),
            });
        }

        response
            .json::<RegistrationReceipt>()
            .await
            .map_err(|err| RegistryError::InvalidResponse(err.to_string()))
    }
}
