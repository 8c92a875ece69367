//! Trait abstraction for the registry client to enable mocking in tests

use async_trait::async_trait;

use super::types::{NewRegistration, RegistrationReceipt, RegistryError};

/// Registry operations the app depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryClientTrait: Send + Sync {
    /// Check if the registry is reachable
    async fn check_connection(&self) -> bool;

    /// Submit a validated registration, returning the stored record's receipt
    async fn register_patient(
        &self,
        registration: NewRegistration,
    ) -> Result<RegistrationReceipt, RegistryError>;
}
