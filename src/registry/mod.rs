//! Registry client module for clinic record submission

mod client;
mod traits;
mod types;

pub use client::RegistryClient;
pub use traits::RegistryClientTrait;
pub use types::{NewRegistration, RegistrationReceipt, RegistryError};

#[cfg(test)]
pub use traits::MockRegistryClientTrait;
