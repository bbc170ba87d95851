//! termagent-core error types
//!
//! Re-exports termagent-error and provides configuration conveniences.

pub use termagent_error::{Error, ErrorKind, ErrorStatus, Result};

use crate::provider::ProviderType;

/// Create a ConfigMissing error for a provider's credential
pub fn missing_credential(provider: ProviderType) -> Error {
    Error::config_missing(provider.credential_var())
        .with_operation("settings::load")
        .with_context("provider", provider.as_str())
}

/// Create a ConfigInvalid error for a setting that failed to parse
pub fn invalid_setting(name: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Error {
    let value = value.into();
    Error::config_invalid(format!("invalid {} '{}': {}", name, value, reason.into()))
        .with_operation("settings::load")
        .with_context("setting", name)
        .with_context("value", value)
}
