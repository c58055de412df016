//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation on top of serde's syntactic checks
//! - Validate value ranges (timeouts > 0, probe window > 0)
//! - Require provisioning fields only when provisioning is enabled
//!
//! Returns every problem found, not just the first.

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::DecoyConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    BindAddress(String),

    #[error("timeouts.io_ms must be greater than zero")]
    IoTimeout,

    #[error("probe.max_bytes must be greater than zero")]
    ProbeWindow,

    #[error("provisioning.url is required when provisioning is enabled")]
    ProvisioningUrl,

    #[error("provisioning.command is required when provisioning is enabled")]
    ProvisioningCommand,
}

/// Check a deserialized config for semantic problems.
pub fn validate_config(config: &DecoyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.timeouts.io_ms == 0 {
        errors.push(ValidationError::IoTimeout);
    }
    if config.probe.max_bytes == 0 {
        errors.push(ValidationError::ProbeWindow);
    }
    if config.provisioning.enabled {
        if config.provisioning.url.is_empty() {
            errors.push(ValidationError::ProvisioningUrl);
        }
        if config.provisioning.command.is_empty() {
            errors.push(ValidationError::ProvisioningCommand);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&DecoyConfig::default()).is_ok());
    }

    #[test]
    fn bad_bind_address_is_reported() {
        let mut config = DecoyConfig::default();
        config.listener.bind_address = "not-an-address".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::BindAddress("not-an-address".into())]
        );
    }

    #[test]
    fn all_problems_are_collected() {
        let mut config = DecoyConfig::default();
        config.timeouts.io_ms = 0;
        config.probe.max_bytes = 0;
        config.provisioning.enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::IoTimeout));
        assert!(errors.contains(&ValidationError::ProbeWindow));
        assert!(errors.contains(&ValidationError::ProvisioningUrl));
        assert!(errors.contains(&ValidationError::ProvisioningCommand));
    }

    #[test]
    fn enabled_provisioning_with_fields_is_valid() {
        let mut config = DecoyConfig::default();
        config.provisioning.enabled = true;
        config.provisioning.url = "https://example.com/agent.xml".into();
        config.provisioning.command = "monitor-agent".into();
        assert!(validate_config(&config).is_ok());
    }
}
