// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, non-empty endpoints, and
//! positive timeouts.

use crate::diagnostic::ConfigError;
use crate::model::CiviqConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &CiviqConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate server.host is not empty and looks like an IP or hostname.
    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    // Validate classifier endpoint.
    let endpoint = config.classifier.endpoint.trim();
    if endpoint.is_empty() {
        errors.push(ConfigError::Validation {
            message: "classifier.endpoint must not be empty".to_string(),
        });
    } else if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("classifier.endpoint `{endpoint}` must be an http(s) URL"),
        });
    }

    // Validate gemini endpoint and model.
    let gemini_endpoint = config.gemini.endpoint.trim();
    if !gemini_endpoint.starts_with("http://") && !gemini_endpoint.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("gemini.endpoint `{gemini_endpoint}` must be an http(s) URL"),
        });
    }
    if config.gemini.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.model must not be empty".to_string(),
        });
    }

    // Validate timeouts are bounded but non-zero.
    for (key, value) in [
        (
            "classifier.connect_timeout_secs",
            config.classifier.connect_timeout_secs,
        ),
        ("classifier.timeout_secs", config.classifier.timeout_secs),
        ("gemini.timeout_secs", config.gemini.timeout_secs),
    ] {
        if value == 0 {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be at least 1 second"),
            });
        }
    }

    // Validate database_path is not empty.
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate alert threshold is non-negative.
    if config.admin.alert_threshold < 0 {
        errors.push(ConfigError::Validation {
            message: format!(
                "admin.alert_threshold must be non-negative, got {}",
                config.admin.alert_threshold
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
