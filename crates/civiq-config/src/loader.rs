// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./civiq.toml` > `~/.config/civiq/civiq.toml` >
//! `/etc/civiq/civiq.toml` with environment variable overrides via the
//! `CIVIQ_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::CiviqConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/civiq/civiq.toml` (system-wide)
/// 3. `~/.config/civiq/civiq.toml` (user XDG config)
/// 4. `./civiq.toml` (local directory)
/// 5. `CIVIQ_*` environment variables
pub fn load_config() -> Result<CiviqConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CiviqConfig::default()))
        .merge(Toml::file("/etc/civiq/civiq.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("civiq/civiq.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("civiq.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<CiviqConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CiviqConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CiviqConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CiviqConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `CIVIQ_GEMINI_API_KEY` must map to
/// `gemini.api_key`, not `gemini.api.key`.
fn env_provider() -> Env {
    Env::prefixed("CIVIQ_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: CIVIQ_GEMINI_API_KEY -> "gemini_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("classifier_", "classifier.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("admin_", "admin.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[server]
host = "0.0.0.0"
port = 8080

[gemini]
api_key = "test-key"
"#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.gemini.api_key.as_deref(), Some("test-key"));
        // Untouched sections keep their defaults.
        assert_eq!(config.admin.alert_threshold, 5);
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
    }
}
