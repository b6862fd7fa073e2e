// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret resolution: secret store first, process environment second.
//!
//! The secret store is a flat TOML file (`secrets.toml` by default) holding the
//! three credentials under their environment variable names. A key missing from
//! the store falls back to the environment variable of the same name, and
//! finally to the value in the regular config file.

use std::collections::HashMap;
use std::path::Path;

use breakdesk_core::BreakdeskError;
use figment::{
    providers::{Format, Toml},
    Figment,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::model::BreakdeskConfig;

/// Completion API key.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Webhook endpoint for new reports.
pub const WEBHOOK_URL: &str = "N8N_WEBHOOK_URL";

/// Image host API key.
pub const IMGBB_API_KEY: &str = "IMGBB_API_KEY";

/// Flat key/value secret store loaded from a TOML file.
#[derive(Default)]
pub struct SecretStore {
    values: HashMap<String, String>,
}

impl std::fmt::Debug for SecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&String> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("SecretStore").field("keys", &keys).finish()
    }
}

impl SecretStore {
    /// Load the store from `path`. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self, BreakdeskError> {
        Self::extract(Figment::new().merge(Toml::file(path)))
    }

    /// Parse the store from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, BreakdeskError> {
        Self::extract(Figment::new().merge(Toml::string(content)))
    }

    fn extract(figment: Figment) -> Result<Self, BreakdeskError> {
        let values: HashMap<String, String> = figment
            .extract()
            .map_err(|e| BreakdeskError::Config(format!("invalid secret store: {e}")))?;
        Ok(Self { values })
    }

    /// Returns a non-empty secret by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The three resolved credentials.
#[derive(Debug, Default)]
pub struct Secrets {
    pub openai_api_key: Option<SecretString>,
    pub webhook_url: Option<SecretString>,
    pub imgbb_api_key: Option<SecretString>,
}

impl Secrets {
    /// Masked view of each secret for display.
    pub fn masked(&self) -> Vec<(&'static str, String)> {
        [
            (OPENAI_API_KEY, &self.openai_api_key),
            (WEBHOOK_URL, &self.webhook_url),
            (IMGBB_API_KEY, &self.imgbb_api_key),
        ]
        .into_iter()
        .map(|(name, value)| {
            let shown = value
                .as_ref()
                .map(|s| mask_secret(s.expose_secret()))
                .unwrap_or_else(|| "(unset)".to_string());
            (name, shown)
        })
        .collect()
    }
}

/// Resolve secrets with an injectable environment lookup.
///
/// Order per key: secret store, then `env(key)`, then the config file value.
/// Empty values are treated as unset at every level.
pub fn resolve<F>(config: &BreakdeskConfig, store: &SecretStore, env: F) -> Secrets
where
    F: Fn(&str) -> Option<String>,
{
    let pick = |key: &str, fallback: Option<&String>| -> Option<SecretString> {
        store
            .get(key)
            .map(str::to_string)
            .or_else(|| env(key).filter(|v| !v.trim().is_empty()))
            .or_else(|| fallback.filter(|v| !v.trim().is_empty()).cloned())
            .map(SecretString::from)
    };

    Secrets {
        openai_api_key: pick(OPENAI_API_KEY, config.openai.api_key.as_ref()),
        webhook_url: pick(WEBHOOK_URL, config.webhook.url.as_ref()),
        imgbb_api_key: pick(IMGBB_API_KEY, config.imgbb.api_key.as_ref()),
    }
}

/// Load the configured secret store and resolve against the process environment.
pub fn resolve_from_env(config: &BreakdeskConfig) -> Result<Secrets, BreakdeskError> {
    let path = Path::new(&config.secrets.file);
    let store = SecretStore::load(path)?;
    debug!(
        path = %path.display(),
        entries = store.len(),
        "secret store loaded"
    );
    Ok(resolve(config, &store, |key| std::env::var(key).ok()))
}

/// Mask a secret value for display: "sk-a...wxyz" format.
///
/// Short values (< 10 chars) are fully masked as "****".
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() < 10 {
        return "****".to_string();
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{prefix}...{suffix}")
}
