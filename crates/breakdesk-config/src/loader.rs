// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./breakdesk.toml` > `~/.config/breakdesk/breakdesk.toml`
//! > `/etc/breakdesk/breakdesk.toml`, with environment variable overrides via
//! the `BREAKDESK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::BreakdeskConfig;

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "breakdesk.toml";

/// System-wide config file.
pub const SYSTEM_CONFIG_FILE: &str = "/etc/breakdesk/breakdesk.toml";

/// Per-user config file under the XDG config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("breakdesk").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/breakdesk/breakdesk.toml`
/// 3. `~/.config/breakdesk/breakdesk.toml`
/// 4. `./breakdesk.toml`
/// 5. `BREAKDESK_*` environment variables
pub fn load_config() -> Result<BreakdeskConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<BreakdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BreakdeskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<BreakdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(BreakdeskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(BreakdeskConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_FILE))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that underscore-containing
/// keys survive: `BREAKDESK_IMGBB_UPLOAD_URL` maps to `imgbb.upload_url`,
/// not `imgbb.upload.url`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("BREAKDESK_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name to its dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    const SECTIONS: &[&str] = &[
        "server", "agent", "openai", "imgbb", "webhook", "report", "secrets",
    ];
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
