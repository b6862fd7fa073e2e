// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `breakdesk config`: prints the effective configuration.

use breakdesk_config::{mask_secret, secrets, BreakdeskConfig, Secrets};
use breakdesk_core::BreakdeskError;

/// Renders the config as TOML, then the resolved secrets as comments.
///
/// Every credential is masked, including values written in the TOML itself.
pub fn render(config: &BreakdeskConfig, resolved: &Secrets) -> Result<String, BreakdeskError> {
    let mut shown = config.clone();
    shown.openai.api_key = shown.openai.api_key.as_deref().map(mask_secret);
    shown.imgbb.api_key = shown.imgbb.api_key.as_deref().map(mask_secret);
    shown.webhook.url = shown.webhook.url.as_deref().map(mask_secret);

    let mut out = toml::to_string_pretty(&shown)
        .map_err(|e| BreakdeskError::Internal(format!("failed to render config: {e}")))?;
    out.push_str("\n# Resolved secrets\n");
    for (name, value) in resolved.masked() {
        out.push_str(&format!("# {name} = {value}\n"));
    }
    Ok(out)
}

/// Resolves secrets against the process environment and renders.
pub fn run(config: &BreakdeskConfig) -> Result<String, BreakdeskError> {
    let resolved = secrets::resolve_from_env(config)?;
    render(config, &resolved)
}
