// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Collects every failure instead of stopping at the first.

use crate::diagnostic::ConfigError;
use crate::model::BreakdeskConfig;

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &BreakdeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else if host.parse::<std::net::IpAddr>().is_err()
        && !host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        fail(format!("server.host `{host}` is not a valid IP address or hostname"));
    }

    if config.server.port == 0 {
        fail("server.port must be greater than zero".to_string());
    }

    if config.server.max_upload_bytes == 0 {
        fail("server.max_upload_bytes must be greater than zero".to_string());
    }

    if config.server.session_idle_secs == 0 {
        fail("server.session_idle_secs must be greater than zero".to_string());
    }

    if config.agent.model.trim().is_empty() {
        fail("agent.model must not be empty".to_string());
    }

    if config.report.log_path.trim().is_empty() {
        fail("report.log_path must not be empty".to_string());
    }

    for (key, value) in [
        ("openai.base_url", Some(&config.openai.base_url)),
        ("imgbb.upload_url", Some(&config.imgbb.upload_url)),
        ("webhook.url", config.webhook.url.as_ref()),
    ] {
        if let Some(url) = value
            && let Err(e) = reqwest::Url::parse(url)
        {
            fail(format!("{key} `{url}` is not a valid URL: {e}"));
        }
    }

    if let Some(path) = &config.agent.system_prompt_file
        && !std::path::Path::new(path).is_file()
    {
        fail(format!("agent.system_prompt_file `{path}` does not exist"));
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
        assert!(validate_config(&BreakdeskConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_failure() {
        let mut config = BreakdeskConfig::default();
        config.server.host = String::new();
        config.agent.model = " ".into();
        config.webhook.url = Some("not a url".into());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn rejects_bad_host() {
        let mut config = BreakdeskConfig::default();
        config.server.host = "bad host!".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("server.host"));
    }

    #[test]
    fn rejects_zero_port_and_idle_timeout() {
        let mut config = BreakdeskConfig::default();
        config.server.port = 0;
        config.server.session_idle_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().contains("server.port"));
        assert!(errors[1].to_string().contains("server.session_idle_secs"));
    }
}
