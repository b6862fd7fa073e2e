// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Breakdesk configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BreakdeskConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Dialogue behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Chat Completions API settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Image host settings.
    #[serde(default)]
    pub imgbb: ImgbbConfig,

    /// Downstream automation webhook.
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// Report log settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// Secret store location.
    #[serde(default)]
    pub secrets: SecretsConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted photo upload, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Seconds a chat session may sit untouched before it is dropped.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_session_idle_secs() -> u64 {
    30 * 60
}

/// Dialogue configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Model identifier sent with every completion request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Inline system instruction. Overridden by `system_prompt_file` if both set.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Path to a text file containing the system instruction.
    #[serde(default)]
    pub system_prompt_file: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            log_level: default_log_level(),
            system_prompt: None,
            system_prompt_file: None,
        }
    }
}

fn default_model() -> String {
    "gpt-4-turbo-preview".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Chat Completions API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. Normally supplied through the secret store or `OPENAI_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Full URL of the chat completions endpoint.
    #[serde(default = "default_openai_url")]
    pub base_url: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_url(),
        }
    }
}

fn default_openai_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

/// Image host configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ImgbbConfig {
    /// API key. Normally supplied through the secret store or `IMGBB_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Upload endpoint.
    #[serde(default = "default_imgbb_url")]
    pub upload_url: String,
}

impl Default for ImgbbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            upload_url: default_imgbb_url(),
        }
    }
}

fn default_imgbb_url() -> String {
    "https://api.imgbb.com/1/upload".to_string()
}

/// Webhook configuration. `url = None` disables notification.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookConfig {
    #[serde(default)]
    pub url: Option<String>,
}

/// Report log configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Path of the append-only CSV log.
    #[serde(default = "default_log_path")]
    pub log_path: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
        }
    }
}

fn default_log_path() -> String {
    "reports.csv".to_string()
}

/// Secret store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SecretsConfig {
    /// Flat TOML file of secrets (`OPENAI_API_KEY = "..."`). A missing file is not an error.
    #[serde(default = "default_secrets_file")]
    pub file: String,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            file: default_secrets_file(),
        }
    }
}

fn default_secrets_file() -> String {
    "secrets.toml".to_string()
}
