// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the dialogue driver, the adapters, and the report log.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but missing something non-essential.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Author of a transcript entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role-tagged entry of the conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A request to the completion provider: the model plus the full ordered transcript.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Token usage reported by the completion provider, when available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// The assistant reply returned by the completion provider.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Reply text appended to the transcript.
    pub content: String,
    /// Model that actually served the request.
    pub model: String,
    pub usage: Option<TokenUsage>,
}

/// The five fields collected by the interview.
///
/// Every field is free text and may be empty; nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFields {
    pub equipment_type: String,
    pub equipment_id: String,
    pub problem_description: String,
    pub incident_date: String,
    pub photo_url: String,
}

impl ReportFields {
    /// Names of the fields that came back blank.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("equipment_type", &self.equipment_type),
            ("equipment_id", &self.equipment_id),
            ("problem_description", &self.problem_description),
            ("incident_date", &self.incident_date),
            ("photo_url", &self.photo_url),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// A finalized breakdown report. Immutable once built.
///
/// Serializes to a flat JSON object whose keys are the report log columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Short practically-unique identifier (8 characters).
    pub report_id: String,
    /// UTC instant formatted as ISO-8601 with second precision and a trailing `Z`.
    pub timestamp: String,
    #[serde(flatten)]
    pub fields: ReportFields,
    /// Email entered by the submitter.
    pub submitted_by: String,
    /// Human-readable summary composed from the extracted fields.
    pub chat_summary: String,
}

impl Report {
    /// Report log header, in column order.
    pub const COLUMNS: [&'static str; 9] = [
        "report_id",
        "timestamp",
        "equipment_type",
        "equipment_id",
        "problem_description",
        "incident_date",
        "photo_url",
        "submitted_by",
        "chat_summary",
    ];

    /// Values in [`Report::COLUMNS`] order.
    pub fn row(&self) -> [&str; 9] {
        [
            self.report_id.as_str(),
            self.timestamp.as_str(),
            self.fields.equipment_type.as_str(),
            self.fields.equipment_id.as_str(),
            self.fields.problem_description.as_str(),
            self.fields.incident_date.as_str(),
            self.fields.photo_url.as_str(),
            self.submitted_by.as_str(),
            self.chat_summary.as_str(),
        ]
    }
}
