// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Breakdesk report assistant.

use thiserror::Error;

/// The primary error type used across adapters and core operations.
#[derive(Debug, Error)]
pub enum BreakdeskError {
    /// Configuration errors (invalid TOML, missing secrets, bad URLs).
    #[error("configuration error: {0}")]
    Config(String),

    /// Completion API errors (network, auth, rate limiting, malformed reply).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Image decode, re-encode, or upload errors.
    #[error("image upload error: {message}")]
    ImageHost {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Webhook delivery errors. Never fatal for a submission.
    #[error("webhook error: {message}")]
    Webhook {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failure writing the report log.
    #[error("report log error: {source}")]
    ReportLog {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The session is not in a state that allows the requested action.
    #[error("session error: {0}")]
    Session(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
