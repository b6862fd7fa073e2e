// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Breakdesk breakdown-report assistant.
//!
//! This crate provides the error type, the conversation and report types, and
//! the adapter traits implemented by the completion provider, the image host,
//! and the report notifier.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::BreakdeskError;
pub use types::{
    ChatMessage, CompletionRequest, CompletionResponse, HealthStatus, Report, ReportFields, Role,
    TokenUsage,
};

pub use traits::{CompletionProvider, ImageHost, PluginAdapter, ReportNotifier};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdesk_error_has_all_variants() {
        let _config = BreakdeskError::Config("test".into());
        let _provider = BreakdeskError::Provider {
            message: "test".into(),
            source: None,
        };
        let _image = BreakdeskError::ImageHost {
            message: "test".into(),
            source: None,
        };
        let _webhook = BreakdeskError::Webhook {
            message: "test".into(),
            source: None,
        };
        let _log = BreakdeskError::ReportLog {
            source: Box::new(std::io::Error::other("test")),
        };
        let _session = BreakdeskError::Session("test".into());
        let _internal = BreakdeskError::Internal("test".into());
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_completion_provider<T: CompletionProvider>() {}
        fn _assert_image_host<T: ImageHost>() {}
        fn _assert_report_notifier<T: ReportNotifier>() {}
    }
}
