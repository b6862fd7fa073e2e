// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion provider trait for the language-model backend.

use async_trait::async_trait;

use crate::error::BreakdeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for the external chat completion API.
///
/// The whole transcript is sent on every call; the provider keeps no state.
#[async_trait]
pub trait CompletionProvider: PluginAdapter {
    /// Sends the transcript and returns the assistant reply.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, BreakdeskError>;
}
