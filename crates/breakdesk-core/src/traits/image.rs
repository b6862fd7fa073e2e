// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image host trait for photo ingestion.

use async_trait::async_trait;

use crate::error::BreakdeskError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for a third-party image host.
#[async_trait]
pub trait ImageHost: PluginAdapter {
    /// Re-encodes the raw upload and publishes it, returning a public URL.
    async fn upload(&self, image: Vec<u8>) -> Result<String, BreakdeskError>;
}
