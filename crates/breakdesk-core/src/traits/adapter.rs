// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all external collaborators implement.

use async_trait::async_trait;

use crate::error::BreakdeskError;
use crate::types::HealthStatus;

/// The base trait for every external-service adapter.
///
/// Provides identity and a health check surfaced by the gateway's `/health`.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Performs a health check and returns the adapter's current status.
    ///
    /// Implementations report configuration state only; they do not call out.
    async fn health_check(&self) -> Result<HealthStatus, BreakdeskError>;
}
