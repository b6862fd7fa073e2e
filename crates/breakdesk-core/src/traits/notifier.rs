// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification trait for downstream automation.

use async_trait::async_trait;

use crate::error::BreakdeskError;
use crate::traits::adapter::PluginAdapter;
use crate::types::Report;

/// Adapter that forwards each new report to an external system.
#[async_trait]
pub trait ReportNotifier: PluginAdapter {
    /// Delivers the report once. No retry.
    async fn notify(&self, report: &Report) -> Result<(), BreakdeskError>;
}
