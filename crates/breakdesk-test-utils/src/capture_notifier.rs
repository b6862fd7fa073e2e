// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report notifier that captures deliveries instead of posting them.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use breakdesk_core::{BreakdeskError, HealthStatus, PluginAdapter, Report, ReportNotifier};

/// Records every notified report. Optionally fails every delivery.
pub struct CaptureNotifier {
    delivered: Arc<Mutex<Vec<Report>>>,
    fail_with: Option<String>,
}

impl CaptureNotifier {
    pub fn new() -> Self {
        Self {
            delivered: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    /// A notifier whose deliveries always fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            delivered: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(message.into()),
        }
    }

    pub async fn delivered(&self) -> Vec<Report> {
        self.delivered.lock().await.clone()
    }
}

impl Default for CaptureNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for CaptureNotifier {
    fn name(&self) -> &str {
        "capture-notifier"
    }

    async fn health_check(&self) -> Result<HealthStatus, BreakdeskError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ReportNotifier for CaptureNotifier {
    async fn notify(&self, report: &Report) -> Result<(), BreakdeskError> {
        if let Some(message) = &self.fail_with {
            return Err(BreakdeskError::Webhook {
                message: message.clone(),
                source: None,
            });
        }
        self.delivered.lock().await.push(report.clone());
        Ok(())
    }
}
