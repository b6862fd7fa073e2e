// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook notifier: one JSON POST of the full report, no retry.
//!
//! Only a failed delivery is an error. The endpoint's reply carries no
//! contract, so a non-success status is logged and otherwise ignored.

use async_trait::async_trait;
use breakdesk_core::error::BreakdeskError;
use breakdesk_core::traits::{PluginAdapter, ReportNotifier};
use breakdesk_core::types::{HealthStatus, Report};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

/// Posts each report as JSON to a configured URL.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: SecretString,
}

impl WebhookNotifier {
    /// The URL is validated here so a typo fails at startup rather than on first submit.
    pub fn new(url: SecretString) -> Result<Self, BreakdeskError> {
        reqwest::Url::parse(url.expose_secret())
            .map_err(|e| BreakdeskError::Config(format!("invalid webhook URL: {e}")))?;
        Ok(Self {
            client: reqwest::Client::new(),
            url,
        })
    }
}

#[async_trait]
impl PluginAdapter for WebhookNotifier {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn health_check(&self) -> Result<HealthStatus, BreakdeskError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ReportNotifier for WebhookNotifier {
    async fn notify(&self, report: &Report) -> Result<(), BreakdeskError> {
        let response = self
            .client
            .post(self.url.expose_secret())
            .json(report)
            .send()
            .await
            .map_err(|e| BreakdeskError::Webhook {
                // reqwest errors embed the URL, which is a secret.
                message: format!("delivery failed: {}", e.without_url()),
                source: None,
            })?;

        let status = response.status();
        if status.is_success() {
            debug!(report_id = %report.report_id, status = %status, "webhook responded");
        } else {
            warn!(
                report_id = %report.report_id,
                status = %status,
                "webhook endpoint returned non-success status"
            );
        }
        Ok(())
    }
}
