// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report extraction and persistence.
//!
//! [`ReportService::submit`] turns the assistant's closing summary into a
//! [`Report`], appends it to the CSV log, then notifies the webhook. The log is
//! the durable record; a webhook failure is returned alongside the report and
//! never undoes the log write.

pub mod extractor;
pub mod log;
pub mod webhook;

use std::sync::Arc;

use breakdesk_core::{BreakdeskError, Report, ReportNotifier};
use tracing::{info, warn};

pub use extractor::{chat_summary, extract_fields, parse_summary};
pub use log::ReportLog;
pub use webhook::WebhookNotifier;

/// Result of one confirmed submission.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub report: Report,
    /// User-facing text when the webhook could not be notified.
    pub webhook_error: Option<String>,
}

/// Short identifier: the first 8 hex characters of a v4 UUID.
pub fn new_report_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

/// Current UTC time, second precision, trailing `Z`.
pub fn utc_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Build a fresh report from summary text. A new id and timestamp every call.
pub fn build_report(summary: &str, submitted_by: &str, photo_override: Option<&str>) -> Report {
    let fields = extract_fields(summary, photo_override);
    let missing = fields.missing();
    if !missing.is_empty() {
        warn!(?missing, "summary did not contain every report field");
    }
    Report {
        report_id: new_report_id(),
        timestamp: utc_timestamp(),
        chat_summary: chat_summary(&fields),
        fields,
        submitted_by: submitted_by.to_string(),
    }
}

/// Persists reports and forwards them downstream.
pub struct ReportService {
    log: ReportLog,
    notifier: Option<Arc<dyn ReportNotifier>>,
}

impl ReportService {
    /// `notifier = None` disables webhook delivery.
    pub fn new(log: ReportLog, notifier: Option<Arc<dyn ReportNotifier>>) -> Self {
        Self { log, notifier }
    }

    pub fn log(&self) -> &ReportLog {
        &self.log
    }

    pub fn notifier(&self) -> Option<&Arc<dyn ReportNotifier>> {
        self.notifier.as_ref()
    }

    /// Build, log, and notify exactly one report.
    ///
    /// No deduplication: two calls with the same summary yield two reports.
    pub async fn submit(
        &self,
        summary: &str,
        submitted_by: &str,
        photo_override: Option<&str>,
    ) -> Result<SubmissionOutcome, BreakdeskError> {
        let report = build_report(summary, submitted_by, photo_override);
        self.log.append(&report).await?;
        info!(
            report_id = %report.report_id,
            equipment_id = %report.fields.equipment_id,
            "report saved"
        );

        let webhook_error = match &self.notifier {
            Some(notifier) => match notifier.notify(&report).await {
                Ok(()) => None,
                Err(e) => {
                    warn!(report_id = %report.report_id, error = %e, "webhook notification failed");
                    Some(format!("Failed to send to webhook: {e}"))
                }
            },
            None => None,
        };

        Ok(SubmissionOutcome {
            report,
            webhook_error,
        })
    }
}
