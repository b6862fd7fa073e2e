// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a dialogue driver and report service backed by
//! mock adapters and a CSV log in a temp directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use breakdesk_agent::{DialogueDriver, Session, SYSTEM_INSTRUCTION};
use breakdesk_core::{BreakdeskError, CompletionProvider, ImageHost, ReportNotifier};
use breakdesk_report::{ReportLog, ReportService};

use crate::capture_notifier::CaptureNotifier;
use crate::mock_image_host::MockImageHost;
use crate::mock_provider::MockProvider;

/// URL the default mock image host hands out.
pub const TEST_PHOTO_URL: &str = "https://i.ibb.co/test/photo.jpg";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    system_prompt: Option<String>,
    image_host: bool,
    notifier: Option<CaptureNotifier>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            responses: Vec::new(),
            system_prompt: None,
            image_host: true,
            notifier: None,
        }
    }

    /// Set mock provider replies.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Set a custom system instruction.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Run without an image host, as when no image-host key is configured.
    pub fn without_image_host(mut self) -> Self {
        self.image_host = false;
        self
    }

    /// Attach a webhook stand-in.
    pub fn with_notifier(mut self, notifier: CaptureNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(self) -> Result<TestHarness, BreakdeskError> {
        let temp_dir = tempfile::TempDir::new().map_err(|e| BreakdeskError::ReportLog {
            source: Box::new(e),
        })?;
        let log_path = temp_dir.path().join("reports.csv");

        let provider = Arc::new(MockProvider::with_responses(self.responses));
        let driver = DialogueDriver::new(
            Arc::clone(&provider) as Arc<dyn CompletionProvider>,
            "mock-model",
            self.system_prompt
                .unwrap_or_else(|| SYSTEM_INSTRUCTION.to_string()),
        );

        let image_host = self
            .image_host
            .then(|| Arc::new(MockImageHost::with_url(TEST_PHOTO_URL)));
        let notifier = self.notifier.map(Arc::new);

        let reports = ReportService::new(
            ReportLog::new(&log_path),
            notifier
                .clone()
                .map(|n| n as Arc<dyn ReportNotifier>),
        );

        Ok(TestHarness {
            driver: Arc::new(driver),
            reports: Arc::new(reports),
            provider,
            image_host,
            notifier,
            log_path,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete dialogue + report stack for integration tests.
pub struct TestHarness {
    pub driver: Arc<DialogueDriver>,
    pub reports: Arc<ReportService>,
    pub provider: Arc<MockProvider>,
    pub image_host: Option<Arc<MockImageHost>>,
    pub notifier: Option<Arc<CaptureNotifier>>,
    log_path: PathBuf,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// The image host as the trait object the gateway holds.
    pub fn image_host_dyn(&self) -> Option<Arc<dyn ImageHost>> {
        self.image_host
            .clone()
            .map(|h| h as Arc<dyn ImageHost>)
    }

    /// A new session with the email gate already passed.
    pub fn session(&self, email: &str) -> Result<Session, BreakdeskError> {
        let mut session = self.driver.new_session();
        session.set_submitter_email(email)?;
        Ok(session)
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Every data row in the CSV log, header excluded. Empty if no log yet.
    pub fn log_records(&self) -> Result<Vec<csv::StringRecord>, csv::Error> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }
        csv::Reader::from_path(&self.log_path)?.records().collect()
    }
}
