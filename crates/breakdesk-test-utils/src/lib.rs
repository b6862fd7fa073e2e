// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Breakdesk integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockProvider`] - Mock completion provider with queued replies
//! - [`MockImageHost`] - Mock image host returning a fixed URL
//! - [`CaptureNotifier`] - Webhook stand-in that captures reports

pub mod capture_notifier;
pub mod harness;
pub mod mock_image_host;
pub mod mock_provider;

pub use capture_notifier::CaptureNotifier;
pub use harness::{TestHarness, TEST_PHOTO_URL};
pub use mock_image_host::MockImageHost;
pub use mock_provider::MockProvider;
