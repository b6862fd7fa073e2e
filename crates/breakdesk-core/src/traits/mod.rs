// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod image;
pub mod notifier;
pub mod provider;

pub use adapter::PluginAdapter;
pub use image::ImageHost;
pub use notifier::ReportNotifier;
pub use provider::CompletionProvider;
