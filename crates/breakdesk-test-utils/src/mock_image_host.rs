// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock image host that returns a fixed URL.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use breakdesk_core::{BreakdeskError, HealthStatus, ImageHost, PluginAdapter};

/// Hands back a preset URL for every upload and keeps the uploaded bytes.
pub struct MockImageHost {
    url: String,
    failure: Mutex<Option<String>>,
    uploads: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockImageHost {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            failure: Mutex::new(None),
            uploads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make the next upload fail with an image host error.
    pub async fn fail_next(&self, message: impl Into<String>) {
        *self.failure.lock().await = Some(message.into());
    }

    /// Bytes of every successful upload, in order.
    pub fn uploads(&self) -> Arc<Mutex<Vec<Vec<u8>>>> {
        Arc::clone(&self.uploads)
    }
}

#[async_trait]
impl PluginAdapter for MockImageHost {
    fn name(&self) -> &str {
        "mock-image-host"
    }

    async fn health_check(&self) -> Result<HealthStatus, BreakdeskError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ImageHost for MockImageHost {
    async fn upload(&self, image: Vec<u8>) -> Result<String, BreakdeskError> {
        if let Some(message) = self.failure.lock().await.take() {
            return Err(BreakdeskError::ImageHost {
                message,
                source: None,
            });
        }
        self.uploads.lock().await.push(image);
        Ok(self.url.clone())
    }
}
