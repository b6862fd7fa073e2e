// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Photo ingestion: re-encode an upload as JPEG and publish it to ImgBB.
//!
//! [`ImgbbHost`] implements [`ImageHost`]. Decoding and encoding run on the
//! blocking pool; the upload is a single form POST with no retry.

pub mod client;
pub mod encode;

use async_trait::async_trait;
use breakdesk_config::BreakdeskConfig;
use breakdesk_core::error::BreakdeskError;
use breakdesk_core::traits::{ImageHost, PluginAdapter};
use breakdesk_core::types::HealthStatus;
use secrecy::SecretString;
use tracing::{debug, info};

use crate::client::ImgbbClient;

/// ImgBB-backed [`ImageHost`].
pub struct ImgbbHost {
    client: ImgbbClient,
}

impl ImgbbHost {
    pub fn new(config: &BreakdeskConfig, api_key: SecretString) -> Self {
        let client = ImgbbClient::new(api_key).with_upload_url(config.imgbb.upload_url.clone());
        info!(endpoint = %config.imgbb.upload_url, "image host initialized");
        Self { client }
    }

    pub fn with_client(client: ImgbbClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PluginAdapter for ImgbbHost {
    fn name(&self) -> &str {
        "imgbb"
    }

    async fn health_check(&self) -> Result<HealthStatus, BreakdeskError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ImageHost for ImgbbHost {
    async fn upload(&self, image: Vec<u8>) -> Result<String, BreakdeskError> {
        let original_len = image.len();
        let jpeg = tokio::task::spawn_blocking(move || encode::prepare_jpeg(&image))
            .await
            .map_err(|e| BreakdeskError::Internal(format!("image encode task failed: {e}")))??;
        debug!(original_len, jpeg_len = jpeg.len(), "photo re-encoded");

        self.client.upload_base64(&encode::to_base64(&jpeg)).await
    }
}
