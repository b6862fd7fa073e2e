// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the ImgBB upload API.

use breakdesk_core::BreakdeskError;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

/// Default upload endpoint.
pub const UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

/// Upload response body.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<UploadData>,
    #[serde(default)]
    pub error: Option<UploadError>,
}

#[derive(Debug, Deserialize)]
pub struct UploadData {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadError {
    #[serde(default)]
    pub message: String,
}

/// Form-POST client for the image host.
#[derive(Debug, Clone)]
pub struct ImgbbClient {
    client: reqwest::Client,
    upload_url: String,
    api_key: SecretString,
}

impl ImgbbClient {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url: UPLOAD_URL.to_string(),
            api_key,
        }
    }

    /// Overrides the upload endpoint.
    pub fn with_upload_url(mut self, url: impl Into<String>) -> Self {
        self.upload_url = url.into();
        self
    }

    /// Uploads a base64-encoded image and returns its public URL.
    pub async fn upload_base64(&self, image_b64: &str) -> Result<String, BreakdeskError> {
        let response = self
            .client
            .post(&self.upload_url)
            .form(&[("key", self.api_key.expose_secret()), ("image", image_b64)])
            .send()
            .await
            .map_err(|e| BreakdeskError::ImageHost {
                message: format!("upload request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, payload_len = image_b64.len(), "image host responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BreakdeskError::ImageHost {
                message: format!("image host returned {status}: {body}"),
                source: None,
            });
        }

        let parsed: UploadResponse = response.json().await.map_err(|e| BreakdeskError::ImageHost {
            message: format!("failed to parse image host response: {e}"),
            source: Some(Box::new(e)),
        })?;

        match parsed {
            UploadResponse {
                success: true,
                data: Some(data),
                ..
            } => Ok(data.url),
            UploadResponse { error, .. } => Err(BreakdeskError::ImageHost {
                message: match error {
                    Some(e) if !e.message.is_empty() => {
                        format!("image host rejected the upload: {}", e.message)
                    }
                    _ => "image host rejected the upload".to_string(),
                },
                source: None,
            }),
        }
    }
}
