// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decode an uploaded photo and re-encode it as an opaque JPEG.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use breakdesk_core::BreakdeskError;
use image::{DynamicImage, ImageFormat};

/// Decode `raw` (format sniffed from content) and re-encode as JPEG.
///
/// Images with an alpha channel are flattened to RGB by dropping alpha.
/// Anything else the JPEG encoder cannot take (16-bit, float) is narrowed to RGB8.
pub fn prepare_jpeg(raw: &[u8]) -> Result<Vec<u8>, BreakdeskError> {
    let decoded = image::load_from_memory(raw).map_err(|e| BreakdeskError::ImageHost {
        message: format!("could not decode image: {e}"),
        source: Some(Box::new(e)),
    })?;

    let opaque = match decoded {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => decoded,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    };

    let mut buf = Cursor::new(Vec::new());
    opaque
        .write_to(&mut buf, ImageFormat::Jpeg)
        .map_err(|e| BreakdeskError::ImageHost {
            message: format!("could not encode JPEG: {e}"),
            source: Some(Box::new(e)),
        })?;
    Ok(buf.into_inner())
}

/// Standard base64 (with padding), as the image host expects.
pub fn to_base64(jpeg: &[u8]) -> String {
    STANDARD.encode(jpeg)
}
