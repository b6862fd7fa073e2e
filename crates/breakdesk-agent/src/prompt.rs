// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The fixed system instruction and the synthetic notices appended to the
//! transcript.

use breakdesk_config::model::AgentConfig;
use tracing::{info, warn};

/// Default instruction placed at transcript position 0.
///
/// The five summary labels must stay in sync with the field extractor.
pub const SYSTEM_INSTRUCTION: &str = r#"You are an assistant for mechanics working in the mining industry.
 Your job is to collect the following fields step-by-step:
- equipment type (e.g., Dump Truck, Excavator)
- equipment ID (e.g., 743)
- problem description
- incident date (can be "today" or a date)
- photo URL (will be provided by the system)

Ask only one question at a time. When all info is collected, summarize it in a clear list using this exact format:
Equipment Type: [type]
Equipment ID: [id]
Problem: [description]
Date: [date]
Photo URL: [url or "(none)"]

Then ask: "Would you like me to submit this report?"
"#;

/// System notice announcing a freshly hosted photo.
pub fn photo_notice(url: &str) -> String {
    format!("A photo has been uploaded. Please use this URL in your summary: {url}")
}

/// Resolves the system instruction: file, then inline text, then the default.
///
/// An unreadable or empty file falls through to the next source with a warning.
pub async fn load_system_instruction(config: &AgentConfig) -> String {
    if let Some(path) = config.system_prompt_file.as_deref() {
        match tokio::fs::read_to_string(path).await {
            Ok(content) if !content.trim().is_empty() => {
                info!(path, "loaded system instruction from file");
                return content.trim().to_string();
            }
            Ok(_) => warn!(path, "system instruction file is empty, falling back"),
            Err(e) => warn!(path, error = %e, "failed to read system instruction file, falling back"),
        }
    }

    if let Some(prompt) = config.system_prompt.as_deref()
        && !prompt.trim().is_empty()
    {
        return prompt.to_string();
    }

    SYSTEM_INSTRUCTION.to_string()
}
