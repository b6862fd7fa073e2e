// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field extraction from the assistant's closing summary.
//!
//! The summary is expected to hold `Label: value` lines. This is a fixed-format
//! scan, not a natural-language parser: it never fails, and anything it cannot
//! find comes back as empty text.

use std::collections::HashMap;

use breakdesk_core::types::ReportFields;

/// Separator between label and value. Only the first occurrence on a line counts.
const SEPARATOR: &str = ": ";

/// Parse every `Label: value` line into a normalized key map.
///
/// Keys are trimmed, lowercased, and have spaces replaced by underscores.
/// Later duplicates overwrite earlier ones. Unrecognized labels are kept.
pub fn parse_summary(summary: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    for line in summary.lines() {
        if let Some((label, value)) = line.split_once(SEPARATOR) {
            fields.insert(normalize_label(label), value.trim().to_string());
        }
    }
    fields
}

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "_")
}

/// Map the recognized labels onto [`ReportFields`].
///
/// `photo_override` is the URL from a successful image upload; when present it
/// replaces whatever photo URL the model wrote into the summary.
pub fn extract_fields(summary: &str, photo_override: Option<&str>) -> ReportFields {
    let mut raw = parse_summary(summary);
    let mut take = |key: &str| raw.remove(key).unwrap_or_default();

    let equipment_type = take("equipment_type");
    let equipment_id = take("equipment_id");
    let problem_description = take("problem");
    let incident_date = take("date");
    let parsed_photo = take("photo_url");

    ReportFields {
        equipment_type,
        equipment_id,
        problem_description,
        incident_date,
        photo_url: photo_override.map(str::to_string).unwrap_or(parsed_photo),
    }
}

/// Human-readable summary built from the extracted fields, independent of the raw model text.
pub fn chat_summary(fields: &ReportFields) -> String {
    let photo = if fields.photo_url.is_empty() {
        "(none)"
    } else {
        fields.photo_url.as_str()
    };
    format!(
        "Equipment: {} ({})\nProblem: {}\nDate: {}\nPhoto: {}",
        fields.equipment_type,
        fields.equipment_id,
        fields.problem_description,
        fields.incident_date,
        photo
    )
}
