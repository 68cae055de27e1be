use anyhow::{Context, Result};

use crate::domain::ReportRecord;

/// Whole-collection dump in the store's own format
pub fn to_json(records: &[ReportRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).context("Failed to serialize reports")
}

pub fn from_json(json: &str) -> Result<Vec<ReportRecord>> {
    serde_json::from_str(json).with_context(|| {
        format!(
            "Failed to parse report collection. First 200 chars: {}",
            json.chars().take(200).collect::<String>()
        )
    })
}
