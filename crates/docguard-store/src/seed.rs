//! Seed data for the record store
//!
//! Either the built-in sample set or a YAML file of the form:
//!
//! ```yaml
//! - id: DOC001
//!   title: Q4 Financial Report
//!   content: Confidential content of the financial report...
//!   required_clearance: confidential
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use docguard_core::domain::{ClearanceLevel, Record, RecordId};

use crate::StoreError;

#[derive(Debug, Deserialize)]
struct SeedRecord {
    id: RecordId,
    title: String,
    #[serde(default)]
    content: String,
    required_clearance: ClearanceLevel,
}

/// The three sample records every fresh store starts with
pub fn default_records() -> Vec<Record> {
    let samples = [
        (
            "DOC001",
            "Q4 Financial Report",
            "Confidential content of the financial report...",
            ClearanceLevel::Confidential,
        ),
        (
            "DOC002",
            "Market Strategy 2025",
            "Highly confidential strategic plans...",
            ClearanceLevel::TopSecret,
        ),
        (
            "DOC003",
            "Employee Handbook",
            "Internal policies and procedures...",
            ClearanceLevel::Public,
        ),
    ];

    samples
        .into_iter()
        .filter_map(|(id, title, content, level)| {
            let id = RecordId::new(id).ok()?;
            Record::new(id, title, content, level).ok()
        })
        .collect()
}

/// Parse a YAML list of records
///
/// # Errors
///
/// Returns `StoreError::SeedMalformed` for invalid YAML,
/// `StoreError::InvalidRecord` for a record failing validation, and
/// `StoreError::DuplicateId` when two entries share an id.
pub fn parse_seed(yaml: &str) -> Result<Vec<Record>, StoreError> {
    let raw: Vec<SeedRecord> = serde_yaml::from_str(yaml)?;
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(raw.len());

    for entry in raw {
        if !seen.insert(entry.id.clone()) {
            return Err(StoreError::DuplicateId(entry.id.to_string()));
        }
        records.push(Record::new(
            entry.id,
            entry.title,
            entry.content,
            entry.required_clearance,
        )?);
    }

    Ok(records)
}

/// Read and parse a YAML seed file
///
/// # Errors
///
/// Returns `StoreError::SeedUnreadable` if the file cannot be read, and the
/// errors of [`parse_seed`] otherwise.
pub fn load_seed_file(path: &Path) -> Result<Vec<Record>, StoreError> {
    let content = std::fs::read_to_string(path).map_err(|source| StoreError::SeedUnreadable {
        path: path.display().to_string(),
        source,
    })?;
    let records = parse_seed(&content)?;
    tracing::debug!(path = %path.display(), count = records.len(), "Loaded seed file");
    Ok(records)
}
