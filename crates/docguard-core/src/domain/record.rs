//! Record domain entity
//!
//! A record is a titled piece of content guarded by a required clearance.
//! The store owns the canonical copy; everything else holds clones.

use serde::Serialize;

use super::{clearance::ClearanceLevel, errors::DomainError, newtypes::RecordId};

/// A sensitive record held by the record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Unique identifier within the store
    id: RecordId,
    /// Human-readable title
    title: String,
    /// Current content
    content: String,
    /// Minimum clearance needed to view or edit
    required_clearance: ClearanceLevel,
}

impl Record {
    /// Creates a new Record
    ///
    /// # Errors
    /// Returns `DomainError::EmptyTitle` if `title` is blank. Content may be empty.
    pub fn new(
        id: RecordId,
        title: impl Into<String>,
        content: impl Into<String>,
        required_clearance: ClearanceLevel,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::EmptyTitle);
        }
        Ok(Self {
            id,
            title,
            content: content.into(),
            required_clearance,
        })
    }

    // --- Getters ---

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn required_clearance(&self) -> ClearanceLevel {
        self.required_clearance
    }

    /// Size of the content in bytes, measured as UTF-8
    ///
    /// Not the UTF-16 width (two bytes per code unit) some runtimes report,
    /// so non-ASCII content sizes differ from such tools.
    pub fn size_bytes(&self) -> u64 {
        self.content.len() as u64
    }

    /// Replaces the content, keeping identity, title and clearance
    pub fn update_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}
