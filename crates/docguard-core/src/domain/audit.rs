//! Audit entry domain entities
//!
//! This module defines the audit types recorded for every gateway request.
//! Entries are append-only: once written to a log they are never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::newtypes::{PrincipalId, RecordId, RequestId};

/// Actions that can be recorded in the audit log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A principal asked to view a record
    ViewAttempt,
    /// A principal asked to edit a record
    EditAttempt,
    /// A request was refused for insufficient clearance
    AccessDenied,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AuditAction::ViewAttempt => "view_attempt",
            AuditAction::EditAttempt => "edit_attempt",
            AuditAction::AccessDenied => "access_denied",
        };
        write!(f, "{}", s)
    }
}

/// An audit log entry
///
/// The `message` is the human-readable line; the remaining fields carry the
/// same facts in structured form for filtering and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Position in the log (assigned on append)
    sequence: Option<u64>,
    /// When the entry was created, replaced by the commit time on append
    timestamp: DateTime<Utc>,
    /// The request that produced this entry
    request_id: Option<RequestId>,
    /// The type of event
    action: AuditAction,
    /// Who made the request
    principal: Option<PrincipalId>,
    /// Which record was targeted
    record_id: Option<RecordId>,
    /// Rendered message
    message: String,
}

impl AuditEntry {
    /// Creates a new audit entry with the required fields
    ///
    /// The `sequence` field is `None` until the entry is appended to a log.
    ///
    /// # Example
    ///
    /// ```
    /// use docguard_core::domain::audit::{AuditAction, AuditEntry};
    ///
    /// let entry = AuditEntry::new(AuditAction::ViewAttempt, "alice attempted to view DOC001");
    /// assert!(entry.sequence().is_none());
    /// ```
    pub fn new(action: AuditAction, message: impl Into<String>) -> Self {
        Self {
            sequence: None,
            timestamp: Utc::now(),
            request_id: None,
            action,
            principal: None,
            record_id: None,
            message: message.into(),
        }
    }

    /// `"<principal> attempted to view <record>"`
    pub fn view_attempt(principal: &PrincipalId, record_id: &RecordId) -> Self {
        Self::new(
            AuditAction::ViewAttempt,
            format!("{principal} attempted to view {record_id}"),
        )
        .with_principal(principal.clone())
        .with_record_id(record_id.clone())
    }

    /// `"<principal> attempted to edit <record>"`
    pub fn edit_attempt(principal: &PrincipalId, record_id: &RecordId) -> Self {
        Self::new(
            AuditAction::EditAttempt,
            format!("{principal} attempted to edit {record_id}"),
        )
        .with_principal(principal.clone())
        .with_record_id(record_id.clone())
    }

    /// `"ACCESS DENIED for <principal>"`
    pub fn access_denied(principal: &PrincipalId, record_id: &RecordId) -> Self {
        Self::new(
            AuditAction::AccessDenied,
            format!("ACCESS DENIED for {principal}"),
        )
        .with_principal(principal.clone())
        .with_record_id(record_id.clone())
    }

    pub fn sequence(&self) -> Option<u64> {
        self.sequence
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn action(&self) -> AuditAction {
        self.action
    }

    pub fn principal(&self) -> Option<&PrincipalId> {
        self.principal.as_ref()
    }

    pub fn record_id(&self) -> Option<&RecordId> {
        self.record_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Sets the sequence number (called by the log on append)
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = Some(sequence);
        self
    }

    /// Sets the timestamp (called by the log on append)
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_principal(mut self, principal: PrincipalId) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn with_record_id(mut self, record_id: RecordId) -> Self {
        self.record_id = Some(record_id);
        self
    }
}

impl std::fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}
