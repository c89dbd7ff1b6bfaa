//! AuditLog - append-only audit trail
//!
//! Entries are kept for the lifetime of the log, in insertion order, and are
//! never mutated or removed. Each append is mirrored to `tracing` under the
//! `docguard::audit` target.
//!
//! Concurrent requests write through an [`AuditBatch`]: the batch buffers a
//! request's entries and appends them in one critical section, so entries
//! from the same request are always adjacent in [`AuditLog::dump`].
//!
//! Order is commit order. Timestamps are assigned at commit under the same
//! lock as sequence numbers, so they never decrease along the log and
//! [`AuditLog::entries_since`] sees every entry committed after its cutoff.
//! A request still in flight is not visible until its batch commits.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use docguard_core::domain::{
    audit::{AuditAction, AuditEntry},
    newtypes::{PrincipalId, RecordId, RequestId},
};
use serde_json::json;

/// Append-only, insertion-ordered audit log
#[derive(Debug, Default)]
pub struct AuditLog {
    entries: Mutex<Vec<AuditEntry>>,
}

impl AuditLog {
    /// Creates an empty log
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AuditEntry>> {
        // Entries are only ever pushed, so a poisoned vector is still valid.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn append_all(&self, batch: impl IntoIterator<Item = AuditEntry>) -> u64 {
        let mut entries = self.lock();
        let now = Utc::now();
        let committed_at = match entries.last() {
            Some(last) if last.timestamp() > now => last.timestamp(),
            _ => now,
        };
        for entry in batch {
            let sequence = entries.len() as u64 + 1;
            let entry = entry.with_sequence(sequence).with_timestamp(committed_at);
            tracing::info!(
                target: "docguard::audit",
                sequence,
                request_id = ?entry.request_id().map(ToString::to_string),
                action = %entry.action(),
                "{}",
                entry.message()
            );
            entries.push(entry);
        }
        entries.len() as u64
    }

    /// Appends a single entry and returns its sequence number
    pub fn record(&self, entry: AuditEntry) -> u64 {
        self.append_all([entry])
    }

    /// Appends a free-form message
    pub fn record_message(&self, action: AuditAction, message: impl Into<String>) -> u64 {
        self.record(AuditEntry::new(action, message))
    }

    /// Opens a request-scoped batch
    pub fn begin(&self, request_id: RequestId) -> AuditBatch<'_> {
        AuditBatch {
            log: self,
            request_id,
            pending: Vec::new(),
        }
    }

    /// All entries in insertion order
    pub fn dump(&self) -> Vec<AuditEntry> {
        self.lock().clone()
    }

    /// Entries rendered as `[HH:MM:SS] message` lines
    pub fn render(&self) -> Vec<String> {
        self.lock().iter().map(ToString::to_string).collect()
    }

    /// Entries produced by one request, in order
    pub fn entries_for(&self, request_id: &RequestId) -> Vec<AuditEntry> {
        self.lock()
            .iter()
            .filter(|e| e.request_id() == Some(request_id))
            .cloned()
            .collect()
    }

    /// Entries created at or after `since`, in order
    pub fn entries_since(&self, since: DateTime<Utc>) -> Vec<AuditEntry> {
        self.lock()
            .iter()
            .filter(|e| e.timestamp() >= since)
            .cloned()
            .collect()
    }

    /// Number of entries recorded
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// JSON view of the whole log, used by the CLI's `--json` output
    pub fn to_json(&self) -> serde_json::Value {
        let entries = self.lock();
        let items: Vec<serde_json::Value> = entries
            .iter()
            .map(|entry| {
                json!({
                    "sequence": entry.sequence(),
                    "timestamp": entry.timestamp().to_rfc3339(),
                    "request_id": entry.request_id().map(ToString::to_string),
                    "action": entry.action().to_string(),
                    "principal": entry.principal().map(ToString::to_string),
                    "record_id": entry.record_id().map(ToString::to_string),
                    "message": entry.message(),
                })
            })
            .collect();
        json!({
            "count": items.len(),
            "entries": items,
        })
    }
}

/// Entries belonging to one in-flight request
///
/// The batch is committed when [`AuditBatch::commit`] is called or when it is
/// dropped, whichever comes first. A request future cancelled mid-way still
/// leaves its attempt entry in the log.
#[derive(Debug)]
pub struct AuditBatch<'a> {
    log: &'a AuditLog,
    request_id: RequestId,
    pending: Vec<AuditEntry>,
}

impl AuditBatch<'_> {
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Buffers an entry, tagging it with this batch's request id
    pub fn push(&mut self, entry: AuditEntry) {
        self.pending.push(entry.with_request_id(self.request_id));
    }

    pub fn view_attempt(&mut self, principal: &PrincipalId, record_id: &RecordId) {
        self.push(AuditEntry::view_attempt(principal, record_id));
    }

    pub fn edit_attempt(&mut self, principal: &PrincipalId, record_id: &RecordId) {
        self.push(AuditEntry::edit_attempt(principal, record_id));
    }

    pub fn access_denied(&mut self, principal: &PrincipalId, record_id: &RecordId) {
        self.push(AuditEntry::access_denied(principal, record_id));
    }

    /// Number of buffered entries not yet written
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Writes the buffered entries to the log
    pub fn commit(self) {
        // Drop does the work.
    }
}

impl Drop for AuditBatch<'_> {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            self.log.append_all(std::mem::take(&mut self.pending));
        }
    }
}
