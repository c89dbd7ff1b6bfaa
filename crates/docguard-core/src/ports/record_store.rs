//! Record store port (driven/secondary port)
//!
//! This module defines the interface to the authoritative record store.
//!
//! ## Design Notes
//!
//! - Returns `anyhow::Result`; the gateway maps any error to
//!   `GatewayError::StoreUnavailable`.
//! - A missing record is `Ok(None)`, never an error.
//! - `fetch` returns an owned copy. Mutating it does not touch the store.

use crate::domain::{newtypes::RecordId, Record};

/// Port trait for the authoritative record store
///
/// ## Implementation Notes
///
/// - Both operations may block for a while (network, disk or simulated latency).
/// - `update` on an unknown id is a no-op that returns `Ok(())`.
#[async_trait::async_trait]
pub trait IRecordStore: Send + Sync {
    /// Retrieves a copy of the record with the given id
    async fn fetch(&self, id: &RecordId) -> anyhow::Result<Option<Record>>;

    /// Replaces the content of the record with the given id
    async fn update(&self, id: &RecordId, content: &str) -> anyhow::Result<()>;
}
