//! docguard Gateway - Clearance-gated access to records
//!
//! Provides:
//! - Lazy, exactly-once construction of the record service
//! - Read-through record cache, invalidated on every edit
//! - Clearance checks on every read and write, cache hits included
//! - One audit entry per attempt plus one per denial
//!
//! ## Modules
//!
//! - [`gateway`] - The [`AccessGateway`] façade
//! - [`service`] - Pass-through [`RecordService`] over the record store port
//! - [`cache`] - Generation-checked record cache
//! - [`outcome`] - Business outcomes returned by the gateway

pub mod cache;
pub mod gateway;
pub mod outcome;
pub mod service;

pub use cache::RecordCache;
pub use gateway::AccessGateway;
pub use outcome::AccessOutcome;
pub use service::RecordService;

use thiserror::Error;

/// Collaborator failures surfaced by the gateway
///
/// "Not found" and "access denied" are not errors; they are reported through
/// [`AccessOutcome`].
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The record store returned an error
    #[error("Record store unavailable during {operation}: {message}")]
    StoreUnavailable {
        /// Store operation that failed (`fetch` or `update`)
        operation: &'static str,
        /// Adapter error, with its context chain
        message: String,
    },

    /// A store call did not finish before the configured deadline
    #[error("Record store {operation} timed out after {after_ms} ms")]
    Timeout {
        /// Store operation that timed out
        operation: &'static str,
        /// The deadline that elapsed
        after_ms: u64,
    },
}
