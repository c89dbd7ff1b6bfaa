//! docguard Audit - Append-only audit trail
//!
//! Provides:
//! - `AuditLog`: process-lifetime, insertion-ordered log of audit entries
//! - `AuditBatch`: request-scoped buffer that commits its entries contiguously

pub mod logger;

pub use logger::{AuditBatch, AuditLog};
