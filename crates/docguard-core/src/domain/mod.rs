//! Domain entities and business logic
//!
//! This module contains the core domain types for docguard:
//! - Newtypes for validated identifiers
//! - Clearance levels and the authorization predicate
//! - Principals and records
//! - Audit entries
//! - Domain-specific error types

pub mod audit;
pub mod clearance;
pub mod errors;
pub mod newtypes;
pub mod principal;
pub mod record;

// Re-export commonly used types
pub use audit::{AuditAction, AuditEntry};
pub use clearance::ClearanceLevel;
pub use errors::DomainError;
pub use newtypes::*;
pub use principal::Principal;
pub use record::Record;
