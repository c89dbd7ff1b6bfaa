//! Domain error types
//!
//! Construction of identifiers, principals and records is validated up
//! front; these are the failures that validation can report.

use thiserror::Error;

/// Errors that can occur while building domain values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was empty or whitespace only
    #[error("{kind} must not be empty")]
    EmptyIdentifier {
        /// Which identifier was rejected (e.g. "record id")
        kind: &'static str,
    },

    /// An identifier carried leading or trailing whitespace
    #[error("Invalid {kind}: {value:?}")]
    InvalidIdentifier {
        /// Which identifier was rejected
        kind: &'static str,
        /// The offending input
        value: String,
    },

    /// A record title was empty
    #[error("Record title must not be empty")]
    EmptyTitle,

    /// A clearance level name could not be parsed
    #[error("Unknown clearance level: {0}")]
    UnknownClearance(String),
}
