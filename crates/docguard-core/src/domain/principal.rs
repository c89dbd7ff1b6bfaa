//! Principal domain entity
//!
//! The caller on whose behalf a gateway request is made.

use serde::{Deserialize, Serialize};

use super::{
    clearance::ClearanceLevel, errors::DomainError, newtypes::PrincipalId, record::Record,
};

/// An authenticated caller with a fixed clearance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: PrincipalId,
    clearance: ClearanceLevel,
}

impl Principal {
    /// Creates a new Principal
    ///
    /// # Errors
    /// Returns error if `identifier` is not a valid [`PrincipalId`]
    pub fn new(identifier: impl Into<String>, clearance: ClearanceLevel) -> Result<Self, DomainError> {
        Ok(Self {
            id: PrincipalId::new(identifier)?,
            clearance,
        })
    }

    pub fn id(&self) -> &PrincipalId {
        &self.id
    }

    pub fn clearance(&self) -> ClearanceLevel {
        self.clearance
    }

    /// Returns true if this principal's clearance covers the record's requirement
    pub fn is_authorized_for(&self, record: &Record) -> bool {
        self.clearance.dominates(record.required_clearance())
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
