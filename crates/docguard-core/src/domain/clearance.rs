//! Clearance levels
//!
//! A totally ordered ranking. A principal may access a record when its
//! clearance is greater than or equal to the record's required clearance.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Ordinal clearance rank, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearanceLevel {
    /// Anyone may read
    Public,
    /// Staff only
    Internal,
    /// Need-to-know within the organisation
    Confidential,
    /// Named individuals only
    Restricted,
    /// Highest rank
    TopSecret,
}

impl ClearanceLevel {
    /// Every level in ascending order
    pub const ALL: [ClearanceLevel; 5] = [
        ClearanceLevel::Public,
        ClearanceLevel::Internal,
        ClearanceLevel::Confidential,
        ClearanceLevel::Restricted,
        ClearanceLevel::TopSecret,
    ];

    /// Returns true if this level is at least `required`
    #[must_use]
    pub fn dominates(self, required: ClearanceLevel) -> bool {
        self >= required
    }

    /// snake_case name, the same string used by serde and `Display`
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ClearanceLevel::Public => "public",
            ClearanceLevel::Internal => "internal",
            ClearanceLevel::Confidential => "confidential",
            ClearanceLevel::Restricted => "restricted",
            ClearanceLevel::TopSecret => "top_secret",
        }
    }
}

impl fmt::Display for ClearanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClearanceLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(ClearanceLevel::Public),
            "internal" => Ok(ClearanceLevel::Internal),
            "confidential" => Ok(ClearanceLevel::Confidential),
            "restricted" => Ok(ClearanceLevel::Restricted),
            "top_secret" | "top-secret" | "topsecret" => Ok(ClearanceLevel::TopSecret),
            _ => Err(DomainError::UnknownClearance(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_totally_ordered() {
        for pair in ClearanceLevel::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} should rank below {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_dominates_is_greater_or_equal() {
        assert!(ClearanceLevel::TopSecret.dominates(ClearanceLevel::Confidential));
        assert!(ClearanceLevel::Confidential.dominates(ClearanceLevel::Confidential));
        assert!(!ClearanceLevel::Internal.dominates(ClearanceLevel::Confidential));
        assert!(!ClearanceLevel::Public.dominates(ClearanceLevel::TopSecret));
    }

    #[test]
    fn test_display_and_parse() {
        for level in ClearanceLevel::ALL {
            let parsed: ClearanceLevel = level.to_string().parse().unwrap();
            assert_eq!(parsed, level);
        }
        assert_eq!(
            "TopSecret".parse::<ClearanceLevel>().unwrap(),
            ClearanceLevel::TopSecret
        );
        assert_eq!(
            "top-secret".parse::<ClearanceLevel>().unwrap(),
            ClearanceLevel::TopSecret
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "cosmic".parse::<ClearanceLevel>(),
            Err(DomainError::UnknownClearance("cosmic".to_string()))
        );
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&ClearanceLevel::TopSecret).unwrap();
        assert_eq!(json, "\"top_secret\"");

        let level: ClearanceLevel = serde_json::from_str("\"restricted\"").unwrap();
        assert_eq!(level, ClearanceLevel::Restricted);
    }
}
