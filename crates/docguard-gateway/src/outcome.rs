//! Business outcomes of gateway requests

use serde::Serialize;

/// Terminal state of a `view` or `edit` request
///
/// `Denied` and `NotFound` are expected results, reported as values so the
/// caller decides how to present them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "value")]
pub enum AccessOutcome<T> {
    /// The principal was authorized; carries the result
    Granted(T),
    /// The principal's clearance is below the record's requirement
    Denied,
    /// No record with the requested id exists
    NotFound,
}

impl<T> AccessOutcome<T> {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessOutcome::Granted(_))
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, AccessOutcome::Denied)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AccessOutcome::NotFound)
    }

    /// The granted value, if any
    pub fn granted(self) -> Option<T> {
        match self {
            AccessOutcome::Granted(value) => Some(value),
            AccessOutcome::Denied | AccessOutcome::NotFound => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessOutcome::Granted(_) => "granted",
            AccessOutcome::Denied => "denied",
            AccessOutcome::NotFound => "not_found",
        }
    }
}

impl<T> std::fmt::Display for AccessOutcome<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
