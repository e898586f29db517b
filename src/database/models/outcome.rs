use serde::Serialize;

use super::macros::string_enum;

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum GuardReason {
        InvalidState => "invalid_state",
        AlreadySigned => "already_signed",
        AlreadyPaid => "already_paid",
        NotPaid => "not_paid",
        NotSigned => "not_signed",
        EmployeeMismatch => "employee_mismatch",
        AlreadyLocked => "already_locked",
    }
}

/// Result of a guarded action. A rejected guard is not an error: the record
/// comes back untouched with `applied == false` and the reason it was refused.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionOutcome<T> {
    pub applied: bool,
    pub reason: Option<GuardReason>,
    pub record: T,
}

impl<T> TransitionOutcome<T> {
    pub fn applied(record: T) -> Self {
        Self {
            applied: true,
            reason: None,
            record,
        }
    }

    pub fn unchanged(record: T, reason: GuardReason) -> Self {
        Self {
            applied: false,
            reason: Some(reason),
            record,
        }
    }
}
