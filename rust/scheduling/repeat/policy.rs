use serde::{Deserialize, Serialize};

#[cfg(feature = "python")]
use pyo3::pyclass;

/// How a due occurrence is executed.
///
/// The discriminant is the ordinal persisted in the hundreds of a `repeats` code.
#[cfg_attr(feature = "python", pyclass(module = "repeatlib.rs", eq, eq_int, hash, frozen))]
#[derive(Debug, Hash, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionPolicy {
    /// The occurrence is never executed automatically.
    NoExecution = 0,
    /// The user is asked to confirm the occurrence on its due date.
    ManualAck = 1,
    /// The occurrence is executed on its due date without interaction.
    Silent = 2,
}

impl ExecutionPolicy {
    /// Every variant, in ordinal order.
    pub const ALL: [ExecutionPolicy; 3] = [
        ExecutionPolicy::NoExecution,
        ExecutionPolicy::ManualAck,
        ExecutionPolicy::Silent,
    ];

    /// The persisted ordinal of the variant.
    pub fn ordinal(&self) -> i64 {
        *self as i64
    }

    /// Return the variant with the given ordinal, if one exists.
    pub fn from_ordinal(ordinal: i64) -> Option<ExecutionPolicy> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| ExecutionPolicy::ALL.get(i).copied())
    }

    /// Whether a due occurrence is executed without being entered by hand.
    pub fn is_automatic(&self) -> bool {
        !matches!(self, ExecutionPolicy::NoExecution)
    }

    /// Whether a due occurrence waits for the user to confirm it.
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, ExecutionPolicy::ManualAck)
    }
}
