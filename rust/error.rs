//! The error type shared by every fallible operation in the crate.

use crate::scheduling::Frequency;

/// Errors raised when decoding, validating or stepping a recurring schedule.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepeatError {
    /// The frequency ordinal of a `repeats` code is not a known [Frequency].
    #[error("`repeats` code {repeats} does not hold a valid frequency ordinal")]
    FrequencyOutOfRange { repeats: i64 },
    /// The policy ordinal of a `repeats` code is not a known execution policy.
    #[error("`repeats` code {repeats} does not hold a valid execution policy ordinal")]
    PolicyOutOfRange { repeats: i64 },
    /// An interval-parameterized frequency was stored with an interval that is not positive.
    #[error("{frequency:?} requires a positive interval, got {value}")]
    InvalidInterval { frequency: Frequency, value: i64 },
    /// A counted frequency was stored with an occurrence count that is neither >= 1 nor -1.
    #[error("{frequency:?} requires a count >= 1 or -1 (infinite), got {value}")]
    InvalidCount { frequency: Frequency, value: i64 },
    /// A [RepeatState](crate::scheduling::RepeatState) breaks one of its invariants.
    #[error("inconsistent repeat state: {0}")]
    InvalidState(String),
    /// An interval-parameterized frequency was stepped without an interval.
    #[error("{0:?} cannot be stepped without an interval")]
    MissingInterval(Frequency),
    /// A name could not be matched to any [Frequency].
    #[error("`{0}` is not a recognised frequency name")]
    UnknownFrequency(String),
    /// A business day calendar was constructed from invalid parts.
    #[error("invalid calendar: {0}")]
    InvalidCalendar(String),
    /// An infinite or very long series was unrolled with neither an end date nor a limit.
    #[error("an infinite or very long series requires an `end_date` or a `limit` to be unrolled")]
    UnboundedUnroll,
    /// A date string could not be parsed as an ISO-8601 date or datetime.
    #[error("`{0}` is not an ISO-8601 date or datetime")]
    DateParse(String),
    /// Date arithmetic left the range representable by `chrono`.
    #[error("date arithmetic overflowed the supported calendar range")]
    DateOutOfRange,
}

#[cfg(feature = "python")]
impl From<RepeatError> for pyo3::PyErr {
    fn from(err: RepeatError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
