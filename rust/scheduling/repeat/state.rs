use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(feature = "python")]
use pyo3::pyclass;

use crate::error::RepeatError;
use crate::scheduling::{DateRoll, ExecutionPolicy, Frequency, Scheduling};

/// The number of occurrences left in a series, including the one currently due.
#[derive(Debug, Hash, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Count {
    /// A known number of occurrences, always at least 1.
    Finite(u64),
    /// The series never ends.
    Infinite,
}

/// The decoded repeat parameters of a schedule.
///
/// Construct through [RepeatState::decode](crate::scheduling::RepeatState::decode) or the
/// validating constructors. Fields are public for inspection; a hand-built value that breaks
/// the invariants listed on [RepeatState::validate] is rejected when it is encoded or unrolled.
#[cfg_attr(feature = "python", pyclass(module = "repeatlib.rs", eq, frozen))]
#[derive(Debug, Hash, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatState {
    pub policy: ExecutionPolicy,
    pub frequency: Frequency,
    pub remaining: Count,
    /// The number of days or months of an interval-parameterized frequency, `None` otherwise.
    pub interval: Option<u64>,
}

impl RepeatState {
    /// Create a validated state.
    pub fn try_new(
        policy: ExecutionPolicy,
        frequency: Frequency,
        remaining: Count,
        interval: Option<u64>,
    ) -> Result<Self, RepeatError> {
        let state = RepeatState {
            policy,
            frequency,
            remaining,
            interval,
        };
        state.validate()?;
        Ok(state)
    }

    /// A single, non-repeating occurrence.
    pub fn once(policy: ExecutionPolicy) -> Self {
        RepeatState {
            policy,
            frequency: Frequency::Once,
            remaining: Count::Finite(1),
            interval: None,
        }
    }

    /// A fixed-period frequency with a given number of occurrences, or an infinite series.
    pub fn repeating(
        policy: ExecutionPolicy,
        frequency: Frequency,
        remaining: Count,
    ) -> Result<Self, RepeatError> {
        RepeatState::try_new(policy, frequency, remaining, None)
    }

    /// `InNDays` or `InNMonths`: the anchor occurrence and one more `n` periods later.
    pub fn in_n(
        policy: ExecutionPolicy,
        frequency: Frequency,
        n: u64,
    ) -> Result<Self, RepeatError> {
        RepeatState::try_new(policy, frequency, Count::Finite(2), Some(n))
    }

    /// `EveryNDays` or `EveryNMonths`: an infinite series every `n` periods.
    pub fn every_n(
        policy: ExecutionPolicy,
        frequency: Frequency,
        n: u64,
    ) -> Result<Self, RepeatError> {
        RepeatState::try_new(policy, frequency, Count::Infinite, Some(n))
    }

    /// Check the invariants tying `remaining` and `interval` to `frequency`.
    ///
    /// - `Once` has exactly one occurrence left and no interval.
    /// - `InNDays` and `InNMonths` carry a positive interval and a count of 2: the occurrence
    ///   now due and the single one after it.
    /// - `EveryNDays` and `EveryNMonths` carry a positive interval and are infinite.
    /// - Every other frequency has no interval and a count of at least 1, or is infinite.
    pub fn validate(&self) -> Result<(), RepeatError> {
        let f = self.frequency;
        let err = |msg: &str| Err(RepeatError::InvalidState(format!("{f:?} {msg}")));
        if f.is_interval() {
            if !matches!(self.interval, Some(n) if n > 0) {
                return err("requires a positive interval");
            }
        } else if self.interval.is_some() {
            return err("does not take an interval");
        }
        match (f, self.remaining) {
            (Frequency::Once, Count::Finite(1)) => Ok(()),
            (Frequency::Once, _) => err("must have exactly one occurrence remaining"),
            (_, Count::Finite(2)) if f.is_in_n() => Ok(()),
            (_, _) if f.is_in_n() => err("must have a count of 2"),
            (_, Count::Infinite) if f.is_every_n() => Ok(()),
            (_, _) if f.is_every_n() => err("must be infinite"),
            (_, Count::Finite(0)) => err("cannot have zero occurrences remaining"),
            (_, _) => Ok(()),
        }
    }

    /// Whether the occurrence now due is the last of the series.
    pub fn is_last(&self) -> bool {
        self.remaining == Count::Finite(1)
    }

    /// Whether the series ends.
    pub fn is_finite(&self) -> bool {
        matches!(self.remaining, Count::Finite(_))
    }

    /// Consume one occurrence and return the state for the next one.
    ///
    /// Returns `None` when the occurrence consumed was the last and the schedule should be
    /// retired. Infinite series are returned unchanged.
    ///
    /// An interval-parameterized series whose count drops to 1 becomes `Once`. This means an
    /// `InNDays` schedule fires at its anchor, once more `n` days later, and then never again,
    /// regardless of how the user described it.
    ///
    /// # Examples
    /// ```rust
    /// # use repeatlib::scheduling::{ExecutionPolicy, Frequency, RepeatState};
    /// let p = ExecutionPolicy::NoExecution;
    /// let state = RepeatState::in_n(p, Frequency::InNDays, 10).unwrap();
    /// let next = state.advance_count().unwrap();
    /// assert_eq!(Frequency::Once, next.frequency);
    /// assert_eq!(None, next.advance_count());
    /// ```
    pub fn advance_count(&self) -> Option<RepeatState> {
        match self.remaining {
            Count::Infinite => Some(*self),
            Count::Finite(n) => {
                let left = n.checked_sub(1).filter(|left| *left > 0)?;
                if self.interval.is_some() && left == 1 {
                    Some(RepeatState::once(self.policy))
                } else {
                    Some(RepeatState {
                        remaining: Count::Finite(left),
                        ..*self
                    })
                }
            }
        }
    }
}

impl Scheduling for RepeatState {
    fn try_step_with_calendar<T: DateRoll>(
        &self,
        udate: &NaiveDateTime,
        reverse: bool,
        calendar: &T,
    ) -> Result<NaiveDateTime, RepeatError> {
        self.frequency
            .try_step_with_calendar(udate, self.interval, reverse, calendar)
    }
}

/// Return the occurrence after `date` without consuming any occurrence.
pub fn next_occurrence(
    date: &NaiveDateTime,
    state: &RepeatState,
) -> Result<NaiveDateTime, RepeatError> {
    state.try_unext(date)
}

/// Return the occurrence before `date` without consuming any occurrence.
pub fn previous_occurrence(
    date: &NaiveDateTime,
    state: &RepeatState,
) -> Result<NaiveDateTime, RepeatError> {
    state.try_uprevious(date)
}

// UNIT TESTS
#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::ndt;

    #[test]
    fn test_validate_rejects_broken_invariants() {
        let p = ExecutionPolicy::NoExecution;
        let options: Vec<(Frequency, Count, Option<u64>)> = vec![
            (Frequency::Once, Count::Finite(2), None),
            (Frequency::Once, Count::Infinite, None),
            (Frequency::Once, Count::Finite(1), Some(3)),
            (Frequency::InNDays, Count::Finite(2), None),
            (Frequency::InNDays, Count::Finite(2), Some(0)),
            (Frequency::InNMonths, Count::Finite(5), Some(3)),
            (Frequency::EveryNDays, Count::Finite(5), Some(3)),
            (Frequency::EveryNMonths, Count::Infinite, None),
            (Frequency::Monthly, Count::Finite(0), None),
            (Frequency::Monthly, Count::Finite(3), Some(3)),
        ];
        for option in options {
            assert!(
                RepeatState::try_new(p, option.0, option.1, option.2).is_err(),
                "{:?}",
                option
            );
        }
    }

    #[test]
    fn test_validate_accepts() {
        let p = ExecutionPolicy::Silent;
        assert!(RepeatState::repeating(p, Frequency::Weekly, Count::Infinite).is_ok());
        assert!(RepeatState::repeating(p, Frequency::Weekly, Count::Finite(1)).is_ok());
        assert!(RepeatState::in_n(p, Frequency::InNMonths, 2).is_ok());
        assert!(RepeatState::every_n(p, Frequency::EveryNDays, 10).is_ok());
        assert!(RepeatState::once(p).validate().is_ok());
    }

    #[test]
    fn test_advance_count_finite() {
        let p = ExecutionPolicy::ManualAck;
        let state = RepeatState::repeating(p, Frequency::Monthly, Count::Finite(3)).unwrap();
        let state = state.advance_count().unwrap();
        assert_eq!(Count::Finite(2), state.remaining);
        assert_eq!(Frequency::Monthly, state.frequency);
        let state = state.advance_count().unwrap();
        assert_eq!(Count::Finite(1), state.remaining);
        assert!(state.is_last());
        assert_eq!(Frequency::Monthly, state.frequency);
        assert_eq!(None, state.advance_count());
    }

    #[test]
    fn test_advance_count_every_n_never_ends() {
        let state =
            RepeatState::every_n(ExecutionPolicy::NoExecution, Frequency::EveryNDays, 10).unwrap();
        let mut next = state;
        for _ in 0..1000 {
            next = next.advance_count().unwrap();
            assert_eq!(state, next);
        }
    }

    #[test]
    fn test_advance_count_in_n_becomes_once() {
        let state = RepeatState::in_n(ExecutionPolicy::Silent, Frequency::InNDays, 10).unwrap();
        let next = state.advance_count().unwrap();
        assert_eq!(Frequency::Once, next.frequency);
        assert_eq!(Count::Finite(1), next.remaining);
        assert_eq!(None, next.interval);
        assert_eq!(ExecutionPolicy::Silent, next.policy);
        assert!(next.validate().is_ok());
    }

    #[test]
    fn test_advance_count_once_retires() {
        assert_eq!(None, RepeatState::once(ExecutionPolicy::NoExecution).advance_count());
    }

    #[test]
    fn test_previous_and_next_occurrence() {
        let state =
            RepeatState::every_n(ExecutionPolicy::NoExecution, Frequency::EveryNMonths, 2).unwrap();
        assert_eq!(
            ndt(2024, 12, 28),
            previous_occurrence(&ndt(2025, 2, 28), &state).unwrap()
        );
        assert_eq!(
            ndt(2025, 4, 28),
            next_occurrence(&ndt(2025, 2, 28), &state).unwrap()
        );
    }
}
