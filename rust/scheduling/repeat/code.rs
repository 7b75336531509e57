//! The persisted two-integer form of a [RepeatState].
//!
//! `repeats` multiplexes the execution policy and the frequency as
//! `policy * REPEATS_BASE + frequency`. The meaning of `occurrences` depends on the decoded
//! frequency: the interval for `InNDays`, `InNMonths`, `EveryNDays` and `EveryNMonths`,
//! otherwise the remaining count with `-1` for an infinite series. It is ignored for `Once`.

use serde::{Deserialize, Serialize};

#[cfg(feature = "python")]
use pyo3::pyclass;

use crate::error::RepeatError;
use crate::scheduling::{Count, ExecutionPolicy, Frequency, RepeatState};

/// The multiplier separating the policy ordinal from the frequency ordinal.
pub const REPEATS_BASE: i64 = 100;

/// The `occurrences` value of an infinite series.
pub const INFINITE_OCCURRENCES: i64 = -1;

/// The `(repeats, occurrences)` pair stored with a schedule.
#[cfg_attr(feature = "python", pyclass(module = "repeatlib.rs", eq, frozen, get_all))]
#[derive(Debug, Hash, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedRepeat {
    pub repeats: i64,
    pub occurrences: i64,
}

impl EncodedRepeat {
    pub fn new(repeats: i64, occurrences: i64) -> Self {
        EncodedRepeat {
            repeats,
            occurrences,
        }
    }
}

impl RepeatState {
    /// Decode a persisted pair into a validated state.
    ///
    /// Fails when either ordinal of `repeats` is out of range, when an interval-parameterized
    /// frequency holds an interval that is not positive, or when a counted frequency holds a
    /// count that is neither at least 1 nor `-1`. Nothing is clamped or defaulted.
    ///
    /// # Examples
    /// ```rust
    /// # use repeatlib::scheduling::{Count, EncodedRepeat, ExecutionPolicy, Frequency, RepeatState};
    /// let state = RepeatState::decode(EncodedRepeat::new(213, 10)).unwrap();
    /// assert_eq!(ExecutionPolicy::Silent, state.policy);
    /// assert_eq!(Frequency::EveryNDays, state.frequency);
    /// assert_eq!(Count::Infinite, state.remaining);
    /// assert_eq!(Some(10), state.interval);
    /// ```
    pub fn decode(encoded: EncodedRepeat) -> Result<RepeatState, RepeatError> {
        let EncodedRepeat {
            repeats,
            occurrences,
        } = encoded;
        let frequency = Frequency::from_ordinal(repeats % REPEATS_BASE)
            .ok_or(RepeatError::FrequencyOutOfRange { repeats })?;
        let policy = ExecutionPolicy::from_ordinal(repeats / REPEATS_BASE)
            .ok_or(RepeatError::PolicyOutOfRange { repeats })?;

        let interval = || {
            u64::try_from(occurrences)
                .ok()
                .filter(|n| *n > 0)
                .ok_or(RepeatError::InvalidInterval {
                    frequency,
                    value: occurrences,
                })
        };

        let (remaining, interval) = match frequency {
            Frequency::Once => (Count::Finite(1), None),
            f if f.is_in_n() => (Count::Finite(2), Some(interval()?)),
            f if f.is_every_n() => (Count::Infinite, Some(interval()?)),
            _ => {
                let remaining = match occurrences {
                    INFINITE_OCCURRENCES => Count::Infinite,
                    n => u64::try_from(n)
                        .ok()
                        .filter(|n| *n >= 1)
                        .map(Count::Finite)
                        .ok_or(RepeatError::InvalidCount {
                            frequency,
                            value: occurrences,
                        })?,
                };
                (remaining, None)
            }
        };

        Ok(RepeatState {
            policy,
            frequency,
            remaining,
            interval,
        })
    }

    /// Encode the state as a persisted pair.
    ///
    /// Fails when the state breaks an invariant of [RepeatState::validate], or when its count
    /// or interval exceeds `i64::MAX`.
    pub fn encode(&self) -> Result<EncodedRepeat, RepeatError> {
        self.validate()?;
        let repeats = self.policy.ordinal() * REPEATS_BASE + self.frequency.ordinal();
        let wide = |n: u64| {
            i64::try_from(n).map_err(|_| {
                RepeatError::InvalidState(format!("{n} does not fit a persisted pair"))
            })
        };
        let occurrences = match (self.interval, self.remaining) {
            (Some(n), _) if self.frequency.is_interval() => wide(n)?,
            (_, Count::Finite(n)) => wide(n)?,
            (_, Count::Infinite) => INFINITE_OCCURRENCES,
        };
        Ok(EncodedRepeat {
            repeats,
            occurrences,
        })
    }
}

/// Decode a persisted pair. See [RepeatState::decode].
pub fn decode(encoded: EncodedRepeat) -> Result<RepeatState, RepeatError> {
    RepeatState::decode(encoded)
}

/// Encode a state as a persisted pair. See [RepeatState::encode].
pub fn encode(state: &RepeatState) -> Result<EncodedRepeat, RepeatError> {
    state.encode()
}
