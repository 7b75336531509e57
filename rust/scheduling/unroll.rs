use chrono::prelude::*;

use crate::error::RepeatError;
use crate::scheduling::{Cal, Count, DateRoll, RepeatState, Scheduling};

/// The most occurrences a series may list when neither `end_date` nor `limit` bounds it.
pub const MAX_UNBOUNDED_OCCURRENCES: u64 = 100_000;

/// Return the ordered occurrence dates of a series, starting at and including `anchor`.
///
/// Dates are emitted while they are on or before `end_date` (if given) and fewer than `limit`
/// (if given) have been emitted. The series itself stops after its last counted occurrence.
///
/// Each step starts from the previous occurrence, so a day of month clamped in a short month
/// is carried forward rather than restored.
///
/// # Errors
/// An invalid `state` is rejected. A series with neither `end_date` nor `limit` is rejected
/// with [RepeatError::UnboundedUnroll] when it is infinite, or when its count exceeds
/// [MAX_UNBOUNDED_OCCURRENCES].
///
/// # Examples
/// ```rust
/// # use repeatlib::scheduling::{ndt, unroll, Count, ExecutionPolicy, Frequency, RepeatState};
/// let state = RepeatState::repeating(
///     ExecutionPolicy::NoExecution, Frequency::Monthly, Count::Finite(3),
/// ).unwrap();
/// let dates = unroll(&ndt(2025, 1, 31), &state, Some(&ndt(2025, 12, 31)), None).unwrap();
/// assert_eq!(vec![ndt(2025, 1, 31), ndt(2025, 2, 28), ndt(2025, 3, 28)], dates);
/// ```
pub fn unroll(
    anchor: &NaiveDateTime,
    state: &RepeatState,
    end_date: Option<&NaiveDateTime>,
    limit: Option<usize>,
) -> Result<Vec<NaiveDateTime>, RepeatError> {
    unroll_with_calendar(anchor, state, end_date, limit, Cal::weekends())
}

/// Unroll a series with business days defined by `calendar`. See [unroll].
pub fn unroll_with_calendar<T: DateRoll>(
    anchor: &NaiveDateTime,
    state: &RepeatState,
    end_date: Option<&NaiveDateTime>,
    limit: Option<usize>,
    calendar: &T,
) -> Result<Vec<NaiveDateTime>, RepeatError> {
    state.validate()?;
    if end_date.is_none() && limit.is_none() {
        match state.remaining {
            Count::Finite(n) if n <= MAX_UNBOUNDED_OCCURRENCES => {}
            _ => return Err(RepeatError::UnboundedUnroll),
        }
    }

    let mut v: Vec<NaiveDateTime> = vec![];
    let mut date = *anchor;
    let mut state = *state;
    loop {
        if end_date.is_some_and(|end| date > *end) || limit.is_some_and(|n| v.len() >= n) {
            break;
        }
        v.push(date);
        if state.is_last() {
            break;
        }
        date = state.try_step_with_calendar(&date, false, calendar)?;
        state = match state.advance_count() {
            Some(next) => next,
            None => break,
        };
    }
    Ok(v)
}
