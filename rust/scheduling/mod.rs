//! Decode, step, unroll and advance recurring bill and deposit schedules.
//!
//! A recurring schedule is stored as an anchor date, a due date and a pair of integers. The
//! purpose of this module is to turn that pair into something that can be reasoned about, and to
//! answer the questions asked of a recurring schedule;
//! - When is the next (or previous) occurrence?
//! - What are the next occurrences up to some date, or up to some number?
//! - Having fired the current occurrence, what should be stored, or should the schedule be
//!   removed?
//!
//! # Repeat codes and states
//!
//! The stored pair is an [`EncodedRepeat`]. Its `repeats` field multiplexes an
//! [`ExecutionPolicy`] and a [`Frequency`] as `policy * 100 + frequency`. Its `occurrences`
//! field is either the number of remaining occurrences (`-1` for an infinite series) or, for the
//! four interval-parameterized frequencies, the number of days or months between occurrences.
//!
//! [`RepeatState::decode`] validates the pair and returns a [`RepeatState`]. Nothing downstream
//! handles the raw pair again until [`RepeatState::encode`] produces one for storage.
//!
//! ### Example
//! This example decodes a silently executed schedule which occurs every 10 days forever.
//! ```rust
//! # use repeatlib::scheduling::{Count, EncodedRepeat, ExecutionPolicy, Frequency, RepeatState};
//! let state = RepeatState::decode(EncodedRepeat::new(213, 10)).unwrap();
//! assert_eq!(state.policy, ExecutionPolicy::Silent);
//! assert_eq!(state.frequency, Frequency::EveryNDays);
//! assert_eq!(state.interval, Some(10));
//! assert_eq!(state.remaining, Count::Infinite);
//! ```
//!
//! # Stepping
//!
//! Every [`Frequency`] can step a date forward or backward by one occurrence. Calendar months are
//! added with the day of month clamped to the length of the target month, and the
//! `MonthlyLastBusinessDay` variant rolls back over weekends and, optionally, the holidays of a
//! [`Cal`]. A [`RepeatState`] implements [`Scheduling`] using its own frequency and interval.
//!
//! ### Example
//! ```rust
//! # use repeatlib::scheduling::{ndt, Frequency};
//! // 31st May 2025 is a Saturday
//! let f = Frequency::MonthlyLastBusinessDay;
//! assert_eq!(ndt(2025, 5, 30), f.try_step(&ndt(2025, 4, 30), None, false).unwrap());
//! ```
//!
//! # Unrolling and advancing
//!
//! [`unroll`] lists the occurrence dates of a series from its anchor. [`advance_schedule`] fires
//! one occurrence of a [`ScheduleRecord`] and returns either [`AdvanceResult::Retired`] or the
//! new dates and pair to store.
//!
//! ### Example
//! ```rust
//! # use repeatlib::scheduling::{advance_schedule, AdvanceResult, EncodedRepeat, ScheduleRecord};
//! // Monthly, last occurrence
//! let record = ScheduleRecord::new("2025-03-28", "2025-03-28", EncodedRepeat::new(3, 1));
//! assert_eq!(AdvanceResult::Retired, advance_schedule(&record).unwrap());
//! ```

mod calendars;
mod frequency;
mod repeat;
mod schedule;
mod unroll;

mod serde;

#[cfg(feature = "python")]
pub(crate) mod py;

pub use crate::scheduling::{
    calendars::{
        add_days, add_months, format_iso, get_eom, ndt, parse_iso, snap_eom, Cal, DateRoll,
        IsoShape,
    },
    frequency::{step, Frequency, Scheduling},
    repeat::{
        decode, encode, next_occurrence, previous_occurrence, Count, EncodedRepeat,
        ExecutionPolicy, RepeatState, INFINITE_OCCURRENCES, REPEATS_BASE,
    },
    schedule::{
        advance_schedule, advance_schedule_with_calendar, AdvanceResult, DueStatus,
        PendingAction, ScheduleRecord,
    },
    unroll::{unroll, unroll_with_calendar, MAX_UNBOUNDED_OCCURRENCES},
};
