use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[cfg(feature = "python")]
use pyo3::pyclass;

use crate::error::RepeatError;
use crate::scheduling::{
    format_iso, parse_iso, Cal, DateRoll, EncodedRepeat, ExecutionPolicy, RepeatState, Scheduling,
};

/// A persisted recurring schedule as read from storage.
///
/// Only the fields that drive recurrence are carried. Dates are ISO-8601 strings; the anchor
/// may carry a time of day.
#[cfg_attr(feature = "python", pyclass(module = "repeatlib.rs", eq, get_all))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub anchor_date: String,
    pub due_date: String,
    pub encoded_repeat: EncodedRepeat,
}

/// The outcome of firing one occurrence of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvanceResult {
    /// No occurrence remains. The schedule and its dependent rows should be removed.
    Retired,
    /// The schedule continues with new dates and a new repeat pair, to be stored verbatim.
    Rescheduled {
        new_anchor_date: String,
        new_due_date: String,
        new_encoded_repeat: EncodedRepeat,
    },
}

/// Where a schedule's due date falls relative to a given day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DueStatus {
    /// Due the given number of days ago.
    Overdue { days: i64 },
    /// Due on the given day.
    DueToday,
    /// Due in the given number of days.
    Upcoming { days: i64 },
}

/// What the caller should do with a schedule that has fallen due.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingAction {
    /// Ask the user to confirm the occurrence before entering it.
    Confirm,
    /// Enter the occurrence without interaction.
    Execute,
}

impl ScheduleRecord {
    pub fn new(anchor_date: &str, due_date: &str, encoded_repeat: EncodedRepeat) -> Self {
        ScheduleRecord {
            anchor_date: anchor_date.to_string(),
            due_date: due_date.to_string(),
            encoded_repeat,
        }
    }

    /// Decode the repeat pair of the record.
    pub fn repeat_state(&self) -> Result<RepeatState, RepeatError> {
        RepeatState::decode(self.encoded_repeat)
    }

    /// Fire one occurrence. See [advance_schedule].
    pub fn advance(&self) -> Result<AdvanceResult, RepeatError> {
        advance_schedule_with_calendar(self, Cal::weekends())
    }

    /// Where the due date falls relative to `today`, by whole calendar days.
    pub fn due_status(&self, today: &NaiveDate) -> Result<DueStatus, RepeatError> {
        let (due, _) = parse_iso(&self.due_date)?;
        let days = (due.date() - *today).num_days();
        Ok(match days {
            0 => DueStatus::DueToday,
            d if d < 0 => DueStatus::Overdue { days: -d },
            d => DueStatus::Upcoming { days: d },
        })
    }

    /// The action due on `today`, if the schedule has fallen due and executes automatically.
    ///
    /// A schedule whose repeat pair does not decode never executes automatically.
    pub fn pending_action(&self, today: &NaiveDate) -> Result<Option<PendingAction>, RepeatError> {
        if let DueStatus::Upcoming { .. } = self.due_status(today)? {
            return Ok(None);
        }
        let policy = match self.repeat_state() {
            Ok(state) => state.policy,
            Err(_) => return Ok(None),
        };
        Ok(match policy {
            ExecutionPolicy::NoExecution => None,
            ExecutionPolicy::ManualAck => Some(PendingAction::Confirm),
            ExecutionPolicy::Silent => Some(PendingAction::Execute),
        })
    }
}

/// Fire one occurrence of a schedule and return how it continues.
///
/// A record whose repeat pair fails to decode, or whose current occurrence is its last, is
/// [AdvanceResult::Retired]. Otherwise the anchor and due dates each move forward one
/// occurrence, keeping their string layout, and the repeat pair is re-encoded with one
/// occurrence consumed.
///
/// # Errors
/// Only when a date string cannot be parsed or stepping leaves the supported date range.
///
/// # Examples
/// ```rust
/// # use repeatlib::scheduling::{advance_schedule, AdvanceResult, EncodedRepeat, ScheduleRecord};
/// let record = ScheduleRecord::new("2025-01-31", "2025-02-03", EncodedRepeat::new(103, 3));
/// assert_eq!(
///     AdvanceResult::Rescheduled {
///         new_anchor_date: "2025-02-28".to_string(),
///         new_due_date: "2025-03-03".to_string(),
///         new_encoded_repeat: EncodedRepeat::new(103, 2),
///     },
///     advance_schedule(&record).unwrap(),
/// );
/// ```
pub fn advance_schedule(record: &ScheduleRecord) -> Result<AdvanceResult, RepeatError> {
    advance_schedule_with_calendar(record, Cal::weekends())
}

/// Fire one occurrence with business days defined by `calendar`. See [advance_schedule].
pub fn advance_schedule_with_calendar<T: DateRoll>(
    record: &ScheduleRecord,
    calendar: &T,
) -> Result<AdvanceResult, RepeatError> {
    let state = match record.repeat_state() {
        Ok(state) => state,
        Err(e) => {
            debug!(?record.encoded_repeat, error = %e, "retiring schedule with undecodable repeat");
            return Ok(AdvanceResult::Retired);
        }
    };
    if state.is_last() {
        debug!(?state.frequency, "retiring schedule after its last occurrence");
        return Ok(AdvanceResult::Retired);
    }

    let (anchor, anchor_shape) = parse_iso(&record.anchor_date)?;
    let (due, due_shape) = parse_iso(&record.due_date)?;
    let new_anchor = state.try_step_with_calendar(&anchor, false, calendar)?;
    let new_due = state.try_step_with_calendar(&due, false, calendar)?;

    let next_state = match state.advance_count() {
        Some(next) => next,
        None => return Ok(AdvanceResult::Retired),
    };
    let new_encoded_repeat = next_state.encode()?;
    trace!(
        %new_anchor,
        %new_due,
        ?new_encoded_repeat,
        "rescheduled recurring transaction"
    );

    Ok(AdvanceResult::Rescheduled {
        new_anchor_date: format_iso(&new_anchor, anchor_shape),
        new_due_date: format_iso(&new_due, due_shape),
        new_encoded_repeat,
    })
}

// UNIT TESTS
#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::ndt;

    fn rescheduled(anchor: &str, due: &str, repeats: i64, occurrences: i64) -> AdvanceResult {
        AdvanceResult::Rescheduled {
            new_anchor_date: anchor.to_string(),
            new_due_date: due.to_string(),
            new_encoded_repeat: EncodedRepeat::new(repeats, occurrences),
        }
    }

    #[test]
    fn test_once_retires() {
        for occurrences in [-1, 0, 1, 7] {
            let record =
                ScheduleRecord::new("2025-01-31", "2025-01-31", EncodedRepeat::new(200, occurrences));
            assert_eq!(AdvanceResult::Retired, advance_schedule(&record).unwrap());
        }
    }

    #[test]
    fn test_last_counted_occurrence_retires() {
        let record = ScheduleRecord::new("2025-01-31", "2025-01-31", EncodedRepeat::new(3, 1));
        assert_eq!(AdvanceResult::Retired, advance_schedule(&record).unwrap());
    }

    #[test]
    fn test_undecodable_retires() {
        let record = ScheduleRecord::new("2025-01-31", "2025-01-31", EncodedRepeat::new(13, 0));
        assert_eq!(AdvanceResult::Retired, advance_schedule(&record).unwrap());
        let record = ScheduleRecord::new("2025-01-31", "2025-01-31", EncodedRepeat::new(77, 2));
        assert_eq!(AdvanceResult::Retired, advance_schedule(&record).unwrap());
    }

    #[test]
    fn test_wide_count_is_rescheduled() {
        let record =
            ScheduleRecord::new("2025-01-31", "2025-01-31", EncodedRepeat::new(3, 5_000_000_000));
        assert_eq!(
            rescheduled("2025-02-28", "2025-02-28", 3, 4_999_999_999),
            advance_schedule(&record).unwrap()
        );
    }

    #[test]
    fn test_counted_schedule_decrements() {
        let record =
            ScheduleRecord::new("2025-01-15", "2025-01-17", EncodedRepeat::new(101, 5));
        assert_eq!(
            rescheduled("2025-01-22", "2025-01-24", 101, 4),
            advance_schedule(&record).unwrap()
        );
    }

    #[test]
    fn test_infinite_schedule_keeps_pair() {
        let record =
            ScheduleRecord::new("2025-01-31", "2025-01-31", EncodedRepeat::new(214, 2));
        assert_eq!(
            rescheduled("2025-03-31", "2025-03-31", 214, 2),
            advance_schedule(&record).unwrap()
        );
        let record = ScheduleRecord::new("2025-01-31", "2025-01-31", EncodedRepeat::new(7, -1));
        assert_eq!(
            rescheduled("2026-01-31", "2026-01-31", 7, -1),
            advance_schedule(&record).unwrap()
        );
    }

    #[test]
    fn test_in_n_days_becomes_once_then_retires() {
        let record =
            ScheduleRecord::new("2025-01-01", "2025-01-01", EncodedRepeat::new(111, 10));
        let result = advance_schedule(&record).unwrap();
        assert_eq!(rescheduled("2025-01-11", "2025-01-11", 100, 1), result);

        let record = ScheduleRecord::new("2025-01-11", "2025-01-11", EncodedRepeat::new(100, 1));
        assert_eq!(AdvanceResult::Retired, advance_schedule(&record).unwrap());
    }

    #[test]
    fn test_anchor_keeps_time_and_layout() {
        let record = ScheduleRecord::new(
            "2025-01-31T08:30:00",
            "2025-01-31",
            EncodedRepeat::new(15, -1),
        );
        assert_eq!(
            rescheduled("2025-02-28T08:30:00", "2025-02-28", 15, -1),
            advance_schedule(&record).unwrap()
        );
    }

    #[test]
    fn test_last_business_day_with_holiday() {
        // 2025-05-30 is a Friday holiday, 2025-05-31 is a Saturday
        let cal = Cal::try_new(vec![ndt(2025, 5, 30)], vec![5, 6]).unwrap();
        let record = ScheduleRecord::new("2025-04-30", "2025-04-30", EncodedRepeat::new(16, -1));
        assert_eq!(
            rescheduled("2025-05-29", "2025-05-29", 16, -1),
            advance_schedule_with_calendar(&record, &cal).unwrap()
        );
    }

    #[test]
    fn test_unparseable_date_is_error() {
        let record = ScheduleRecord::new("31/01/2025", "2025-01-31", EncodedRepeat::new(3, 2));
        assert_eq!(
            Err(RepeatError::DateParse("31/01/2025".to_string())),
            advance_schedule(&record)
        );
    }

    #[test]
    fn test_due_status() {
        let record = ScheduleRecord::new("2025-03-10", "2025-03-10", EncodedRepeat::new(3, -1));
        let options: Vec<(NaiveDate, DueStatus)> = vec![
            (ndt(2025, 3, 10).date(), DueStatus::DueToday),
            (ndt(2025, 3, 13).date(), DueStatus::Overdue { days: 3 }),
            (ndt(2025, 3, 1).date(), DueStatus::Upcoming { days: 9 }),
        ];
        for option in options {
            assert_eq!(option.1, record.due_status(&option.0).unwrap());
        }
    }

    #[test]
    fn test_pending_action() {
        let today = ndt(2025, 3, 10).date();
        let options: Vec<(i64, &str, Option<PendingAction>)> = vec![
            (3, "2025-03-10", None),
            (103, "2025-03-10", Some(PendingAction::Confirm)),
            (203, "2025-03-01", Some(PendingAction::Execute)),
            (203, "2025-03-11", None),
            (277, "2025-03-01", None),
        ];
        for option in options {
            let record = ScheduleRecord::new(option.1, option.1, EncodedRepeat::new(option.0, -1));
            assert_eq!(option.2, record.pending_action(&today).unwrap(), "{:?}", option);
        }
    }
}
