use crate::scheduling::{advance_schedule, AdvanceResult, EncodedRepeat, ScheduleRecord};

use pyo3::prelude::*;

#[pymethods]
impl EncodedRepeat {
    #[new]
    fn new_py(repeats: i64, occurrences: i64) -> Self {
        EncodedRepeat::new(repeats, occurrences)
    }
}

#[pymethods]
impl ScheduleRecord {
    #[new]
    fn new_py(anchor_date: &str, due_date: &str, encoded_repeat: EncodedRepeat) -> Self {
        ScheduleRecord::new(anchor_date, due_date, encoded_repeat)
    }

    /// Fire one occurrence of the schedule.
    ///
    /// Returns
    /// -------
    /// tuple[str, str, EncodedRepeat] or None
    ///     The new anchor date, due date and repeat pair to store, or *None* if the schedule is
    ///     retired.
    #[pyo3(name = "advance")]
    fn advance_py(&self) -> PyResult<Option<(String, String, EncodedRepeat)>> {
        Ok(rescheduled(self.advance()?))
    }
}

/// Fire one occurrence of a stored schedule.
///
/// Parameters
/// ----------
/// record: ScheduleRecord
///     The stored anchor date, due date and repeat pair.
///
/// Returns
/// -------
/// tuple[str, str, EncodedRepeat] or None
#[pyfunction]
#[pyo3(name = "advance_schedule")]
pub(crate) fn advance_schedule_py(
    record: ScheduleRecord,
) -> PyResult<Option<(String, String, EncodedRepeat)>> {
    Ok(rescheduled(advance_schedule(&record)?))
}

fn rescheduled(result: AdvanceResult) -> Option<(String, String, EncodedRepeat)> {
    match result {
        AdvanceResult::Retired => None,
        AdvanceResult::Rescheduled {
            new_anchor_date,
            new_due_date,
            new_encoded_repeat,
        } => Some((new_anchor_date, new_due_date, new_encoded_repeat)),
    }
}
