//! This is the documentation for repeatlib-rs
//!
//! A calendar engine for recurring bills and deposits: decoding their stored repeat codes,
//! stepping between occurrences, listing upcoming occurrences and advancing a schedule once an
//! occurrence has fired. See [scheduling].


pub mod error;
pub use error::RepeatError;

pub mod json;
pub mod scheduling;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use crate::json::json_py::from_json_py;
    use crate::scheduling::py::advance_schedule_py;
    use crate::scheduling::{
        EncodedRepeat, ExecutionPolicy, Frequency, RepeatState, ScheduleRecord,
    };

    // JSON
    m.add_function(wrap_pyfunction!(from_json_py, m)?)?;

    // Scheduling
    m.add_class::<Frequency>()?;
    m.add_class::<ExecutionPolicy>()?;
    m.add_class::<RepeatState>()?;
    m.add_class::<EncodedRepeat>()?;
    m.add_class::<ScheduleRecord>()?;
    m.add_function(wrap_pyfunction!(advance_schedule_py, m)?)?;

    Ok(())
}
