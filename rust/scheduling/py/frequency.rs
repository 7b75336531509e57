use crate::scheduling::{ExecutionPolicy, Frequency};

use chrono::prelude::*;
use pyo3::prelude::*;

#[pymethods]
impl Frequency {
    /// Return the date one period away from ``udate``.
    ///
    /// Parameters
    /// ----------
    /// udate: datetime
    ///     The base date.
    /// interval: int, optional
    ///     The number of days or months for the interval-parameterized variants. Ignored
    ///     otherwise.
    /// reverse: bool, optional
    ///     Step backward instead of forward.
    ///
    /// Returns
    /// -------
    /// datetime
    #[pyo3(name = "step", signature = (udate, interval=None, reverse=false))]
    fn step_py(
        &self,
        udate: NaiveDateTime,
        interval: Option<u64>,
        reverse: bool,
    ) -> PyResult<NaiveDateTime> {
        Ok(self.try_step(&udate, interval, reverse)?)
    }

    /// Return the date one period after ``udate``.
    ///
    /// Parameters
    /// ----------
    /// udate: datetime
    ///     The base date.
    /// interval: int, optional
    ///     The number of days or months for the interval-parameterized variants. Ignored
    ///     otherwise.
    ///
    /// Returns
    /// -------
    /// datetime
    #[pyo3(name = "next", signature = (udate, interval=None))]
    fn next_py(&self, udate: NaiveDateTime, interval: Option<u64>) -> PyResult<NaiveDateTime> {
        Ok(self.try_step(&udate, interval, false)?)
    }

    /// Return the date one period before ``udate``.
    ///
    /// Parameters
    /// ----------
    /// udate: datetime
    ///     The base date.
    /// interval: int, optional
    ///     The number of days or months for the interval-parameterized variants. Ignored
    ///     otherwise.
    ///
    /// Returns
    /// -------
    /// datetime
    #[pyo3(name = "previous", signature = (udate, interval=None))]
    fn previous_py(
        &self,
        udate: NaiveDateTime,
        interval: Option<u64>,
    ) -> PyResult<NaiveDateTime> {
        Ok(self.try_step(&udate, interval, true)?)
    }

    /// Return the variant with the given display or variant name, ignoring case.
    ///
    /// Parameters
    /// ----------
    /// name: str
    ///     For example *"Fortnightly"* or *"BiWeekly"*.
    ///
    /// Returns
    /// -------
    /// Frequency
    #[staticmethod]
    #[pyo3(name = "from_name")]
    fn from_name_py(name: &str) -> PyResult<Frequency> {
        Ok(name.parse::<Frequency>()?)
    }

    fn __str__(&self) -> String {
        self.to_string()
    }
}

#[pymethods]
impl ExecutionPolicy {
    /// Whether a due occurrence is executed without being entered by hand.
    #[pyo3(name = "is_automatic")]
    fn is_automatic_py(&self) -> bool {
        self.is_automatic()
    }
}
