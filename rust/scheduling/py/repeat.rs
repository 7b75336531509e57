use crate::scheduling::{
    unroll, Count, EncodedRepeat, ExecutionPolicy, Frequency, RepeatState, Scheduling,
};

use chrono::prelude::*;
use pyo3::prelude::*;

#[pymethods]
impl RepeatState {
    /// Create a validated repeat state.
    ///
    /// Parameters
    /// ----------
    /// policy: ExecutionPolicy
    ///     How a due occurrence is executed.
    /// frequency: Frequency
    ///     The repeat rule.
    /// remaining: int, optional
    ///     The number of occurrences left, including the one due. *None* is an infinite series.
    /// interval: int, optional
    ///     The number of days or months of an interval-parameterized frequency.
    #[new]
    #[pyo3(signature = (policy, frequency, remaining=None, interval=None))]
    fn new_py(
        policy: ExecutionPolicy,
        frequency: Frequency,
        remaining: Option<u64>,
        interval: Option<u64>,
    ) -> PyResult<Self> {
        let remaining = remaining.map_or(Count::Infinite, Count::Finite);
        Ok(RepeatState::try_new(policy, frequency, remaining, interval)?)
    }

    /// Decode a stored ``(repeats, occurrences)`` pair.
    ///
    /// Returns
    /// -------
    /// RepeatState
    #[staticmethod]
    #[pyo3(name = "decode")]
    fn decode_py(repeats: i64, occurrences: i64) -> PyResult<RepeatState> {
        Ok(RepeatState::decode(EncodedRepeat::new(repeats, occurrences))?)
    }

    /// Encode the state as a stored pair.
    ///
    /// Returns
    /// -------
    /// EncodedRepeat
    #[pyo3(name = "encode")]
    fn encode_py(&self) -> PyResult<EncodedRepeat> {
        Ok(self.encode()?)
    }

    /// Return the state after one occurrence is consumed, or *None* if none remains.
    ///
    /// Returns
    /// -------
    /// RepeatState or None
    #[pyo3(name = "advance_count")]
    fn advance_count_py(&self) -> Option<RepeatState> {
        self.advance_count()
    }

    /// Return the occurrence after ``udate``.
    #[pyo3(name = "next")]
    fn next_py(&self, udate: NaiveDateTime) -> PyResult<NaiveDateTime> {
        Ok(self.try_unext(&udate)?)
    }

    /// Return the occurrence before ``udate``.
    #[pyo3(name = "previous")]
    fn previous_py(&self, udate: NaiveDateTime) -> PyResult<NaiveDateTime> {
        Ok(self.try_uprevious(&udate)?)
    }

    /// Return the occurrence dates starting at ``anchor``.
    ///
    /// Parameters
    /// ----------
    /// anchor: datetime
    ///     The first occurrence.
    /// end_date: datetime, optional
    ///     The last date that may be returned.
    /// limit: int, optional
    ///     The maximum number of dates returned.
    ///
    /// Returns
    /// -------
    /// list[datetime]
    #[pyo3(name = "unroll", signature = (anchor, end_date=None, limit=None))]
    fn unroll_py(
        &self,
        anchor: NaiveDateTime,
        end_date: Option<NaiveDateTime>,
        limit: Option<usize>,
    ) -> PyResult<Vec<NaiveDateTime>> {
        Ok(unroll(&anchor, self, end_date.as_ref(), limit)?)
    }

    #[getter(policy)]
    fn get_policy(&self) -> ExecutionPolicy {
        self.policy
    }

    #[getter(frequency)]
    fn get_frequency(&self) -> Frequency {
        self.frequency
    }

    /// The occurrences left, or *None* for an infinite series.
    #[getter(remaining)]
    fn get_remaining(&self) -> Option<u64> {
        match self.remaining {
            Count::Finite(n) => Some(n),
            Count::Infinite => None,
        }
    }

    #[getter(interval)]
    fn get_interval(&self) -> Option<u64> {
        self.interval
    }

    fn __repr__(&self) -> String {
        format!("<rl.RepeatState:{:?} at {:p}>", self.frequency, self)
    }
}
