use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(feature = "python")]
use pyo3::pyclass;

use crate::error::RepeatError;
use crate::scheduling::{add_days, add_months, snap_eom, Cal, DateRoll};

/// The repeat rule of a recurring schedule.
///
/// The discriminant is the ordinal persisted in the low two decimal digits of a `repeats`
/// code and must never be renumbered.
#[cfg_attr(feature = "python", pyclass(module = "repeatlib.rs", eq, eq_int, hash, frozen))]
#[derive(Debug, Hash, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    /// A single occurrence that does not repeat.
    Once = 0,
    /// Every week.
    Weekly = 1,
    /// Every two weeks.
    BiWeekly = 2,
    /// Every calendar month.
    Monthly = 3,
    /// Every two calendar months.
    BiMonthly = 4,
    /// Every three calendar months.
    Quarterly = 5,
    /// Every six calendar months.
    HalfYearly = 6,
    /// Every calendar year.
    Yearly = 7,
    /// Every four calendar months.
    FourMonthly = 8,
    /// Every four weeks.
    FourWeekly = 9,
    /// Every day.
    Daily = 10,
    /// Once more, a given number of days later.
    InNDays = 11,
    /// Once more, a given number of calendar months later.
    InNMonths = 12,
    /// Indefinitely, every given number of days.
    EveryNDays = 13,
    /// Indefinitely, every given number of calendar months.
    EveryNMonths = 14,
    /// The last calendar day of every month.
    MonthlyLastDay = 15,
    /// The last business day of every month.
    MonthlyLastBusinessDay = 16,
}

/// The signed length of one period.
#[derive(Debug, Copy, Clone, PartialEq)]
enum Span {
    Zero,
    Days(i64),
    Months(i32),
}

impl Frequency {
    /// Every variant, in ordinal order.
    pub const ALL: [Frequency; 17] = [
        Frequency::Once,
        Frequency::Weekly,
        Frequency::BiWeekly,
        Frequency::Monthly,
        Frequency::BiMonthly,
        Frequency::Quarterly,
        Frequency::HalfYearly,
        Frequency::Yearly,
        Frequency::FourMonthly,
        Frequency::FourWeekly,
        Frequency::Daily,
        Frequency::InNDays,
        Frequency::InNMonths,
        Frequency::EveryNDays,
        Frequency::EveryNMonths,
        Frequency::MonthlyLastDay,
        Frequency::MonthlyLastBusinessDay,
    ];

    /// The persisted ordinal of the variant.
    pub fn ordinal(&self) -> i64 {
        *self as i64
    }

    /// Return the variant with the given ordinal, if one exists.
    pub fn from_ordinal(ordinal: i64) -> Option<Frequency> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Frequency::ALL.get(i).copied())
    }

    /// Whether the period length is given by an auxiliary interval rather than fixed.
    pub fn is_interval(&self) -> bool {
        matches!(
            self,
            Frequency::InNDays
                | Frequency::InNMonths
                | Frequency::EveryNDays
                | Frequency::EveryNMonths
        )
    }

    /// Whether the variant fires exactly once more after its anchor and then stops.
    pub fn is_in_n(&self) -> bool {
        matches!(self, Frequency::InNDays | Frequency::InNMonths)
    }

    /// Whether the variant repeats indefinitely on an interval.
    pub fn is_every_n(&self) -> bool {
        matches!(self, Frequency::EveryNDays | Frequency::EveryNMonths)
    }

    fn span(&self, interval: Option<u64>) -> Result<Span, RepeatError> {
        let n = || interval.filter(|n| *n > 0).ok_or(RepeatError::MissingInterval(*self));
        Ok(match self {
            Frequency::Once => Span::Zero,
            Frequency::Daily => Span::Days(1),
            Frequency::Weekly => Span::Days(7),
            Frequency::BiWeekly => Span::Days(14),
            Frequency::FourWeekly => Span::Days(28),
            Frequency::Monthly | Frequency::MonthlyLastDay | Frequency::MonthlyLastBusinessDay => {
                Span::Months(1)
            }
            Frequency::BiMonthly => Span::Months(2),
            Frequency::Quarterly => Span::Months(3),
            Frequency::FourMonthly => Span::Months(4),
            Frequency::HalfYearly => Span::Months(6),
            Frequency::Yearly => Span::Months(12),
            Frequency::InNDays | Frequency::EveryNDays => {
                Span::Days(i64::try_from(n()?).map_err(|_| RepeatError::DateOutOfRange)?)
            }
            Frequency::InNMonths | Frequency::EveryNMonths => {
                Span::Months(i32::try_from(n()?).map_err(|_| RepeatError::DateOutOfRange)?)
            }
        })
    }

    /// Return the date one period away from `udate`, moving backward if `reverse`.
    ///
    /// `interval` is required for the interval-parameterized variants and ignored otherwise.
    /// Month arithmetic clamps to the last day of a shorter month. `MonthlyLastBusinessDay`
    /// uses Saturday and Sunday weekends; see [Frequency::try_step_with_calendar] to supply
    /// holidays. `Once` returns `udate` unchanged.
    ///
    /// # Examples
    /// ```rust
    /// # use repeatlib::scheduling::{Frequency, ndt};
    /// let f = Frequency::Monthly;
    /// assert_eq!(ndt(2023, 2, 28), f.try_step(&ndt(2023, 1, 31), None, false).unwrap());
    /// let f = Frequency::EveryNDays;
    /// assert_eq!(ndt(2023, 1, 21), f.try_step(&ndt(2023, 1, 31), Some(10), true).unwrap());
    /// ```
    pub fn try_step(
        &self,
        udate: &NaiveDateTime,
        interval: Option<u64>,
        reverse: bool,
    ) -> Result<NaiveDateTime, RepeatError> {
        self.try_step_with_calendar(udate, interval, reverse, Cal::weekends())
    }

    /// Return the date one period away from `udate`, with business days defined by `calendar`.
    pub fn try_step_with_calendar<T: DateRoll>(
        &self,
        udate: &NaiveDateTime,
        interval: Option<u64>,
        reverse: bool,
        calendar: &T,
    ) -> Result<NaiveDateTime, RepeatError> {
        let sign: i32 = if reverse { -1 } else { 1 };
        let date = match self.span(interval)? {
            Span::Zero => *udate,
            Span::Days(n) => add_days(udate, i64::from(sign) * n)?,
            Span::Months(n) => add_months(udate, sign * n)?,
        };
        match self {
            Frequency::MonthlyLastDay => snap_eom(&date),
            Frequency::MonthlyLastBusinessDay => {
                calendar.roll_backward_bus_day(&snap_eom(&date)?)
            }
            _ => Ok(date),
        }
    }
}

/// Return the date one occurrence away from `anchor`.
///
/// This is [Frequency::try_step] as a free function.
pub fn step(
    anchor: &NaiveDateTime,
    frequency: Frequency,
    interval: Option<u64>,
    reverse: bool,
) -> Result<NaiveDateTime, RepeatError> {
    frequency.try_step(anchor, interval, reverse)
}

/// Used to step between the occurrences of a recurring schedule.
pub trait Scheduling {
    /// Return the date one occurrence away from `udate`, with business days defined by `calendar`.
    fn try_step_with_calendar<T: DateRoll>(
        &self,
        udate: &NaiveDateTime,
        reverse: bool,
        calendar: &T,
    ) -> Result<NaiveDateTime, RepeatError>;

    /// Calculate the next occurrence date from a base date.
    fn try_unext(&self, udate: &NaiveDateTime) -> Result<NaiveDateTime, RepeatError> {
        self.try_step_with_calendar(udate, false, Cal::weekends())
    }

    /// Calculate the previous occurrence date from a base date.
    fn try_uprevious(&self, udate: &NaiveDateTime) -> Result<NaiveDateTime, RepeatError> {
        self.try_step_with_calendar(udate, true, Cal::weekends())
    }
}

// UNIT TESTS
#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::ndt;

    #[test]
    fn test_ordinals() {
        for (i, f) in Frequency::ALL.iter().enumerate() {
            assert_eq!(i as i64, f.ordinal());
            assert_eq!(Some(*f), Frequency::from_ordinal(i as i64));
        }
        assert_eq!(None, Frequency::from_ordinal(17));
        assert_eq!(None, Frequency::from_ordinal(-1));
    }

    #[test]
    fn test_try_step_forward() {
        let options: Vec<(Frequency, Option<u64>, NaiveDateTime, NaiveDateTime)> = vec![
            (Frequency::Once, None, ndt(2022, 7, 30), ndt(2022, 7, 30)),
            (Frequency::Weekly, None, ndt(2022, 7, 30), ndt(2022, 8, 6)),
            (Frequency::BiWeekly, None, ndt(2022, 7, 30), ndt(2022, 8, 13)),
            (Frequency::Monthly, None, ndt(2022, 7, 30), ndt(2022, 8, 30)),
            (Frequency::BiMonthly, None, ndt(2022, 7, 30), ndt(2022, 9, 30)),
            (Frequency::Quarterly, None, ndt(2022, 7, 30), ndt(2022, 10, 30)),
            (Frequency::HalfYearly, None, ndt(2022, 7, 30), ndt(2023, 1, 30)),
            (Frequency::Yearly, None, ndt(2022, 7, 30), ndt(2023, 7, 30)),
            (Frequency::FourMonthly, None, ndt(2022, 7, 30), ndt(2022, 11, 30)),
            (Frequency::FourWeekly, None, ndt(2022, 7, 30), ndt(2022, 8, 27)),
            (Frequency::Daily, None, ndt(2022, 7, 31), ndt(2022, 8, 1)),
            (Frequency::InNDays, Some(5), ndt(2022, 6, 15), ndt(2022, 6, 20)),
            (Frequency::EveryNDays, Some(14), ndt(2022, 6, 15), ndt(2022, 6, 29)),
            (Frequency::InNMonths, Some(5), ndt(2022, 6, 15), ndt(2022, 11, 15)),
            (Frequency::EveryNMonths, Some(14), ndt(2022, 6, 15), ndt(2023, 8, 15)),
            (Frequency::MonthlyLastDay, None, ndt(2022, 1, 10), ndt(2022, 2, 28)),
            (Frequency::MonthlyLastDay, None, ndt(2024, 1, 31), ndt(2024, 2, 29)),
            // 2025-05-31 is a Saturday
            (Frequency::MonthlyLastBusinessDay, None, ndt(2025, 4, 30), ndt(2025, 5, 30)),
            // 2025-08-31 is a Sunday
            (Frequency::MonthlyLastBusinessDay, None, ndt(2025, 7, 31), ndt(2025, 8, 29)),
            (Frequency::MonthlyLastBusinessDay, None, ndt(2025, 2, 28), ndt(2025, 3, 31)),
        ];
        for option in options.iter() {
            assert_eq!(
                option.3,
                option.0.try_step(&option.2, option.1, false).unwrap(),
                "{:?}",
                option.0
            );
        }
    }

    #[test]
    fn test_try_step_reverse() {
        let options: Vec<(Frequency, Option<u64>, NaiveDateTime, NaiveDateTime)> = vec![
            (Frequency::Weekly, None, ndt(2022, 8, 6), ndt(2022, 7, 30)),
            (Frequency::Monthly, None, ndt(2022, 3, 31), ndt(2022, 2, 28)),
            (Frequency::Yearly, None, ndt(2024, 2, 29), ndt(2023, 2, 28)),
            (Frequency::EveryNDays, Some(10), ndt(2022, 3, 5), ndt(2022, 2, 23)),
            (Frequency::InNMonths, Some(3), ndt(2022, 3, 5), ndt(2021, 12, 5)),
            (Frequency::MonthlyLastDay, None, ndt(2022, 3, 31), ndt(2022, 2, 28)),
            // 2025-05-31 is a Saturday
            (Frequency::MonthlyLastBusinessDay, None, ndt(2025, 6, 30), ndt(2025, 5, 30)),
        ];
        for option in options.iter() {
            assert_eq!(
                option.3,
                option.0.try_step(&option.2, option.1, true).unwrap(),
                "{:?}",
                option.0
            );
        }
    }

    #[test]
    fn test_month_clamp_leap_and_common_year() {
        let f = Frequency::Monthly;
        assert_eq!(ndt(2024, 2, 29), step(&ndt(2024, 1, 31), f, None, false).unwrap());
        assert_eq!(ndt(2023, 2, 28), step(&ndt(2023, 1, 31), f, None, false).unwrap());
    }

    #[test]
    fn test_last_business_day_saturday_month_end() {
        // every date in April 2025 steps into May, whose natural last day is a Saturday
        let mut date = ndt(2025, 4, 1);
        while date.month() == 4 {
            let next = Frequency::MonthlyLastBusinessDay
                .try_step(&date, None, false)
                .unwrap();
            assert_eq!(ndt(2025, 5, 30), next);
            assert_eq!(Weekday::Fri, next.weekday());
            date = date + chrono::Days::new(1);
        }
    }

    #[test]
    fn test_last_business_day_with_holiday() {
        // 2025-05-30 is a Friday holiday, 2025-05-31 is a Saturday
        let cal = Cal::try_new(vec![ndt(2025, 5, 30)], vec![5, 6]).unwrap();
        let result = Frequency::MonthlyLastBusinessDay
            .try_step_with_calendar(&ndt(2025, 4, 30), None, false, &cal)
            .unwrap();
        assert_eq!(ndt(2025, 5, 29), result);
    }

    #[test]
    fn test_interval_required() {
        for f in [
            Frequency::InNDays,
            Frequency::InNMonths,
            Frequency::EveryNDays,
            Frequency::EveryNMonths,
        ] {
            assert_eq!(
                Err(RepeatError::MissingInterval(f)),
                f.try_step(&ndt(2022, 1, 1), None, false)
            );
            assert_eq!(
                Err(RepeatError::MissingInterval(f)),
                f.try_step(&ndt(2022, 1, 1), Some(0), false)
            );
        }
    }

    #[test]
    fn test_interval_ignored_for_fixed_frequencies() {
        assert_eq!(
            ndt(2022, 1, 8),
            Frequency::Weekly
                .try_step(&ndt(2022, 1, 1), Some(3), false)
                .unwrap()
        );
    }

    #[test]
    fn test_step_keeps_time_of_day() {
        let date = ndt(2022, 1, 31) + chrono::Duration::minutes(90);
        assert_eq!(
            ndt(2022, 2, 28) + chrono::Duration::minutes(90),
            Frequency::Monthly.try_step(&date, None, false).unwrap()
        );
    }

    #[test]
    fn test_step_overflow() {
        assert_eq!(
            Err(RepeatError::DateOutOfRange),
            Frequency::Yearly.try_step(&NaiveDateTime::MAX, None, false)
        );
    }

    #[test]
    fn test_step_interval_beyond_date_range() {
        let options: Vec<(Frequency, u64)> = vec![
            (Frequency::EveryNDays, 5_000_000_000),
            (Frequency::EveryNDays, u64::MAX),
            (Frequency::EveryNMonths, 5_000_000_000),
            (Frequency::InNMonths, u64::from(u32::MAX)),
        ];
        for option in options {
            assert_eq!(
                Err(RepeatError::DateOutOfRange),
                option.0.try_step(&ndt(2025, 1, 1), Some(option.1), false),
                "{:?}",
                option
            );
        }
    }
}
