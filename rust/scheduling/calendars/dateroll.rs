use chrono::prelude::*;
use chrono::Days;

use crate::error::RepeatError;

/// Simple date adjustment defining business days and holidays and rolling.
pub trait DateRoll {
    /// Returns whether the date is part of the general working week.
    fn is_weekday(&self, date: &NaiveDateTime) -> bool;

    /// Returns whether the date is a specific holiday excluded from the regular working week.
    fn is_holiday(&self, date: &NaiveDateTime) -> bool;

    /// Returns whether the date is a business day, i.e. part of the working week and not a holiday.
    fn is_bus_day(&self, date: &NaiveDateTime) -> bool {
        self.is_weekday(date) && !self.is_holiday(date)
    }

    /// Return the `date`, if a business day, or get the business day preceding `date`.
    fn roll_backward_bus_day(&self, date: &NaiveDateTime) -> Result<NaiveDateTime, RepeatError> {
        let mut new_date = *date;
        while !self.is_bus_day(&new_date) {
            new_date = new_date
                .checked_sub_days(Days::new(1))
                .ok_or(RepeatError::DateOutOfRange)?;
        }
        Ok(new_date)
    }
}
