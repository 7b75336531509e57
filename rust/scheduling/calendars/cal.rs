use chrono::prelude::*;
use chrono::Weekday;
use indexmap::set::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::error::RepeatError;
use crate::scheduling::DateRoll;

// The Saturday and Sunday weekend with no holidays, used when no calendar is supplied.
static WEEKENDS: LazyLock<Cal> = LazyLock::new(|| Cal {
    holidays: IndexSet::new(),
    week_mask: HashSet::from([Weekday::Sat, Weekday::Sun]),
});

/// A business day calendar with a singular list of holidays.
///
/// A business day calendar is formed of 2 components:
///
/// - `week_mask`: which defines the days of the week that are not general business days. In Western culture these
///   are typically `[5, 6]` for Saturday and Sunday.
/// - `holidays`: which defines specific dates that may be exceptions to the general working week, and cannot be
///   business days.
///
/// Only the date part of a holiday is significant.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cal {
    pub(crate) holidays: IndexSet<NaiveDate>,
    pub(crate) week_mask: HashSet<Weekday>,
}

impl Cal {
    /// Create a calendar.
    ///
    /// `holidays` provide a vector of dates that cannot be business days. `week_mask` is a vector of days
    /// (0=Mon,.., 6=Sun) that are excluded from the working week. At least one day of the week must
    /// remain a business day.
    pub fn try_new(holidays: Vec<NaiveDateTime>, week_mask: Vec<u8>) -> Result<Self, RepeatError> {
        let week_mask = week_mask
            .into_iter()
            .map(|v| {
                Weekday::try_from(v).map_err(|_| {
                    RepeatError::InvalidCalendar(format!("`{v}` is not a weekday in [0, 6]"))
                })
            })
            .collect::<Result<HashSet<Weekday>, RepeatError>>()?;
        if week_mask.len() == 7 {
            return Err(RepeatError::InvalidCalendar(
                "`week_mask` cannot exclude every day of the week".to_string(),
            ));
        }
        Ok(Cal {
            holidays: holidays.iter().map(|d| d.date()).collect(),
            week_mask,
        })
    }

    /// Return the default calendar: Saturday and Sunday weekends and no holidays.
    pub fn weekends() -> &'static Cal {
        &WEEKENDS
    }
}

impl DateRoll for Cal {
    fn is_weekday(&self, date: &NaiveDateTime) -> bool {
        !self.week_mask.contains(&date.weekday())
    }

    fn is_holiday(&self, date: &NaiveDateTime) -> bool {
        self.holidays.contains(&date.date())
    }
}
